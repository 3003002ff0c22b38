use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use audittrail_application::{
    AuditTrailEventPage, AuditTrailEventQuery, AuditTrailEventRepository,
};
use audittrail_core::{AppError, AppResult, TenantId};
use audittrail_domain::{AuditTrailEvent, AuditTrailOrderBy};

/// PostgreSQL-backed audit trail event store.
#[derive(Clone)]
pub struct PostgresAuditTrailEventRepository {
    pool: PgPool,
}

impl PostgresAuditTrailEventRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditTrailEventRow {
    id: String,
    category: String,
    name: String,
    correlation_id: Option<String>,
    user_id: Option<String>,
    user_name: Option<String>,
    client_ip_address: Option<String>,
    created_at: DateTime<Utc>,
    data: Value,
}

impl From<AuditTrailEventRow> for AuditTrailEvent {
    fn from(row: AuditTrailEventRow) -> Self {
        Self {
            event_id: row.id,
            category: row.category,
            name: row.name,
            correlation_id: row.correlation_id,
            user_id: row.user_id,
            user_name: row.user_name,
            client_ip_address: row.client_ip_address,
            created_at: row.created_at,
            data: row.data,
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        category,
        name,
        correlation_id,
        user_id,
        user_name,
        client_ip_address,
        created_at,
        data
    FROM audit_trail_events
"#;

const FILTER_CLAUSE: &str = r#"
    WHERE tenant_id = $1
        AND ($2::TEXT IS NULL OR category = $2)
        AND ($3::TEXT IS NULL OR name = $3)
        AND ($4::TEXT IS NULL OR user_name = $4)
        AND ($5::TEXT IS NULL OR correlation_id = $5)
        AND ($6::TIMESTAMPTZ IS NULL OR created_at >= $6)
        AND ($7::TIMESTAMPTZ IS NULL OR created_at <= $7)
"#;

fn order_clause(order_by: AuditTrailOrderBy) -> &'static str {
    match order_by {
        AuditTrailOrderBy::DateDescending => "ORDER BY created_at DESC, id",
        AuditTrailOrderBy::CategoryAscending => "ORDER BY category ASC, created_at DESC, id",
        AuditTrailOrderBy::EventAscending => "ORDER BY name ASC, created_at DESC, id",
    }
}

#[async_trait]
impl AuditTrailEventRepository for PostgresAuditTrailEventRepository {
    async fn query_events(
        &self,
        tenant_id: TenantId,
        query: AuditTrailEventQuery,
    ) -> AppResult<AuditTrailEventPage> {
        let offset = i64::try_from(query.offset).map_err(|_| {
            AppError::Validation(format!("page offset {} is out of range", query.offset))
        })?;
        let criteria = &query.criteria;

        let total_count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM audit_trail_events {FILTER_CLAUSE}"
        ))
        .bind(tenant_id.as_uuid())
        .bind(criteria.category.as_deref())
        .bind(criteria.event.as_deref())
        .bind(criteria.user_name.as_deref())
        .bind(criteria.correlation_id.as_deref())
        .bind(criteria.from)
        .bind(criteria.to)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to count audit trail events: {error}"))
        })?;

        let rows = sqlx::query_as::<_, AuditTrailEventRow>(&format!(
            "{SELECT_COLUMNS} {FILTER_CLAUSE} {} LIMIT $8 OFFSET $9",
            order_clause(query.order_by)
        ))
        .bind(tenant_id.as_uuid())
        .bind(criteria.category.as_deref())
        .bind(criteria.event.as_deref())
        .bind(criteria.user_name.as_deref())
        .bind(criteria.correlation_id.as_deref())
        .bind(criteria.from)
        .bind(criteria.to)
        .bind(i64::from(query.limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list audit trail events: {error}"))
        })?;

        debug!(%tenant_id, rows = rows.len(), total_count, "audit trail page loaded");

        Ok(AuditTrailEventPage {
            events: rows.into_iter().map(AuditTrailEvent::from).collect(),
            total_count: u64::try_from(total_count).unwrap_or_default(),
        })
    }

    async fn find_event(
        &self,
        tenant_id: TenantId,
        event_id: &str,
    ) -> AppResult<Option<AuditTrailEvent>> {
        let row = sqlx::query_as::<_, AuditTrailEventRow>(&format!(
            "{SELECT_COLUMNS} WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load audit trail event '{event_id}': {error}"
            ))
        })?;

        Ok(row.map(AuditTrailEvent::from))
    }

    async fn append_event(&self, tenant_id: TenantId, event: AuditTrailEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_trail_events (
                id,
                tenant_id,
                category,
                name,
                correlation_id,
                user_id,
                user_name,
                client_ip_address,
                created_at,
                data
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(event.event_id.as_str())
        .bind(tenant_id.as_uuid())
        .bind(event.category)
        .bind(event.name)
        .bind(event.correlation_id)
        .bind(event.user_id)
        .bind(event.user_name)
        .bind(event.client_ip_address)
        .bind(event.created_at)
        .bind(event.data)
        .execute(&self.pool)
        .await
        .map_err(|error| match error {
            sqlx::Error::Database(database_error) if database_error.is_unique_violation() => {
                AppError::Conflict(format!(
                    "audit trail event '{}' already exists",
                    event.event_id
                ))
            }
            other => AppError::Internal(format!("failed to append audit trail event: {other}")),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests;
