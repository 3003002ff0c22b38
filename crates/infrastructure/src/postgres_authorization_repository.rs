use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use audittrail_application::AuthorizationRepository;
use audittrail_core::{AppError, AppResult, TenantId};
use audittrail_domain::Permission;

/// PostgreSQL-backed role grant lookups.
///
/// Grants are shared with other modules, so values this crate does not know
/// are skipped rather than treated as corrupt.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn list_permissions_for_subject(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Vec<Permission>> {
        let granted = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT grants.permission
            FROM rbac_subject_roles AS subject_roles
            INNER JOIN rbac_roles AS roles
                ON roles.id = subject_roles.role_id
                AND roles.tenant_id = subject_roles.tenant_id
            INNER JOIN rbac_role_grants AS grants
                ON grants.role_id = roles.id
            WHERE subject_roles.tenant_id = $1
                AND subject_roles.subject = $2
                AND grants.permission LIKE 'audit_trail.%'
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load audit trail grants for '{subject}': {error}"
            ))
        })?;

        Ok(granted
            .iter()
            .filter_map(|value| match Permission::from_str(value) {
                Ok(permission) => Some(permission),
                Err(_) => {
                    warn!(%tenant_id, permission = value.as_str(), "ignoring unknown grant");
                    None
                }
            })
            .collect())
    }
}
