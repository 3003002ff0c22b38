use audittrail_application::{AuditTrailEventQuery, AuditTrailEventRepository};
use audittrail_core::{AppError, TenantId};
use audittrail_domain::{AuditTrailEvent, AuditTrailFilterCriteria, AuditTrailOrderBy};
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresAuditTrailEventRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for audit trail event tests: {error}");
    }

    Some(pool)
}

fn event(event_id: &str, category: &str, name: &str, minutes_ago: i64) -> AuditTrailEvent {
    AuditTrailEvent {
        event_id: event_id.to_owned(),
        category: category.to_owned(),
        name: name.to_owned(),
        correlation_id: Some("item-1".to_owned()),
        user_id: Some("u-1".to_owned()),
        user_name: Some("alice".to_owned()),
        client_ip_address: Some("127.0.0.1".to_owned()),
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        data: json!({ "minutes_ago": minutes_ago }),
    }
}

fn query(
    criteria: AuditTrailFilterCriteria,
    order_by: AuditTrailOrderBy,
) -> AuditTrailEventQuery {
    AuditTrailEventQuery {
        offset: 0,
        limit: 10,
        criteria,
        order_by,
    }
}

#[tokio::test]
async fn query_filters_orders_and_counts_within_tenant() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAuditTrailEventRepository::new(pool);
    let tenant_id = TenantId::new();
    let other_tenant_id = TenantId::new();
    let suffix = tenant_id.to_string();

    for (tenant, stored) in [
        (tenant_id, event(&format!("a-{suffix}"), "content", "published", 30)),
        (tenant_id, event(&format!("b-{suffix}"), "user", "logged_in", 10)),
        (tenant_id, event(&format!("c-{suffix}"), "content", "created", 20)),
        (other_tenant_id, event(&format!("d-{suffix}"), "content", "published", 5)),
    ] {
        assert!(repository.append_event(tenant, stored).await.is_ok());
    }

    let newest_first = repository
        .query_events(
            tenant_id,
            query(AuditTrailFilterCriteria::default(), AuditTrailOrderBy::DateDescending),
        )
        .await;
    let Ok(newest_first) = newest_first else {
        panic!("query should succeed");
    };
    assert_eq!(newest_first.total_count, 3);
    assert_eq!(newest_first.events[0].name, "logged_in");
    assert_eq!(newest_first.events[2].name, "published");

    let content_only = repository
        .query_events(
            tenant_id,
            query(
                AuditTrailFilterCriteria {
                    category: Some("content".to_owned()),
                    ..AuditTrailFilterCriteria::default()
                },
                AuditTrailOrderBy::EventAscending,
            ),
        )
        .await;
    let Ok(content_only) = content_only else {
        panic!("filtered query should succeed");
    };
    assert_eq!(content_only.total_count, 2);
    assert_eq!(content_only.events[0].name, "created");
}

#[tokio::test]
async fn find_event_is_tenant_scoped_and_duplicates_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAuditTrailEventRepository::new(pool);
    let tenant_id = TenantId::new();
    let stored = event(&format!("find-{tenant_id}"), "user", "created", 1);

    assert!(repository.append_event(tenant_id, stored.clone()).await.is_ok());
    let duplicate = repository.append_event(tenant_id, stored.clone()).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let found = repository
        .find_event(tenant_id, stored.event_id.as_str())
        .await;
    assert!(matches!(found, Ok(Some(ref value)) if value.data == stored.data));

    let elsewhere = repository
        .find_event(TenantId::new(), stored.event_id.as_str())
        .await;
    assert!(matches!(elsewhere, Ok(None)));
}
