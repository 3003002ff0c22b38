use std::sync::Arc;

use async_trait::async_trait;
use audittrail_core::{AppError, AppResult, TenantId};
use audittrail_domain::{
    AuditTrailCategoryDescriptor, AuditTrailEvent, AuditTrailFilterCriteria, AuditTrailOrderBy,
    Pager, PagerParameters,
};
use serde_json::json;
use tokio::sync::Mutex;

use super::{
    AuditTrailEventProvider, AuditTrailManager, build_event_catalog, default_event_providers,
};
use crate::{
    AuditTrailEventPage, AuditTrailEventQuery, AuditTrailEventRepository,
    RecordAuditTrailEventInput,
};

#[derive(Default)]
struct RecordingRepository {
    events: Mutex<Vec<(TenantId, AuditTrailEvent)>>,
    queries: Mutex<Vec<AuditTrailEventQuery>>,
}

#[async_trait]
impl AuditTrailEventRepository for RecordingRepository {
    async fn query_events(
        &self,
        tenant_id: TenantId,
        query: AuditTrailEventQuery,
    ) -> AppResult<AuditTrailEventPage> {
        self.queries.lock().await.push(query);
        let events: Vec<AuditTrailEvent> = self
            .events
            .lock()
            .await
            .iter()
            .filter(|(stored_tenant_id, _)| stored_tenant_id == &tenant_id)
            .map(|(_, event)| event.clone())
            .collect();

        Ok(AuditTrailEventPage {
            total_count: events.len() as u64,
            events,
        })
    }

    async fn find_event(
        &self,
        tenant_id: TenantId,
        event_id: &str,
    ) -> AppResult<Option<AuditTrailEvent>> {
        Ok(self
            .events
            .lock()
            .await
            .iter()
            .find(|(stored_tenant_id, event)| {
                stored_tenant_id == &tenant_id && event.event_id == event_id
            })
            .map(|(_, event)| event.clone()))
    }

    async fn append_event(&self, tenant_id: TenantId, event: AuditTrailEvent) -> AppResult<()> {
        self.events.lock().await.push((tenant_id, event));
        Ok(())
    }
}

fn manager(repository: Arc<RecordingRepository>) -> AuditTrailManager {
    AuditTrailManager::new(
        repository,
        Arc::new(build_event_catalog(&default_event_providers())),
    )
}

fn record_input(category: &str, name: &str) -> RecordAuditTrailEventInput {
    RecordAuditTrailEventInput {
        category: category.to_owned(),
        name: name.to_owned(),
        correlation_id: Some("item-1".to_owned()),
        user_id: Some("u-1".to_owned()),
        user_name: Some("alice".to_owned()),
        client_ip_address: None,
        data: json!({ "title": "Home" }),
    }
}

#[tokio::test]
async fn get_events_translates_pager_into_offset_and_limit() {
    let repository = Arc::new(RecordingRepository::default());
    let manager = manager(repository.clone());
    let pager = Pager::new(
        PagerParameters {
            page: Some(3),
            page_size: Some(20),
        },
        10,
        100,
    );

    let result = manager
        .get_events(
            TenantId::new(),
            &pager,
            &AuditTrailFilterCriteria::default(),
            AuditTrailOrderBy::EventAscending,
        )
        .await;
    assert!(result.is_ok());

    let queries = repository.queries.lock().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].offset, 40);
    assert_eq!(queries[0].limit, 20);
    assert_eq!(queries[0].order_by, AuditTrailOrderBy::EventAscending);
}

#[tokio::test]
async fn record_event_assigns_identity_and_persists() {
    let repository = Arc::new(RecordingRepository::default());
    let manager = manager(repository.clone());
    let tenant_id = TenantId::new();

    let recorded = manager
        .record_event(tenant_id, record_input("content", "published"))
        .await;
    let Ok(Some(event)) = recorded else {
        panic!("expected the event to be recorded");
    };
    assert!(!event.event_id.is_empty());

    let found = manager.get_event(tenant_id, event.event_id.as_str()).await;
    assert!(matches!(found, Ok(Some(stored)) if stored == event));
}

#[tokio::test]
async fn record_event_skips_types_disabled_by_default() {
    let repository = Arc::new(RecordingRepository::default());
    let manager = manager(repository.clone());

    let recorded = manager
        .record_event(TenantId::new(), record_input("user", "password_reset"))
        .await;
    assert!(matches!(recorded, Ok(None)));
    assert!(repository.events.lock().await.is_empty());
}

#[tokio::test]
async fn record_event_rejects_blank_names() {
    let manager = manager(Arc::new(RecordingRepository::default()));

    let recorded = manager
        .record_event(TenantId::new(), record_input("content", "  "))
        .await;
    assert!(matches!(recorded, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn blank_event_id_is_never_looked_up() {
    let repository = Arc::new(RecordingRepository::default());
    let manager = manager(repository);

    let found = manager.get_event(TenantId::new(), "   ").await;
    assert!(matches!(found, Ok(None)));
}

#[test]
fn describe_event_uses_catalog_then_default() {
    let manager = manager(Arc::new(RecordingRepository::default()));
    let mut event = AuditTrailEvent {
        event_id: "evt-1".to_owned(),
        category: "user".to_owned(),
        name: "logged_in".to_owned(),
        correlation_id: None,
        user_id: None,
        user_name: None,
        client_ip_address: None,
        created_at: chrono::Utc::now(),
        data: json!(null),
    };
    assert_eq!(manager.describe_event(&event).localized_name, "Logged in");

    event.name = "impersonated".to_owned();
    let fallback = manager.describe_event(&event);
    assert_eq!(fallback.localized_name, "impersonated");
    assert_eq!(fallback.category.name, "user");
}

struct ShadowingProvider;

impl AuditTrailEventProvider for ShadowingProvider {
    fn describe(&self) -> AuditTrailCategoryDescriptor {
        AuditTrailCategoryDescriptor::new("content", "Pages")
            .with_event("published", "Went live", None)
    }
}

#[test]
fn earlier_providers_win_on_duplicate_event_types() {
    let mut providers = default_event_providers();
    providers.push(Box::new(ShadowingProvider));
    let catalog = build_event_catalog(&providers);

    assert_eq!(
        catalog
            .find("content.published")
            .map(|descriptor| descriptor.localized_name.as_str()),
        Some("Published")
    );
}
