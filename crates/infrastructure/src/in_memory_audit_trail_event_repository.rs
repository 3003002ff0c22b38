use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use audittrail_application::{
    AuditTrailEventPage, AuditTrailEventQuery, AuditTrailEventRepository,
};
use audittrail_core::{AppError, AppResult, TenantId};
use audittrail_domain::{AuditTrailEvent, AuditTrailFilterCriteria, AuditTrailOrderBy};

/// In-memory audit trail event store.
#[derive(Debug, Default)]
pub struct InMemoryAuditTrailEventRepository {
    events: RwLock<Vec<(TenantId, AuditTrailEvent)>>,
}

impl InMemoryAuditTrailEventRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_criteria(event: &AuditTrailEvent, criteria: &AuditTrailFilterCriteria) -> bool {
    let text_matches = |expected: &Option<String>, actual: Option<&str>| {
        expected
            .as_deref()
            .is_none_or(|expected| actual == Some(expected))
    };

    text_matches(&criteria.category, Some(event.category.as_str()))
        && text_matches(&criteria.event, Some(event.name.as_str()))
        && text_matches(&criteria.user_name, event.user_name.as_deref())
        && text_matches(&criteria.correlation_id, event.correlation_id.as_deref())
        && criteria.from.is_none_or(|from| event.created_at >= from)
        && criteria.to.is_none_or(|to| event.created_at <= to)
}

fn compare(
    order_by: AuditTrailOrderBy,
    left: &AuditTrailEvent,
    right: &AuditTrailEvent,
) -> Ordering {
    let primary = match order_by {
        AuditTrailOrderBy::DateDescending => Ordering::Equal,
        AuditTrailOrderBy::CategoryAscending => left.category.cmp(&right.category),
        AuditTrailOrderBy::EventAscending => left.name.cmp(&right.name),
    };

    primary
        .then_with(|| right.created_at.cmp(&left.created_at))
        .then_with(|| left.event_id.cmp(&right.event_id))
}

#[async_trait]
impl AuditTrailEventRepository for InMemoryAuditTrailEventRepository {
    async fn query_events(
        &self,
        tenant_id: TenantId,
        query: AuditTrailEventQuery,
    ) -> AppResult<AuditTrailEventPage> {
        let events = self.events.read().await;

        let mut matching: Vec<&AuditTrailEvent> = events
            .iter()
            .filter(|(stored_tenant_id, event)| {
                stored_tenant_id == &tenant_id && matches_criteria(event, &query.criteria)
            })
            .map(|(_, event)| event)
            .collect();
        matching.sort_by(|left, right| compare(query.order_by, left, right));

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        Ok(AuditTrailEventPage {
            total_count: matching.len() as u64,
            events: matching
                .into_iter()
                .skip(offset)
                .take(query.limit as usize)
                .cloned()
                .collect(),
        })
    }

    async fn find_event(
        &self,
        tenant_id: TenantId,
        event_id: &str,
    ) -> AppResult<Option<AuditTrailEvent>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .find(|(stored_tenant_id, event)| {
                stored_tenant_id == &tenant_id && event.event_id == event_id
            })
            .map(|(_, event)| event.clone()))
    }

    async fn append_event(&self, tenant_id: TenantId, event: AuditTrailEvent) -> AppResult<()> {
        let mut events = self.events.write().await;
        if events
            .iter()
            .any(|(_, stored)| stored.event_id == event.event_id)
        {
            return Err(AppError::Conflict(format!(
                "audit trail event '{}' already exists",
                event.event_id
            )));
        }

        events.push((tenant_id, event));
        Ok(())
    }
}
