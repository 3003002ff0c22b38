use std::sync::Arc;

use audittrail_core::{AppError, AppResult, TenantId};
use audittrail_domain::{
    AuditTrailCategoryDescriptor, AuditTrailEvent, AuditTrailEventCatalog,
    AuditTrailEventDescriptor, AuditTrailFilterCriteria, AuditTrailOrderBy, Pager,
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    AuditTrailEventPage, AuditTrailEventQuery, AuditTrailEventRepository,
    RecordAuditTrailEventInput,
};

mod providers;

pub use providers::{
    AuditTrailEventProvider, ContentAuditTrailEventProvider, UserAuditTrailEventProvider,
    default_event_providers,
};

/// Builds the event catalog from every provider, in order.
///
/// Event types already described by an earlier provider are dropped.
#[must_use]
pub fn build_event_catalog(
    providers: &[Box<dyn AuditTrailEventProvider>],
) -> AuditTrailEventCatalog {
    let mut catalog = AuditTrailEventCatalog::new();
    for provider in providers {
        for full_name in catalog.register(provider.describe()) {
            warn!(%full_name, "duplicate audit trail event descriptor ignored");
        }
    }

    catalog
}

/// Application service owning audit trail queries and the descriptor catalog.
#[derive(Clone)]
pub struct AuditTrailManager {
    repository: Arc<dyn AuditTrailEventRepository>,
    catalog: Arc<AuditTrailEventCatalog>,
}

impl AuditTrailManager {
    /// Creates a manager over an event store and a descriptor catalog.
    #[must_use]
    pub fn new(
        repository: Arc<dyn AuditTrailEventRepository>,
        catalog: Arc<AuditTrailEventCatalog>,
    ) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Returns one page of events matching `criteria`, sorted by `order_by`.
    pub async fn get_events(
        &self,
        tenant_id: TenantId,
        pager: &Pager,
        criteria: &AuditTrailFilterCriteria,
        order_by: AuditTrailOrderBy,
    ) -> AppResult<AuditTrailEventPage> {
        debug!(
            %tenant_id,
            page = pager.page(),
            page_size = pager.page_size(),
            order_by = order_by.as_str(),
            "querying audit trail events"
        );

        self.repository
            .query_events(
                tenant_id,
                AuditTrailEventQuery {
                    offset: pager.offset(),
                    limit: pager.page_size(),
                    criteria: criteria.clone(),
                    order_by,
                },
            )
            .await
    }

    /// Finds one event by id. Blank ids never match.
    pub async fn get_event(
        &self,
        tenant_id: TenantId,
        event_id: &str,
    ) -> AppResult<Option<AuditTrailEvent>> {
        let event_id = event_id.trim();
        if event_id.is_empty() {
            return Ok(None);
        }

        self.repository.find_event(tenant_id, event_id).await
    }

    /// Returns every described category.
    #[must_use]
    pub fn describe_categories(&self) -> &[AuditTrailCategoryDescriptor] {
        self.catalog.categories()
    }

    /// Describes one event, falling back to the default descriptor.
    #[must_use]
    pub fn describe_event(&self, event: &AuditTrailEvent) -> AuditTrailEventDescriptor {
        self.catalog.describe(event)
    }

    /// Records an event unless its descriptor is switched off.
    ///
    /// Returns `None` when the event type is neither enabled by default nor
    /// mandatory.
    pub async fn record_event(
        &self,
        tenant_id: TenantId,
        input: RecordAuditTrailEventInput,
    ) -> AppResult<Option<AuditTrailEvent>> {
        if input.category.trim().is_empty() || input.name.trim().is_empty() {
            return Err(AppError::Validation(
                "audit trail event category and name must not be empty".to_owned(),
            ));
        }

        let event = AuditTrailEvent {
            event_id: Uuid::new_v4().simple().to_string(),
            category: input.category,
            name: input.name,
            correlation_id: input.correlation_id,
            user_id: input.user_id,
            user_name: input.user_name,
            client_ip_address: input.client_ip_address,
            created_at: Utc::now(),
            data: input.data,
        };

        let descriptor = self.describe_event(&event);
        if !descriptor.is_enabled_by_default && !descriptor.is_mandatory {
            debug!(
                full_name = %descriptor.full_name,
                "audit trail event disabled, skipping"
            );
            return Ok(None);
        }

        self.repository.append_event(tenant_id, event.clone()).await?;
        info!(
            %tenant_id,
            event_id = %event.event_id,
            full_name = %descriptor.full_name,
            "audit trail event recorded"
        );

        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests;
