use std::collections::HashMap;
use std::sync::Arc;

use audittrail_core::{AppError, AppResult, UserIdentity};
use audittrail_domain::{
    AuditTrailEvent, AuditTrailEventDescriptor, AuditTrailFilters, AuditTrailListingQuery,
    AuditTrailOrderBy, CategoryReference, FilterValidation, Pager, PagerParameters, PagerSummary,
    Permission,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    AuditTrailDisplayManager, AuditTrailManager, AuthorizationService, DisplayType, Shape,
    SiteService,
};

/// Request values for the audit trail listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexAuditTrailInput {
    /// Raw paging values.
    pub pager_parameters: PagerParameters,
    /// Requested order, date descending when absent.
    pub order_by: Option<AuditTrailOrderBy>,
    /// Filters parsed from the query string.
    pub filters: AuditTrailFilters,
    /// Errors raised while binding the paging and ordering values.
    pub parameter_validation: FilterValidation,
}

impl From<AuditTrailListingQuery> for IndexAuditTrailInput {
    fn from(query: AuditTrailListingQuery) -> Self {
        Self {
            pager_parameters: query.pager_parameters,
            order_by: query.order_by,
            filters: query.filters,
            parameter_validation: query.validation,
        }
    }
}

/// One listed event with everything needed to render its row.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditTrailEventSummaryViewModel {
    /// The event itself.
    pub event: AuditTrailEvent,
    /// Descriptor matched by full name, or the default descriptor.
    pub event_descriptor: AuditTrailEventDescriptor,
    /// Category of the descriptor.
    pub category_descriptor: CategoryReference,
    /// `SummaryAdmin` event shape.
    pub summary_shape: Shape,
    /// `SummaryAdmin` actions shape.
    pub actions_shape: Shape,
}

/// Audit trail listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditTrailViewModel {
    /// Listed events, empty when filter binding failed.
    pub events: Vec<AuditTrailEventSummaryViewModel>,
    /// Filter form shape.
    pub filters_shape: Shape,
    /// Order the events were sorted by.
    pub order_by: AuditTrailOrderBy,
    /// Pager values, computed from the query's total count.
    pub pager: PagerSummary,
    /// Pager shape.
    pub pager_shape: Shape,
}

/// Audit trail event page.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditTrailDetailViewModel {
    /// The event itself.
    pub event: AuditTrailEvent,
    /// Descriptor matched by full name, or the default descriptor.
    pub descriptor: AuditTrailEventDescriptor,
    /// `Detail` event shape.
    pub details_shape: Shape,
}

/// Admin use-cases behind the audit trail pages.
#[derive(Clone)]
pub struct AuditTrailAdminService {
    authorization_service: AuthorizationService,
    site_service: SiteService,
    audit_trail_manager: AuditTrailManager,
    display_manager: Arc<dyn AuditTrailDisplayManager>,
}

impl AuditTrailAdminService {
    /// Creates the service from its collaborators.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        site_service: SiteService,
        audit_trail_manager: AuditTrailManager,
        display_manager: Arc<dyn AuditTrailDisplayManager>,
    ) -> Self {
        Self {
            authorization_service,
            site_service,
            audit_trail_manager,
            display_manager,
        }
    }

    /// Builds one filtered, ordered page of the audit trail.
    ///
    /// When filter binding fails the listing is emptied, but the pager still
    /// reports the total count of the query that ran.
    pub async fn index(
        &self,
        actor: &UserIdentity,
        input: IndexAuditTrailInput,
    ) -> AppResult<AuditTrailViewModel> {
        self.authorization_service
            .require_permission(actor, Permission::ViewAuditTrail)
            .await?;

        let tenant_id = actor.tenant_id();
        let site_settings = self.site_service.site_settings(tenant_id).await?;
        let pager = Pager::new(
            input.pager_parameters,
            site_settings.page_size,
            site_settings.max_page_size,
        );
        let bound = input.filters.bind();
        let mut validation = input.parameter_validation;
        validation.merge(bound.validation);
        let order_by = input.order_by.unwrap_or_default();

        let mut search_result = self
            .audit_trail_manager
            .get_events(tenant_id, &pager, &bound.criteria, order_by)
            .await?;
        if !validation.is_valid() {
            warn!(
                subject = actor.subject(),
                errors = validation.errors().len(),
                "audit trail query failed validation, hiding events"
            );
            search_result.events.clear();
        }

        let pager_summary = pager.summarize(search_result.total_count);
        let pager_shape = Shape::new("Pager")
            .with_property("page", json!(pager_summary.page))
            .with_property("page_size", json!(pager_summary.page_size))
            .with_property("total_item_count", json!(pager_summary.total_item_count));

        let event_descriptors: HashMap<&str, &AuditTrailEventDescriptor> = self
            .audit_trail_manager
            .describe_categories()
            .iter()
            .flat_map(|category| category.events.iter())
            .map(|descriptor| (descriptor.full_name.as_str(), descriptor))
            .collect();

        let mut events = Vec::with_capacity(search_result.events.len());
        for event in search_result.events {
            let event_descriptor = event_descriptors
                .get(event.full_name().as_str())
                .map(|descriptor| (*descriptor).clone())
                .unwrap_or_else(|| AuditTrailEventDescriptor::default_for(&event));

            let summary_shape = self
                .display_manager
                .build_display_event(&event, DisplayType::SummaryAdmin)
                .await?;
            let actions_shape = self
                .display_manager
                .build_display_actions(&event, DisplayType::SummaryAdmin)
                .await?;

            events.push(AuditTrailEventSummaryViewModel {
                category_descriptor: event_descriptor.category.clone(),
                event,
                event_descriptor,
                summary_shape,
                actions_shape,
            });
        }

        let filters_shape = self
            .display_manager
            .build_display_filters(&input.filters, &validation)
            .await?;

        debug!(
            %tenant_id,
            listed = events.len(),
            total = pager_summary.total_item_count,
            "audit trail page built"
        );

        Ok(AuditTrailViewModel {
            events,
            filters_shape,
            order_by,
            pager: pager_summary,
            pager_shape,
        })
    }

    /// Builds the page for one audit trail event.
    pub async fn detail(
        &self,
        actor: &UserIdentity,
        audit_trail_event_id: &str,
    ) -> AppResult<AuditTrailDetailViewModel> {
        self.authorization_service
            .require_permission(actor, Permission::ViewAuditTrail)
            .await?;

        let event = self
            .audit_trail_manager
            .get_event(actor.tenant_id(), audit_trail_event_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "audit trail event '{audit_trail_event_id}' does not exist"
                ))
            })?;

        let descriptor = self.audit_trail_manager.describe_event(&event);
        let details_shape = self
            .display_manager
            .build_display_event(&event, DisplayType::Detail)
            .await?;

        Ok(AuditTrailDetailViewModel {
            event,
            descriptor,
            details_shape,
        })
    }
}
