use async_trait::async_trait;

use audittrail_core::{AppResult, TenantId};
use audittrail_domain::{AuditTrailEvent, AuditTrailFilterCriteria, AuditTrailOrderBy};
use serde_json::Value;

/// Query parameters for one page of audit trail events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTrailEventQuery {
    /// Number of events skipped before the page.
    pub offset: u64,
    /// Maximum events returned.
    pub limit: u32,
    /// Filter criteria bound from the request.
    pub criteria: AuditTrailFilterCriteria,
    /// Requested sort order.
    pub order_by: AuditTrailOrderBy,
}

/// One page of events plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditTrailEventPage {
    /// Events on the requested page.
    pub events: Vec<AuditTrailEvent>,
    /// Total events matching the criteria across all pages.
    pub total_count: u64,
}

/// Input for recording a new audit trail event.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAuditTrailEventInput {
    /// Event category.
    pub category: String,
    /// Event name inside the category.
    pub name: String,
    /// Optional correlation id.
    pub correlation_id: Option<String>,
    /// Acting user id.
    pub user_id: Option<String>,
    /// Acting user name.
    pub user_name: Option<String>,
    /// Client address.
    pub client_ip_address: Option<String>,
    /// Event payload.
    pub data: Value,
}

/// Storage port for audit trail events.
#[async_trait]
pub trait AuditTrailEventRepository: Send + Sync {
    /// Returns one filtered, ordered page of events with the total match count.
    async fn query_events(
        &self,
        tenant_id: TenantId,
        query: AuditTrailEventQuery,
    ) -> AppResult<AuditTrailEventPage>;

    /// Finds one event by id.
    async fn find_event(
        &self,
        tenant_id: TenantId,
        event_id: &str,
    ) -> AppResult<Option<AuditTrailEvent>>;

    /// Appends an event.
    async fn append_event(&self, tenant_id: TenantId, event: AuditTrailEvent) -> AppResult<()>;
}

/// Site-wide settings relevant to audit trail listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSettings {
    /// Default number of rows per listing page.
    pub page_size: u32,
    /// Upper bound on caller supplied page sizes, `0` for no bound.
    pub max_page_size: u32,
}

/// Settings port for site-wide listing defaults.
#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    /// Returns settings for a tenant.
    async fn site_settings(&self, tenant_id: TenantId) -> AppResult<SiteSettings>;
}
