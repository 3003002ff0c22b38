use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

/// Renderable fragment for the display layer.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/shape-response.ts"
)]
pub struct ShapeResponse {
    pub shape_type: String,
    pub display_type: Option<String>,
    pub alternates: Vec<String>,
    #[ts(type = "Record<string, unknown>")]
    pub properties: Value,
}

/// API representation of an audit trail event.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-trail-event-response.ts"
)]
pub struct AuditTrailEventResponse {
    pub event_id: String,
    pub category: String,
    pub name: String,
    pub full_name: String,
    pub correlation_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub client_ip_address: Option<String>,
    pub created_at: String,
    #[ts(type = "unknown")]
    pub data: Value,
}

/// API representation of an event category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/category-response.ts"
)]
pub struct CategoryResponse {
    pub name: String,
    pub localized_name: String,
}

/// API representation of an event descriptor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-trail-event-descriptor-response.ts"
)]
pub struct AuditTrailEventDescriptorResponse {
    pub name: String,
    pub full_name: String,
    pub localized_name: String,
    pub description: Option<String>,
    pub category: CategoryResponse,
    pub is_enabled_by_default: bool,
    pub is_mandatory: bool,
}

/// One row of the audit trail listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-trail-event-summary-response.ts"
)]
pub struct AuditTrailEventSummaryResponse {
    pub event: AuditTrailEventResponse,
    pub event_descriptor: AuditTrailEventDescriptorResponse,
    pub category_descriptor: CategoryResponse,
    pub summary_shape: ShapeResponse,
    pub actions_shape: ShapeResponse,
}

/// Pager values of the audit trail listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pager-response.ts"
)]
pub struct PagerResponse {
    pub page: u32,
    pub page_size: u32,
    #[ts(type = "number")]
    pub total_item_count: u64,
    #[ts(type = "number")]
    pub total_pages: u64,
}

/// Audit trail listing page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-trail-view-response.ts"
)]
pub struct AuditTrailViewResponse {
    pub events: Vec<AuditTrailEventSummaryResponse>,
    pub filters_shape: ShapeResponse,
    pub order_by: String,
    pub pager: PagerResponse,
    pub pager_shape: ShapeResponse,
}

/// Audit trail event page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-trail-detail-response.ts"
)]
pub struct AuditTrailDetailResponse {
    pub event: AuditTrailEventResponse,
    pub descriptor: AuditTrailEventDescriptorResponse,
    pub details_shape: ShapeResponse,
}
