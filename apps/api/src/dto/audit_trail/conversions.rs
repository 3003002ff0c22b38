use audittrail_application::{
    AuditTrailDetailViewModel, AuditTrailEventSummaryViewModel, AuditTrailViewModel, Shape,
};
use audittrail_domain::{
    AuditTrailEvent, AuditTrailEventDescriptor, CategoryReference, PagerSummary,
};
use serde_json::Value;

use super::types::{
    AuditTrailDetailResponse, AuditTrailEventDescriptorResponse, AuditTrailEventResponse,
    AuditTrailEventSummaryResponse, AuditTrailViewResponse, CategoryResponse, PagerResponse,
    ShapeResponse,
};

impl From<Shape> for ShapeResponse {
    fn from(value: Shape) -> Self {
        Self {
            shape_type: value.shape_type,
            display_type: value.display_type,
            alternates: value.alternates,
            properties: Value::Object(value.properties),
        }
    }
}

impl From<AuditTrailEvent> for AuditTrailEventResponse {
    fn from(value: AuditTrailEvent) -> Self {
        Self {
            full_name: value.full_name(),
            event_id: value.event_id,
            category: value.category,
            name: value.name,
            correlation_id: value.correlation_id,
            user_id: value.user_id,
            user_name: value.user_name,
            client_ip_address: value.client_ip_address,
            created_at: value.created_at.to_rfc3339(),
            data: value.data,
        }
    }
}

impl From<CategoryReference> for CategoryResponse {
    fn from(value: CategoryReference) -> Self {
        Self {
            name: value.name,
            localized_name: value.localized_name,
        }
    }
}

impl From<AuditTrailEventDescriptor> for AuditTrailEventDescriptorResponse {
    fn from(value: AuditTrailEventDescriptor) -> Self {
        Self {
            name: value.name,
            full_name: value.full_name,
            localized_name: value.localized_name,
            description: value.description,
            category: CategoryResponse::from(value.category),
            is_enabled_by_default: value.is_enabled_by_default,
            is_mandatory: value.is_mandatory,
        }
    }
}

impl From<AuditTrailEventSummaryViewModel> for AuditTrailEventSummaryResponse {
    fn from(value: AuditTrailEventSummaryViewModel) -> Self {
        Self {
            event: AuditTrailEventResponse::from(value.event),
            event_descriptor: AuditTrailEventDescriptorResponse::from(value.event_descriptor),
            category_descriptor: CategoryResponse::from(value.category_descriptor),
            summary_shape: ShapeResponse::from(value.summary_shape),
            actions_shape: ShapeResponse::from(value.actions_shape),
        }
    }
}

impl From<PagerSummary> for PagerResponse {
    fn from(value: PagerSummary) -> Self {
        Self {
            page: value.page,
            page_size: value.page_size,
            total_item_count: value.total_item_count,
            total_pages: value.total_pages,
        }
    }
}

impl From<AuditTrailViewModel> for AuditTrailViewResponse {
    fn from(value: AuditTrailViewModel) -> Self {
        Self {
            events: value
                .events
                .into_iter()
                .map(AuditTrailEventSummaryResponse::from)
                .collect(),
            filters_shape: ShapeResponse::from(value.filters_shape),
            order_by: value.order_by.as_str().to_owned(),
            pager: PagerResponse::from(value.pager),
            pager_shape: ShapeResponse::from(value.pager_shape),
        }
    }
}

impl From<AuditTrailDetailViewModel> for AuditTrailDetailResponse {
    fn from(value: AuditTrailDetailViewModel) -> Self {
        Self {
            event: AuditTrailEventResponse::from(value.event),
            descriptor: AuditTrailEventDescriptorResponse::from(value.descriptor),
            details_shape: ShapeResponse::from(value.details_shape),
        }
    }
}
