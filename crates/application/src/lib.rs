//! Application services and ports for the audit trail.

#![forbid(unsafe_code)]

mod audit_trail_admin_service;
mod audit_trail_manager;
mod audit_trail_ports;
mod authorization_service;
mod display_manager;
mod site_service;

pub use audit_trail_admin_service::{
    AuditTrailAdminService, AuditTrailDetailViewModel, AuditTrailEventSummaryViewModel,
    AuditTrailViewModel, IndexAuditTrailInput,
};
pub use audit_trail_manager::{
    AuditTrailEventProvider, AuditTrailManager, ContentAuditTrailEventProvider,
    UserAuditTrailEventProvider, build_event_catalog, default_event_providers,
};
pub use audit_trail_ports::{
    AuditTrailEventPage, AuditTrailEventQuery, AuditTrailEventRepository,
    RecordAuditTrailEventInput, SiteSettings, SiteSettingsRepository,
};
pub use authorization_service::{AuthorizationRepository, AuthorizationService};
pub use display_manager::{
    AuditTrailDisplayManager, DisplayType, Shape, ShapeAuditTrailDisplayManager,
};
pub use site_service::SiteService;
