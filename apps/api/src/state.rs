use audittrail_application::{AuditTrailAdminService, AuditTrailManager};
use audittrail_core::TenantId;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub audit_trail_admin_service: AuditTrailAdminService,
    pub audit_trail_manager: AuditTrailManager,
    pub postgres_pool: Option<PgPool>,
    pub bootstrap_token: String,
    pub bootstrap_tenant_id: TenantId,
}
