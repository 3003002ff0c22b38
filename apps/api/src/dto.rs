mod audit_trail;
mod common;

pub use audit_trail::{AuditTrailDetailResponse, AuditTrailViewResponse};
pub use common::{BootstrapRequest, HealthResponse, UserIdentityResponse};
