mod conversions;
mod types;

pub use types::{AuditTrailDetailResponse, AuditTrailViewResponse};
