use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded audit trail event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrailEvent {
    /// Stable event identifier.
    pub event_id: String,
    /// Category the event belongs to, e.g. `content`.
    pub category: String,
    /// Event name inside its category, e.g. `published`.
    pub name: String,
    /// Identifier shared by events describing the same underlying object.
    pub correlation_id: Option<String>,
    /// Identifier of the acting user.
    pub user_id: Option<String>,
    /// Display name of the acting user.
    pub user_name: Option<String>,
    /// Client address captured when the event was recorded.
    pub client_ip_address: Option<String>,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
    /// Event-specific payload.
    pub data: Value,
}

impl AuditTrailEvent {
    /// Returns the catalog key of the event, `{category}.{name}`.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(self.category.as_str(), self.name.as_str())
    }
}

pub(crate) fn full_name(category: &str, name: &str) -> String {
    format!("{category}.{name}")
}
