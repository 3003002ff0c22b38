use std::str::FromStr;

use audittrail_core::AppError;
use serde::{Deserialize, Serialize};

/// Permissions enforced by audit trail policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows listing and inspecting audit trail events.
    ViewAuditTrail,
    /// Allows changing which audit trail events get recorded.
    ManageAuditTrailSettings,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewAuditTrail => "audit_trail.view",
            Self::ManageAuditTrailSettings => "audit_trail.settings.manage",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ViewAuditTrail,
            Permission::ManageAuditTrailSettings,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "audit_trail.view" => Ok(Self::ViewAuditTrail),
            "audit_trail.settings.manage" => Ok(Self::ManageAuditTrailSettings),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}
