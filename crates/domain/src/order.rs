use std::str::FromStr;

use audittrail_core::AppError;
use serde::{Deserialize, Serialize};

/// Sort order applied to audit trail listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditTrailOrderBy {
    /// Newest events first.
    #[default]
    DateDescending,
    /// Alphabetical by category, newest first inside a category.
    CategoryAscending,
    /// Alphabetical by event name, newest first inside a name.
    EventAscending,
}

impl AuditTrailOrderBy {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateDescending => "date_descending",
            Self::CategoryAscending => "category_ascending",
            Self::EventAscending => "event_ascending",
        }
    }
}

impl FromStr for AuditTrailOrderBy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "date_descending" => Ok(Self::DateDescending),
            "category_ascending" => Ok(Self::CategoryAscending),
            "event_ascending" => Ok(Self::EventAscending),
            _ => Err(AppError::Validation(format!(
                "unknown audit trail order '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::AuditTrailOrderBy;

    #[test]
    fn default_order_is_newest_first() {
        assert_eq!(AuditTrailOrderBy::default(), AuditTrailOrderBy::DateDescending);
    }

    #[test]
    fn transport_values_parse() {
        assert!(matches!(
            AuditTrailOrderBy::from_str("event_ascending"),
            Ok(AuditTrailOrderBy::EventAscending)
        ));
        assert!(AuditTrailOrderBy::from_str("DateDescending").is_err());
    }
}
