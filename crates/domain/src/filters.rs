use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Query keys consumed by paging and ordering rather than filtering.
const RESERVED_KEYS: &[&str] = &["page", "page_size", "order_by"];

/// Filter key/value pairs taken from a listing query string.
///
/// Repeated keys are preserved in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrailFilters {
    entries: Vec<(String, String)>,
}

impl AuditTrailFilters {
    /// Parses a raw `application/x-www-form-urlencoded` query string.
    ///
    /// Empty values and reserved paging keys are skipped.
    #[must_use]
    pub fn from_query(raw_query: Option<&str>) -> Self {
        let entries = raw_query
            .map(|query| {
                url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                    .filter(|(key, value)| {
                        !value.trim().is_empty() && !RESERVED_KEYS.contains(&key.as_ref())
                    })
                    .map(|(key, value)| (key.into_owned(), value.trim().to_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self { entries }
    }

    /// Returns every key/value pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the first value supplied for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.iter()
            .find_map(|(entry_key, value)| (entry_key == key).then_some(value))
    }

    /// Returns whether no filter was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds known keys into query criteria, collecting validation errors.
    ///
    /// A value that fails validation is reported and left out of the criteria.
    #[must_use]
    pub fn bind(&self) -> BoundFilters {
        let mut validation = FilterValidation::default();
        let text = |key: &str| self.first(key).map(str::to_owned);

        let from = self
            .first("from")
            .and_then(|value| bind_timestamp("from", value, false, &mut validation));
        let to = self
            .first("to")
            .and_then(|value| bind_timestamp("to", value, true, &mut validation));

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                validation.add("to", "'to' must not be earlier than 'from'");
            }
        }

        BoundFilters {
            criteria: AuditTrailFilterCriteria {
                category: text("category"),
                event: text("event"),
                user_name: text("user_name"),
                correlation_id: text("correlation_id"),
                from,
                to,
            },
            validation,
        }
    }
}

fn bind_timestamp(
    key: &str,
    value: &str,
    end_of_day: bool,
    validation: &mut FilterValidation,
) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| {
            if end_of_day {
                date.and_hms_nano_opt(23, 59, 59, 999_999_999)
            } else {
                date.and_hms_opt(0, 0, 0)
            }
        })
        .map(|timestamp| timestamp.and_utc());

    if parsed.is_none() {
        validation.add(
            key,
            format!("'{value}' is not a valid date, expected YYYY-MM-DD or RFC3339"),
        );
    }

    parsed
}

/// Typed criteria understood by audit trail queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrailFilterCriteria {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact event name match.
    pub event: Option<String>,
    /// Exact user name match.
    pub user_name: Option<String>,
    /// Exact correlation id match.
    pub correlation_id: Option<String>,
    /// Inclusive lower bound on the recording time.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the recording time.
    pub to: Option<DateTime<Utc>>,
}

/// One rejected filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterError {
    /// Filter key that failed.
    pub key: String,
    /// Human readable reason.
    pub message: String,
}

/// Errors collected while binding filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValidation {
    errors: Vec<FilterError>,
}

impl FilterValidation {
    /// Records an error for `key`.
    pub fn add(&mut self, key: &str, message: impl Into<String>) {
        self.errors.push(FilterError {
            key: key.to_owned(),
            message: message.into(),
        });
    }

    /// Returns whether binding produced no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Appends the errors of another binding pass.
    pub fn merge(&mut self, other: FilterValidation) {
        self.errors.extend(other.errors);
    }

    /// Returns the collected errors.
    #[must_use]
    pub fn errors(&self) -> &[FilterError] {
        self.errors.as_slice()
    }
}

/// Result of binding filters: what to query and what was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundFilters {
    /// Criteria passed to the event query.
    pub criteria: AuditTrailFilterCriteria,
    /// Binding errors.
    pub validation: FilterValidation,
}
