use std::str::FromStr;

use crate::{AuditTrailFilters, AuditTrailOrderBy, FilterValidation, PagerParameters};

/// Paging, ordering and filters bound from one listing query string.
///
/// Malformed paging or ordering values never reject the request. They are
/// recorded in `validation` and replaced by the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrailListingQuery {
    /// Paging values that parsed.
    pub pager_parameters: PagerParameters,
    /// Requested order when it parsed.
    pub order_by: Option<AuditTrailOrderBy>,
    /// Filter pairs.
    pub filters: AuditTrailFilters,
    /// Errors for paging and ordering values.
    pub validation: FilterValidation,
}

impl AuditTrailListingQuery {
    /// Parses a raw `application/x-www-form-urlencoded` query string.
    ///
    /// The first non-empty value of `page`, `page_size` and `order_by` is used.
    #[must_use]
    pub fn from_query(raw_query: Option<&str>) -> Self {
        let mut validation = FilterValidation::default();
        let mut page = None;
        let mut page_size = None;
        let mut order_by = None;

        for (key, value) in raw_query
            .map(|query| url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()))
            .into_iter()
            .flatten()
        {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let slot = match &*key {
                "page" => &mut page,
                "page_size" => &mut page_size,
                "order_by" => &mut order_by,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_owned());
            }
        }

        Self {
            pager_parameters: PagerParameters {
                page: page.and_then(|value| bind_count("page", &value, &mut validation)),
                page_size: page_size
                    .and_then(|value| bind_count("page_size", &value, &mut validation)),
            },
            order_by: order_by.and_then(|value| match AuditTrailOrderBy::from_str(&value) {
                Ok(order_by) => Some(order_by),
                Err(_) => {
                    validation.add("order_by", format!("'{value}' is not a known order"));
                    None
                }
            }),
            filters: AuditTrailFilters::from_query(raw_query),
            validation,
        }
    }
}

fn bind_count(key: &str, value: &str, validation: &mut FilterValidation) -> Option<u32> {
    match value.parse::<u32>() {
        Ok(count) => Some(count),
        Err(_) => {
            validation.add(key, format!("'{value}' is not a valid number"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuditTrailListingQuery;
    use crate::AuditTrailOrderBy;

    #[test]
    fn empty_paging_values_count_as_absent() {
        let query = AuditTrailListingQuery::from_query(Some("page=&page_size=&category=content"));

        assert!(query.validation.is_valid());
        assert_eq!(query.pager_parameters.page, None);
        assert_eq!(query.pager_parameters.page_size, None);
        assert_eq!(query.filters.first("category"), Some("content"));
    }

    #[test]
    fn malformed_values_are_recorded_and_defaulted() {
        let query = AuditTrailListingQuery::from_query(Some(
            "page=abc&page_size=-3&order_by=sideways&user_name=alice",
        ));

        let keys: Vec<&str> = query
            .validation
            .errors()
            .iter()
            .map(|error| error.key.as_str())
            .collect();
        assert_eq!(keys, vec!["page", "page_size", "order_by"]);
        assert_eq!(query.pager_parameters.page, None);
        assert_eq!(query.order_by, None);
        assert_eq!(query.filters.first("user_name"), Some("alice"));
    }

    #[test]
    fn valid_values_are_bound() {
        let query =
            AuditTrailListingQuery::from_query(Some("?page=3&page_size=25&order_by=event_ascending"));

        assert!(query.validation.is_valid());
        assert_eq!(query.pager_parameters.page, Some(3));
        assert_eq!(query.pager_parameters.page_size, Some(25));
        assert_eq!(query.order_by, Some(AuditTrailOrderBy::EventAscending));
        assert!(query.filters.is_empty());
    }
}
