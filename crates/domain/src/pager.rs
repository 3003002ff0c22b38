use serde::{Deserialize, Serialize};

/// Raw paging values supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerParameters {
    /// Requested 1-based page number.
    pub page: Option<u32>,
    /// Requested number of events per page.
    pub page_size: Option<u32>,
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    page: u32,
    page_size: u32,
}

impl Pager {
    /// Resolves caller paging against site defaults.
    ///
    /// A missing or zero page selects the first page. A missing or zero page
    /// size falls back to `default_page_size`, and any page size is capped at
    /// `max_page_size` unless the cap is zero.
    #[must_use]
    pub fn new(parameters: PagerParameters, default_page_size: u32, max_page_size: u32) -> Self {
        let page = parameters.page.filter(|page| *page > 0).unwrap_or(1);
        let mut page_size = parameters
            .page_size
            .filter(|size| *size > 0)
            .unwrap_or(default_page_size)
            .max(1);

        if max_page_size > 0 {
            page_size = page_size.min(max_page_size);
        }

        Self { page, page_size }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns how many rows precede this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Combines the window with a total row count for display.
    #[must_use]
    pub fn summarize(&self, total_item_count: u64) -> PagerSummary {
        PagerSummary {
            page: self.page,
            page_size: self.page_size,
            total_item_count,
            total_pages: total_item_count.div_ceil(u64::from(self.page_size)),
        }
    }
}

/// Pager values shown next to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerSummary {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
    /// Total rows matching the query, across all pages.
    pub total_item_count: u64,
    /// Number of pages needed for `total_item_count`.
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{Pager, PagerParameters};

    #[test]
    fn missing_parameters_use_site_default() {
        let pager = Pager::new(PagerParameters::default(), 20, 100);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.page_size(), 20);
        assert_eq!(pager.offset(), 0);
    }

    #[test]
    fn page_size_is_capped_by_site_maximum() {
        let pager = Pager::new(
            PagerParameters {
                page: Some(3),
                page_size: Some(500),
            },
            20,
            100,
        );
        assert_eq!(pager.page_size(), 100);
        assert_eq!(pager.offset(), 200);
    }

    #[test]
    fn zero_maximum_disables_cap() {
        let pager = Pager::new(
            PagerParameters {
                page: None,
                page_size: Some(500),
            },
            20,
            0,
        );
        assert_eq!(pager.page_size(), 500);
    }

    #[test]
    fn summary_rounds_total_pages_up() {
        let summary = Pager::new(PagerParameters::default(), 20, 0).summarize(41);
        assert_eq!(summary.total_pages, 3);
        assert_eq!(summary.total_item_count, 41);
    }

    proptest! {
        #[test]
        fn resolved_pager_is_always_usable(
            page in proptest::option::of(any::<u32>()),
            page_size in proptest::option::of(any::<u32>()),
            default_page_size in 0u32..1_000,
            max_page_size in 0u32..1_000,
        ) {
            let pager = Pager::new(PagerParameters { page, page_size }, default_page_size, max_page_size);

            prop_assert!(pager.page() >= 1);
            prop_assert!(pager.page_size() >= 1);
            if max_page_size > 0 {
                prop_assert!(pager.page_size() <= max_page_size);
            }
        }
    }
}
