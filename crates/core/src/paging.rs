//! Derived pagination metadata.

use serde::{Deserialize, Serialize};

/// Pagination window for a filtered catalog query.
///
/// Derived, never stored. `total_items` counts the *filtered* set, so the
/// metadata is always self-consistent with the items returned alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    /// 1-based page number the caller requested.
    pub current_page: u32,
    /// Fixed page-size policy.
    pub items_per_page: u32,
    /// Count of items matching the current filter.
    pub total_items: u64,
    /// `ceil(total_items / items_per_page)`.
    pub total_pages: u64,
}

impl PagingInfo {
    /// Build paging metadata for a query window.
    ///
    /// `items_per_page` is clamped to at least 1, so a zero page size can
    /// never divide by zero.
    #[must_use]
    pub const fn new(current_page: u32, items_per_page: u32, total_items: u64) -> Self {
        let items_per_page = if items_per_page == 0 { 1 } else { items_per_page };
        let total_pages = total_items.div_ceil(items_per_page as u64);
        Self {
            current_page,
            items_per_page,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PagingInfo::new(1, 4, 10).total_pages, 3);
        assert_eq!(PagingInfo::new(1, 4, 8).total_pages, 2);
        assert_eq!(PagingInfo::new(1, 4, 1).total_pages, 1);
    }

    #[test]
    fn empty_filter_set_has_zero_pages() {
        let info = PagingInfo::new(1, 4, 0);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.total_items, 0);
    }

    #[test]
    fn zero_page_size_is_clamped_to_one() {
        let info = PagingInfo::new(1, 0, 10);
        assert_eq!(info.items_per_page, 1);
        assert_eq!(info.total_pages, 10);
    }

    #[test]
    fn counts_reflect_the_filtered_set() {
        // 10 items in the filter, page size 4: page 3 holds the last 2.
        let info = PagingInfo::new(3, 4, 10);
        assert_eq!(info.current_page, 3);
        assert_eq!(info.total_pages, 3);
    }
}
