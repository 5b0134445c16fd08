//! Client-side pagination over an already filtered list

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Page size and 1-based current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    page_size: usize,
    current_page: usize,
}

/// Contiguous run of page links shown together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGroup {
    /// First page in the group
    pub start: usize,
    /// Last page in the group (inclusive)
    pub end: usize,
    /// Whether an earlier group exists
    pub has_prev: bool,
    /// Whether a later group exists
    pub has_next: bool,
}

impl PageGroup {
    /// Page numbers in the group
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

impl Pager {
    /// Create a pager positioned on page 1
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page_size` is zero.
    pub fn new(page_size: usize) -> crate::Result<Self> {
        if page_size == 0 {
            return Err(crate::Error::validation("page_size", "must be at least 1"));
        }
        Ok(Self {
            page_size,
            current_page: 1,
        })
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 1-based page
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(total / page_size)`
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Index range of the current page, bounded by `total`
    #[must_use]
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Rows of the current page
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.window(items.len())).unwrap_or_default()
    }

    /// Keep the current page within `1..=max(1, total_pages)`
    pub fn clamp(&mut self, total: usize) {
        let last = self.total_pages(total).max(1);
        self.current_page = self.current_page.clamp(1, last);
    }

    /// Jump to a page, clamped to the valid range
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current_page = page;
        self.clamp(total);
    }

    /// Change the page size and clamp the current page
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page_size` is zero; the pager is unchanged.
    pub fn set_page_size(&mut self, page_size: usize, total: usize) -> crate::Result<()> {
        if page_size == 0 {
            return Err(crate::Error::validation("page_size", "must be at least 1"));
        }
        self.page_size = page_size;
        self.clamp(total);
        Ok(())
    }

    /// Whether a later page exists
    #[must_use]
    pub const fn has_next(&self, total: usize) -> bool {
        self.current_page < self.total_pages(total)
    }

    /// Whether an earlier page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Group of `group_size` page links containing the current page
    #[must_use]
    pub fn page_group(&self, total: usize, group_size: usize) -> PageGroup {
        let group_size = group_size.max(1);
        let total_pages = self.total_pages(total);
        let group = self.current_page.saturating_sub(1) / group_size;
        let start = group * group_size + 1;
        let end = (start + group_size - 1).min(total_pages.max(1));

        PageGroup {
            start,
            end: end.max(start),
            has_prev: group > 0,
            has_next: end < total_pages,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Pager::new(0).is_err());
        let mut pager = Pager::new(10).unwrap();
        assert!(pager.set_page_size(0, 100).is_err());
        assert_eq!(pager.page_size(), 10);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(95, 20, 5)]
    fn test_total_pages(#[case] total: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(Pager::new(size).unwrap().total_pages(total), expected);
    }

    #[test]
    fn test_window_and_slice() {
        let items: Vec<usize> = (0..25).collect();
        let mut pager = Pager::new(10).unwrap();

        assert_eq!(pager.window(25), 0..10);
        pager.go_to(3, 25);
        assert_eq!(pager.window(25), 20..25);
        assert_eq!(pager.slice(&items), &[20, 21, 22, 23, 24]);
        assert!(!pager.has_next(25));
        assert!(pager.has_prev());
    }

    #[test]
    fn test_shrinking_list_clamps_to_last_page() {
        let mut pager = Pager::new(10).unwrap();
        pager.go_to(5, 50);
        assert_eq!(pager.current_page(), 5);

        pager.clamp(12);
        assert_eq!(pager.current_page(), 2);

        pager.clamp(0);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.window(0), 0..0);
    }

    #[test]
    fn test_larger_page_size_clamps() {
        let mut pager = Pager::new(10).unwrap();
        pager.go_to(4, 40);
        pager.set_page_size(30, 40).unwrap();
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.window(40), 30..40);
    }

    #[rstest]
    #[case(1, 120, PageGroup { start: 1, end: 5, has_prev: false, has_next: true })]
    #[case(5, 120, PageGroup { start: 1, end: 5, has_prev: false, has_next: true })]
    #[case(6, 120, PageGroup { start: 6, end: 10, has_prev: true, has_next: true })]
    #[case(12, 120, PageGroup { start: 11, end: 12, has_prev: true, has_next: false })]
    #[case(1, 0, PageGroup { start: 1, end: 1, has_prev: false, has_next: false })]
    fn test_page_group(#[case] page: usize, #[case] total: usize, #[case] expected: PageGroup) {
        let mut pager = Pager::new(10).unwrap();
        pager.go_to(page, total);
        assert_eq!(pager.page_group(total, 5), expected);
    }

    proptest! {
        #[test]
        fn test_total_pages_is_ceiling(total in 0usize..10_000, size in 1usize..200) {
            let pager = Pager::new(size).unwrap();
            let pages = pager.total_pages(total);
            prop_assert!(pages * size >= total);
            prop_assert!(pages == 0 || (pages - 1) * size < total);
        }

        #[test]
        fn test_slice_length(total in 0usize..2_000, size in 1usize..100, page in 1usize..50) {
            let mut pager = Pager::new(size).unwrap();
            let pages = pager.total_pages(total);
            prop_assume!(page <= pages);
            pager.go_to(page, total);

            let window = pager.window(total);
            prop_assert_eq!(window.len(), size.min(total - (page - 1) * size));
        }

        #[test]
        fn test_clamped_page_is_valid(total in 0usize..2_000, size in 1usize..100, page in 0usize..500) {
            let mut pager = Pager::new(size).unwrap();
            pager.go_to(page, total);
            prop_assert!(pager.current_page() >= 1);
            prop_assert!(pager.current_page() <= pager.total_pages(total).max(1));
        }
    }
}
