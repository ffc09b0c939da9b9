//! Page-count math and windowed page lists for the pagination footer.

use serde::{Deserialize, Serialize};

/// How the total page count is derived from the row total.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageCountPolicy {
    /// Nearest-integer rounding of `total / row_count`. May undercount the
    /// last partial page (94 rows at 10 per page yields 9 pages).
    Nearest,
    /// Ceiling division; every row lands on some page.
    #[default]
    Ceiling,
}

/// Computes the number of pages for `total` rows at `row_count` rows per page.
///
/// A zero `row_count` yields zero pages.
pub fn page_count(total: usize, row_count: usize, policy: PageCountPolicy) -> usize {
    if row_count == 0 {
        return 0;
    }
    match policy {
        PageCountPolicy::Ceiling => total.div_ceil(row_count),
        // Half-up rounding: the remainder rounds up once it reaches half a page.
        PageCountPolicy::Nearest => {
            let remainder = total % row_count;
            total / row_count + usize::from(remainder >= row_count - remainder)
        }
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Windowed list of page links; `None` marks an elided gap.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub page_count: usize,
}

impl PageWindow {
    /// A `current_page` past the last page is clamped to the last page.
    pub fn new(current_page: usize, page_count: usize) -> Self {
        let current_page = current_page.clamp(1, page_count.max(1));

        let pages = get_pages(page_count, current_page, 2, 2, 4, 2);

        Self {
            pages,
            page: current_page,
            page_count,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rounds_half_up() {
        assert_eq!(page_count(95, 10, PageCountPolicy::Nearest), 10);
        assert_eq!(page_count(94, 10, PageCountPolicy::Nearest), 9);
        assert_eq!(page_count(2, 15, PageCountPolicy::Nearest), 0);
        assert_eq!(page_count(8, 15, PageCountPolicy::Nearest), 1);
    }

    /// Nearest rounding drops the last partial page; ceiling keeps it.
    #[test]
    fn nearest_undercounts_partial_last_page() {
        assert_eq!(page_count(94, 10, PageCountPolicy::Ceiling), 10);
        assert!(
            page_count(94, 10, PageCountPolicy::Nearest)
                < page_count(94, 10, PageCountPolicy::Ceiling)
        );
    }

    #[test]
    fn ceiling_counts_every_row() {
        assert_eq!(page_count(0, 10, PageCountPolicy::Ceiling), 0);
        assert_eq!(page_count(2, 15, PageCountPolicy::Ceiling), 1);
        assert_eq!(page_count(30, 15, PageCountPolicy::Ceiling), 2);
        assert_eq!(page_count(31, 15, PageCountPolicy::Ceiling), 3);
    }

    #[test]
    fn nearest_does_not_overflow_on_huge_totals() {
        assert_eq!(page_count(usize::MAX, 1, PageCountPolicy::Nearest), usize::MAX);
        assert_eq!(page_count(usize::MAX, 2, PageCountPolicy::Nearest), usize::MAX / 2 + 1);
        assert_eq!(page_count(5, usize::MAX, PageCountPolicy::Nearest), 0);
    }

    #[test]
    fn zero_row_count_yields_no_pages() {
        assert_eq!(page_count(10, 0, PageCountPolicy::Ceiling), 0);
        assert_eq!(page_count(10, 0, PageCountPolicy::Nearest), 0);
    }

    #[test]
    fn small_window_lists_every_page() {
        let window = PageWindow::new(1, 3);
        assert_eq!(window.pages, vec![Some(1), Some(2), Some(3)]);
        assert!(!window.has_previous());
        assert!(window.has_next());
    }

    #[test]
    fn large_window_elides_gaps() {
        let window = PageWindow::new(10, 20);
        assert_eq!(
            window.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn page_past_the_end_is_clamped_to_last_page() {
        let window = PageWindow::new(10, 3);
        assert_eq!(window.pages, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(window.page, 3);
        assert!(window.has_previous());
        assert!(!window.has_next());
    }

    #[test]
    fn empty_window_for_zero_pages() {
        let window = PageWindow::new(0, 0);
        assert!(window.pages.is_empty());
        assert_eq!(window.page, 1);
        assert!(!window.has_next());
    }
}
