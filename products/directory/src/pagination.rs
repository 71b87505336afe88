/// Fixed page size of the employee list.
pub const ITEMS_PER_PAGE: usize = 10;

/// Width of the page-number window.
const PAGE_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub total_items: usize,
    pub per_page: usize,
    pub current_page: usize,
}

impl Pagination {
    pub fn new(total_items: usize, per_page: usize, current_page: usize) -> Self {
        Self {
            total_items,
            per_page: per_page.max(1),
            current_page,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Navigation requests outside `[1, total_pages]` are refused; callers
    /// disable those controls rather than relying on clamping.
    pub fn can_navigate_to(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    pub fn previous(&self) -> Option<usize> {
        let page = self.current_page.checked_sub(1)?;
        self.can_navigate_to(page).then_some(page)
    }

    pub fn next(&self) -> Option<usize> {
        let page = self.current_page + 1;
        self.can_navigate_to(page).then_some(page)
    }

    /// Up to five consecutive page numbers around the current page, shifted
    /// at either end so the window stays inside `[1, total_pages]`.
    pub fn page_range(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }
        let mut start = self.current_page.saturating_sub(2).clamp(1, total);
        let end = (start + PAGE_WINDOW - 1).min(total);
        if end - start < PAGE_WINDOW - 1 {
            start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        }
        (start..=end).collect()
    }

    /// Pagination controls are hidden for a single page or none.
    pub fn is_visible(&self) -> bool {
        self.total_pages() > 1
    }

    /// One-based inclusive item positions shown on the current page.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        if !self.can_navigate_to(self.current_page) {
            return None;
        }
        let first = (self.current_page - 1) * self.per_page + 1;
        let last = (self.current_page * self.per_page).min(self.total_items);
        Some((first, last))
    }
}
