//! Page slicing and the page-number window shown under the listing.

use serde::Serialize;

/// Page numbers shown at once in the pager.
pub const DEFAULT_WINDOW: u32 = 7;

/// Products per listing page.
pub const PRODUCTS_PER_PAGE: u32 = 8;

/// Page numbers to render for `current` out of `total_pages`.
///
/// The result is ascending, contiguous, inside `1..=total_pages`, centred on
/// `current` where the edges allow, and exactly `min(total_pages, window)`
/// long. A `current` outside the valid range is clamped first.
#[must_use]
pub fn visible_pages(current: u32, total_pages: u32, window: u32) -> Vec<u32> {
    let window = window.max(1);
    if total_pages <= window {
        return (1..=total_pages).collect();
    }

    let current = current.clamp(1, total_pages);
    let half = window / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + window - 1).min(total_pages);
    if end - start + 1 < window {
        start = (end + 1).saturating_sub(window).max(1);
    }

    (start..=end).collect()
}

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub number: u32,
    /// Zero only when the source list is empty.
    pub total_pages: u32,
    pub total_items: usize,
}

impl<T: Clone> Page<T> {
    /// Cut page `page` (1-based) of `per_page` entries out of `items`.
    ///
    /// A page past the end serves the last page; page 0 serves the first.
    #[must_use]
    pub fn slice(items: &[T], page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages =
            u32::try_from(total_items.div_ceil(per_page as usize)).unwrap_or(u32::MAX);
        let number = page.clamp(1, total_pages.max(1));

        let start = (number as usize - 1).saturating_mul(per_page as usize);
        let items = items
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();

        Self {
            items,
            number,
            total_pages,
            total_items,
        }
    }
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether the pager should be drawn at all.
    #[must_use]
    pub const fn needs_pager(&self) -> bool {
        self.total_pages > 1
    }

    /// Window of page numbers around this page.
    #[must_use]
    pub fn window(&self, size: u32) -> Vec<u32> {
        visible_pages(self.number, self.total_pages, size)
    }
}
