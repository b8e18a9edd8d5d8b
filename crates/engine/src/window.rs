//! Windower
//!
//! Exposes a growing prefix of the filtered result: `page * page_size`
//! items, clamped to what exists. `load_more` saturates once the prefix
//! covers everything, so repeated signals at the bottom are harmless.
//!
//! Resetting to page 1 on a new query or filter is the caller's job.

use sift_core::{Error, Result};

/// Default page size
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Visible length for `page` pages over `total` items
pub fn visible_len(total: usize, page: usize, page_size: usize) -> usize {
    page.saturating_mul(page_size).min(total)
}

/// The first `page * page_size` items of `filtered`
pub fn visible_slice<T>(filtered: &[T], page: usize, page_size: usize) -> &[T] {
    &filtered[..visible_len(filtered.len(), page, page_size)]
}

/// Next page number, or `page` unchanged if it already covers `total`
pub fn load_more(page: usize, page_size: usize, total: usize) -> usize {
    if page.saturating_mul(page_size) >= total {
        page
    } else {
        page + 1
    }
}

/// Whether items remain beyond the visible prefix
pub fn has_more(total: usize, page: usize, page_size: usize) -> bool {
    visible_len(total, page, page_size) < total
}

/// Page counter with a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    page: usize,
    page_size: usize,
}

impl Window {
    /// Start at page 1
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_input("page size must be at least 1"));
        }
        Ok(Window { page: 1, page_size })
    }

    /// Current page (1-based)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to page 1
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Advance one page unless `total` is already covered
    ///
    /// Returns true if the page advanced.
    pub fn load_more(&mut self, total: usize) -> bool {
        let next = load_more(self.page, self.page_size, total);
        let advanced = next != self.page;
        self.page = next;
        advanced
    }

    /// Visible prefix of `filtered`
    pub fn slice<'a, T>(&self, filtered: &'a [T]) -> &'a [T] {
        visible_slice(filtered, self.page, self.page_size)
    }

    /// Visible length over `total` items
    pub fn visible_len(&self, total: usize) -> usize {
        visible_len(total, self.page, self.page_size)
    }

    /// Whether items remain beyond the visible prefix
    pub fn has_more(&self, total: usize) -> bool {
        has_more(total, self.page, self.page_size)
    }
}

impl Default for Window {
    fn default() -> Self {
        Window {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
