use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A clamped, 1-based page position over a collection of `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl PageWindow {
    /// `page_index` is clamped into `[1, total_pages]`, or 1 when there are no pages.
    /// A `page_size` of 0 is treated as 1.
    pub fn new(total_items: usize, page_index: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        let page_index = page_index.clamp(1, total_pages.max(1));
        Self {
            page_index,
            page_size,
            total_pages,
            total_items,
        }
    }

    /// Item offsets covered by this page, clipped to the collection.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page_index - 1) * self.page_size).min(self.total_items);
        let end = (self.page_index * self.page_size).min(self.total_items);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// The contiguous slice for `page_index`, clipped to `subset`.
pub fn page<T>(subset: &[T], page_index: usize, page_size: usize) -> &[T] {
    let window = PageWindow::new(subset.len(), page_index, page_size);
    &subset[window.range()]
}
