// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pagination over filtered, ordered result sets.
//!
//! Pages are 1-indexed. A requested page number is clamped into
//! `[1, total_pages]` before slicing, so a stale page number from a
//! previous, larger result set can never select past the end.

use std::num::NonZeroUsize;

/// Default page size for dashboard list views.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One window over a filtered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    /// Records on this page, in feed order.
    pub items: Vec<T>,
    /// The clamped, 1-indexed page number actually served.
    pub page: usize,
    /// Total pages available; at least 1 even for an empty set.
    pub total_pages: usize,
    /// Total records across all pages.
    pub total_records: usize,
}

/// Slices a result set into one fixed-size page.
///
/// `total_pages = max(1, ceil(len / page_size))`; the requested page is
/// clamped into `[1, total_pages]` and the slice is the half-open range
/// `[(page - 1) * size, page * size)`. Page 1 of an empty collection is
/// an empty page, not an error.
#[must_use]
pub fn paginate<T: Clone>(
    records: &[T],
    requested_page: usize,
    page_size: NonZeroUsize,
) -> PageView<T> {
    let size = page_size.get();
    let total_records = records.len();
    let total_pages = std::cmp::max(1, total_records.div_ceil(size));
    let page = requested_page.clamp(1, total_pages);

    let start = (page - 1) * size;
    let end = std::cmp::min(start + size, total_records);
    let items = if start < total_records {
        records[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageView {
        items,
        page,
        total_pages,
        total_records,
    }
}
