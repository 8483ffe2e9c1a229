//! # Query Normalizer
//!
//! Turns whatever page number and page size a caller sent into a bounded [`PageRequest`].
//! Callers count pages from 1; the store counts from 0. Malformed values never fail, they fall
//! back to the defaults.

use record_store::PageRequest;

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Normalizes 1-based paging input.
///
/// - `page_number`: absent or `<= 0` becomes the first page, otherwise `page_number - 1`
/// - `page_size`: absent or `<= 0` becomes [`DEFAULT_PAGE_SIZE`], capped at [`MAX_PAGE_SIZE`]
pub fn normalize(page_number: Option<i32>, page_size: Option<i32>) -> PageRequest {
    let index = match page_number {
        Some(n) if n > 0 => n.unsigned_abs() - 1,
        _ => DEFAULT_PAGE_NUMBER,
    };
    let size = match page_size {
        Some(s) if s > 0 => s.unsigned_abs().min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    };
    PageRequest::new(index, size)
}
