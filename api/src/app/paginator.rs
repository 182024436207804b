//! Pagination
//!
//! Content-type agnostic skip/take plus metadata.

use crate::domain::entities::PaginationInfo;

/// Slice one page out of `items`. Pages below 1 are treated as page 1;
/// a page past the end yields an empty slice with accurate metadata.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> (Vec<T>, PaginationInfo) {
    let info = PaginationInfo::new(page, page_size, items.len() as i64);
    let skip = usize::try_from(info.start_item - 1).unwrap_or(usize::MAX);
    let take = usize::try_from(info.page_size).unwrap_or(usize::MAX);

    let slice = items.into_iter().skip(skip).take(take).collect();
    (slice, info)
}

/// Whether more content exists beyond the requested page
pub fn has_more_content(page: i64, page_size: i64, total_items: usize) -> bool {
    page.max(1).saturating_mul(page_size.max(1)) < total_items as i64
}
