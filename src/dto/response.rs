use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(current_page: i64, page_size: i64, total_items: i64) -> Self {
        // Saturating: page/pageSize come straight off the query string and
        // may be arbitrarily large.
        let divisor = std::cmp::max(1, page_size);
        let total_pages = std::cmp::max(
            1,
            total_items.saturating_add(divisor.saturating_sub(1)) / divisor,
        );
        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }
}

/// Slices one page out of an already-filtered result set. Out-of-range
/// pages yield an empty slice, never an error.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: i64) -> (Vec<T>, Pagination) {
    let pagination = Pagination::new(page, page_size, items.len() as i64);
    let start = page.saturating_sub(1).saturating_mul(page_size).max(0);
    let slice: Vec<T> = items
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(usize::try_from(page_size.max(0)).unwrap_or(usize::MAX))
        .collect();
    (slice, pagination)
}
