//! Search and pagination primitives for the invoice and customer tables.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fixed page size of the invoices table.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Largest page number accepted from a query string.
pub const MAX_PAGE: i64 = 1_000_000;

/// Search query parameters.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Search {
    #[validate(length(max = 256))]
    pub query: Option<String>,
    #[validate(range(max = MAX_PAGE))]
    pub page: Option<i64>,
}

impl Search {
    pub fn term(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        page_offset(self.current_page())
    }
}

/// Number of rows to skip before `page` (1-based; lower values clamp to 1).
/// Saturates instead of overflowing, so a huge page yields an empty result.
pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(ITEMS_PER_PAGE)
}

/// Pages needed to show `total` rows.
pub fn total_pages(total: u64) -> u64 {
    total.div_ceil(ITEMS_PER_PAGE as u64)
}

/// One page of search results plus counts for the pager.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: u64,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: i64) -> Self {
        Self {
            items,
            total,
            page: page.max(1),
            per_page: ITEMS_PER_PAGE,
            total_pages: total_pages(total),
        }
    }
}
