use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::de;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Highest page whose offset (`page * MAX_PAGE_SIZE`) still fits in an `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// `page` and `size` query parameters.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "de::from_str")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "de::from_str")]
    pub size: i64,
}

impl PaginationQuery {
    /// Page clamped to `1..=MAX_PAGE` and size to `1..=MAX_PAGE_SIZE`, as `u64` for the paginator.
    pub fn normalized(&self) -> (u64, u64) {
        (
            self.page.clamp(1, MAX_PAGE) as u64,
            self.size.clamp(1, MAX_PAGE_SIZE) as u64,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps() {
        let q = PaginationQuery { page: 0, size: 500 };
        assert_eq!(q.normalized(), (1, 100));
        let q = PaginationQuery { page: 3, size: 0 };
        assert_eq!(q.normalized(), (3, 1));
        assert_eq!(PaginationQuery::default().normalized(), (1, 10));

        let q = PaginationQuery { page: i64::MAX, size: 100 };
        let (page, size) = q.normalized();
        assert_eq!(page, MAX_PAGE as u64);
        assert!(page.checked_mul(size).is_some_and(|offset| offset <= i64::MAX as u64));
    }
}
