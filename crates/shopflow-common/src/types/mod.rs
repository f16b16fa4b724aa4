//! Common types used across shopflow

use serde::{Deserialize, Serialize};

/// Default page number (pages are 1-indexed)
pub const DEFAULT_PAGE: u32 = 1;

/// Default number of records returned per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum number of records that can be returned in a single page.
/// This prevents excessive memory usage and query timeouts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Pagination parameters for list queries
///
/// Pages are 1-indexed; a page number of zero is treated as the first
/// page, and the page size is clamped to [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Effective page number (1-indexed, never zero)
    pub fn page(&self) -> u32 {
        self.page.max(DEFAULT_PAGE)
    }

    /// Effective page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Number of records to skip before the first record of this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_pagination_offset() {
        let page = Pagination::new(3, 10);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_pagination_clamps_degenerate_values() {
        let page = Pagination::new(0, 0);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 1);

        let page = Pagination::new(1, 10_000);
        assert_eq!(page.limit(), MAX_PAGE_SIZE);
    }
}
