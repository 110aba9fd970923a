//! Offset-based pagination for database queries.

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Default (first) page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Maximum number of items per page.
pub const MAX_LIMIT: i64 = 100;

/// Offset-based pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Creates pagination from a 1-based page number and page size.
    ///
    /// Missing or non-positive values fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_LIMIT`]; the page size is capped at [`MAX_LIMIT`].
    pub fn from_page(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);

        Self {
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// Gets the current page number (1-based).
    #[inline]
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self::from_page(None, None)
    }
}
