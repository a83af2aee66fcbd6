//! Pagination types for listing queries.

/// Offset/limit parameters for a store query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    /// Create pagination parameters from raw offset and limit.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Create pagination for a 1-indexed page number.
    ///
    /// Page 0 is treated as page 1. The offset saturates, so a page number
    /// past the end of any real data set yields an empty page rather than
    /// an overflow.
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        Self {
            offset: page_number.saturating_sub(1).saturating_mul(page_size),
            limit: page_size,
        }
    }
}

/// One page of results plus the metadata a listing view needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Current 1-indexed page number
    pub page: u64,
    /// Page size used for the query
    pub per_page: u64,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Total number of pages (at least 1)
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from query results and the total count.
    #[must_use]
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(per_page).max(1);
        Self {
            items,
            page: page.max(1),
            per_page,
            total_items,
            total_pages,
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a further page with items exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
