//! Pagination types
//!
//! The paged envelope, the page request sent with each call, and the state
//! tracked while walking a collection.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::http::QueryParams;
use serde::{Deserialize, Serialize};

/// Page numbers start at 1
pub const FIRST_PAGE: u32 = 1;

/// Pagination block of a paged envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page number of this envelope
    #[serde(default = "first_page")]
    pub page: u32,
    /// Number of pages the server reports; 1 when absent
    #[serde(rename = "pageTotal", default = "first_page")]
    pub page_total: u32,
    /// Number of items across all pages
    #[serde(default)]
    pub total: u64,
    /// Page size the server applied
    #[serde(rename = "perPage", default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

fn first_page() -> u32 {
    FIRST_PAGE
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            page_total: FIRST_PAGE,
            total: 0,
            per_page: None,
        }
    }
}

impl PageMeta {
    /// True when pages after `page` remain
    pub fn has_more_after(&self, page: u32) -> bool {
        page < self.page_total
    }
}

/// A paged envelope: `{ items: [...], meta: {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Pagination block
    #[serde(default)]
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Page number and size sent with a listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Create a page request
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// First page with the given size
    pub fn first(per_page: u32) -> Self {
        Self::new(FIRST_PAGE, per_page)
    }

    /// Write `page` and `per_page` into a query
    pub fn apply(&self, query: &mut QueryParams) {
        query.insert("page", self.page);
        query.insert("per_page", self.per_page);
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Page to request next
    pub page: u32,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Items fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page(FIRST_PAGE)
    }
}

impl PaginationState {
    /// Create a new pagination state starting at page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            pages_fetched: 0,
            total_fetched: 0,
            done: false,
        }
    }

    /// Record a fetched page
    pub fn record_page(&mut self, items: usize) {
        self.pages_fetched += 1;
        self.total_fetched += items as u64;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }
}
