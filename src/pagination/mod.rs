//! Pagination module
//!
//! Page-number pagination over the `{ items, meta }` envelope.
//!
//! # Overview
//!
//! Listing endpoints return one page at a time along with the server's page
//! count. [`collect_all`] walks pages 1, 2, 3, ... until the page count is
//! reached, pausing through a [`crate::http::Pacer`] between requests.

mod collector;
mod types;

pub use collector::collect_all;
pub use types::{Page, PageMeta, PageRequest, PaginationState, FIRST_PAGE};

#[cfg(test)]
mod tests;
