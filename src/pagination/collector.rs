//! Full-collection fetch
//!
//! Walks a paged listing from page 1 until the server's page count is
//! reached, concatenating items in page order.

use super::types::{Page, PaginationState, FIRST_PAGE};
use crate::error::Result;
use crate::http::Pacer;
use std::future::Future;
use tracing::debug;

/// Fetch every page and concatenate the items
///
/// `fetch` is called with page numbers 1, 2, 3, ... strictly in sequence.
/// The loop stops once the current page number is no longer below the
/// `pageTotal` reported by the page just fetched. `pacer` is awaited
/// between requests, never after the last one. The first failing page
/// aborts the walk and the items gathered so far are dropped.
pub async fn collect_all<T, F, Fut>(pacer: &dyn Pacer, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut state = PaginationState::with_page(FIRST_PAGE);
    let mut items = Vec::new();

    while !state.done {
        let page = fetch(state.page).await?;
        state.record_page(page.items.len());

        debug!(
            "Page {} of {}: {} items",
            state.page,
            page.meta.page_total,
            page.items.len()
        );

        let has_more = page.meta.has_more_after(state.page);
        items.extend(page.items);

        if has_more {
            state.next_page();
            pacer.pause().await;
        } else {
            state.mark_done();
        }
    }

    debug!(
        "Collected {} items over {} pages",
        state.total_fetched, state.pages_fetched
    );
    Ok(items)
}
