//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::http::{NoPacing, Pacer, QueryParams};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_case::test_case;

/// Pacer that only counts how often it was asked to wait
#[derive(Debug, Default)]
struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

fn page_of(page: u32, page_total: u32, items: Vec<u32>) -> Page<u32> {
    Page {
        meta: PageMeta {
            page,
            page_total,
            total: 0,
            per_page: None,
        },
        items,
    }
}

// ============================================================================
// Envelope Tests
// ============================================================================

#[test]
fn test_page_deserialize() {
    let page: Page<serde_json::Value> = serde_json::from_value(json!({
        "items": [{"id": 1}, {"id": 2}],
        "meta": {"page": 2, "pageTotal": 5, "total": 97, "perPage": 20}
    }))
    .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(
        page.meta,
        PageMeta {
            page: 2,
            page_total: 5,
            total: 97,
            per_page: Some(20),
        }
    );
}

#[test]
fn test_page_meta_defaults() {
    let page: Page<u32> = serde_json::from_value(json!({
        "items": [],
        "meta": {"page": 1, "total": 0}
    }))
    .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.meta.page_total, 1);
    assert_eq!(page.meta.per_page, None);

    let page: Page<u32> = serde_json::from_value(json!({"items": [7]})).unwrap();
    assert_eq!(page.meta, PageMeta::default());
}

#[test]
fn test_page_meta_has_more_after() {
    let meta = PageMeta {
        page: 1,
        page_total: 3,
        total: 250,
        per_page: Some(100),
    };
    assert!(meta.has_more_after(1));
    assert!(meta.has_more_after(2));
    assert!(!meta.has_more_after(3));
    assert!(!meta.has_more_after(4));
}

#[test]
fn test_page_request_apply() {
    let mut query = QueryParams::new().param("category", "identity");
    PageRequest::new(3, 100).apply(&mut query);

    assert_eq!(query.describe(), "category=identity&page=3&per_page=100");
}

#[test]
fn test_page_request_default() {
    assert_eq!(PageRequest::default(), PageRequest::new(1, 20));
    assert_eq!(PageRequest::first(5), PageRequest::new(1, 5));
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.page, 1);
    assert_eq!(state.pages_fetched, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
}

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::with_page(5);
    state.record_page(100);
    state.record_page(40);
    state.next_page();
    state.mark_done();

    assert_eq!(state.page, 6);
    assert_eq!(state.pages_fetched, 2);
    assert_eq!(state.total_fetched, 140);
    assert!(state.done);
}

// ============================================================================
// collect_all Tests
// ============================================================================

#[tokio::test]
async fn test_collect_all_single_page_no_pause() {
    let pacer = CountingPacer::default();
    let mut requested = Vec::new();

    let items = collect_all(&pacer, |page| {
        requested.push(page);
        async move { Ok(page_of(page, 1, vec![1, 2, 3])) }
    })
    .await
    .unwrap();

    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(requested, vec![1]);
    assert_eq!(pacer.count(), 0);
}

#[test_case(1, 3 ; "one page")]
#[test_case(2, 3 ; "two pages")]
#[test_case(4, 2 ; "four pages")]
#[test_case(7, 1 ; "seven pages")]
#[tokio::test]
async fn test_collect_all_fetches_page_total_pages(page_total: u32, per_page: u32) {
    let pacer = CountingPacer::default();
    let mut requested = Vec::new();

    let items = collect_all(&pacer, |page| {
        requested.push(page);
        let items = (0..per_page).map(|i| page * 100 + i).collect();
        async move { Ok(page_of(page, page_total, items)) }
    })
    .await
    .unwrap();

    let expected_pages: Vec<u32> = (1..=page_total).collect();
    assert_eq!(requested, expected_pages);
    assert_eq!(items.len(), (page_total * per_page) as usize);
    assert_eq!(pacer.count(), (page_total - 1) as usize);
}

#[tokio::test]
async fn test_collect_all_preserves_page_order() {
    let items = collect_all(&NoPacing, |page| async move {
        Ok(page_of(page, 3, vec![page * 10, page * 10 + 1]))
    })
    .await
    .unwrap();

    assert_eq!(items, vec![10, 11, 20, 21, 30, 31]);
}

#[tokio::test]
async fn test_collect_all_sums_uneven_pages() {
    let sizes = [100usize, 100, 37];
    let items = collect_all(&NoPacing, |page| {
        let size = sizes[(page - 1) as usize];
        async move { Ok(page_of(page, 3, vec![0; size])) }
    })
    .await
    .unwrap();

    assert_eq!(items.len(), 237);
}

#[tokio::test]
async fn test_collect_all_zero_page_total_stops_after_first() {
    let mut calls = 0;
    let items = collect_all(&NoPacing, |page| {
        calls += 1;
        async move { Ok(page_of(page, 0, Vec::new())) }
    })
    .await
    .unwrap();

    assert!(items.is_empty());
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_collect_all_aborts_on_first_failure() {
    let pacer = CountingPacer::default();
    let mut requested = Vec::new();

    let result: crate::Result<Vec<u32>> = collect_all(&pacer, |page| {
        requested.push(page);
        async move {
            if page == 2 {
                Err(Error::transport(500, "Internal Server Error"))
            } else {
                Ok(page_of(page, 4, vec![page]))
            }
        }
    })
    .await;

    assert!(matches!(result, Err(Error::Transport { status: 500, .. })));
    assert_eq!(requested, vec![1, 2]);
    assert_eq!(pacer.count(), 1);
}
