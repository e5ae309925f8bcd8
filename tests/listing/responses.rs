//! Integration tests for response ordering, clamping, failures and ratings.
//!
//! Tests cover:
//! - Late responses of superseded queries are discarded
//! - A page past the end is clamped and re-requested
//! - Failed queries keep the previous page and can be retried
//! - Missing ratings degrade to 0

#![cfg(test)]

use std::time::Duration;

use vitrine::app::{drive_for, run_until_settled};
use vitrine::logic::{self, filter::refresh_from_first_page};

use crate::support::{MemoryCatalog, SETTLE, open_session};

#[tokio::test]
/// What: A slow superseded query never overwrites the newer result.
///
/// Inputs:
/// - Name filter "slow" (delayed 300 ms) immediately replaced by "Item 1".
///
/// Output:
/// - The "Item 1" page stays displayed after the slow response arrives.
///
/// Details:
/// - `drive_for` keeps listening after settling so the late response is handled.
async fn stale_response_is_discarded() {
    let catalog = MemoryCatalog::with_products(30).slow_for("slow", Duration::from_millis(300));
    let (_catalog, mut app, mut channels) = open_session(catalog).await;

    logic::set_search_input(&mut app, "slow");
    assert!(logic::submit_search(&mut app, &channels.query_tx));
    logic::set_search_input(&mut app, "Item 1");
    assert!(logic::submit_search(&mut app, &channels.query_tx));

    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("settles");
    assert_eq!(app.pagination.total_results(), 10);

    let handled = drive_for(&mut app, &mut channels, Duration::from_millis(600)).await;
    assert!(handled >= 1, "late response observed");
    assert_eq!(app.pagination.total_results(), 10);
    assert_eq!(app.products.len(), 10);
    assert!(app.products.iter().all(|p| p.name.starts_with("Item 1")));
    assert_eq!(app.displayed_query_id, app.latest_query_id);
}

#[tokio::test]
/// What: Navigating past a shrunken result set lands on the last valid page.
///
/// Inputs:
/// - 30 products loaded (3 pages); catalog shrinks to 7; navigate to page 3.
///
/// Output:
/// - Page 1 re-requested and shown with 7 products; no empty page displayed.
async fn page_past_end_is_reissued() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;
    refresh_from_first_page(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("first page");
    assert_eq!(app.pagination.last_page(), 3);

    catalog.shrink_to(7);
    assert!(logic::go_to_page(&mut app, 3, &channels.query_tx));
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("clamped page");

    assert_eq!(app.pagination.page(), 1);
    assert_eq!(app.pagination.total_results(), 7);
    assert_eq!(app.products.len(), 7);
    let pages: Vec<u64> = catalog.requests().iter().map(|q| q.page).collect();
    assert_eq!(pages, vec![0, 2, 0]);
}

#[tokio::test]
/// What: A failed query keeps the previous page and a retry recovers.
///
/// Inputs:
/// - Page 1 loaded; the next request fails while moving to page 2; then retry.
///
/// Output:
/// - After the failure: error set, page 1 products and counts still shown.
/// - After the retry: page 2 products, error cleared.
async fn failure_keeps_products_and_retry_recovers() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;
    refresh_from_first_page(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("first page");

    catalog.fail_next_pages(1);
    assert!(logic::go_to_page(&mut app, 2, &channels.query_tx));
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("failure settles");
    assert!(
        app.last_error
            .as_deref()
            .is_some_and(|e| e.contains("HTTP 500"))
    );
    assert_eq!(app.products.first().map(|p| p.id), Some(1));
    assert_eq!(app.pagination.page(), 1);
    assert_eq!(app.pagination.range_label(), Some((1, 12)));

    logic::retry(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("retry settles");
    assert!(app.last_error.is_none());
    assert_eq!(app.products.first().map(|p| p.id), Some(13));
    assert_eq!(app.pagination.range_label(), Some((13, 24)));
    assert_eq!(catalog.requests().last().map(|q| q.page), Some(1));
}

#[tokio::test]
/// What: A failed jump to another page keeps the displayed counts.
///
/// Inputs:
/// - Page 1 of 30 products loaded; the request for page 3 fails.
///
/// Output:
/// - Page 1, range 1-12 and products 1-12 still describe the screen.
async fn failed_navigation_keeps_displayed_range() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;
    refresh_from_first_page(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("first page");

    catalog.fail_next_pages(1);
    assert!(logic::go_to_page(&mut app, 3, &channels.query_tx));
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("failure settles");

    assert!(app.last_error.is_some());
    assert_eq!(app.pagination.page(), 1);
    assert_eq!(app.pagination.last_page(), 3);
    assert_eq!(app.pagination.range_label(), Some((1, 12)));
    let ids: Vec<u64> = app.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
/// What: Ratings resolve per product and failed lookups read as 0.
///
/// Inputs:
/// - First page of 12 products; only odd ids have a rating.
///
/// Output:
/// - Odd ids rate 4.0, even ids 0.0; nothing left pending.
async fn ratings_degrade_to_zero() {
    let (_catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(12)).await;
    refresh_from_first_page(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("settles");

    assert!(!app.ratings_pending);
    assert_eq!(app.products.len(), 12);
    for product in &app.products {
        let expected = if product.id % 2 == 1 { 4.0 } else { 0.0 };
        assert!((app.rating_of(product.id) - expected).abs() < f64::EPSILON);
    }
}
