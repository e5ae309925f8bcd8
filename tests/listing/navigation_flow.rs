//! Integration tests for entering the listing from a deep link.

#![cfg(test)]

use vitrine::app::run_until_settled;
use vitrine::logic::{NavParams, apply_navigation};

use crate::support::{MemoryCatalog, SETTLE, open_session};

#[tokio::test]
/// What: A deep link seeds category, name and panel state before the first query.
///
/// Inputs:
/// - `?category=2&parentCategory=1&name=item&expandFilters=true` over 30 products.
///
/// Output:
/// - One request with the Football subtree and the name.
/// - Sports expanded, panel open, 12 matching products shown.
async fn deep_link_seeds_first_query() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;
    let params = NavParams::parse("?category=2&parentCategory=1&name=item&expandFilters=true");

    apply_navigation(&mut app, &params, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("settles");

    let requests = catalog.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].category_ids, Some(vec![2, 3, 4]));
    assert_eq!(requests[0].name.as_deref(), Some("item"));
    assert!(app.expanded.is_expanded(1));
    assert!(app.filters_panel_open);
    assert_eq!(app.search_input, "item");
    assert_eq!(app.pagination.total_results(), 12);
}

#[tokio::test]
/// What: Unknown categories in a link fall back to the unfiltered listing.
///
/// Inputs:
/// - `category=99&parentCategory=abc`.
///
/// Output:
/// - Request without category ids; whole catalog listed; panel closed.
async fn deep_link_unknown_category_lists_everything() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;
    let params = NavParams::parse("category=99&parentCategory=abc");
    assert_eq!(params.category, Some(99));
    assert_eq!(params.parent_category, None);

    apply_navigation(&mut app, &params, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("settles");

    assert_eq!(catalog.requests()[0].category_ids, None);
    assert!(app.filters.selected_category_ids.is_empty());
    assert!(!app.filters_panel_open);
    assert_eq!(app.pagination.total_results(), 30);
}
