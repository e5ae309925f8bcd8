//! Integration tests for filter operations issuing queries through the workers.

#![cfg(test)]

use vitrine::app::run_until_settled;
use vitrine::logic;
use vitrine::state::SortOption;

use crate::support::{MemoryCatalog, SETTLE, open_session};

#[tokio::test]
/// What: Combined filters reach the catalog and narrow the results.
///
/// Inputs:
/// - Category Football (2), price 40..200, sort price high to low.
///
/// Output:
/// - Request carries the Football subtree and both prices.
/// - Products are in categories 3 or 4, within range, most expensive first.
async fn filters_narrow_results() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;

    assert!(logic::toggle_category(&mut app, 2, &channels.query_tx));
    assert!(logic::apply_price(&mut app, "40", "200", &channels.query_tx));
    assert!(logic::set_sort(&mut app, SortOption::PriceHighLow, &channels.query_tx));
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("settles");

    let last = catalog.requests().pop().expect("request sent");
    assert_eq!(last.category_ids, Some(vec![2, 3, 4]));
    assert_eq!(last.min_price, Some(40.0));
    assert_eq!(last.max_price, Some(200.0));
    assert_eq!(last.sort, Some("price-high-low"));
    assert_eq!(last.page, 0);

    // Categories 3 and 4 hold ids congruent to 0 and 1 mod 5.
    let ids: Vec<u64> = app.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![20, 16, 15, 11, 10, 6, 5]);
}

#[tokio::test]
/// What: Clearing all filters restores the full catalog but keeps the sort.
///
/// Inputs:
/// - Category, price, rating and size filters applied with a name sort; then `clear_all`.
///
/// Output:
/// - Last request has no filters except the catalog maximum price; sort retained.
async fn clear_all_restores_catalog() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(30)).await;
    logic::set_sort(&mut app, SortOption::NameZa, &channels.query_tx);
    logic::toggle_category(&mut app, 8, &channels.query_tx);
    logic::apply_price(&mut app, "100", "", &channels.query_tx);
    logic::set_min_rating(&mut app, 3, &channels.query_tx);
    logic::toggle_size(&mut app, "M", &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("filtered");
    assert!(app.pagination.total_results() < 30);

    logic::clear_all(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("cleared");

    let last = catalog.requests().pop().expect("request sent");
    assert_eq!(last.category_ids, None);
    assert_eq!(last.min_price, None);
    assert_eq!(last.max_price, Some(300.0));
    assert_eq!(last.min_rating, None);
    assert_eq!(last.sizes, None);
    assert_eq!(last.sort, Some("name-z-a"));
    assert_eq!(app.pagination.total_results(), 30);
    assert_eq!(app.products.first().map(|p| p.name.as_str()), Some("Item 30"));
}

#[tokio::test]
/// What: Operations that change nothing send nothing.
///
/// Inputs:
/// - Same sort, same rating, the current price range (catalog maximum 50) and a
///   blank size after the first load.
///
/// Output:
/// - Catalog sees only the initial request.
async fn no_op_operations_send_no_query() {
    let (catalog, mut app, mut channels) = open_session(MemoryCatalog::with_products(5)).await;
    logic::filter::refresh_from_first_page(&mut app, &channels.query_tx);
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("first page");

    let sort = app.sort;
    assert!(!logic::set_sort(&mut app, sort, &channels.query_tx));
    assert!(!logic::set_min_rating(&mut app, 0, &channels.query_tx));
    assert!(!logic::apply_price(&mut app, "", "50", &channels.query_tx));
    assert!(!logic::toggle_size(&mut app, "  ", &channels.query_tx));
    assert!(!logic::go_to_page(&mut app, 1, &channels.query_tx));
    run_until_settled(&mut app, &mut channels, SETTLE)
        .await
        .expect("still settled");
    assert_eq!(catalog.requests().len(), 1);
}
