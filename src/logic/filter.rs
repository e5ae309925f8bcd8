//! Named operations that change the listing filters.
//!
//! Every operation that changes a filter dimension, the sort order or the page
//! size resets pagination to page 1 and issues a fresh query. Operations that
//! change nothing issue nothing.

use tokio::sync::mpsc;

use crate::logic::query::send_query;
use crate::logic::selection;
use crate::state::filter_state::MAX_MIN_RATING;
use crate::state::{CategoryId, FilterState, ListingState, QueryInput, SortOption};

/// What: Restart the listing on page 1 and issue a query.
///
/// Inputs:
/// - `app`: Listing state
/// - `query_tx`: Channel to the listing worker
pub fn refresh_from_first_page(app: &mut ListingState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    app.pagination.reset_for_filter_change();
    send_query(app, query_tx);
}

/// What: Toggle a category in the tree control.
///
/// Inputs:
/// - `app`: Listing state
/// - `id`: Clicked category
/// - `query_tx`: Channel to the listing worker
///
/// Output:
/// - `true` when the selection changed and a query was issued.
pub fn toggle_category(
    app: &mut ListingState,
    id: CategoryId,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    let changed = selection::toggle_category(&mut app.filters, &mut app.expanded, &app.tree, id);
    if changed {
        refresh_from_first_page(app, query_tx);
    }
    changed
}

/// Expand or collapse a tree node; never touches filters or issues a query.
/// Returns `false` for unknown ids.
pub fn toggle_expanded(app: &mut ListingState, id: CategoryId) -> bool {
    if !app.tree.contains(id) {
        return false;
    }
    app.expanded.toggle(id);
    true
}

/// Update the search box text without applying it.
pub fn set_search_input(app: &mut ListingState, text: &str) {
    app.search_input = text.to_string();
}

/// What: Apply the search box text as the name filter.
///
/// Output:
/// - `true` when the trimmed text differs from the active name query and a query was issued.
pub fn submit_search(app: &mut ListingState, query_tx: &mpsc::UnboundedSender<QueryInput>) -> bool {
    let submitted = app.search_input.trim().to_string();
    if submitted == app.filters.name_query {
        return false;
    }
    tracing::info!(name = %submitted, "name filter submitted");
    app.filters.name_query = submitted;
    refresh_from_first_page(app, query_tx);
    true
}

/// What: Parse and apply the price inputs.
///
/// Inputs:
/// - `app`: Listing state
/// - `min_input`, `max_input`: Raw text from the two price fields
/// - `query_tx`: Channel to the listing worker
///
/// Output:
/// - `true` when the range changed and a query was issued.
///
/// Details:
/// - See [`normalize_price_range`] for the parsing and clamping rules.
pub fn apply_price(
    app: &mut ListingState,
    min_input: &str,
    max_input: &str,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    let (min, max) = normalize_price_range(
        min_input,
        max_input,
        app.filters.price_range.min,
        app.filters.price_range.max,
        app.catalog_max_price,
    );
    if (min - app.filters.price_range.min).abs() < f64::EPSILON
        && (max - app.filters.price_range.max).abs() < f64::EPSILON
    {
        return false;
    }
    app.filters.price_range.min = min;
    app.filters.price_range.max = max;
    tracing::debug!(min, max, "price range applied");
    refresh_from_first_page(app, query_tx);
    true
}

/// What: Parse raw price inputs into a valid range.
///
/// Inputs:
/// - `min_input`, `max_input`: Raw text
/// - `current_min`, `current_max`: Values kept when an input does not parse
/// - `catalog_max`: Upper bound for the range
///
/// Output:
/// - `(min, max)` with `0 <= min <= max <= catalog_max`.
///
/// Details:
/// - Empty input means "unbounded": `0` for min, `catalog_max` for max.
/// - Non-numeric or non-finite input keeps the current value.
/// - A min above the max is lowered to the max.
#[must_use]
pub fn normalize_price_range(
    min_input: &str,
    max_input: &str,
    current_min: f64,
    current_max: f64,
    catalog_max: f64,
) -> (f64, f64) {
    let parse = |raw: &str, empty: f64, current: f64| {
        let raw = raw.trim();
        if raw.is_empty() {
            return empty;
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(current)
    };
    let max = parse(max_input, catalog_max, current_max).clamp(0.0, catalog_max);
    let min = parse(min_input, 0.0, current_min).clamp(0.0, max);
    (min, max)
}

/// What: Set the minimum rating filter.
///
/// Inputs:
/// - `rating`: Requested minimum; values above 4 are capped, 0 disables the filter
///
/// Output:
/// - `true` when the rating changed and a query was issued.
pub fn set_min_rating(
    app: &mut ListingState,
    rating: u8,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    let rating = rating.min(MAX_MIN_RATING);
    if rating == app.filters.min_rating {
        return false;
    }
    app.filters.min_rating = rating;
    refresh_from_first_page(app, query_tx);
    true
}

/// What: Add or remove a size from the size facet.
///
/// Output:
/// - `true` when the facet changed and a query was issued; blank sizes are ignored.
pub fn toggle_size(
    app: &mut ListingState,
    size: &str,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    let size = size.trim();
    if size.is_empty() {
        return false;
    }
    if !app.filters.selected_sizes.remove(size) {
        app.filters.selected_sizes.insert(size.to_string());
    }
    refresh_from_first_page(app, query_tx);
    true
}

/// Change the sort order; `true` when it changed and a query was issued.
pub fn set_sort(
    app: &mut ListingState,
    sort: SortOption,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    if sort == app.sort {
        return false;
    }
    app.sort = sort;
    refresh_from_first_page(app, query_tx);
    true
}

/// Change the page size; `true` when it changed and a query was issued.
pub fn set_page_size(
    app: &mut ListingState,
    page_size: u64,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    if !app.pagination.set_page_size(page_size) {
        return false;
    }
    send_query(app, query_tx);
    true
}

/// What: Navigate to a page of the current result set.
///
/// Output:
/// - `true` when a query was issued; the page is clamped to the known range.
pub fn go_to_page(
    app: &mut ListingState,
    page: u64,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) -> bool {
    if !app.pagination.go_to_page(page) {
        return false;
    }
    send_query(app, query_tx);
    true
}

/// Re-issue the current query after a failure without leaving the current page.
pub fn retry(app: &mut ListingState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    tracing::info!(page = app.pagination.page(), "retrying listing query");
    app.pagination.begin_retry();
    send_query(app, query_tx);
}

/// What: Replace every filter with its default and start over.
///
/// Details:
/// - The search box is cleared too; tree expansion and sort order are kept.
pub fn clear_all(app: &mut ListingState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    app.filters = FilterState::with_max_price(app.catalog_max_price);
    app.search_input.clear();
    tracing::info!("filters cleared");
    refresh_from_first_page(app, query_tx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CategoryTree;
    use crate::index::tests::sample_payload;

    fn app_on_page_three() -> ListingState {
        let mut app = ListingState::new(CategoryTree::build(&sample_payload()), 2000.0, 12);
        app.pagination.on_success(100);
        app.pagination.go_to_page(3);
        app.pagination.on_success(100);
        app
    }

    #[test]
    /// What: Price inputs clamp to the catalog maximum
    ///
    /// - Input: min "50", max "3000" with catalog max 2000
    /// - Output: Range `[50, 2000]`
    fn price_max_clamps_to_catalog() {
        assert_eq!(
            normalize_price_range("50", "3000", 0.0, 2000.0, 2000.0),
            (50.0, 2000.0)
        );
    }

    #[test]
    /// What: Malformed and inverted price inputs
    ///
    /// - Input: Garbage min, empty max; negative min; min above max; NaN
    /// - Output: Current value kept for garbage; empty means unbounded; ordering restored
    fn price_inputs_are_sanitized() {
        assert_eq!(
            normalize_price_range("abc", "", 10.0, 90.0, 200.0),
            (10.0, 200.0)
        );
        assert_eq!(normalize_price_range("-5", "80", 0.0, 200.0, 200.0), (0.0, 80.0));
        assert_eq!(normalize_price_range("150", "80", 0.0, 200.0, 200.0), (80.0, 80.0));
        assert_eq!(normalize_price_range("NaN", "inf", 5.0, 60.0, 200.0), (5.0, 60.0));
    }

    #[test]
    /// What: Every filter dimension change resets to page 1 before querying
    ///
    /// - Input: Listing on page 3; apply category, price, rating, size, name, sort, clear-all
    /// - Output: Each issued query targets page index 0
    fn every_filter_change_resets_page() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        type Op = fn(&mut ListingState, &mpsc::UnboundedSender<QueryInput>) -> bool;
        let ops: Vec<Op> = vec![
            |a, tx| toggle_category(a, 2, tx),
            |a, tx| apply_price(a, "10", "500", tx),
            |a, tx| set_min_rating(a, 3, tx),
            |a, tx| toggle_size(a, "M", tx),
            |a, tx| {
                set_search_input(a, "ball");
                submit_search(a, tx)
            },
            |a, tx| set_sort(a, SortOption::NameAz, tx),
            |a, tx| {
                clear_all(a, tx);
                true
            },
        ];
        for op in ops {
            let mut app = app_on_page_three();
            assert_eq!(app.pagination.page(), 3);
            assert!(op(&mut app, &tx));
            assert_eq!(app.pagination.page(), 1);
            let q = rx.try_recv().expect("query issued");
            assert_eq!(q.descriptor.page, 0);
            assert_eq!(q.id, app.latest_query_id);
        }
    }

    #[test]
    /// What: No-op operations issue no query
    ///
    /// - Input: Unknown category, same rating, same sort, blank size, unchanged search, expand toggle
    /// - Output: Nothing sent; page unchanged
    fn unchanged_operations_issue_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app_on_page_three();
        assert!(!toggle_category(&mut app, 404, &tx));
        assert!(!set_min_rating(&mut app, 0, &tx));
        assert!(!set_sort(&mut app, SortOption::Relevance, &tx));
        assert!(!toggle_size(&mut app, "  ", &tx));
        assert!(!submit_search(&mut app, &tx));
        assert!(!apply_price(&mut app, "0", "2000", &tx));
        assert!(toggle_expanded(&mut app, 1));
        assert!(!toggle_expanded(&mut app, 404));
        assert!(rx.try_recv().is_err());
        assert_eq!(app.pagination.page(), 3);
    }

    #[test]
    /// What: Clear-all restores defaults and keeps the tree expansion
    ///
    /// - Input: Selected category, price, rating, sizes and search text; then clear-all
    /// - Output: Filters equal the defaults for the catalog; expanded ancestors remain
    fn clear_all_restores_defaults() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app_on_page_three();
        toggle_category(&mut app, 6, &tx);
        apply_price(&mut app, "20", "300", &tx);
        set_min_rating(&mut app, 9, &tx);
        assert_eq!(app.filters.min_rating, MAX_MIN_RATING);
        toggle_size(&mut app, "L", &tx);
        set_search_input(&mut app, "racket");
        submit_search(&mut app, &tx);
        clear_all(&mut app, &tx);
        assert_eq!(app.filters, FilterState::with_max_price(2000.0));
        assert!(app.search_input.is_empty());
        assert!(app.expanded.is_expanded(5));
    }

    #[test]
    /// What: Page navigation and retry keep filters and page
    ///
    /// - Input: Page 3 of 9; go to page 20; fail; retry
    /// - Output: Clamped to 9; failure falls back to 3; retry re-sends page index 8
    fn navigation_and_retry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = app_on_page_three();
        assert!(go_to_page(&mut app, 20, &tx));
        assert_eq!(app.pagination.page(), 9);
        let _ = rx.try_recv();
        app.pagination.on_failure();
        assert_eq!(app.pagination.page(), 3);
        retry(&mut app, &tx);
        let q = rx.try_recv().expect("retry query");
        assert_eq!(q.descriptor.page, 8);
        assert!(set_page_size(&mut app, 24, &tx));
        assert_eq!(rx.try_recv().expect("resize query").descriptor.page, 0);
    }
}
