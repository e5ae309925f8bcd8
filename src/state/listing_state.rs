//! State owned by the product listing screen.

use std::collections::HashMap;

use crate::index::CategoryTree;
use crate::logic::pagination::{DEFAULT_PAGE_SIZE, PaginationController};
use crate::state::filter_state::{ExpandedCategoryMap, FilterState};
use crate::state::types::{Product, ProductId, SortOption};

/// Maximum price assumed when the catalog maximum cannot be determined.
pub const DEFAULT_CATALOG_MAX_PRICE: f64 = 1000.0;

/// What: Everything the listing screen knows about the current query and its results.
///
/// Inputs:
/// - Created once per listing session from the category tree and catalog maximum price.
///
/// Output:
/// - Mutated only through the named operations in [`crate::logic`] and the
///   result handlers in the runtime; read by the presentation layer.
///
/// Details:
/// - `next_query_id` / `latest_query_id` correlate responses so stale ones are dropped.
/// - `products` and `ratings` always belong to the last applied response.
#[derive(Clone, Debug)]
pub struct ListingState {
    /// Category index for this session.
    pub tree: CategoryTree,
    /// Active filters.
    pub filters: FilterState,
    /// Tree expansion flags.
    pub expanded: ExpandedCategoryMap,
    /// Text in the search box; becomes `filters.name_query` on submit.
    pub search_input: String,
    /// Whether the filter panel is open (pass-through from navigation).
    pub filters_panel_open: bool,
    /// Requested sort order.
    pub sort: SortOption,
    /// Page bookkeeping.
    pub pagination: PaginationController,
    /// Highest product price in the catalog, computed once per session.
    pub catalog_max_price: f64,
    /// Products of the last applied page.
    pub products: Vec<Product>,
    /// Average rating per displayed product.
    pub ratings: HashMap<ProductId, f64>,
    /// Whether rating lookups for the displayed page are outstanding.
    pub ratings_pending: bool,
    /// Error text of the last failed query; cleared by the next success.
    pub last_error: Option<String>,
    /// Whether any response has been applied this session.
    pub has_loaded: bool,
    /// Next query id to hand out.
    pub next_query_id: u64,
    /// Id of the most recently issued query.
    pub latest_query_id: u64,
    /// Id of the query whose page is displayed; rating results must match it.
    pub displayed_query_id: u64,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(
            CategoryTree::default(),
            DEFAULT_CATALOG_MAX_PRICE,
            DEFAULT_PAGE_SIZE,
        )
    }
}

impl ListingState {
    /// What: Create the state for a fresh listing session.
    ///
    /// Inputs:
    /// - `tree`: Category index built from the category payload
    /// - `catalog_max_price`: Highest price in the catalog; non-finite or negative values use the default
    /// - `page_size`: Results per page
    ///
    /// Output:
    /// - Default filters spanning `[0, catalog_max_price]`, page 1, nothing loaded.
    #[must_use]
    pub fn new(tree: CategoryTree, catalog_max_price: f64, page_size: u64) -> Self {
        let catalog_max_price = if catalog_max_price.is_finite() && catalog_max_price >= 0.0 {
            catalog_max_price
        } else {
            DEFAULT_CATALOG_MAX_PRICE
        };
        Self {
            tree,
            filters: FilterState::with_max_price(catalog_max_price),
            expanded: ExpandedCategoryMap::new(),
            search_input: String::new(),
            filters_panel_open: false,
            sort: SortOption::default(),
            pagination: PaginationController::new(page_size),
            catalog_max_price,
            products: Vec::new(),
            ratings: HashMap::new(),
            ratings_pending: false,
            last_error: None,
            has_loaded: false,
            next_query_id: 1,
            latest_query_id: 0,
            displayed_query_id: 0,
        }
    }

    /// Rating of a displayed product; products without a resolved rating report `0.0`.
    #[must_use]
    pub fn rating_of(&self, id: ProductId) -> f64 {
        self.ratings.get(&id).copied().unwrap_or(0.0)
    }

    /// Returns `true` when no query or rating lookup is outstanding.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.pagination.is_fetching() && !self.ratings_pending
    }
}
