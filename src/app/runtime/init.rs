use crate::index::CategoryTree;
use crate::logic::pagination::DEFAULT_PAGE_SIZE;
use crate::sources::{CatalogSource, catalog_max_price};
use crate::state::listing_state::DEFAULT_CATALOG_MAX_PRICE;
use crate::state::{ListingState, SortOption};

use super::Result;

/// What: Per-session parameters for opening a listing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOptions {
    /// Results per page.
    pub page_size: u64,
    /// Initial sort order.
    pub sort: SortOption,
    /// Price ceiling used when the catalog maximum cannot be determined.
    pub fallback_max_price: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortOption::Relevance,
            fallback_max_price: DEFAULT_CATALOG_MAX_PRICE,
        }
    }
}

/// What: Load the category tree and catalog maximum price and create the listing state.
///
/// Inputs:
/// - `source`: Catalog collaborator
/// - `options`: Page size, initial sort and price fallback
///
/// Output:
/// - `Ok(ListingState)` ready for navigation seeding; no query issued yet.
///
/// # Errors
/// - Returns `Err` when the category tree cannot be loaded
///
/// Details:
/// - Both lookups run concurrently; the maximum price falls back instead of failing.
pub async fn open_listing<S: CatalogSource>(
    source: &S,
    options: &SessionOptions,
) -> Result<ListingState> {
    let (categories, max_price) = tokio::join!(
        source.fetch_categories(),
        catalog_max_price(source, options.fallback_max_price)
    );
    let payload = categories.map_err(|e| format!("failed to load categories: {e}"))?;
    let tree = CategoryTree::build(&payload);
    let mut app = ListingState::new(tree, max_price, options.page_size);
    app.sort = options.sort;
    tracing::info!(
        categories = app.tree.len(),
        max_price = app.catalog_max_price,
        page_size = app.pagination.page_size(),
        sort = app.sort.as_config_key(),
        "listing session opened"
    );
    Ok(app)
}
