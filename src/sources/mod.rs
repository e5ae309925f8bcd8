//! Catalog retrieval split into submodules.
//!
//! The listing engine talks to the catalog only through [`CatalogSource`]; the
//! HTTP implementation lives in [`HttpCatalog`].

use std::future::Future;

use crate::state::{CategoryNode, ProductId, ProductPage, QueryDescriptor};

mod categories;
mod http;
mod ratings;
mod search;

/// Result type for catalog retrieval.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use categories::parse_categories;
pub use http::HttpCatalog;
pub use ratings::{catalog_max_price, fetch_ratings};
pub use search::{page_url, parse_page};

/// What: Remote collaborator that serves products, categories and ratings.
///
/// Details:
/// - Futures are `Send` so workers can run each call on its own task.
/// - Implementations report transport and status failures as `Err`; the engine
///   decides how each failure degrades the listing.
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetch one page of products matching `query`.
    fn fetch_page(
        &self,
        query: &QueryDescriptor,
    ) -> impl Future<Output = Result<ProductPage>> + Send;

    /// Fetch the category payload (nested roots or a flat list).
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<CategoryNode>>> + Send;

    /// Fetch the average rating of one product.
    fn fetch_rating(&self, id: ProductId) -> impl Future<Output = Result<f64>> + Send;

    /// Fetch the highest product price in the catalog; `None` for an empty catalog.
    fn fetch_max_price(&self) -> impl Future<Output = Result<Option<f64>>> + Send;
}
