//! Listing state split into value types, filter dimensions and the session state.

pub mod filter_state;
pub mod listing_state;
pub mod types;

pub use filter_state::{ExpandedCategoryMap, FilterState, PriceRange};
pub use listing_state::ListingState;
pub use types::{
    CategoryId, CategoryNode, ListingResults, Product, ProductId, ProductPage, QueryDescriptor,
    QueryInput, RatingRequest, RatingResults, SortOption,
};
