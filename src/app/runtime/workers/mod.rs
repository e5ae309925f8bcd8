/// Paginated listing worker.
pub mod listing;
/// Per-product rating worker.
pub mod ratings;

pub use listing::spawn_listing_worker;
pub use ratings::spawn_rating_worker;
