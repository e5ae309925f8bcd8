/// Page response handling.
pub mod listing;
/// Rating response handling.
pub mod ratings;

pub use listing::handle_listing_results;
pub use ratings::handle_rating_results;
