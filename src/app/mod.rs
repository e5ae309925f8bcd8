//! Listing runtime: background workers, result handlers and the event loop
//! that drives one listing session against a catalog source.

/// Runtime event loop and background workers.
pub mod runtime;

pub use runtime::{
    Channels, SessionOptions, drive_for, handle_listing_results, handle_rating_results,
    open_listing, run_until_settled,
};
