//! Command-line argument parsing and the one-shot listing run.

pub mod definition;
pub mod listing;
pub mod utils;

// Re-export commonly used items
pub use definition::Args;
pub use listing::run_listing;
pub use utils::determine_log_level;
