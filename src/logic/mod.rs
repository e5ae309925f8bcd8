//! Listing logic split into modular submodules: selection rules, filter
//! operations, deep-link seeding, query building and pagination.

pub mod filter;
pub mod navigation;
pub mod pagination;
pub mod query;
pub mod selection;

// Re-export the operations used by the runtime and the CLI (crate::logic::...)
pub use filter::{
    apply_price, clear_all, go_to_page, retry, set_min_rating, set_page_size, set_search_input,
    set_sort, submit_search, toggle_category, toggle_expanded, toggle_size,
};
pub use navigation::{NavParams, apply_navigation, seed_from_navigation};
pub use pagination::{CompletionOutcome, DEFAULT_PAGE_SIZE, PagePhase, PaginationController};
pub use query::{build_query, send_query, to_query_pairs};
pub use selection::is_antichain;
