//! Command-line argument definition.

use clap::Parser;

use vitrine::state::{CategoryId, SortOption};

use super::utils::parse_sort;

/// vitrine - browse the storefront catalog with category, price, rating and size filters
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(version)]
#[command(about = "Browse the storefront catalog with category, price, rating and size filters", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Deep link to open, e.g. "category=3&parentCategory=1&name=shoe&expandFilters=true"
    #[arg(long)]
    pub link: Option<String>,

    /// Category to browse (overrides the link's `category`)
    #[arg(short, long)]
    pub category: Option<CategoryId>,

    /// Category to expand in the tree (overrides the link's `parentCategory`)
    #[arg(long)]
    pub parent_category: Option<CategoryId>,

    /// Product name filter (overrides the link's `name`)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Open the filter panel (overrides the link's `expandFilters`)
    #[arg(long)]
    pub expand_filters: bool,

    /// Lowest price; empty means no lower bound
    #[arg(long)]
    pub min_price: Option<String>,

    /// Highest price; capped at the catalog maximum
    #[arg(long)]
    pub max_price: Option<String>,

    /// Minimum average rating (0-4, 0 disables the filter)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub min_rating: Option<u8>,

    /// Size facet; repeat or separate with commas (e.g. --size M,L)
    #[arg(long = "size", value_delimiter = ',')]
    pub sizes: Vec<String>,

    /// Sort order (relevance, price-low-high, price-high-low, name-a-z, name-z-a, rating-high-low)
    #[arg(short, long, value_parser = parse_sort)]
    pub sort: Option<SortOption>,

    /// 1-based page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: u64,

    /// Results per page (overrides settings.conf)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Print the category tree with expansion and selection markers
    #[arg(long)]
    pub tree: bool,

    /// Catalog API base URL (overrides settings.conf)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Retry a failed listing query this many times
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
