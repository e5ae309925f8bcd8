//! One-shot listing: open a session, apply the link and flags, print the page.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use vitrine::app::{Channels, SessionOptions, open_listing, run_until_settled};
use vitrine::config::{Settings, load_settings};
use vitrine::index::visible_rows;
use vitrine::logic::filter::{normalize_price_range, refresh_from_first_page};
use vitrine::logic::{self, NavParams, seed_from_navigation};
use vitrine::sources::HttpCatalog;
use vitrine::state::filter_state::MAX_MIN_RATING;
use vitrine::state::{ListingState, PriceRange};

use super::Args;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run one listing against the configured catalog and print it.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - `Ok(true)` when a page was shown; `Ok(false)` when the listing query failed
///   (error and retry hint printed); `Err` when the session could not be opened.
///
/// # Errors
/// - Returns `Err` when the HTTP client cannot be built or categories cannot be loaded
/// - Returns `Err` when the listing does not settle before the timeout
pub async fn run_listing(args: &Args) -> Result<bool> {
    let settings = effective_settings(args, load_settings());
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let catalog = Arc::new(HttpCatalog::new(&settings.api_base_url, timeout)?);
    tracing::info!(api = %catalog.base_url(), "opening listing");

    let options = SessionOptions {
        page_size: settings.page_size,
        sort: settings.default_sort,
        fallback_max_price: settings.fallback_max_price,
    };
    let mut app = open_listing(catalog.as_ref(), &options).await?;
    let mut channels = Channels::new(Arc::clone(&catalog));
    // Listing and rating lookups each get one timeout, plus slack for a clamp re-issue.
    let settle_timeout = timeout.saturating_mul(3);

    seed_from_navigation(&mut app, &nav_params(args));
    apply_filter_flags(&mut app, args);
    refresh_from_first_page(&mut app, &channels.query_tx);
    settle_with_retries(&mut app, &mut channels, settle_timeout, args.retries).await?;

    // The requested page is clamped against the total known from the first page.
    if args.page > 1
        && app.last_error.is_none()
        && logic::go_to_page(&mut app, args.page, &channels.query_tx)
    {
        settle_with_retries(&mut app, &mut channels, settle_timeout, args.retries).await?;
    }

    print!("{}", render_listing(&app, args.tree));
    Ok(app.last_error.is_none())
}

/// Settings from `settings.conf` with command-line overrides applied.
fn effective_settings(args: &Args, mut settings: Settings) -> Settings {
    if let Some(url) = args.api_url.as_deref() {
        settings.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(size) = args.page_size.filter(|&s| s > 0) {
        settings.page_size = size;
    }
    if let Some(sort) = args.sort {
        settings.default_sort = sort;
    }
    settings
}

/// What: Combine `--link` with the individual navigation flags.
///
/// Output:
/// - Link parameters where every flag that is given replaces the link's value.
fn nav_params(args: &Args) -> NavParams {
    let mut params = args.link.as_deref().map(NavParams::parse).unwrap_or_default();
    if args.category.is_some() {
        params.category = args.category;
    }
    if args.parent_category.is_some() {
        params.parent_category = args.parent_category;
    }
    if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        params.name = Some(name.to_string());
    }
    params.expand_filters |= args.expand_filters;
    params
}

/// What: Apply the filter flags to the seeded state.
///
/// Details:
/// - Uses the same normalization as the listing operations but issues no query;
///   the caller sends the single first-page query for the whole batch.
fn apply_filter_flags(app: &mut ListingState, args: &Args) {
    if args.min_price.is_some() || args.max_price.is_some() {
        let (min, max) = normalize_price_range(
            args.min_price.as_deref().unwrap_or(""),
            args.max_price.as_deref().unwrap_or(""),
            app.filters.price_range.min,
            app.filters.price_range.max,
            app.catalog_max_price,
        );
        app.filters.price_range = PriceRange { min, max };
    }
    if let Some(rating) = args.min_rating {
        app.filters.min_rating = rating.min(MAX_MIN_RATING);
    }
    app.filters.selected_sizes.extend(
        args.sizes
            .iter()
            .map(|size| size.trim())
            .filter(|size| !size.is_empty())
            .map(str::to_string),
    );
    tracing::debug!(filters = ?app.filters, "filter flags applied");
}

/// Wait for the listing to settle, re-issuing a failed query up to `retries` times.
async fn settle_with_retries(
    app: &mut ListingState,
    channels: &mut Channels,
    timeout: Duration,
    retries: u32,
) -> Result<()> {
    run_until_settled(app, channels, timeout).await?;
    for attempt in 1..=retries {
        if app.last_error.is_none() {
            break;
        }
        tracing::info!(attempt, retries, "retrying failed listing query");
        logic::retry(app, &channels.query_tx);
        run_until_settled(app, channels, timeout).await?;
    }
    Ok(())
}

/// Shareable link for the current category selection, when there is exactly one.
fn share_params(app: &ListingState) -> Option<NavParams> {
    let mut selected = app.filters.selected_category_ids.iter();
    let (Some(&id), None) = (selected.next(), selected.next()) else {
        return None;
    };
    Some(NavParams {
        category: Some(id),
        parent_category: app.tree.parent(id),
        name: (!app.filters.name_query.is_empty()).then(|| app.filters.name_query.clone()),
        expand_filters: app.filters_panel_open,
    })
}

/// What: Render the listing as plain text.
///
/// Inputs:
/// - `app`: Settled listing state
/// - `show_tree`: Whether to include the category tree
///
/// Output:
/// - Text ending in a newline: optional tree, range header, products, and either
///   a share link or the error with a retry hint.
pub fn render_listing(app: &ListingState, show_tree: bool) -> String {
    let mut out = String::new();
    if show_tree {
        out.push_str("Categories:\n");
        for row in visible_rows(&app.tree, &app.expanded, &app.filters.selected_category_ids) {
            let marker = match (row.has_children, row.expanded) {
                (false, _) => "   ",
                (true, true) => "[-]",
                (true, false) => "[+]",
            };
            let check = if row.selected { "x" } else { " " };
            let _ = writeln!(
                out,
                "{indent}{marker} [{check}] {name} ({id})",
                indent = "  ".repeat(row.depth + 1),
                name = row.name,
                id = row.id
            );
        }
        out.push('\n');
    }

    if let Some(err) = &app.last_error {
        let _ = writeln!(out, "Could not load products: {err}");
        out.push_str("Retry with the same arguments or pass --retries <N>.\n");
        if !app.products.is_empty() {
            out.push_str("Showing the previous results:\n");
        }
    }

    let p = &app.pagination;
    match p.range_label() {
        Some((first, last)) => {
            let _ = writeln!(
                out,
                "Products {first}-{last} of {total} (page {page} of {pages}, sort: {sort})",
                total = p.total_results(),
                page = p.page(),
                pages = p.last_page(),
                sort = app.sort.as_config_key()
            );
        }
        None if app.has_loaded => out.push_str("No products match the current filters.\n"),
        None => {}
    }
    for product in &app.products {
        let rating = app.rating_of(product.id);
        let _ = writeln!(
            out,
            "  #{id:<6} {name:<40} {price:>10.2}  {rating:.1}/5",
            id = product.id,
            name = product.name,
            price = product.price
        );
    }

    if app.last_error.is_none()
        && let Some(params) = share_params(app)
    {
        let _ = writeln!(out, "\nShare: ?{}", params.to_query_string());
    }
    out
}
