//! Inbound deep-link handling: navigation parameters seed the listing filters.
//!
//! Local filter edits are never written back to navigation parameters.

use tokio::sync::mpsc;

use crate::logic::filter::refresh_from_first_page;
use crate::state::{CategoryId, ListingState, QueryInput};
use crate::util::{parse_query_string, percent_encode};

/// What: Parameters understood on entry to the listing.
///
/// Details:
/// - Malformed ids parse to `None`; unknown keys never reach this struct.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavParams {
    /// Category to select (`category`).
    pub category: Option<CategoryId>,
    /// Category to expand (`parentCategory`).
    pub parent_category: Option<CategoryId>,
    /// Name filter and search box text (`name`).
    pub name: Option<String>,
    /// Whether the filter panel starts open (`expandFilters`).
    pub expand_filters: bool,
}

impl NavParams {
    /// What: Parse navigation parameters from a query string.
    ///
    /// Inputs:
    /// - `query`: `a=b&c=d` with optional leading `?`, or a whole link
    ///
    /// Output:
    /// - Parsed parameters; see [`Self::from_pairs`].
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let pairs = parse_query_string(query);
        Self::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// What: Parse navigation parameters from decoded key/value pairs.
    ///
    /// Inputs:
    /// - `pairs`: Decoded pairs in link order
    ///
    /// Output:
    /// - Parameters where the last occurrence of each key wins.
    ///
    /// Details:
    /// - Non-numeric ids are ignored; a later malformed id clears an earlier valid one.
    /// - `expandFilters` is only true for `true` in any letter case.
    /// - A blank `name` counts as absent.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (key, value) in pairs {
            match key {
                "category" => out.category = parse_id(value),
                "parentCategory" => out.parent_category = parse_id(value),
                "name" => {
                    let trimmed = value.trim();
                    out.name = (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
                "expandFilters" => out.expand_filters = value.trim().eq_ignore_ascii_case("true"),
                other => tracing::trace!(key = other, "unknown navigation parameter ignored"),
            }
        }
        out
    }

    /// Returns `true` when no parameter would change the listing state.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.parent_category.is_none()
            && self.name.is_none()
            && !self.expand_filters
    }

    /// What: Render the parameters as a shareable query string.
    ///
    /// Output:
    /// - `category=..&parentCategory=..&name=..&expandFilters=true` with absent
    ///   parameters left out; empty when nothing is set.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(id) = self.category {
            parts.push(format!("category={id}"));
        }
        if let Some(id) = self.parent_category {
            parts.push(format!("parentCategory={id}"));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name={}", percent_encode(name)));
        }
        if self.expand_filters {
            parts.push("expandFilters=true".to_string());
        }
        parts.join("&")
    }
}

fn parse_id(raw: &str) -> Option<CategoryId> {
    raw.trim().parse::<CategoryId>().ok()
}

/// What: Seed the listing state from navigation parameters.
///
/// Inputs:
/// - `app`: Listing state
/// - `params`: Parsed navigation parameters
///
/// Output:
/// - `true` when filters changed (pagination was reset); expansion and panel
///   changes alone do not count.
///
/// Details:
/// - A known `category` replaces the selection and its ancestors are expanded.
/// - `parentCategory` is expanded when known; without it the tree parent of the
///   seeded category is expanded.
/// - `name` seeds both the name filter and the search box.
/// - Unknown ids are ignored.
pub fn seed_from_navigation(app: &mut ListingState, params: &NavParams) -> bool {
    let mut filters_changed = false;
    let seeded = params.category.filter(|&id| {
        let known = app.tree.contains(id);
        if !known {
            tracing::debug!(category = id, "deep link references unknown category");
        }
        known
    });
    if let Some(id) = seeded {
        let selection = std::collections::BTreeSet::from([id]);
        if app.filters.selected_category_ids != selection {
            app.filters.selected_category_ids = selection;
            filters_changed = true;
        }
        for ancestor in app.tree.ancestor_chain(id) {
            app.expanded.expand(ancestor);
        }
    }
    match params.parent_category.filter(|&id| app.tree.contains(id)) {
        Some(parent) => {
            app.expanded.expand(parent);
        }
        None => {
            if let Some(parent) = seeded.and_then(|id| app.tree.parent(id)) {
                app.expanded.expand(parent);
            }
        }
    }
    if let Some(name) = &params.name {
        app.search_input.clone_from(name);
        if app.filters.name_query != *name {
            app.filters.name_query.clone_from(name);
            filters_changed = true;
        }
    }
    app.filters_panel_open = params.expand_filters;
    if filters_changed {
        app.pagination.reset_for_filter_change();
    }
    tracing::info!(
        category = ?seeded,
        name = ?params.name,
        expand_filters = params.expand_filters,
        "listing seeded from navigation"
    );
    filters_changed
}

/// What: Apply navigation parameters and issue the query for the seeded state.
///
/// Inputs:
/// - `app`: Listing state
/// - `params`: Parsed navigation parameters
/// - `query_tx`: Channel to the listing worker
///
/// Details:
/// - A query is always issued so entering the listing shows results.
pub fn apply_navigation(
    app: &mut ListingState,
    params: &NavParams,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
) {
    seed_from_navigation(app, params);
    refresh_from_first_page(app, query_tx);
}
