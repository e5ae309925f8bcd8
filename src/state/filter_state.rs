//! Filter dimensions of the listing and the tree expansion projection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::state::types::CategoryId;

/// Highest selectable minimum rating.
pub const MAX_MIN_RATING: u8 = 4;

/// Inclusive price bounds; `0 <= min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound, never above the catalog maximum.
    pub max: f64,
}

impl PriceRange {
    /// Full range `[0, catalog_max]`.
    #[must_use]
    pub const fn full(catalog_max: f64) -> Self {
        Self {
            min: 0.0,
            max: catalog_max,
        }
    }
}

/// Canonical representation of every active filter dimension.
///
/// `selected_category_ids` is kept an antichain by
/// [`crate::logic::selection::toggle_category`]; assigning the field directly
/// bypasses that rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected categories; no member is an ancestor of another.
    pub selected_category_ids: BTreeSet<CategoryId>,
    /// Submitted name query (not the text currently being typed).
    pub name_query: String,
    /// Price bounds.
    pub price_range: PriceRange,
    /// Minimum rating in `0..=4`; `0` disables the rating filter.
    pub min_rating: u8,
    /// Selected sizes.
    pub selected_sizes: BTreeSet<String>,
}

impl FilterState {
    /// What: Build the default filter state for a catalog.
    ///
    /// Inputs:
    /// - `catalog_max`: Highest product price observed for the session
    ///
    /// Output:
    /// - No categories, sizes, name or rating filter; price range `[0, catalog_max]`.
    #[must_use]
    pub const fn with_max_price(catalog_max: f64) -> Self {
        Self {
            selected_category_ids: BTreeSet::new(),
            name_query: String::new(),
            price_range: PriceRange::full(catalog_max),
            min_rating: 0,
            selected_sizes: BTreeSet::new(),
        }
    }

    /// Whether any dimension differs from the defaults for `catalog_max`.
    #[must_use]
    pub fn is_filtering(&self, catalog_max: f64) -> bool {
        *self != Self::with_max_price(catalog_max)
    }
}

/// Which category nodes are expanded in the tree control.
///
/// Purely a visibility projection; query building never reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedCategoryMap {
    /// Explicit expansion flags; absent ids are collapsed.
    nodes: BTreeMap<CategoryId, bool>,
}

impl ExpandedCategoryMap {
    /// Creates a map with every node collapsed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Returns `true` when `id` is expanded.
    #[must_use]
    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.nodes.get(&id).copied().unwrap_or(false)
    }

    /// Marks `id` expanded. Returns `true` if it was collapsed before.
    pub fn expand(&mut self, id: CategoryId) -> bool {
        !self.nodes.insert(id, true).unwrap_or(false)
    }

    /// Marks `id` collapsed.
    pub fn collapse(&mut self, id: CategoryId) {
        self.nodes.insert(id, false);
    }

    /// Flips `id` and returns the new state.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        let next = !self.is_expanded(id);
        self.nodes.insert(id, next);
        next
    }

    /// Ids currently expanded, ascending.
    pub fn expanded_ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.nodes
            .iter()
            .filter_map(|(id, open)| open.then_some(*id))
    }
}
