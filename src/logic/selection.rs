//! Category selection rules: the selection set stays an antichain of the tree.

use crate::index::CategoryTree;
use crate::state::filter_state::{ExpandedCategoryMap, FilterState};
use crate::state::types::CategoryId;

/// What: Toggle a category in the selection while keeping it an antichain.
///
/// Inputs:
/// - `filters`: Filter state holding `selected_category_ids`
/// - `expanded`: Tree expansion flags
/// - `tree`: Category index
/// - `id`: Category the user clicked
///
/// Output:
/// - `true` when the selection changed; `false` for unknown ids.
///
/// Details:
/// - A selected id is simply removed; nothing else changes.
/// - A newly selected id evicts every selected descendant and every selected
///   ancestor, then all of its ancestors are expanded so it stays visible.
/// - Both evictions run unconditionally from the toggled node's point of view.
pub fn toggle_category(
    filters: &mut FilterState,
    expanded: &mut ExpandedCategoryMap,
    tree: &CategoryTree,
    id: CategoryId,
) -> bool {
    if tree.find_by_id(id).is_none() {
        tracing::debug!(category = id, "toggle for unknown category ignored");
        return false;
    }
    let selected = &mut filters.selected_category_ids;
    if selected.remove(&id) {
        tracing::debug!(category = id, "category deselected");
        return true;
    }

    selected.insert(id);
    for descendant in tree.descendant_ids(id) {
        if descendant != id {
            selected.remove(&descendant);
        }
    }
    let ancestors = tree.ancestor_chain(id);
    for ancestor in &ancestors {
        selected.remove(ancestor);
    }
    for ancestor in ancestors {
        expanded.expand(ancestor);
    }
    tracing::debug!(
        category = id,
        selected = selected.len(),
        "category selected"
    );
    true
}

/// What: Check the antichain invariant of a selection.
///
/// Inputs:
/// - `tree`: Category index
/// - `filters`: Filter state to inspect
///
/// Output:
/// - `true` when no selected id is an ancestor of another selected id.
#[must_use]
pub fn is_antichain(tree: &CategoryTree, filters: &FilterState) -> bool {
    filters.selected_category_ids.iter().all(|&id| {
        tree.ancestor_chain(id)
            .iter()
            .all(|a| !filters.selected_category_ids.contains(a))
    })
}
