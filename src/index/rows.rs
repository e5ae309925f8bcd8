//! Flattening of the category tree into the rows a tree control shows.

use std::collections::BTreeSet;

use crate::state::filter_state::ExpandedCategoryMap;
use crate::state::types::CategoryId;

use super::CategoryTree;

/// A visible row of the category tree control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRow {
    /// Category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Depth below the roots (0 for roots).
    pub depth: usize,
    /// Whether the node has children (shows an expand affordance).
    pub has_children: bool,
    /// Whether the node is currently expanded.
    pub expanded: bool,
    /// Whether the node is in the current category selection.
    pub selected: bool,
}

/// What: Flatten the tree into display rows honoring the expansion map.
///
/// Inputs:
/// - `tree`: Category index
/// - `expanded`: Expansion flags
/// - `selected`: Current category selection
///
/// Output:
/// - Rows in display order; children of collapsed nodes are omitted.
///
/// Details:
/// - Roots are always visible.
#[must_use]
pub fn visible_rows(
    tree: &CategoryTree,
    expanded: &ExpandedCategoryMap,
    selected: &BTreeSet<CategoryId>,
) -> Vec<CategoryRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(CategoryId, usize)> =
        tree.roots().iter().rev().map(|&id| (id, 0)).collect();
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.find_by_id(id) else {
            continue;
        };
        let open = expanded.is_expanded(id);
        rows.push(CategoryRow {
            id,
            name: node.name.clone(),
            depth,
            has_children: !node.children.is_empty(),
            expanded: open,
            selected: selected.contains(&id),
        });
        if open {
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
    }
    rows
}
