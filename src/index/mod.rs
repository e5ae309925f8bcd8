//! In-memory category index built once per listing session.
//!
//! The tree is an arena: nodes live in a `Vec` and refer to each other by
//! [`CategoryId`], with a derived id-to-slot map for O(1) lookups. Tree walks
//! (descendants, ancestors) go through id lookups only.

use std::collections::{BTreeSet, HashMap};

use crate::state::types::{CategoryId, CategoryNode};

mod rows;

pub use rows::{CategoryRow, visible_rows};

/// What: One node of the category arena.
///
/// Details:
/// - `parent_id` and `children` are consistent both ways after [`CategoryTree::build`].
/// - `children` keeps payload order, which is also display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Unique id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Parent id; `None` for roots.
    pub parent_id: Option<CategoryId>,
    /// Child ids in display order.
    pub children: Vec<CategoryId>,
}

/// What: Hierarchical category index with id lookup, descendant and ancestor walks.
///
/// Inputs:
/// - Built from the category payload via [`CategoryTree::build`].
///
/// Output:
/// - Read-only queries used by selection, navigation and query building.
///
/// Details:
/// - Immutable for the lifetime of a listing session.
#[derive(Clone, Debug, Default)]
pub struct CategoryTree {
    /// Nodes in payload pre-order.
    nodes: Vec<Category>,
    /// Id to position in `nodes`.
    id_to_idx: HashMap<CategoryId, usize>,
    /// Root ids in display order.
    roots: Vec<CategoryId>,
}

/// Flattened payload entry before linking.
struct PendingNode {
    /// Node id.
    id: CategoryId,
    /// Display name.
    name: String,
    /// Parent named by nesting, or by `parent_id` for top-level entries.
    parent_hint: Option<CategoryId>,
}

impl CategoryTree {
    /// What: Build the index from a nested or flat category payload.
    ///
    /// Inputs:
    /// - `payload`: Roots with nested `children`, or a flat list carrying `parent_id`, or a mix
    ///
    /// Output:
    /// - A consistent tree; never fails.
    ///
    /// Details:
    /// - Nesting wins over a child's own `parent_id` when both are present.
    /// - Duplicate ids keep their first occurrence.
    /// - A parent that is unknown, is the node itself, or would close a cycle is
    ///   dropped and the node becomes a root.
    #[must_use]
    pub fn build(payload: &[CategoryNode]) -> Self {
        let mut pending = Vec::new();
        for node in payload {
            flatten(node, node.parent_id, &mut pending);
        }

        let mut tree = Self::default();
        for p in &pending {
            if tree.id_to_idx.contains_key(&p.id) {
                tracing::debug!(id = p.id, "duplicate category id ignored");
                continue;
            }
            tree.id_to_idx.insert(p.id, tree.nodes.len());
            tree.nodes.push(Category {
                id: p.id,
                name: p.name.clone(),
                parent_id: None,
                children: Vec::new(),
            });
        }

        let mut linked = BTreeSet::new();
        for p in pending {
            if !linked.insert(p.id) {
                continue;
            }
            let parent = p
                .parent_hint
                .filter(|pid| *pid != p.id && tree.contains(*pid))
                .filter(|pid| !tree.ancestor_chain(*pid).contains(&p.id));
            match parent {
                Some(pid) => {
                    if let Some(&i) = tree.id_to_idx.get(&p.id) {
                        tree.nodes[i].parent_id = Some(pid);
                    }
                    if let Some(&pi) = tree.id_to_idx.get(&pid) {
                        tree.nodes[pi].children.push(p.id);
                    }
                }
                None => {
                    if p.parent_hint.is_some() {
                        tracing::debug!(
                            id = p.id,
                            parent = ?p.parent_hint,
                            "category parent unusable; promoted to root"
                        );
                    }
                    tree.roots.push(p.id);
                }
            }
        }
        tracing::debug!(
            nodes = tree.nodes.len(),
            roots = tree.roots.len(),
            "category tree built"
        );
        tree
    }

    /// Look up a node; unknown ids yield `None`.
    #[must_use]
    pub fn find_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.id_to_idx.get(&id).and_then(|&i| self.nodes.get(i))
    }

    /// Returns `true` when `id` names a node of this tree.
    #[must_use]
    pub fn contains(&self, id: CategoryId) -> bool {
        self.id_to_idx.contains_key(&id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root ids in display order.
    #[must_use]
    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    /// Child ids of `id` in display order; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: CategoryId) -> &[CategoryId] {
        self.find_by_id(id)
            .map(|c| c.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: CategoryId) -> Option<CategoryId> {
        self.find_by_id(id).and_then(|c| c.parent_id)
    }

    /// What: Collect the subtree ids of a category.
    ///
    /// Inputs:
    /// - `id`: Category whose subtree is requested
    ///
    /// Output:
    /// - `id` plus every descendant; empty when `id` is unknown.
    #[must_use]
    pub fn descendant_ids(&self, id: CategoryId) -> BTreeSet<CategoryId> {
        let mut out = BTreeSet::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if out.insert(current) {
                stack.extend(self.children(current).iter().copied());
            }
        }
        out
    }

    /// What: Walk from a category up to its root.
    ///
    /// Inputs:
    /// - `id`: Starting category
    ///
    /// Output:
    /// - Ancestor ids, nearest first; excludes `id`; empty for roots and unknown ids.
    #[must_use]
    pub fn ancestor_chain(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(pid) = current {
            // Bounded by node count in case a caller links nodes by hand.
            if chain.len() >= self.nodes.len() {
                break;
            }
            chain.push(pid);
            current = self.parent(pid);
        }
        chain
    }

    /// Depth of `id` (roots are 0).
    #[must_use]
    pub fn depth(&self, id: CategoryId) -> usize {
        self.ancestor_chain(id).len()
    }

    /// Returns `true` when `ancestor` lies strictly above `id`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: CategoryId, id: CategoryId) -> bool {
        self.ancestor_chain(id).contains(&ancestor)
    }
}

/// Append `node` and its nested children to `out` in pre-order.
fn flatten(node: &CategoryNode, parent_hint: Option<CategoryId>, out: &mut Vec<PendingNode>) {
    out.push(PendingNode {
        id: node.id,
        name: node.name.clone(),
        parent_hint,
    });
    for child in &node.children {
        flatten(child, Some(node.id), out);
    }
}
