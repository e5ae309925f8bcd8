use std::collections::BTreeSet;

use tokio::sync::mpsc;

use crate::index::CategoryTree;
use crate::logic::pagination::PaginationController;
use crate::state::{CategoryId, FilterState, ListingState, QueryDescriptor, QueryInput, SortOption};

/// What: Translate filters, sort and page into the request for one page of results.
///
/// Inputs:
/// - `tree`: Category index used to expand selected categories into their subtrees
/// - `filters`: Active filters
/// - `sort`: Requested order
/// - `pagination`: Current page and page size
///
/// Output:
/// - A [`QueryDescriptor`] with inactive filters left as `None`.
///
/// Details:
/// - The retrieval service matches exact category ids, so each selected category
///   contributes its whole subtree; the union is deduplicated and ascending.
/// - Zero prices, a zero rating, an empty name and an empty size set are omitted.
#[must_use]
pub fn build_query(
    tree: &CategoryTree,
    filters: &FilterState,
    sort: SortOption,
    pagination: &PaginationController,
) -> QueryDescriptor {
    let mut category_ids: BTreeSet<CategoryId> = BTreeSet::new();
    for &id in &filters.selected_category_ids {
        category_ids.extend(tree.descendant_ids(id));
    }
    let name = filters.name_query.trim();
    let positive = |v: f64| (v > 0.0).then_some(v);

    QueryDescriptor {
        page: pagination.page_index(),
        size: pagination.page_size(),
        name: (!name.is_empty()).then(|| name.to_string()),
        min_price: positive(filters.price_range.min),
        max_price: positive(filters.price_range.max),
        min_rating: (filters.min_rating > 0).then_some(filters.min_rating),
        sizes: (!filters.selected_sizes.is_empty()).then(|| {
            filters
                .selected_sizes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",")
        }),
        category_ids: (!category_ids.is_empty()).then(|| category_ids.into_iter().collect()),
        sort: sort.as_query_key(),
    }
}

/// What: Render a descriptor as URL query pairs for the retrieval endpoint.
///
/// Inputs:
/// - `q`: Descriptor to render
///
/// Output:
/// - `(key, value)` pairs in a stable order; absent fields produce no pair.
#[must_use]
pub fn to_query_pairs(q: &QueryDescriptor) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("page", q.page.to_string()), ("size", q.size.to_string())];
    if let Some(name) = &q.name {
        pairs.push(("name", name.clone()));
    }
    if let Some(v) = q.min_price {
        pairs.push(("minPrice", format_price(v)));
    }
    if let Some(v) = q.max_price {
        pairs.push(("maxPrice", format_price(v)));
    }
    if let Some(v) = q.min_rating {
        pairs.push(("minRating", v.to_string()));
    }
    if let Some(sizes) = &q.sizes {
        pairs.push(("sizes", sizes.clone()));
    }
    if let Some(ids) = &q.category_ids {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        pairs.push(("categoryIds", joined));
    }
    if let Some(sort) = q.sort {
        pairs.push(("sort", sort.to_string()));
    }
    pairs
}

/// Format a price without a trailing `.0` for whole numbers.
fn format_price(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

/// What: Send the query for the current listing state with a fresh id.
///
/// Inputs:
/// - `app`: Mutable listing state; updates `next_query_id` and `latest_query_id`
/// - `query_tx`: Channel to send the `QueryInput`
///
/// Output:
/// - Sends a `QueryInput` with incremented id and the current descriptor.
///
/// Details:
/// - The id allows correlating responses so stale results can be discarded.
pub fn send_query(app: &mut ListingState, query_tx: &mpsc::UnboundedSender<QueryInput>) {
    let id = app.next_query_id;
    app.next_query_id += 1;
    app.latest_query_id = id;
    let descriptor = build_query(&app.tree, &app.filters, app.sort, &app.pagination);
    tracing::debug!(
        id,
        page = descriptor.page,
        size = descriptor.size,
        categories = descriptor.category_ids.as_ref().map_or(0, Vec::len),
        "listing query issued"
    );
    let _ = query_tx.send(QueryInput { id, descriptor });
}
