use futures::stream::{FuturesUnordered, StreamExt};

use crate::state::ProductId;

use super::CatalogSource;

/// What: Resolve average ratings for a page of products concurrently.
///
/// Inputs:
/// - `source`: Catalog collaborator
/// - `ids`: Products shown on the page
///
/// Output:
/// - One `(id, rating)` per requested id, in completion order.
///
/// Details:
/// - A failed or non-finite lookup yields `0.0` for that product only; the
///   failure is logged and never returned.
pub async fn fetch_ratings<S: CatalogSource>(source: &S, ids: &[ProductId]) -> Vec<(ProductId, f64)> {
    let mut pending: FuturesUnordered<_> = ids
        .iter()
        .map(|&id| async move {
            match source.fetch_rating(id).await {
                Ok(r) if r.is_finite() => (id, r.max(0.0)),
                Ok(r) => {
                    tracing::debug!(product = id, rating = r, "non-finite rating treated as 0");
                    (id, 0.0)
                }
                Err(e) => {
                    tracing::debug!(product = id, error = %e, "rating lookup failed; using 0");
                    (id, 0.0)
                }
            }
        })
        .collect();
    let mut out = Vec::with_capacity(ids.len());
    while let Some(entry) = pending.next().await {
        out.push(entry);
    }
    out
}

/// What: Determine the catalog's maximum price for the price filter.
///
/// Inputs:
/// - `source`: Catalog collaborator
/// - `fallback`: Ceiling used when the lookup fails or the catalog is empty
///
/// Output:
/// - The highest price rounded up to a whole number, or `fallback`.
pub async fn catalog_max_price<S: CatalogSource>(source: &S, fallback: f64) -> f64 {
    match source.fetch_max_price().await {
        Ok(Some(max)) if max.is_finite() && max > 0.0 => max.ceil(),
        Ok(_) => {
            tracing::info!(fallback, "catalog has no priced products; using fallback max price");
            fallback
        }
        Err(e) => {
            tracing::warn!(error = %e, fallback, "max price lookup failed; using fallback");
            fallback
        }
    }
}
