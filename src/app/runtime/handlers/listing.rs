use tokio::sync::mpsc;

use crate::logic::pagination::CompletionOutcome;
use crate::logic::send_query;
use crate::state::{ListingResults, ListingState, QueryInput, RatingRequest};

/// What: Apply a page response to the listing state.
///
/// Inputs:
/// - `app`: Listing state
/// - `results`: Response from the listing worker
/// - `query_tx`: Channel used when the page has to be re-requested
/// - `rating_tx`: Channel for the rating lookups of an applied page
///
/// Output:
/// - `true` when the response was current (applied, re-issued or recorded as failure).
///
/// Details:
/// - Responses whose id is not the latest issued are discarded untouched.
/// - A page past the end of the result set clamps pagination and re-issues the
///   query instead of showing an empty page.
/// - On failure the previous products stay and `last_error` is set.
pub fn handle_listing_results(
    app: &mut ListingState,
    results: ListingResults,
    query_tx: &mpsc::UnboundedSender<QueryInput>,
    rating_tx: &mpsc::UnboundedSender<RatingRequest>,
) -> bool {
    if results.id != app.latest_query_id {
        tracing::debug!(
            id = results.id,
            latest = app.latest_query_id,
            "stale listing response discarded"
        );
        return false;
    }
    match results.outcome {
        Ok(page) => match app.pagination.on_success(page.total_elements) {
            CompletionOutcome::Reissue { page: clamped } => {
                tracing::info!(
                    page = clamped,
                    total = page.total_elements,
                    "requested page past end; re-issuing clamped page"
                );
                send_query(app, query_tx);
            }
            CompletionOutcome::Applied => {
                app.products = page.content;
                app.ratings.clear();
                app.last_error = None;
                app.has_loaded = true;
                app.displayed_query_id = results.id;
                let product_ids: Vec<_> = app.products.iter().map(|p| p.id).collect();
                app.ratings_pending = !product_ids.is_empty();
                tracing::info!(
                    id = results.id,
                    page = app.pagination.page(),
                    items = product_ids.len(),
                    total = page.total_elements,
                    "listing page applied"
                );
                if app.ratings_pending
                    && rating_tx
                        .send(RatingRequest {
                            query_id: results.id,
                            product_ids,
                        })
                        .is_err()
                {
                    tracing::warn!("rating worker unavailable; ratings default to 0");
                    app.ratings_pending = false;
                }
            }
        },
        Err(e) => {
            app.pagination.on_failure();
            tracing::warn!(id = results.id, error = %e, "listing unavailable; retry possible");
            app.last_error = Some(e);
        }
    }
    true
}
