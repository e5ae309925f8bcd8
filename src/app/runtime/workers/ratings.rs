use std::sync::Arc;

use tokio::sync::mpsc;

use crate::sources::{CatalogSource, fetch_ratings};
use crate::state::{RatingRequest, RatingResults};

/// What: Spawn background worker for per-product rating lookups.
///
/// Inputs:
/// - `rating_rx`: Channel receiver for rating requests
/// - `ratings_tx`: Channel sender for resolved ratings
/// - `source`: Catalog collaborator
///
/// Details:
/// - Lookups for one page run concurrently; failures resolve to `0.0`.
pub fn spawn_rating_worker<S: CatalogSource>(
    mut rating_rx: mpsc::UnboundedReceiver<RatingRequest>,
    ratings_tx: mpsc::UnboundedSender<RatingResults>,
    source: Arc<S>,
) {
    tokio::spawn(async move {
        while let Some(RatingRequest {
            query_id,
            product_ids,
        }) = rating_rx.recv().await
        {
            let tx = ratings_tx.clone();
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let ratings = fetch_ratings(source.as_ref(), &product_ids).await;
                tracing::debug!(query_id, count = ratings.len(), "ratings resolved");
                let _ = tx.send(RatingResults { query_id, ratings });
            });
        }
        tracing::debug!("rating worker stopped");
    });
}
