use std::sync::Arc;

use tokio::sync::mpsc;

use crate::sources::CatalogSource;
use crate::state::{ListingResults, QueryInput};

/// What: Spawn background worker for listing queries.
///
/// Inputs:
/// - `query_rx`: Channel receiver for listing queries
/// - `listing_tx`: Channel sender for page responses
/// - `source`: Catalog collaborator
///
/// Details:
/// - Each query runs on its own task, so a slow response never delays a newer one.
/// - Responses carry the query id; the event loop drops those that are no longer latest.
/// - Failures are forwarded as error text; the worker itself never stops on them.
pub fn spawn_listing_worker<S: CatalogSource>(
    mut query_rx: mpsc::UnboundedReceiver<QueryInput>,
    listing_tx: mpsc::UnboundedSender<ListingResults>,
    source: Arc<S>,
) {
    tokio::spawn(async move {
        while let Some(QueryInput { id, descriptor }) = query_rx.recv().await {
            let tx = listing_tx.clone();
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let outcome = source
                    .fetch_page(&descriptor)
                    .await
                    .map_err(|e| e.to_string());
                match &outcome {
                    Ok(page) => tracing::debug!(
                        id,
                        items = page.content.len(),
                        total = page.total_elements,
                        "listing page fetched"
                    ),
                    Err(e) => tracing::warn!(id, error = %e, "listing query failed"),
                }
                let _ = tx.send(ListingResults { id, outcome });
            });
        }
        tracing::debug!("listing worker stopped");
    });
}
