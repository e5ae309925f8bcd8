use std::sync::Arc;

use tokio::sync::mpsc;

use crate::sources::CatalogSource;
use crate::state::{ListingResults, QueryInput, RatingRequest, RatingResults};

use super::workers::{spawn_listing_worker, spawn_rating_worker};

/// What: Channel endpoints owned by the event loop.
///
/// Details:
/// - The sending halves of the result channels and the receiving halves of the
///   request channels live inside the workers.
pub struct Channels {
    /// Listing queries to the listing worker.
    pub query_tx: mpsc::UnboundedSender<QueryInput>,
    /// Page responses from the listing worker.
    pub listing_rx: mpsc::UnboundedReceiver<ListingResults>,
    /// Rating lookups to the rating worker.
    pub rating_tx: mpsc::UnboundedSender<RatingRequest>,
    /// Resolved ratings from the rating worker.
    pub ratings_rx: mpsc::UnboundedReceiver<RatingResults>,
}

impl Channels {
    /// What: Create the channels and spawn the workers serving them.
    ///
    /// Inputs:
    /// - `source`: Catalog collaborator shared by both workers
    ///
    /// Output:
    /// - Endpoints for the event loop.
    ///
    /// Details:
    /// - Must be called from within a Tokio runtime.
    pub fn new<S: CatalogSource>(source: Arc<S>) -> Self {
        let (query_tx, query_rx) = mpsc::unbounded_channel::<QueryInput>();
        let (listing_tx, listing_rx) = mpsc::unbounded_channel::<ListingResults>();
        let (rating_tx, rating_rx) = mpsc::unbounded_channel::<RatingRequest>();
        let (ratings_tx, ratings_rx) = mpsc::unbounded_channel::<RatingResults>();
        spawn_listing_worker(query_rx, listing_tx, Arc::clone(&source));
        spawn_rating_worker(rating_rx, ratings_tx, source);
        Self {
            query_tx,
            listing_rx,
            rating_tx,
            ratings_rx,
        }
    }
}
