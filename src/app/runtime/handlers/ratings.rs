use crate::state::{ListingState, RatingResults};

/// What: Apply resolved ratings for the displayed page.
///
/// Inputs:
/// - `app`: Listing state
/// - `results`: Ratings from the rating worker
///
/// Output:
/// - `true` when the ratings belonged to the displayed page and were stored.
///
/// Details:
/// - Ratings for a page that is no longer displayed are discarded.
/// - Ratings for products not on the page are ignored.
pub fn handle_rating_results(app: &mut ListingState, results: RatingResults) -> bool {
    if results.query_id != app.displayed_query_id {
        tracing::debug!(
            query_id = results.query_id,
            displayed = app.displayed_query_id,
            "ratings for replaced page discarded"
        );
        return false;
    }
    for (id, rating) in results.ratings {
        if app.products.iter().any(|p| p.id == id) {
            app.ratings.insert(id, rating);
        }
    }
    app.ratings_pending = false;
    true
}
