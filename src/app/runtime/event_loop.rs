use std::time::Duration;

use tokio::select;
use tokio::time::{Instant, sleep_until};

use crate::state::ListingState;

use super::Result;
use super::channels::Channels;
use super::handlers::{handle_listing_results, handle_rating_results};

/// Fallback wait when a requested window does not fit in an `Instant`.
const FAR_DEADLINE: Duration = Duration::from_secs(86_400);

/// Deadline `window` from now; windows too large for the clock use [`FAR_DEADLINE`].
fn deadline_after(window: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(window)
        .or_else(|| now.checked_add(FAR_DEADLINE))
        .unwrap_or(now)
}

/// What: Process worker responses until the listing is idle and its ratings are in.
///
/// Inputs:
/// - `app`: Listing state
/// - `channels`: Endpoints returned by [`Channels::new`]
/// - `timeout`: Upper bound for the whole wait
///
/// Output:
/// - `Ok(())` once [`ListingState::is_settled`] holds; `Err` when the timeout elapses first.
///
/// Details:
/// - Stale responses are consumed and discarded on the way.
/// - A failed query also settles the listing; check `app.last_error` afterwards.
pub async fn run_until_settled(
    app: &mut ListingState,
    channels: &mut Channels,
    timeout: Duration,
) -> Result<()> {
    let deadline = deadline_after(timeout);
    while !app.is_settled() {
        select! {
            Some(results) = channels.listing_rx.recv() => {
                handle_listing_results(app, results, &channels.query_tx, &channels.rating_tx);
            }
            Some(ratings) = channels.ratings_rx.recv() => {
                handle_rating_results(app, ratings);
            }
            () = sleep_until(deadline) => {
                tracing::warn!(
                    page = app.pagination.page(),
                    fetching = app.pagination.is_fetching(),
                    ratings_pending = app.ratings_pending,
                    "listing did not settle in time"
                );
                return Err(format!(
                    "listing did not settle within {} ms",
                    timeout.as_millis()
                )
                .into());
            }
        }
    }
    Ok(())
}

/// What: Process every worker response arriving within a fixed window.
///
/// Inputs:
/// - `app`: Listing state
/// - `channels`: Endpoints returned by [`Channels::new`]
/// - `window`: How long to keep handling responses
///
/// Output:
/// - Number of responses handled, stale ones included.
///
/// Details:
/// - Unlike [`run_until_settled`] this keeps listening after the listing settles,
///   so late responses are observed and discarded.
pub async fn drive_for(app: &mut ListingState, channels: &mut Channels, window: Duration) -> usize {
    let deadline = deadline_after(window);
    let mut handled = 0;
    loop {
        select! {
            Some(results) = channels.listing_rx.recv() => {
                handle_listing_results(app, results, &channels.query_tx, &channels.rating_tx);
                handled += 1;
            }
            Some(ratings) = channels.ratings_rx.recv() => {
                handle_rating_results(app, ratings);
                handled += 1;
            }
            () = sleep_until(deadline) => break,
        }
    }
    handled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Oversized windows yield a deadline instead of overflowing
    ///
    /// - Input: `Duration::MAX` and a one-second window
    /// - Output: Both deadlines lie in the future; the huge one is capped
    fn deadline_after_saturates() {
        let before = Instant::now();
        let far = deadline_after(Duration::MAX);
        assert!(far > before);
        assert!(far <= Instant::now() + FAR_DEADLINE);
        assert!(deadline_after(Duration::from_secs(1)) > before);
    }
}
