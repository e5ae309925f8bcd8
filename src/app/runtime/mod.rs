//! Channels, workers and handlers wired into a single-threaded event loop.
//!
//! State is only mutated on the loop task; workers do network I/O and report
//! back over channels tagged with the originating query id.

mod channels;
mod event_loop;
/// Result handlers applied on the event loop.
pub mod handlers;
mod init;
/// Background workers that perform catalog I/O.
pub mod workers;

pub use channels::Channels;
pub use event_loop::{drive_for, run_until_settled};
pub use handlers::{handle_listing_results, handle_rating_results};
pub use init::{SessionOptions, open_listing};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
