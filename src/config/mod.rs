//! Configuration for the listing client.
//!
//! Settings live in `settings.conf` under the vitrine config directory and are
//! read once at startup; command-line flags override them.

/// Path resolution for config and log directories.
mod paths;
/// `settings.conf` parsing.
mod settings;

pub use paths::{config_dir, logs_dir, resolve_settings_config_path};
pub use settings::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, Settings,
    load_settings, load_settings_from, parse_settings,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that change `HOME`.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
