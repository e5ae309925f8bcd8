//! Shared utilities for argument processing.

use vitrine::state::SortOption;

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides the `--log-level` argument.
/// - `RUST_LOG` still takes precedence when the subscriber is installed.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse a `--sort` value.
///
/// Inputs:
/// - `s`: Sort key or alias as accepted in `settings.conf`
///
/// Output:
/// - `Ok(SortOption)`; `Err` with the accepted keys otherwise.
///
/// # Errors
/// - Returns `Err` for unknown sort keys
pub fn parse_sort(s: &str) -> Result<SortOption, String> {
    SortOption::from_config_key(s).ok_or_else(|| {
        format!(
            "unknown sort '{s}' (expected relevance, price-low-high, price-high-low, name-a-z, name-z-a or rating-high-low)"
        )
    })
}
