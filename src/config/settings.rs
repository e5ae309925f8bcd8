use std::path::Path;

use crate::logic::pagination::DEFAULT_PAGE_SIZE;
use crate::state::SortOption;
use crate::state::listing_state::DEFAULT_CATALOG_MAX_PRICE;

/// Base URL of the catalog API when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Per-request timeout when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Largest accepted per-request timeout.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

/// What: User settings read from `settings.conf`.
///
/// Details:
/// - Every field has a default, so a missing or partial file still yields a usable value.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Base URL of the catalog API, without trailing slash.
    pub api_base_url: String,
    /// Results per page.
    pub page_size: u64,
    /// Sort order used when none is requested.
    pub default_sort: SortOption,
    /// Timeout for each HTTP request in seconds.
    pub request_timeout_secs: u64,
    /// Price ceiling used when the catalog maximum cannot be determined.
    pub fallback_max_price: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: SortOption::Relevance,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fallback_max_price: DEFAULT_CATALOG_MAX_PRICE,
        }
    }
}

/// What: Load settings from the resolved `settings.conf`, or defaults.
///
/// Output:
/// - Parsed settings; defaults when no file exists or it cannot be read.
#[must_use]
pub fn load_settings() -> Settings {
    super::resolve_settings_config_path().map_or_else(Settings::default, |p| load_settings_from(&p))
}

/// What: Load settings from a specific file.
///
/// Inputs:
/// - `path`: Path to a `settings.conf`
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read.
#[must_use]
pub fn load_settings_from(path: &Path) -> Settings {
    let mut settings = Settings::default();
    match std::fs::read_to_string(path) {
        Ok(content) => {
            parse_settings(&content, &mut settings);
            tracing::debug!(path = %path.display(), "settings loaded");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
        }
    }
    settings
}

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: File content
/// - `settings`: Settings to update in place
///
/// Details:
/// - Lines are `key = value`; blank lines and lines starting with `#` are skipped.
/// - Keys are case-insensitive and `.`, `-` and spaces count as `_`.
/// - Invalid values are ignored and keep the previous value.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((raw_key, val_raw)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(val_raw.trim());
        match key.as_str() {
            "api_base_url" | "api_url" | "base_url" => {
                let url = val.trim_end_matches('/');
                if url.starts_with("http://") || url.starts_with("https://") {
                    settings.api_base_url = url.to_string();
                } else {
                    tracing::warn!(value = val, "ignoring api_base_url without http scheme");
                }
            }
            "page_size" | "results_per_page" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.page_size = v;
                }
            }
            "default_sort" | "sort" | "sort_mode" => {
                if let Some(sort) = SortOption::from_config_key(val) {
                    settings.default_sort = sort;
                }
            }
            "request_timeout_secs" | "timeout_secs" | "request_timeout" => {
                match val.parse::<u64>() {
                    Ok(v) if (1..=MAX_REQUEST_TIMEOUT_SECS).contains(&v) => {
                        settings.request_timeout_secs = v;
                    }
                    _ => tracing::warn!(
                        value = val,
                        max = MAX_REQUEST_TIMEOUT_SECS,
                        "ignoring out-of-range request_timeout_secs"
                    ),
                }
            }
            "fallback_max_price" | "max_price_fallback" => {
                if let Ok(v) = val.parse::<f64>()
                    && v.is_finite()
                    && v > 0.0
                {
                    settings.fallback_max_price = v;
                }
            }
            other => tracing::debug!(key = other, "unknown settings key ignored"),
        }
    }
}

/// Strip a trailing `# comment`; a `#` only starts a comment after whitespace.
fn strip_inline_comment(s: &str) -> &str {
    let bytes = s.as_bytes();
    let cut = (1..bytes.len())
        .find(|&i| bytes[i] == b'#' && bytes[i - 1].is_ascii_whitespace())
        .unwrap_or(bytes.len());
    s[..cut].trim()
}
