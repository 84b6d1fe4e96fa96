//! Configuration constants, input validation and resolver settings.

use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{NbpError, Result};

/// Base URL of the NBP XML currency table archive.
pub const NBP_XML_URL_PREFIX: &str = "http://rss.nbp.pl/kursy/xml2/";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Number of candidate publications tried per table type.
///
/// Publications are nearly always within a few numbers of the estimate, so
/// this is a termination ceiling rather than a tuning knob.
pub const DEFAULT_STEP_BUDGET: usize = 15;

/// Directory name used under `$HOME` for the default cache.
pub const DEFAULT_CACHE_DIR_NAME: &str = ".nbp";

/// Environment variable overriding the default cache directory.
pub const CACHE_DIR_ENV: &str = "NBP_CACHE_DIR";

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate date format (YYYY-MM-DD).
///
/// Future dates are accepted: the search simply finds nothing newer than the
/// latest publication and returns that one, or nothing once the budget runs out.
///
/// # Examples
/// ```
/// use nbp_rates::config::validate_date;
///
/// assert!(validate_date("2012-06-15").is_ok());
/// assert!(validate_date("invalid").is_err());
/// assert!(validate_date("2012-13-01").is_err()); // Invalid month
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    parse_date(date_str).map(|_| ())
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(NbpError::InvalidDate(date_str.to_string()));
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| NbpError::InvalidDate(date_str.to_string()))
}

/// Default cache directory.
///
/// `$NBP_CACHE_DIR` wins when set and non-empty, otherwise `$HOME/.nbp`.
/// Returns `None` when neither is available.
pub fn default_cache_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(DEFAULT_CACHE_DIR_NAME))
}

/// Settings threaded through a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Root of the local cache mirror. `None` disables caching.
    pub cache_root: Option<PathBuf>,

    /// Maximum number of candidates tried per table type.
    pub step_budget: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_root: None,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration with no cache and the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache root.
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = Some(cache_root.into());
        self
    }

    /// Set the step budget.
    pub fn with_step_budget(mut self, step_budget: usize) -> Self {
        self.step_budget = step_budget;
        self
    }
}
