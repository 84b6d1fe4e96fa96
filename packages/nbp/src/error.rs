//! Error types for NBP table resolution.
//!
//! Input errors (`InvalidDate`, `UnknownTableType`) are raised before any
//! network activity. Fetch errors are produced by the transport and cache
//! layers but swallowed by the fetch step, which turns them into "no data
//! at this URL". Parse errors propagate and abort the search.

use thiserror::Error;

/// Main error type for the library.
#[derive(Debug, Error)]
pub enum NbpError {
    /// Invalid calendar date (bad format or out-of-range month/day).
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD (e.g., 2012-06-15)")]
    InvalidDate(String),

    /// Table type other than `a` or `b`.
    #[error("Unknown table type: '{0}'. Expected 'a' or 'b'")]
    UnknownTableType(String),

    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200.
    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// A numeric or date field could not be parsed.
    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: String, value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl NbpError {
    /// Whether this error belongs to the fetch class (network or cache I/O).
    ///
    /// Fetch-class errors are recoverable per candidate; everything else
    /// ends the search.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. } | Self::Io(_))
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, NbpError>;
