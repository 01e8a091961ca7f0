//! Error types for codec-results operations.

use thiserror::Error;

/// Result type alias for codec-results operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or navigating comparison results.
///
/// Sparse benchmark coverage (a file missing for one codec, a metric missing
/// on a record, a deep-linked configuration missing from the sweep data) is
/// not an error: those cases degrade to empty series or absent cells.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A document could not be fetched from its source.
    #[error("Fetch failed: {url}: {reason}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A document was fetched but does not match the expected schema.
    #[error("Invalid document: {url}: {reason}")]
    InvalidDocument {
        /// URL the document was loaded from.
        url: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A codec or file key is absent from the detailed results.
    #[error("No detailed results for codec {codec:?}, file {file:?}")]
    NotFound {
        /// Codec identifier that was looked up.
        codec: String,
        /// File name that was looked up.
        file: String,
    },

    /// A file name is not listed in the overall results table.
    #[error("File not listed in overall results: {0}")]
    UnknownFile(String),

    /// A row index does not address any row.
    #[error("Row {row} out of range (length {len})")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Number of rows available.
        len: usize,
    },

    /// A required query parameter is absent or has no value.
    #[error("Missing query parameter: {0}")]
    MissingParameter(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error came from the load boundary (transport or schema).
    ///
    /// These are the failures a viewer reports once to the user and then
    /// carries on without retrying.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::InvalidDocument { .. })
    }
}
