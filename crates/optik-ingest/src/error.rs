//! Error types for text ingestion.

use thiserror::Error;

/// Structural faults that stop ingestion outright.
///
/// Row-level problems are reported as warnings instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// Text ingestion needs a header row and at least one data row.
    #[error("expected a header row and at least one data row, found {rows} row(s)")]
    TooFewRows { rows: usize },

    /// Every header cell is empty.
    #[error("header row is empty")]
    EmptyHeader,

    /// Failed to split delimited text.
    #[error("failed to parse delimited text: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
