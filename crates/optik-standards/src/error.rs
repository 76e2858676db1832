//! Error types for profile loading.

use std::path::PathBuf;

use optik_model::ModelError;
use thiserror::Error;

/// Errors that can occur when loading exam profiles or alias tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Profile directory named by the environment override does not exist.
    #[error("Profile directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV text.
    #[error("Failed to parse {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Invalid value in a CSV field.
    #[error("Invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },

    /// Subject rows for an exam do not form a valid layout.
    #[error("Invalid profile {exam}: {source}")]
    InvalidProfile {
        exam: String,
        #[source]
        source: ModelError,
    },

    #[error("Subject rows reference unknown exam type {exam}")]
    UnknownExam { exam: String },
}

/// Result type for profile loading.
pub type Result<T> = std::result::Result<T, StandardsError>;
