//! Pipeline error type.

use optik_ingest::IngestError;
use optik_model::ModelError;
use optik_scoring::ScoringError;
use optik_standards::StandardsError;
use optik_transform::TransformError;
use thiserror::Error;

/// Conditions that stop an import before any score is produced.
///
/// Everything recoverable is reported as a
/// [`ValidationWarning`](optik_model::ValidationWarning) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error("booklet rotation: {0}")]
    Transform(#[from] TransformError),

    #[error("answer key: {0}")]
    Scoring(#[from] ScoringError),

    /// No exam code was given and none could be inferred from the sheet.
    #[error("could not determine the exam type ({reasoning}); pass it explicitly")]
    ExamNotDetermined { reasoning: String },

    #[error("unknown exam type '{code}'")]
    UnknownExam { code: String },

    /// Nothing scoreable survived parsing.
    #[error("answer key has no usable questions")]
    EmptyAnswerKey,

    /// The caller asked to stop between batches.
    #[error("import cancelled after {scored} students")]
    Cancelled { scored: usize },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
