//! Error types for model construction.

use thiserror::Error;

/// Structural errors raised while building configuration values.
///
/// These are fatal: an exam whose layout does not partition its question
/// range would silently produce wrong scores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Layout has no subjects.
    #[error("subject layout is empty")]
    EmptyLayout,

    /// Boundary whose start is after its end, or starts at zero.
    #[error("subject {code} has an invalid range {start}-{end}")]
    InvalidBoundary { code: String, start: u32, end: u32 },

    /// Same subject code used twice.
    #[error("subject {code} appears more than once in the layout")]
    DuplicateSubject { code: String },

    /// Questions between two subjects are not covered by any subject.
    #[error("questions {from}-{to} are not covered by any subject")]
    BoundaryGap { from: u32, to: u32 },

    /// Two subjects claim the same question numbers.
    #[error("subjects {first} and {second} overlap at question {question}")]
    BoundaryOverlap {
        first: String,
        second: String,
        question: u32,
    },

    /// Layout does not end exactly at the exam's total question count.
    #[error("subject layout covers 1-{covered} but the exam has {total} questions")]
    CoverageMismatch { covered: u32, total: u32 },

    /// Booklet label is not a single letter.
    #[error("invalid booklet id '{value}'")]
    InvalidBooklet { value: String },

    /// Exam lists no booklets or its base booklet is not among them.
    #[error("base booklet {base} is not one of the exam's booklets")]
    BaseBookletMissing { base: char },

    /// Penalty divisor is zero, negative, or unparseable.
    #[error("invalid penalty divisor '{value}'")]
    InvalidPenalty { value: String },
}

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;
