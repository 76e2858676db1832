//! Error types for booklet rotation.

use optik_model::BookletId;
use thiserror::Error;

/// Rotation faults. Each one means converted answers would be wrong, so
/// they stop the import before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Paired subject blocks have different sizes.
    #[error("subject {subject} has {base_len} questions in the base booklet but {target_len} in the rotated booklet")]
    BlockSizeMismatch {
        subject: String,
        base_len: u32,
        target_len: u32,
    },

    /// A subject of one layout is absent from the other.
    #[error("subject {subject} is missing from the rotated booklet layout")]
    SubjectMissing { subject: String },

    /// The two layouts have different question counts.
    #[error("base booklet has {base} questions but rotated booklet has {target}")]
    TotalMismatch { base: u32, target: u32 },

    /// Question number outside `1..=total`.
    #[error("question {question} is outside 1-{total}")]
    QuestionOutOfRange { question: u32, total: u32 },

    /// An explicit pair links questions of different subjects.
    #[error("question {target} of booklet {booklet} maps to base question {base} in another subject")]
    CrossesSubject {
        booklet: BookletId,
        target: u32,
        base: u32,
    },

    /// Two target questions claim the same base question or vice versa.
    #[error("question {question} of booklet {booklet} is paired more than once")]
    NotBijective { booklet: BookletId, question: u32 },

    /// Conversion requested for a booklet the rotation does not describe.
    #[error("rotation {base}->{target} cannot convert booklet {booklet}")]
    BookletNotCovered {
        booklet: BookletId,
        base: BookletId,
        target: BookletId,
    },
}

/// Result type for rotation operations.
pub type Result<T> = std::result::Result<T, TransformError>;
