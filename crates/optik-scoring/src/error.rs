//! Error types for scoring.

use thiserror::Error;

/// Answer keys the engine refuses to score against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("answer key question {question} is outside the exam's 1-{total} range")]
    QuestionOutOfRange { question: u32, total: u32 },

    #[error("answer key lists question {question} more than once")]
    DuplicateQuestion { question: u32 },
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;
