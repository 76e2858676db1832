//! Data model types for optical exam imports.
//!
//! This crate provides type-safe representations shared by every stage of
//! the import pipeline:
//! - **Configuration**: exam layouts, booklets, penalty divisors, field aliases
//! - **Input**: raw spreadsheet rows and resolved column mappings
//! - **Intermediate**: parsed questions, answer keys, student sheets
//! - **Output**: per-student net results and cohort statistics
//! - **Diagnostics**: validation warnings with a closed severity set
//!
//! # Module Organization
//!
//! - [`exam`]: Booklets, subject boundaries, validated layouts, exam configuration
//! - [`field`]: Canonical import fields and their alias configuration
//! - [`table`]: Raw rows/tables and the column mapping resolved over them
//! - [`answer`]: Answer marks, answer keys, parsed questions, student sheets
//! - [`rational`]: Exact rational arithmetic for net scores
//! - [`result`]: Scoring results and cohort statistics
//! - [`issue`]: Validation warnings and severities

pub mod answer;
pub mod error;
pub mod exam;
pub mod field;
pub mod issue;
pub mod rational;
pub mod result;
pub mod table;

// Error types
pub use error::{ModelError, Result};

// Configuration
pub use exam::{BookletId, ExamConfig, PenaltyDivisor, SubjectBoundary, SubjectLayout};
pub use field::{CanonicalField, FieldAlias};

// Input
pub use table::{ColumnMapping, RawRow, RawTable};

// Intermediate
pub use answer::{
    AnswerKey, AnswerMark, BLANK, CHOICES, ParsedQuestion, QuestionAnswer, StudentSheet,
};

// Output
pub use rational::Rational;
pub use result::{
    CohortStatistics, NetCalculationResult, RankedStudent, StudentAnswerAnalysis, SubjectTally,
};

// Diagnostics
pub use issue::{Severity, ValidationWarning, WarningSummary};
