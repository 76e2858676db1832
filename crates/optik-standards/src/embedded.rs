//! Profile data embedded at compile time.

/// Exam types: code, label, question count, penalty divisor, booklets.
pub const EXAM_TYPES: &str = include_str!("../data/exam_types.csv");

/// Subject blocks per exam type.
pub const SUBJECTS: &str = include_str!("../data/subjects.csv");

/// Default header spellings for every canonical field.
pub const FIELD_ALIASES: &str = include_str!("../data/field_aliases.csv");
