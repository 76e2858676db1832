//! Fuzzy column detection for heterogeneous exam spreadsheets.
//!
//! Resolves arbitrary header spellings ("SORU NO", "Soru_No", "Q#") to the
//! canonical fields of [`optik_model::CanonicalField`] using Levenshtein
//! similarity over locale-folded keys.
//!
//! # Example
//!
//! ```
//! use optik_map::ColumnDetector;
//! use optik_model::{CanonicalField, FieldAlias};
//!
//! let aliases = vec![
//!     FieldAlias::new(CanonicalField::QuestionNumber, ["Soru No", "Q#", "SoruNumarasi"], 0.8)
//!         .required(),
//! ];
//! let detector = ColumnDetector::new(aliases);
//! let result = detector.detect_headers(&["SORU NO".to_string()]);
//!
//! assert_eq!(result.mapping.header(CanonicalField::QuestionNumber), Some("SORU NO"));
//! ```

mod detector;
mod inference;
mod similarity;
mod types;

pub use detector::{ColumnDetector, DetectorConfig};
pub use inference::{infer_exam_type, resolve_subject};
pub use similarity::{BestMatch, distance, find_best_match, similarity};
pub use types::{Alternative, DetectionResult, ExamTypeGuess, FieldDetection};
