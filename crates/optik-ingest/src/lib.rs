//! Ingestion for optical exam imports.
//!
//! Turns decoded sheet text into structured records:
//!
//! - **Decoding**: UTF-8 / UTF-16 by BOM, Windows-1254 fallback
//! - **Delimited text**: tab, semicolon or comma separated, first row is the header
//! - **Row parsing**: answer-key rows to [`ParsedQuestion`](optik_model::ParsedQuestion)
//! - **Validation**: key records against the exam's subject layout
//! - **Answer keys**: validated records to an [`AnswerKey`](optik_model::AnswerKey)
//! - **Student sheets**: from scan fields or spreadsheet rows
//!
//! # Example
//!
//! ```
//! use optik_ingest::{RowParser, parse_delimited};
//! use optik_model::{CanonicalField, ColumnMapping};
//!
//! let table = parse_delimited("Soru No\tDers\tCevap\n1\tMAT\tA").unwrap();
//! let mapping = ColumnMapping::new()
//!     .with(CanonicalField::QuestionNumber, "Soru No")
//!     .with(CanonicalField::Subject, "Ders")
//!     .with(CanonicalField::CorrectAnswer, "Cevap");
//! let outcome = RowParser::new(&mapping).parse_rows(&table.rows);
//!
//! assert_eq!(outcome.questions[0].question_number, 1);
//! ```

mod answers;
mod decode;
mod delimited;
mod error;
mod key;
mod parser;
mod students;
mod validate;

// === Error Types ===
pub use error::{IngestError, Result};

// === Text Input ===
pub use decode::{DecodedText, decode_bytes};
pub use delimited::{detect_delimiter, parse_delimited};

// === Answer Keys ===
pub use answers::{normalize_answers, parse_answer_mark, resolve_booklet};
pub use key::build_answer_key;
pub use parser::{ParseOutcome, RowParser, parse_number};
pub use validate::validate_questions;

// === Student Sheets ===
pub use students::{ScanRecord, SheetBatch, read_scan_records, read_student_rows};
