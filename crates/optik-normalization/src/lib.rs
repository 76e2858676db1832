//! Turkish-aware text normalization crate.
//!
//! Provides the text layer every other stage compares through.
//!
//! # Overview
//!
//! This crate provides:
//! - **Cleaning**: trimming, whitespace collapsing, control-character removal
//! - **Locale folding**: diacritic-insensitive comparison keys where `ı`, `İ`,
//!   `I` and `i` all fold to `i`
//! - **Turkish casing**: upper/lower/title case that keeps the dotted and
//!   dotless I apart
//! - **Collation**: ordering by the 29-letter Turkish alphabet
//! - **OCR correction**: context-sensitive glyph repair and a curated
//!   name-correction fallback
//!
//! # Example
//!
//! ```
//! use optik_normalization::{OcrCorrector, fold_key, to_upper_tr};
//!
//! assert_eq!(fold_key("  IŞIK  Çağ "), "isik cag");
//! assert_eq!(to_upper_tr("istanbul"), "İSTANBUL");
//!
//! let corrector = OcrCorrector::default();
//! assert_eq!(corrector.correct("AYÞE"), "AYŞE");
//! ```
//!
//! # Design Principles
//!
//! - **Never fails**: every function returns a string, possibly empty
//! - **Stateless functions**: pure transforms, safe to call from any thread

mod ocr;
mod text;

pub use ocr::{BatchCorrection, OcrCorrector, OcrRule};
pub use text::{
    TURKISH_ALPHABET, clean, clean_opt, compare_tr, fold_diacritics, fold_key, to_lower_tr,
    to_title_tr, to_upper_tr,
};
