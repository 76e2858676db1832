//! Booklet rotation for optical exams.
//!
//! Booklets B, C and D print the same questions as the base booklet in a
//! different order inside each subject block. A [`BookletRotation`] holds
//! that permutation for one booklet; [`RotationSet`] holds all of them for
//! an exam and converts student answers into base numbering before scoring.
//!
//! # Example
//!
//! ```
//! use optik_model::{BookletId, SubjectBoundary, SubjectLayout};
//! use optik_transform::{BookletRotation, convert_to_base_booklet};
//!
//! let layout = SubjectLayout::new(vec![SubjectBoundary::new("MAT", "Matematik", 1, 4)], 4)?;
//! let rotation = BookletRotation::mirror(&layout, BookletId::A, BookletId::B);
//!
//! let base = convert_to_base_booklet("ABCD", BookletId::B, &rotation)?;
//! assert_eq!(base, "DCBA");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod error;
mod rotation;
mod set;

pub use convert::{
    convert_answer_key_to_booklet, convert_from_base_booklet, convert_to_base_booklet,
};
pub use error::{Result, TransformError};
pub use rotation::BookletRotation;
pub use set::RotationSet;
