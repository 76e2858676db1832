//! Orchestration for optical exam imports.
//!
//! [`ImportPipeline`] sequences column detection, row parsing, validation,
//! booklet rotation and net scoring. Each stage can also be called on its
//! own; see the [`pipeline`] module for the order.
//!
//! # Example
//!
//! ```
//! use optik_core::ImportPipeline;
//!
//! let pipeline = ImportPipeline::from_standards()?;
//! let key = "Soru No\tDers\tCevap\n1\tTürkçe\tA\n2\tTürkçe\tB";
//! let imported = pipeline.import_answer_key(key, Some("TYT"))?;
//! assert_eq!(imported.key.letters(), "AB");
//! # Ok::<(), optik_core::PipelineError>(())
//! ```

pub mod error;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use pipeline::{
    BatchProgress, DEFAULT_BATCH_SIZE, ImportPipeline, ImportReport, ImportedKey, ScoringOutcome,
};
