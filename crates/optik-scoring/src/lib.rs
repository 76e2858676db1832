//! Net scoring for optical exams.
//!
//! [`NetScoringEngine`] turns a base-booklet answer string into
//! correct/wrong/blank tallies and exact rational nets, per subject and
//! overall. [`score_cohort`] runs it across a cohort with rayon, and
//! [`compute_statistics`] / [`rank_students`] reduce the results in a
//! deterministic order (descending net, then input position).
//!
//! Values are only rounded in [`report`], at the display boundary.

mod cohort;
mod engine;
mod error;
mod parallel;
pub mod report;

pub use cohort::{
    CohortAccumulator, compute_statistics, median, rank_students, ranking_order, statistics_from,
};
pub use engine::NetScoringEngine;
pub use error::{Result, ScoringError};
pub use parallel::{ScoredCohort, score_cohort};
