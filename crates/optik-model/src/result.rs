//! Scoring results and cohort statistics.
//!
//! All values are derived: recomputing produces a new instance rather than
//! mutating an existing one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::exam::BookletId;
use crate::rational::Rational;

/// Correct/wrong/blank tally for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTally {
    pub subject: String,
    pub correct: u32,
    pub wrong: u32,
    pub blank: u32,
    pub cancelled: u32,
    pub net: Rational,
}

impl SubjectTally {
    /// Questions that count towards the score.
    pub fn scored_questions(&self) -> u32 {
        self.correct + self.wrong + self.blank
    }
}

/// Overall and per-subject result for one answer string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetCalculationResult {
    pub correct: u32,
    pub wrong: u32,
    pub blank: u32,
    pub cancelled: u32,
    pub net: Rational,
    /// `net / scored questions * 100`.
    pub percentage: Rational,
    pub subjects: BTreeMap<String, SubjectTally>,
}

impl NetCalculationResult {
    pub fn scored_questions(&self) -> u32 {
        self.correct + self.wrong + self.blank
    }

    pub fn subject_net(&self, subject: &str) -> Option<Rational> {
        self.subjects.get(subject).map(|tally| tally.net)
    }
}

/// A scored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnswerAnalysis {
    pub student_id: String,
    pub student_name: String,
    pub class_name: Option<String>,
    pub booklet: BookletId,
    /// Answers as read from the sheet, in the student's booklet numbering.
    pub raw_answers: String,
    /// Answers in base-booklet numbering.
    pub canonical_answers: String,
    pub result: NetCalculationResult,
}

impl StudentAnswerAnalysis {
    pub fn net(&self) -> Rational {
        self.result.net
    }
}

/// A student's position in the cohort ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedStudent {
    /// Competition rank: tied nets share a rank, the next rank skips.
    pub rank: u32,
    pub student_id: String,
    pub student_name: String,
    pub net: Rational,
}

/// Aggregates over a set of scored students.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortStatistics {
    pub student_count: usize,
    pub mean: Rational,
    pub median: Rational,
    pub highest: Option<RankedStudent>,
    pub lowest: Option<RankedStudent>,
    pub subject_averages: BTreeMap<String, Rational>,
}
