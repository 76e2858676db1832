//! Two-decimal views of scores for display and export.

use std::collections::BTreeMap;

use optik_model::{CohortStatistics, RankedStudent, StudentAnswerAnalysis};
use serde::Serialize;

use crate::cohort::{rank_students, ranking_order};

/// Reporting precision.
pub const DECIMALS: u32 = 2;

/// One student's line in a ranked report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLine {
    pub rank: u32,
    pub student_id: String,
    pub student_name: String,
    pub class_name: Option<String>,
    pub booklet: char,
    pub correct: u32,
    pub wrong: u32,
    pub blank: u32,
    pub net: f64,
    pub percentage: f64,
    pub subject_nets: BTreeMap<String, f64>,
}

/// Rounded cohort statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub student_count: usize,
    pub mean: f64,
    pub median: f64,
    pub highest: Option<Extreme>,
    pub lowest: Option<Extreme>,
    pub subject_averages: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub student_id: String,
    pub student_name: String,
    pub net: f64,
}

impl From<&RankedStudent> for Extreme {
    fn from(student: &RankedStudent) -> Self {
        Self {
            student_id: student.student_id.clone(),
            student_name: student.student_name.clone(),
            net: student.net.to_f64_rounded(DECIMALS),
        }
    }
}

impl From<&CohortStatistics> for StatisticsReport {
    fn from(stats: &CohortStatistics) -> Self {
        Self {
            student_count: stats.student_count,
            mean: stats.mean.to_f64_rounded(DECIMALS),
            median: stats.median.to_f64_rounded(DECIMALS),
            highest: stats.highest.as_ref().map(Extreme::from),
            lowest: stats.lowest.as_ref().map(Extreme::from),
            subject_averages: stats
                .subject_averages
                .iter()
                .map(|(code, value)| (code.clone(), value.to_f64_rounded(DECIMALS)))
                .collect(),
        }
    }
}

/// Score lines in ranking order with competition ranks.
///
/// Ranks come from exact nets, so students whose rounded nets agree but
/// whose exact nets differ keep distinct ranks.
pub fn score_lines(students: &[StudentAnswerAnalysis]) -> Vec<ScoreLine> {
    ranking_order(students)
        .into_iter()
        .zip(rank_students(students))
        .map(|(idx, ranked)| {
            let student = &students[idx];
            let result = &student.result;
            ScoreLine {
                rank: ranked.rank,
                student_id: student.student_id.clone(),
                student_name: student.student_name.clone(),
                class_name: student.class_name.clone(),
                booklet: student.booklet.letter(),
                correct: result.correct,
                wrong: result.wrong,
                blank: result.blank,
                net: result.net.to_f64_rounded(DECIMALS),
                percentage: result.percentage.to_f64_rounded(DECIMALS),
                subject_nets: result
                    .subjects
                    .iter()
                    .map(|(code, tally)| (code.clone(), tally.net.to_f64_rounded(DECIMALS)))
                    .collect(),
            }
        })
        .collect()
}
