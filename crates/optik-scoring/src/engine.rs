//! Per-student net scoring.

use std::collections::{BTreeMap, BTreeSet};

use optik_model::{
    AnswerKey, AnswerMark, CHOICES, ExamConfig, NetCalculationResult, Rational, StudentSheet,
    StudentAnswerAnalysis, SubjectTally,
};
use tracing::debug;

use crate::error::{Result, ScoringError};

/// Scores base-booklet answer strings against one answer key.
///
/// The key is checked once on construction; scoring itself cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct NetScoringEngine<'a> {
    config: &'a ExamConfig,
    key: &'a AnswerKey,
}

impl<'a> NetScoringEngine<'a> {
    /// Rejects keys with questions outside the layout or listed twice.
    pub fn new(config: &'a ExamConfig, key: &'a AnswerKey) -> Result<Self> {
        let total = config.total_questions();
        let mut seen = BTreeSet::new();
        for entry in key.entries() {
            if entry.question == 0 || entry.question > total {
                return Err(ScoringError::QuestionOutOfRange {
                    question: entry.question,
                    total,
                });
            }
            if !seen.insert(entry.question) {
                return Err(ScoringError::DuplicateQuestion {
                    question: entry.question,
                });
            }
        }
        let cancelled = key
            .entries()
            .iter()
            .filter(|entry| entry.answer.is_cancelled())
            .count();
        debug!(
            exam = %config.code,
            questions = key.len(),
            cancelled,
            penalty = %config.penalty,
            "scoring engine ready"
        );
        Ok(Self { config, key })
    }

    pub fn config(&self) -> &ExamConfig {
        self.config
    }

    pub fn key(&self) -> &AnswerKey {
        self.key
    }

    /// Tallies one answer string in base-booklet numbering.
    ///
    /// Position `q - 1` holds the answer to question `q`. Anything other
    /// than a choice letter, including a missing position, is blank.
    /// Cancelled questions count in no tally except `cancelled`.
    pub fn score(&self, answers: &str) -> NetCalculationResult {
        let given: Vec<char> = answers.chars().collect();
        let mut subjects: BTreeMap<String, SubjectTally> = self
            .config
            .layout
            .subjects()
            .iter()
            .map(|subject| {
                (
                    subject.code.clone(),
                    SubjectTally {
                        subject: subject.code.clone(),
                        ..SubjectTally::default()
                    },
                )
            })
            .collect();

        for entry in self.key.entries() {
            let code = self
                .config
                .layout
                .subject_for(entry.question)
                .map_or(entry.subject.as_str(), |subject| subject.code.as_str());
            let Some(tally) = subjects.get_mut(code) else {
                continue;
            };
            let expected = match entry.answer {
                AnswerMark::Cancelled => {
                    tally.cancelled += 1;
                    continue;
                }
                AnswerMark::Choice(letter) => letter,
            };
            let answer = given
                .get((entry.question - 1) as usize)
                .map(char::to_ascii_uppercase)
                .filter(|letter| CHOICES.contains(letter));
            match answer {
                None => tally.blank += 1,
                Some(letter) if letter == expected => tally.correct += 1,
                Some(_) => tally.wrong += 1,
            }
        }

        let mut result = NetCalculationResult::default();
        for tally in subjects.values_mut() {
            tally.net = self.net(tally.correct, tally.wrong);
            result.correct += tally.correct;
            result.wrong += tally.wrong;
            result.blank += tally.blank;
            result.cancelled += tally.cancelled;
        }
        result.net = self.net(result.correct, result.wrong);
        result.percentage = result
            .net
            .mul_int(100)
            .div_int(i64::from(result.scored_questions()))
            .unwrap_or(Rational::ZERO);
        result.subjects = subjects;
        result
    }

    /// Scores a sheet whose answers are already in base numbering.
    pub fn analyze(&self, sheet: &StudentSheet, canonical_answers: String) -> StudentAnswerAnalysis {
        let result = self.score(&canonical_answers);
        StudentAnswerAnalysis {
            student_id: sheet.student_id.clone(),
            student_name: sheet.student_name.clone(),
            class_name: sheet.class_name.clone(),
            booklet: sheet.booklet,
            raw_answers: sheet.answers.clone(),
            canonical_answers,
            result,
        }
    }

    fn net(&self, correct: u32, wrong: u32) -> Rational {
        Rational::from(correct) - self.config.penalty.penalty_for(wrong)
    }
}
