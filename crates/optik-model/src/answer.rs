//! Answer keys, parsed question rows, and student answer sheets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::exam::BookletId;

/// Blank marker written into canonical answer strings.
pub const BLANK: char = ' ';

/// Valid choice letters.
pub const CHOICES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// The key's verdict for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerMark {
    /// The correct choice letter.
    Choice(char),
    /// Question excluded from scoring for everyone.
    Cancelled,
}

impl AnswerMark {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Compact rendering: the letter, or `X` for cancelled.
    pub fn symbol(&self) -> char {
        match self {
            Self::Choice(letter) => *letter,
            Self::Cancelled => 'X',
        }
    }
}

/// One answer-key entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// Question number in the booklet this entry is expressed in.
    pub question: u32,
    /// Subject code.
    pub subject: String,
    pub answer: AnswerMark,
    /// Question number of the same question in other booklets, when known.
    pub booklet_questions: BTreeMap<BookletId, u32>,
}

impl QuestionAnswer {
    pub fn new(question: u32, subject: impl Into<String>, answer: AnswerMark) -> Self {
        Self {
            question,
            subject: subject.into(),
            answer,
            booklet_questions: BTreeMap::new(),
        }
    }
}

/// Answer key expressed in one booklet's numbering, sorted by question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey {
    pub booklet: Option<BookletId>,
    entries: Vec<QuestionAnswer>,
}

impl AnswerKey {
    /// Sorts entries by question number.
    pub fn new(booklet: Option<BookletId>, mut entries: Vec<QuestionAnswer>) -> Self {
        entries.sort_by_key(|entry| entry.question);
        Self { booklet, entries }
    }

    /// Builds a key from a letter string: position `i` is question `i + 1`.
    ///
    /// `X` marks a cancelled question. Subjects are left empty.
    pub fn from_letters(letters: &str) -> Self {
        let entries = letters
            .chars()
            .enumerate()
            .map(|(idx, letter)| {
                let letter = letter.to_ascii_uppercase();
                let answer = if letter == 'X' {
                    AnswerMark::Cancelled
                } else {
                    AnswerMark::Choice(letter)
                };
                QuestionAnswer::new(idx as u32 + 1, "", answer)
            })
            .collect();
        Self::new(None, entries)
    }

    pub fn entries(&self) -> &[QuestionAnswer] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<QuestionAnswer> {
        self.entries
    }

    pub fn get(&self, question: u32) -> Option<&QuestionAnswer> {
        self.entries
            .binary_search_by_key(&question, |entry| entry.question)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Letters in question order, `X` for cancelled.
    pub fn letters(&self) -> String {
        self.entries.iter().map(|entry| entry.answer.symbol()).collect()
    }
}

/// One parsed answer-key row, before it is checked against the exam layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    /// 1-based data row the record came from.
    pub row: usize,
    pub question_number: u32,
    /// True when the number cell was missing or unparseable and the row
    /// position was used instead.
    pub question_number_inferred: bool,
    pub subject: Option<String>,
    /// Upper-cased answer cell, verbatim otherwise.
    pub correct_answer: Option<String>,
    pub outcome_code: Option<String>,
    pub outcome: Option<String>,
    pub booklet_questions: BTreeMap<BookletId, u32>,
}

/// A student's sliced answer sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSheet {
    pub student_id: String,
    pub student_name: String,
    pub class_name: Option<String>,
    pub booklet: BookletId,
    /// Upper-case letters, one per question, [`BLANK`] where unanswered.
    pub answers: String,
}

impl StudentSheet {
    pub fn new(
        student_id: impl Into<String>,
        student_name: impl Into<String>,
        booklet: BookletId,
        answers: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            student_name: student_name.into(),
            class_name: None,
            booklet,
            answers: answers.into(),
        }
    }
}
