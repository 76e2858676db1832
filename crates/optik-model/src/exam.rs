//! Exam configuration: booklets, subject boundaries, and penalty rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::rational::Rational;

/// A physical booklet variant, labelled with a single upper-case letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookletId(char);

impl BookletId {
    pub const A: Self = Self('A');
    pub const B: Self = Self('B');
    pub const C: Self = Self('C');
    pub const D: Self = Self('D');

    /// Builds a booklet id from a letter (case-insensitive).
    pub fn new(letter: char) -> Result<Self> {
        if letter.is_ascii_alphabetic() {
            Ok(Self(letter.to_ascii_uppercase()))
        } else {
            Err(ModelError::InvalidBooklet {
                value: letter.to_string(),
            })
        }
    }

    /// Parses a trimmed single-letter label.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::new(letter),
            _ => Err(ModelError::InvalidBooklet {
                value: trimmed.to_string(),
            }),
        }
    }

    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for BookletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BookletId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BookletId> for String {
    fn from(value: BookletId) -> Self {
        value.0.to_string()
    }
}

/// Inclusive question range owned by one subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectBoundary {
    /// Short subject code (e.g. "MAT").
    pub code: String,
    /// Display name (e.g. "Matematik").
    pub name: String,
    pub start: u32,
    pub end: u32,
}

impl SubjectBoundary {
    pub fn new(code: impl Into<String>, name: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, question: u32) -> bool {
        (self.start..=self.end).contains(&question)
    }

    /// Number of questions in the block.
    pub fn len(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        (self.end - self.start).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Ordered subject boundaries that partition `1..=total` exactly.
///
/// Construction is the only place the partition is checked; every holder of
/// a `SubjectLayout` may rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LayoutRepr", into = "LayoutRepr")]
pub struct SubjectLayout {
    subjects: Vec<SubjectBoundary>,
    total: u32,
}

#[derive(Serialize, Deserialize)]
struct LayoutRepr {
    subjects: Vec<SubjectBoundary>,
    total: u32,
}

impl TryFrom<LayoutRepr> for SubjectLayout {
    type Error = ModelError;

    fn try_from(repr: LayoutRepr) -> Result<Self> {
        Self::new(repr.subjects, repr.total)
    }
}

impl From<SubjectLayout> for LayoutRepr {
    fn from(layout: SubjectLayout) -> Self {
        Self {
            subjects: layout.subjects,
            total: layout.total,
        }
    }
}

impl SubjectLayout {
    /// Validates that the boundaries cover `1..=total` with no gaps or overlaps.
    ///
    /// Boundaries are sorted by start before checking, so the input order
    /// does not matter.
    pub fn new(mut subjects: Vec<SubjectBoundary>, total: u32) -> Result<Self> {
        if subjects.is_empty() {
            return Err(ModelError::EmptyLayout);
        }
        for subject in &subjects {
            if subject.start == 0 || subject.start > subject.end || subject.end == u32::MAX {
                return Err(ModelError::InvalidBoundary {
                    code: subject.code.clone(),
                    start: subject.start,
                    end: subject.end,
                });
            }
        }
        for (idx, subject) in subjects.iter().enumerate() {
            if subjects[..idx].iter().any(|s| s.code == subject.code) {
                return Err(ModelError::DuplicateSubject {
                    code: subject.code.clone(),
                });
            }
        }

        subjects.sort_by_key(|s| (s.start, s.end));

        let mut expected_start = 1u32;
        let mut previous: Option<&SubjectBoundary> = None;
        for subject in &subjects {
            if subject.start > expected_start {
                return Err(ModelError::BoundaryGap {
                    from: expected_start,
                    to: subject.start - 1,
                });
            }
            if subject.start < expected_start {
                let first = previous.map(|p| p.code.clone()).unwrap_or_default();
                return Err(ModelError::BoundaryOverlap {
                    first,
                    second: subject.code.clone(),
                    question: subject.start,
                });
            }
            expected_start = subject.end + 1;
            previous = Some(subject);
        }

        let covered = expected_start - 1;
        if covered != total {
            return Err(ModelError::CoverageMismatch { covered, total });
        }

        Ok(Self { subjects, total })
    }

    /// Subjects in question order.
    pub fn subjects(&self) -> &[SubjectBoundary] {
        &self.subjects
    }

    pub fn total_questions(&self) -> u32 {
        self.total
    }

    /// Subject owning a question number.
    pub fn subject_for(&self, question: u32) -> Option<&SubjectBoundary> {
        let idx = self
            .subjects
            .partition_point(|subject| subject.end < question);
        self.subjects
            .get(idx)
            .filter(|subject| subject.contains(question))
    }

    /// Subject by code (exact, case-insensitive ASCII).
    pub fn find(&self, code: &str) -> Option<&SubjectBoundary> {
        self.subjects
            .iter()
            .find(|subject| subject.code.eq_ignore_ascii_case(code.trim()))
    }
}

/// How many wrong answers cancel one correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyDivisor {
    /// Wrong answers carry no penalty.
    None,
    /// `net = correct - wrong / divisor`.
    Ratio(Rational),
}

impl PenaltyDivisor {
    /// Builds a divisor; must be strictly positive.
    pub fn ratio(divisor: Rational) -> Result<Self> {
        if divisor.is_positive() {
            Ok(Self::Ratio(divisor))
        } else {
            Err(ModelError::InvalidPenalty {
                value: divisor.to_string(),
            })
        }
    }

    /// Parses `"4"`, `"3"`, `"2.5"`, `"5/2"`, or `"none"` / empty.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        let divisor = Rational::parse(trimmed).ok_or_else(|| ModelError::InvalidPenalty {
            value: trimmed.to_string(),
        })?;
        Self::ratio(divisor).map_err(|_| ModelError::InvalidPenalty {
            value: trimmed.to_string(),
        })
    }

    /// Net deduction for a number of wrong answers.
    pub fn penalty_for(&self, wrong: u32) -> Rational {
        match self {
            Self::None => Rational::ZERO,
            Self::Ratio(divisor) => Rational::from(wrong)
                .checked_div(*divisor)
                .unwrap_or(Rational::ZERO),
        }
    }
}

impl fmt::Display for PenaltyDivisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Ratio(divisor) if divisor.denom() == 1 => write!(f, "{}", divisor.numer()),
            Self::Ratio(divisor) => write!(f, "{}/{}", divisor.numer(), divisor.denom()),
        }
    }
}

/// Everything the core needs to know about one exam type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamConfig {
    /// Exam type code (e.g. "TYT").
    pub code: String,
    pub label: String,
    pub layout: SubjectLayout,
    pub penalty: PenaltyDivisor,
    pub booklets: Vec<BookletId>,
    pub base_booklet: BookletId,
}

impl ExamConfig {
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        layout: SubjectLayout,
        penalty: PenaltyDivisor,
        booklets: Vec<BookletId>,
        base_booklet: BookletId,
    ) -> Result<Self> {
        if !booklets.contains(&base_booklet) {
            return Err(ModelError::BaseBookletMissing {
                base: base_booklet.letter(),
            });
        }
        Ok(Self {
            code: code.into(),
            label: label.into(),
            layout,
            penalty,
            booklets,
            base_booklet,
        })
    }

    pub fn total_questions(&self) -> u32 {
        self.layout.total_questions()
    }

    pub fn is_valid_booklet(&self, booklet: BookletId) -> bool {
        self.booklets.contains(&booklet)
    }
}
