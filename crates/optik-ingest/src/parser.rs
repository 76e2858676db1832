//! Answer-key rows to [`ParsedQuestion`] records.

use std::collections::BTreeMap;

use optik_model::{CanonicalField, ColumnMapping, ParsedQuestion, RawRow, ValidationWarning};
use optik_normalization::{clean, to_upper_tr};
use tracing::debug;

/// Records and row-level warnings from one parsing pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub questions: Vec<ParsedQuestion>,
    pub warnings: Vec<ValidationWarning>,
    /// Rows dropped because every mapped field was empty.
    pub skipped_rows: usize,
}

impl ParseOutcome {
    /// Appends another pass, keeping row order.
    pub fn merge(&mut self, other: ParseOutcome) {
        self.questions.extend(other.questions);
        self.warnings.extend(other.warnings);
        self.skipped_rows += other.skipped_rows;
    }
}

/// Reads answer-key rows through a resolved [`ColumnMapping`].
///
/// Rows are independent, so callers may feed them in batches and merge the
/// outcomes; output order follows input order.
#[derive(Debug, Clone, Copy)]
pub struct RowParser<'a> {
    mapping: &'a ColumnMapping,
}

impl<'a> RowParser<'a> {
    pub fn new(mapping: &'a ColumnMapping) -> Self {
        Self { mapping }
    }

    pub fn parse_rows(&self, rows: &[RawRow]) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        for row in rows {
            match self.parse_row(row, &mut outcome.warnings) {
                Some(question) => outcome.questions.push(question),
                None => outcome.skipped_rows += 1,
            }
        }
        debug!(
            parsed = outcome.questions.len(),
            skipped = outcome.skipped_rows,
            "answer-key rows parsed"
        );
        outcome
    }

    /// Parses one row; `None` when no mapped field has a value.
    pub fn parse_row(
        &self,
        row: &RawRow,
        warnings: &mut Vec<ValidationWarning>,
    ) -> Option<ParsedQuestion> {
        let value = |field| self.mapping.value(row, field);
        let populated = self.mapping.iter().any(|(field, _)| value(field).is_some());
        if !populated {
            return None;
        }

        let raw_number = value(CanonicalField::QuestionNumber);
        let (question_number, inferred) = match raw_number.and_then(parse_number) {
            Some(number) => (number, false),
            None => {
                let position = u32::try_from(row.index).unwrap_or(u32::MAX);
                let mut warning = ValidationWarning::warning(format!(
                    "Question number missing or not a number; using row position {position}"
                ))
                .at_row(row.index);
                if let Some(header) = self.mapping.header(CanonicalField::QuestionNumber) {
                    warning = warning.in_column(header);
                }
                if let Some(raw) = raw_number {
                    warning = warning.with_value(raw);
                }
                warnings.push(warning);
                (position, true)
            }
        };

        let mut booklet_questions = BTreeMap::new();
        for (booklet, header) in self.mapping.booklet_question_columns() {
            let Some(raw) = value(CanonicalField::BookletQuestion(booklet)) else {
                continue;
            };
            match parse_number(raw) {
                Some(number) => {
                    booklet_questions.insert(booklet, number);
                }
                None => warnings.push(
                    ValidationWarning::warning(format!(
                        "Booklet {booklet} question number is not a number; ignored"
                    ))
                    .at_row(row.index)
                    .in_column(header)
                    .with_value(raw),
                ),
            }
        }

        Some(ParsedQuestion {
            row: row.index,
            question_number,
            question_number_inferred: inferred,
            subject: value(CanonicalField::Subject).map(clean),
            correct_answer: value(CanonicalField::CorrectAnswer).map(|v| to_upper_tr(&clean(v))),
            outcome_code: value(CanonicalField::OutcomeCode).map(clean),
            outcome: value(CanonicalField::OutcomeText).map(clean),
            booklet_questions,
        })
    }
}

/// Positive integer, accepting spreadsheet renderings such as `"12.0"`.
pub fn parse_number(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if let Ok(number) = trimmed.parse::<u32>() {
        return (number > 0).then_some(number);
    }
    let value: f64 = trimmed.replace(',', ".").parse().ok()?;
    (value.fract() == 0.0 && value >= 1.0 && value <= f64::from(u32::MAX)).then_some(value as u32)
}

#[cfg(test)]
mod tests {
    use optik_model::{BookletId, RawTable};

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn key_mapping() -> ColumnMapping {
        ColumnMapping::new()
            .with(CanonicalField::QuestionNumber, "Soru No")
            .with(CanonicalField::Subject, "Ders")
            .with(CanonicalField::CorrectAnswer, "Cevap")
            .with(CanonicalField::BookletQuestion(BookletId::B), "B")
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 12 "), Some(12));
        assert_eq!(parse_number("12.0"), Some(12));
        assert_eq!(parse_number("12,0"), Some(12));
        assert_eq!(parse_number("12.5"), None);
        assert_eq!(parse_number("0"), None);
        assert_eq!(parse_number("-3"), None);
        assert_eq!(parse_number("on iki"), None);
    }

    #[test]
    fn test_rows_parsed_in_order() {
        let table = RawTable::new(
            strings(&["Soru No", "Ders", "Cevap", "B"]),
            vec![
                strings(&["1", " mat ", "a", "2"]),
                strings(&["", "", "", ""]),
                strings(&["2", "MAT", "b", "1"]),
            ],
        );
        let mapping = key_mapping();
        let outcome = RowParser::new(&mapping).parse_rows(&table.rows);
        assert_eq!(outcome.questions.len(), 2);
        assert_eq!(outcome.skipped_rows, 1);
        assert!(outcome.warnings.is_empty());

        let first = &outcome.questions[0];
        assert_eq!(first.question_number, 1);
        assert_eq!(first.subject.as_deref(), Some("mat"));
        assert_eq!(first.correct_answer.as_deref(), Some("A"));
        assert_eq!(first.booklet_questions.get(&BookletId::B), Some(&2));
        assert_eq!(outcome.questions[1].row, 3);
    }

    #[test]
    fn test_unparseable_number_falls_back_to_position() {
        let table = RawTable::new(
            strings(&["Soru No", "Ders", "Cevap", "B"]),
            vec![strings(&["1", "MAT", "A", ""]), strings(&["iki", "MAT", "B", "x"])],
        );
        let mapping = key_mapping();
        let outcome = RowParser::new(&mapping).parse_rows(&table.rows);
        let second = &outcome.questions[1];
        assert_eq!(second.question_number, 2);
        assert!(second.question_number_inferred);
        assert!(second.booklet_questions.is_empty());
        let messages: Vec<String> = outcome.warnings.iter().map(|w| w.describe()).collect();
        insta::assert_debug_snapshot!(messages, @r#"
        [
            "[Warning] row 2, column 'Soru No', value 'iki': Question number missing or not a number; using row position 2",
            "[Warning] row 2, column 'B', value 'x': Booklet B question number is not a number; ignored",
        ]
        "#);
    }

    #[test]
    fn test_partial_row_is_kept() {
        let table = RawTable::new(
            strings(&["Soru No", "Ders", "Cevap"]),
            vec![strings(&["4", "FEN", ""])],
        );
        let mapping = key_mapping();
        let outcome = RowParser::new(&mapping).parse_rows(&table.rows);
        assert_eq!(outcome.questions.len(), 1);
        assert_eq!(outcome.questions[0].correct_answer, None);
    }

    #[test]
    fn test_unmapped_content_only_is_skipped() {
        let table = RawTable::new(
            strings(&["Soru No", "Not"]),
            vec![strings(&["", "yorum"])],
        );
        let mapping = key_mapping();
        let outcome = RowParser::new(&mapping).parse_rows(&table.rows);
        assert!(outcome.questions.is_empty());
        assert_eq!(outcome.skipped_rows, 1);
    }
}
