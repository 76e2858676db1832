//! Answer-key record validation against an exam layout.

use std::collections::{BTreeMap, BTreeSet};

use optik_map::resolve_subject;
use optik_model::{ParsedQuestion, SubjectLayout, ValidationWarning};

use crate::answers::parse_answer_mark;

/// Checks parsed key records against the layout.
///
/// * number outside `1..=total`: error
/// * number repeated: error, on every repeat
/// * answer missing: error, the question will not be scored
/// * answer not a choice letter or cancelled marker: warning
/// * subject text matching no configured subject, or a different block
///   than the number falls in: warning
/// * numbers missing inside a subject block: warning, one per subject
pub fn validate_questions(
    questions: &[ParsedQuestion],
    layout: &SubjectLayout,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let total = layout.total_questions();
    let mut first_row: BTreeMap<u32, usize> = BTreeMap::new();

    for question in questions {
        let number = question.question_number;
        if number == 0 || number > total {
            warnings.push(
                ValidationWarning::error(format!(
                    "Question {number} is outside the exam range 1-{total}"
                ))
                .at_row(question.row),
            );
            continue;
        }

        if let Some(first) = first_row.get(&number) {
            warnings.push(
                ValidationWarning::error(format!(
                    "Question {number} appears more than once (first on row {first})"
                ))
                .at_row(question.row),
            );
        } else {
            first_row.insert(number, question.row);
        }

        match question.correct_answer.as_deref() {
            None => warnings.push(
                ValidationWarning::error(format!(
                    "Question {number} has no correct answer; it will not be scored"
                ))
                .at_row(question.row),
            ),
            Some(answer) if parse_answer_mark(answer).is_none() => warnings.push(
                ValidationWarning::warning(format!(
                    "Question {number} has an unrecognised answer; it will not be scored"
                ))
                .at_row(question.row)
                .with_value(answer)
                .with_suggestion("use A-E, or X for a cancelled question"),
            ),
            Some(_) => {}
        }

        if let Some(subject) = question.subject.as_deref() {
            let block = layout.subject_for(number);
            match resolve_subject(subject, layout) {
                None => {
                    let mut warning =
                        ValidationWarning::warning(format!("Unknown subject for question {number}"))
                            .at_row(question.row)
                            .with_value(subject);
                    if let Some(block) = block {
                        warning = warning.with_suggestion(format!(
                            "question {number} belongs to {}",
                            block.code
                        ));
                    }
                    warnings.push(warning);
                }
                Some(named) => {
                    if let Some(block) = block.filter(|block| block.code != named.code) {
                        warnings.push(
                            ValidationWarning::warning(format!(
                                "Question {number} is listed under {} but falls in the {} block \
                                 ({}-{})",
                                named.code, block.code, block.start, block.end
                            ))
                            .at_row(question.row)
                            .with_value(subject),
                        );
                    }
                }
            }
        }
    }

    let present: BTreeSet<u32> = first_row.into_keys().collect();
    for subject in layout.subjects() {
        let missing: Vec<u32> = (subject.start..=subject.end)
            .filter(|number| !present.contains(number))
            .collect();
        if missing.is_empty() {
            continue;
        }
        let message = if missing.len() == subject.len() as usize {
            format!("No questions found for subject {}", subject.code)
        } else {
            format!(
                "Subject {} is missing question(s) {}",
                subject.code,
                describe_numbers(&missing)
            )
        };
        warnings.push(ValidationWarning::warning(message));
    }

    warnings
}

/// Compresses sorted numbers into ranges: `1-3, 7, 9-10`.
fn describe_numbers(numbers: &[u32]) -> String {
    let mut parts = Vec::new();
    let mut iter = numbers.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while end.checked_add(1).is_some_and(|next| iter.peek() == Some(&next)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use optik_model::{Severity, SubjectBoundary};

    use super::*;

    fn layout() -> SubjectLayout {
        SubjectLayout::new(
            vec![
                SubjectBoundary::new("MAT", "Matematik", 1, 4),
                SubjectBoundary::new("FEN", "Fen Bilimleri", 5, 8),
            ],
            8,
        )
        .unwrap()
    }

    fn question(row: usize, number: u32, subject: &str, answer: &str) -> ParsedQuestion {
        ParsedQuestion {
            row,
            question_number: number,
            question_number_inferred: false,
            subject: (!subject.is_empty()).then(|| subject.to_string()),
            correct_answer: (!answer.is_empty()).then(|| answer.to_string()),
            outcome_code: None,
            outcome: None,
            booklet_questions: BTreeMap::new(),
        }
    }

    #[test]
    fn test_clean_key_has_no_warnings() {
        let questions: Vec<_> = (1..=8)
            .map(|n| question(n as usize, n, if n <= 4 { "MAT" } else { "Fen" }, "A"))
            .collect();
        assert!(validate_questions(&questions, &layout()).is_empty());
    }

    #[test]
    fn test_each_problem_is_reported() {
        let questions = vec![
            question(1, 1, "MAT", "A"),
            question(2, 1, "MAT", "B"),
            question(3, 2, "Matematik", "Q"),
            question(4, 3, "Resim", "C"),
            question(5, 5, "MAT", "D"),
            question(6, 6, "FEN", ""),
            question(7, 9, "FEN", "A"),
        ];
        let warnings = validate_questions(&questions, &layout());
        let lines: Vec<String> = warnings.iter().map(|w| w.describe()).collect();
        insta::assert_debug_snapshot!(lines, @r#"
        [
            "[Error] row 2: Question 1 appears more than once (first on row 1)",
            "[Warning] row 3, value 'Q': Question 2 has an unrecognised answer; it will not be scored (fix: use A-E, or X for a cancelled question)",
            "[Warning] row 4, value 'Resim': Unknown subject for question 3 (fix: question 3 belongs to MAT)",
            "[Warning] row 5, value 'MAT': Question 5 is listed under MAT but falls in the FEN block (5-8)",
            "[Error] row 6: Question 6 has no correct answer; it will not be scored",
            "[Error] row 7: Question 9 is outside the exam range 1-8",
            "[Warning] Subject MAT is missing question(s) 4",
            "[Warning] Subject FEN is missing question(s) 7-8",
        ]
        "#);
        assert_eq!(
            warnings.iter().filter(|w| w.severity == Severity::Error).count(),
            3
        );
    }

    #[test]
    fn test_empty_subject_block() {
        let questions = vec![
            question(1, 1, "", "A"),
            question(2, 2, "", "A"),
            question(3, 3, "", "A"),
            question(4, 4, "", "A"),
        ];
        let warnings = validate_questions(&questions, &layout());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "No questions found for subject FEN");
    }

    #[test]
    fn test_describe_numbers() {
        assert_eq!(describe_numbers(&[1, 2, 3, 7, 9, 10]), "1-3, 7, 9-10");
        assert_eq!(describe_numbers(&[]), "");
    }
}
