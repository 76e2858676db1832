//! Answer-cell and booklet-cell interpretation.

use optik_model::{AnswerMark, BLANK, BookletId, CHOICES, ExamConfig, ValidationWarning};
use optik_normalization::fold_key;

/// Reads an answer-key cell: a choice letter, or a cancelled marker
/// (`X`, `*`, `İPTAL`, `IPTAL`, any case). Anything else is `None`.
pub fn parse_answer_mark(text: &str) -> Option<AnswerMark> {
    let folded = fold_key(text);
    match folded.as_str() {
        "x" | "*" | "iptal" => Some(AnswerMark::Cancelled),
        _ => {
            let mut chars = folded.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => {
                    let letter = letter.to_ascii_uppercase();
                    CHOICES.contains(&letter).then_some(AnswerMark::Choice(letter))
                }
                _ => None,
            }
        }
    }
}

/// Upper-cases a student's answer string and turns every character that is
/// not a choice letter into [`BLANK`]. The result has exactly `total`
/// characters: short input is padded with blanks, long input is cut.
///
/// Returns the normalised string and whether its length had to change.
pub fn normalize_answers(raw: &str, total: usize) -> (String, bool) {
    let trimmed = raw.trim_end_matches(['\r', '\n']);
    let mut answers: String = trimmed
        .chars()
        .take(total)
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if CHOICES.contains(&upper) { upper } else { BLANK }
        })
        .collect();
    let length = trimmed.chars().count();
    let adjusted = length != total;
    let filled = answers.chars().count();
    answers.extend(std::iter::repeat_n(BLANK, total - filled));
    (answers, adjusted)
}

/// Resolves a booklet cell against the exam's booklets.
///
/// Missing or unknown booklets fall back to the base booklet with a warning.
pub fn resolve_booklet(
    raw: Option<&str>,
    config: &ExamConfig,
    row: usize,
) -> (BookletId, Option<ValidationWarning>) {
    let base = config.base_booklet;
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        let warning = ValidationWarning::warning(format!(
            "Booklet missing; assuming base booklet {base}"
        ))
        .at_row(row);
        return (base, Some(warning));
    };
    match BookletId::parse(raw) {
        Ok(booklet) if config.is_valid_booklet(booklet) => (booklet, None),
        _ => {
            let valid: String = config.booklets.iter().map(BookletId::letter).collect();
            let warning = ValidationWarning::warning(format!(
                "Unknown booklet; assuming base booklet {base}"
            ))
            .at_row(row)
            .with_value(raw)
            .with_suggestion(format!("use one of {valid}"));
            (base, Some(warning))
        }
    }
}

#[cfg(test)]
mod tests {
    use optik_model::{PenaltyDivisor, SubjectBoundary, SubjectLayout};

    use super::*;

    fn config() -> ExamConfig {
        ExamConfig::new(
            "T",
            "Test",
            SubjectLayout::new(vec![SubjectBoundary::new("GEN", "Genel", 1, 4)], 4).unwrap(),
            PenaltyDivisor::None,
            vec![BookletId::A, BookletId::B],
            BookletId::A,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_answer_mark() {
        assert_eq!(parse_answer_mark(" c "), Some(AnswerMark::Choice('C')));
        assert_eq!(parse_answer_mark("E"), Some(AnswerMark::Choice('E')));
        assert_eq!(parse_answer_mark("x"), Some(AnswerMark::Cancelled));
        assert_eq!(parse_answer_mark("*"), Some(AnswerMark::Cancelled));
        assert_eq!(parse_answer_mark("İPTAL"), Some(AnswerMark::Cancelled));
        assert_eq!(parse_answer_mark("iptal"), Some(AnswerMark::Cancelled));
        assert_eq!(parse_answer_mark("F"), None);
        assert_eq!(parse_answer_mark("AB"), None);
        assert_eq!(parse_answer_mark(""), None);
    }

    #[test]
    fn test_normalize_answers() {
        assert_eq!(normalize_answers("ab-c", 4), ("AB C".to_string(), false));
        assert_eq!(normalize_answers("A.*_", 4), ("A   ".to_string(), false));
        assert_eq!(normalize_answers("A?", 4), ("A   ".to_string(), true));
        assert_eq!(normalize_answers("ABCDE", 4), ("ABCD".to_string(), true));
        assert_eq!(normalize_answers("ABCD\r\n", 4), ("ABCD".to_string(), false));
    }

    #[test]
    fn test_resolve_booklet() {
        let config = config();
        assert_eq!(resolve_booklet(Some(" b "), &config, 1), (BookletId::B, None));

        let (booklet, warning) = resolve_booklet(Some("C"), &config, 2);
        assert_eq!(booklet, BookletId::A);
        insta::assert_snapshot!(
            warning.unwrap().describe(),
            @"[Warning] row 2, value 'C': Unknown booklet; assuming base booklet A (fix: use one of AB)"
        );

        let (booklet, warning) = resolve_booklet(None, &config, 3);
        assert_eq!(booklet, BookletId::A);
        assert!(warning.is_some());
    }
}
