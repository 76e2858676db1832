//! Applying rotations to answer strings and answer keys.

use optik_model::{AnswerKey, BLANK, BookletId};

use crate::error::{Result, TransformError};
use crate::rotation::BookletRotation;

fn not_covered(booklet: BookletId, rotation: &BookletRotation) -> TransformError {
    TransformError::BookletNotCovered {
        booklet,
        base: rotation.base(),
        target: rotation.target(),
    }
}

/// Re-orders a student's answers from `source` booklet numbering into base
/// numbering.
///
/// Base-booklet answers are returned unchanged. Positions without an answer
/// character become [`BLANK`]; characters past the question count are
/// dropped.
pub fn convert_to_base_booklet(
    answers: &str,
    source: BookletId,
    rotation: &BookletRotation,
) -> Result<String> {
    if source == rotation.base() {
        return Ok(answers.to_string());
    }
    if source != rotation.target() {
        return Err(not_covered(source, rotation));
    }
    let chars: Vec<char> = answers.chars().collect();
    let mut out = vec![BLANK; rotation.total() as usize];
    for (target_q, base_q) in rotation.pairs() {
        if let Some(answer) = chars.get((target_q - 1) as usize) {
            out[(base_q - 1) as usize] = *answer;
        }
    }
    Ok(out.into_iter().collect())
}

/// Inverse of [`convert_to_base_booklet`]: base numbering to `target`.
pub fn convert_from_base_booklet(
    answers: &str,
    target: BookletId,
    rotation: &BookletRotation,
) -> Result<String> {
    if target == rotation.base() {
        return Ok(answers.to_string());
    }
    if target != rotation.target() {
        return Err(not_covered(target, rotation));
    }
    let chars: Vec<char> = answers.chars().collect();
    let mut out = vec![BLANK; rotation.total() as usize];
    for (target_q, base_q) in rotation.pairs() {
        if let Some(answer) = chars.get((base_q - 1) as usize) {
            out[(target_q - 1) as usize] = *answer;
        }
    }
    Ok(out.into_iter().collect())
}

/// Expresses a base-booklet answer key in `target` numbering, sorted by
/// the new question numbers.
///
/// Each entry's `booklet_questions` afterwards records its base number and
/// no longer lists `target`.
pub fn convert_answer_key_to_booklet(
    key: &AnswerKey,
    target: BookletId,
    rotation: &BookletRotation,
) -> Result<AnswerKey> {
    if let Some(booklet) = key.booklet.filter(|booklet| *booklet != rotation.base()) {
        return Err(not_covered(booklet, rotation));
    }
    if target == rotation.base() {
        return Ok(AnswerKey::new(Some(target), key.entries().to_vec()));
    }
    if target != rotation.target() {
        return Err(not_covered(target, rotation));
    }

    let mut entries = Vec::with_capacity(key.len());
    for entry in key.entries() {
        let question =
            rotation
                .from_base(entry.question)
                .ok_or(TransformError::QuestionOutOfRange {
                    question: entry.question,
                    total: rotation.total(),
                })?;
        let mut converted = entry.clone();
        converted.question = question;
        converted.booklet_questions.remove(&target);
        converted
            .booklet_questions
            .insert(rotation.base(), entry.question);
        entries.push(converted);
    }
    Ok(AnswerKey::new(Some(target), entries))
}

#[cfg(test)]
mod tests {
    use optik_model::{AnswerMark, QuestionAnswer, SubjectBoundary, SubjectLayout};

    use super::*;

    fn rotation() -> BookletRotation {
        let layout = SubjectLayout::new(
            vec![
                SubjectBoundary::new("TUR", "Türkçe", 1, 3),
                SubjectBoundary::new("MAT", "Matematik", 4, 5),
            ],
            5,
        )
        .unwrap();
        BookletRotation::mirror(&layout, BookletId::A, BookletId::B)
    }

    #[test]
    fn test_base_booklet_unchanged() {
        assert_eq!(
            convert_to_base_booklet("AB", BookletId::A, &rotation()).unwrap(),
            "AB"
        );
    }

    #[test]
    fn test_to_base_mirrors_blocks() {
        let rotation = rotation();
        assert_eq!(
            convert_to_base_booklet("ABCDE", BookletId::B, &rotation).unwrap(),
            "CBAED"
        );
        // Short input: the missing tail becomes blank before rotation.
        assert_eq!(
            convert_to_base_booklet("AB", BookletId::B, &rotation).unwrap(),
            " BA  "
        );
    }

    #[test]
    fn test_from_base_inverts_to_base() {
        let rotation = rotation();
        let base = convert_to_base_booklet("AB DE", BookletId::B, &rotation).unwrap();
        assert_eq!(
            convert_from_base_booklet(&base, BookletId::B, &rotation).unwrap(),
            "AB DE"
        );
    }

    #[test]
    fn test_unknown_booklet() {
        let err = convert_to_base_booklet("A", BookletId::C, &rotation()).unwrap_err();
        assert!(matches!(
            err,
            TransformError::BookletNotCovered {
                booklet: BookletId::C,
                ..
            }
        ));
    }

    #[test]
    fn test_key_converted_and_resorted() {
        let key = AnswerKey::new(
            Some(BookletId::A),
            vec![
                QuestionAnswer::new(1, "TUR", AnswerMark::Choice('A')),
                QuestionAnswer::new(2, "TUR", AnswerMark::Choice('B')),
                QuestionAnswer::new(3, "TUR", AnswerMark::Cancelled),
                QuestionAnswer::new(4, "MAT", AnswerMark::Choice('D')),
                QuestionAnswer::new(5, "MAT", AnswerMark::Choice('E')),
            ],
        );
        let converted = convert_answer_key_to_booklet(&key, BookletId::B, &rotation()).unwrap();
        assert_eq!(converted.booklet, Some(BookletId::B));
        assert_eq!(converted.letters(), "XBAED");
        let first = &converted.entries()[0];
        assert_eq!(first.question, 1);
        assert_eq!(first.booklet_questions.get(&BookletId::A), Some(&3));
        assert_eq!(first.subject, "TUR");
    }

    #[test]
    fn test_key_in_wrong_booklet() {
        let key = AnswerKey::new(Some(BookletId::B), Vec::new());
        assert!(convert_answer_key_to_booklet(&key, BookletId::B, &rotation()).is_err());
    }
}
