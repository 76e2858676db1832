//! Answer-key assembly from parsed records.

use std::collections::BTreeSet;

use optik_model::{AnswerKey, BookletId, ParsedQuestion, QuestionAnswer, SubjectLayout};
use tracing::debug;

use crate::answers::parse_answer_mark;

/// Builds the answer key for `booklet` from parsed records.
///
/// The subject of each entry is the layout block its number falls in.
/// Records that [`validate_questions`](crate::validate_questions) flags as
/// out of range, repeated, or without a readable answer are left out, so
/// those questions are not scored.
pub fn build_answer_key(
    questions: &[ParsedQuestion],
    layout: &SubjectLayout,
    booklet: Option<BookletId>,
) -> AnswerKey {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::with_capacity(questions.len());
    for question in questions {
        let number = question.question_number;
        let Some(block) = layout.subject_for(number) else {
            continue;
        };
        if !seen.insert(number) {
            continue;
        }
        let Some(answer) = question.correct_answer.as_deref().and_then(parse_answer_mark) else {
            continue;
        };
        let mut entry = QuestionAnswer::new(number, block.code.clone(), answer);
        entry.booklet_questions = question.booklet_questions.clone();
        entries.push(entry);
    }
    let key = AnswerKey::new(booklet, entries);
    debug!(
        entries = key.len(),
        records = questions.len(),
        "answer key assembled"
    );
    key
}
