//! Subject resolution and exam-type inference.

use std::collections::{BTreeMap, BTreeSet};

use optik_model::{ColumnMapping, ExamConfig, SubjectBoundary, SubjectLayout};
use optik_normalization::fold_key;

use crate::similarity::find_best_match;
use crate::types::ExamTypeGuess;

/// Minimum similarity for a fuzzy subject-name match.
const SUBJECT_MATCH_MIN: f64 = 0.8;

/// Below this confidence no exam code is proposed.
const GUESS_MIN_CONFIDENCE: u8 = 50;

const SUBJECT_WEIGHT: f64 = 50.0;
const COUNT_WEIGHT: f64 = 35.0;
const BOOKLET_WEIGHT: f64 = 15.0;
/// Share of the booklet weight granted when the sheet has no booklet columns.
const BOOKLET_NEUTRAL: f64 = 0.6;

/// Finds the subject a free-text value refers to.
///
/// Tries, in order: the code or display name after folding, a display name
/// containing every word of the value (`"Matematik"` in `"Temel
/// Matematik"`), then the closest code or name with similarity of at
/// least 0.8.
pub fn resolve_subject<'a>(value: &str, layout: &'a SubjectLayout) -> Option<&'a SubjectBoundary> {
    let key = fold_key(value);
    if key.is_empty() {
        return None;
    }
    let subjects = layout.subjects();

    if let Some(subject) = subjects
        .iter()
        .find(|subject| fold_key(&subject.code) == key || fold_key(&subject.name) == key)
    {
        return Some(subject);
    }

    let words: Vec<&str> = key.split(' ').collect();
    let by_words: Vec<&SubjectBoundary> = subjects
        .iter()
        .filter(|subject| {
            let name = fold_key(&subject.name);
            let name_words: BTreeSet<&str> = name.split(' ').collect();
            words.iter().all(|word| name_words.contains(word))
        })
        .collect();
    if let [only] = by_words.as_slice() {
        return Some(only);
    }

    let candidates: Vec<String> = subjects
        .iter()
        .flat_map(|subject| [fold_key(&subject.code), fold_key(&subject.name)])
        .collect();
    let best = find_best_match(&key, &candidates)?;
    (best.score >= SUBJECT_MATCH_MIN).then(|| &subjects[best.index / 2])
}

/// Guesses which profile a sheet belongs to from its subject distribution,
/// row count, and booklet columns.
pub fn infer_exam_type(
    mapping: &ColumnMapping,
    distribution: &BTreeMap<String, usize>,
    profiles: &[ExamConfig],
) -> ExamTypeGuess {
    if profiles.is_empty() {
        return ExamTypeGuess {
            exam_code: None,
            confidence: 0,
            reasoning: "no exam profiles available".to_string(),
        };
    }
    if distribution.is_empty() {
        return ExamTypeGuess {
            exam_code: None,
            confidence: 0,
            reasoning: "no subject values to compare against exam profiles".to_string(),
        };
    }

    let booklets: Vec<char> = mapping
        .booklet_question_columns()
        .map(|(booklet, _)| booklet.letter())
        .collect();
    let total_rows: usize = distribution.values().sum();

    let mut best: Option<(u8, &ExamConfig, String)> = None;
    for profile in profiles {
        let mut matched = BTreeSet::new();
        let mut matched_values = 0usize;
        for value in distribution.keys() {
            if let Some(subject) = resolve_subject(value, &profile.layout) {
                matched.insert(subject.code.as_str());
                matched_values += 1;
            }
        }
        let subject_count = profile.layout.subjects().len();
        let subject_score = (matched.len() as f64 / subject_count as f64)
            * (matched_values as f64 / distribution.len() as f64);

        let expected = profile.total_questions() as usize;
        let count_score =
            1.0 - total_rows.abs_diff(expected) as f64 / total_rows.max(expected) as f64;

        let booklet_score = if booklets.is_empty() {
            BOOKLET_NEUTRAL
        } else {
            let known = booklets
                .iter()
                .filter(|letter| profile.booklets.iter().any(|b| b.letter() == **letter))
                .count();
            known as f64 / booklets.len() as f64
        };

        let points = subject_score * SUBJECT_WEIGHT
            + count_score * COUNT_WEIGHT
            + booklet_score * BOOKLET_WEIGHT;
        let confidence = points.round().clamp(0.0, 100.0) as u8;

        let mut reasoning = format!(
            "{}: {}/{} subjects matched, {} questions (profile has {})",
            profile.code,
            matched.len(),
            subject_count,
            total_rows,
            expected
        );
        if !booklets.is_empty() {
            let letters: String = booklets.iter().collect();
            reasoning.push_str(&format!(", booklet columns {letters}"));
        }

        if best
            .as_ref()
            .is_none_or(|(current, _, _)| confidence > *current)
        {
            best = Some((confidence, profile, reasoning));
        }
    }

    match best {
        Some((confidence, profile, reasoning)) if confidence >= GUESS_MIN_CONFIDENCE => {
            ExamTypeGuess {
                exam_code: Some(profile.code.clone()),
                confidence,
                reasoning,
            }
        }
        Some((confidence, _, reasoning)) => ExamTypeGuess {
            exam_code: None,
            confidence,
            reasoning: format!("no convincing profile; closest was {reasoning}"),
        },
        None => ExamTypeGuess::default(),
    }
}

#[cfg(test)]
mod tests {
    use optik_model::SubjectBoundary;

    use super::*;

    fn tyt_layout() -> SubjectLayout {
        SubjectLayout::new(
            vec![
                SubjectBoundary::new("TUR", "Türkçe", 1, 40),
                SubjectBoundary::new("SOS", "Sosyal Bilimler", 41, 60),
                SubjectBoundary::new("MAT", "Temel Matematik", 61, 100),
                SubjectBoundary::new("FEN", "Fen Bilimleri", 101, 120),
            ],
            120,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_subject_by_code_and_name() {
        let layout = tyt_layout();
        assert_eq!(resolve_subject("mat", &layout).unwrap().code, "MAT");
        assert_eq!(resolve_subject("TÜRKÇE", &layout).unwrap().code, "TUR");
        assert_eq!(resolve_subject("turkce", &layout).unwrap().code, "TUR");
        assert_eq!(resolve_subject("Matematik", &layout).unwrap().code, "MAT");
        assert_eq!(resolve_subject("Fen", &layout).unwrap().code, "FEN");
    }

    #[test]
    fn test_resolve_subject_fuzzy() {
        let layout = tyt_layout();
        assert_eq!(resolve_subject("Turkçe ", &layout).unwrap().code, "TUR");
        assert_eq!(resolve_subject("Sosyal Bilimlr", &layout).unwrap().code, "SOS");
        assert!(resolve_subject("Resim", &layout).is_none());
        assert!(resolve_subject("  ", &layout).is_none());
    }

    #[test]
    fn test_no_profiles_or_subjects() {
        let mapping = ColumnMapping::new();
        let guess = infer_exam_type(&mapping, &BTreeMap::new(), &[]);
        assert_eq!(guess.exam_code, None);
        assert_eq!(guess.confidence, 0);
    }
}
