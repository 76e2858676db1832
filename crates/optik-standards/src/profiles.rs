//! Exam profile loading.

use std::collections::BTreeMap;
use std::path::Path;

use optik_model::{BookletId, ExamConfig, PenaltyDivisor, SubjectBoundary, SubjectLayout};
use serde::Deserialize;
use tracing::debug;

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::paths::{EXAM_TYPES_FILE, SUBJECTS_FILE, profiles_dir_override, read_profile_file};
use crate::reader;

#[derive(Debug, Deserialize)]
struct ExamRow {
    code: String,
    label: String,
    total_questions: u32,
    penalty: String,
    booklets: String,
    base_booklet: String,
}

#[derive(Debug, Deserialize)]
struct SubjectRow {
    exam_code: String,
    code: String,
    name: String,
    start: u32,
    end: u32,
}

/// Loads exam profiles from the override directory when
/// `OPTIK_PROFILES_DIR` is set, otherwise from the embedded copies.
pub fn load_profiles() -> Result<Vec<ExamConfig>> {
    match profiles_dir_override() {
        Some(dir) => load_profiles_from_dir(&dir),
        None => load_profiles_from_str(embedded::EXAM_TYPES, embedded::SUBJECTS),
    }
}

/// Loads `exam_types.csv` and `subjects.csv` from `dir`.
pub fn load_profiles_from_dir(dir: &Path) -> Result<Vec<ExamConfig>> {
    if !dir.is_dir() {
        return Err(StandardsError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let exam_types = read_profile_file(dir, EXAM_TYPES_FILE)?;
    let subjects = read_profile_file(dir, SUBJECTS_FILE)?;
    debug!(dir = %dir.display(), "loading exam profiles from directory");
    load_profiles_from_str(&exam_types, &subjects)
}

/// Builds exam profiles from CSV text, in `exam_types` row order.
///
/// Every profile's subject rows must partition `1..=total_questions`.
pub fn load_profiles_from_str(exam_types: &str, subjects: &str) -> Result<Vec<ExamConfig>> {
    let exam_rows: Vec<ExamRow> = reader::read_rows(exam_types, EXAM_TYPES_FILE)?;
    let subject_rows: Vec<SubjectRow> = reader::read_rows(subjects, SUBJECTS_FILE)?;

    let mut by_exam: BTreeMap<String, Vec<SubjectBoundary>> = BTreeMap::new();
    for row in subject_rows {
        by_exam
            .entry(row.exam_code.trim().to_uppercase())
            .or_default()
            .push(SubjectBoundary::new(row.code, row.name, row.start, row.end));
    }

    let mut profiles = Vec::with_capacity(exam_rows.len());
    for row in exam_rows {
        let code = row.code.trim().to_uppercase();
        let subjects = by_exam.remove(&code).unwrap_or_default();
        profiles.push(build_profile(&code, &row, subjects)?);
    }

    if let Some(exam) = by_exam.into_keys().next() {
        return Err(StandardsError::UnknownExam { exam });
    }
    debug!(count = profiles.len(), "exam profiles loaded");
    Ok(profiles)
}

fn build_profile(code: &str, row: &ExamRow, subjects: Vec<SubjectBoundary>) -> Result<ExamConfig> {
    let invalid_profile = |source| StandardsError::InvalidProfile {
        exam: code.to_string(),
        source,
    };
    let penalty = PenaltyDivisor::parse(&row.penalty).map_err(|_| StandardsError::InvalidValue {
        field: "penalty",
        value: row.penalty.clone(),
        file: EXAM_TYPES_FILE.to_string(),
    })?;
    let booklets = row
        .booklets
        .split('|')
        .map(|letter| {
            BookletId::parse(letter).map_err(|_| StandardsError::InvalidValue {
                field: "booklets",
                value: row.booklets.clone(),
                file: EXAM_TYPES_FILE.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let base = BookletId::parse(&row.base_booklet).map_err(|_| StandardsError::InvalidValue {
        field: "base_booklet",
        value: row.base_booklet.clone(),
        file: EXAM_TYPES_FILE.to_string(),
    })?;
    let layout = SubjectLayout::new(subjects, row.total_questions).map_err(invalid_profile)?;
    ExamConfig::new(code, row.label.trim(), layout, penalty, booklets, base).map_err(invalid_profile)
}

/// Profile by exam code, ignoring ASCII case.
pub fn find_profile<'a>(profiles: &'a [ExamConfig], code: &str) -> Option<&'a ExamConfig> {
    profiles
        .iter()
        .find(|profile| profile.code.eq_ignore_ascii_case(code.trim()))
}

#[cfg(test)]
mod tests {
    use optik_model::Rational;

    use super::*;

    #[test]
    fn test_embedded_profiles() {
        let profiles = load_profiles_from_str(embedded::EXAM_TYPES, embedded::SUBJECTS).unwrap();
        let codes: Vec<&str> = profiles.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["LGS", "TYT", "AYT_SAY"]);

        let lgs = find_profile(&profiles, "lgs").unwrap();
        assert_eq!(lgs.total_questions(), 90);
        assert_eq!(lgs.layout.subjects().len(), 6);
        assert_eq!(
            lgs.penalty,
            PenaltyDivisor::Ratio(Rational::from_integer(3))
        );

        let tyt = find_profile(&profiles, "TYT").unwrap();
        assert_eq!(tyt.booklets.len(), 4);
        assert_eq!(tyt.layout.subject_for(61).unwrap().code, "MAT");

        let ayt = find_profile(&profiles, "AYT_SAY").unwrap();
        assert_eq!(ayt.layout.subject_for(80).unwrap().code, "BIY");
    }

    #[test]
    fn test_gap_in_subjects_is_rejected() {
        let exams = "code,label,total_questions,penalty,booklets,base_booklet\nX,X,10,4,A|B,A\n";
        let subjects = "exam_code,code,name,start,end\nX,MAT,Matematik,1,4\nX,FEN,Fen,6,10\n";
        let err = load_profiles_from_str(exams, subjects).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidProfile { ref exam, .. } if exam == "X"));
    }

    #[test]
    fn test_penalty_none() {
        let exams = "code,label,total_questions,penalty,booklets,base_booklet\nQUIZ,Quiz,2,none,A,A\n";
        let subjects = "exam_code,code,name,start,end\nQUIZ,GEN,Genel,1,2\n";
        let profiles = load_profiles_from_str(exams, subjects).unwrap();
        assert_eq!(profiles[0].penalty, PenaltyDivisor::None);
    }

    #[test]
    fn test_invalid_values() {
        let subjects = "exam_code,code,name,start,end\nX,GEN,Genel,1,2\n";
        let bad_penalty = "code,label,total_questions,penalty,booklets,base_booklet\nX,X,2,0,A,A\n";
        assert!(matches!(
            load_profiles_from_str(bad_penalty, subjects),
            Err(StandardsError::InvalidValue { field: "penalty", .. })
        ));
        let bad_booklet = "code,label,total_questions,penalty,booklets,base_booklet\nX,X,2,4,A|BB,A\n";
        assert!(matches!(
            load_profiles_from_str(bad_booklet, subjects),
            Err(StandardsError::InvalidValue { field: "booklets", .. })
        ));
    }

    #[test]
    fn test_orphan_subject_rows() {
        let exams = "code,label,total_questions,penalty,booklets,base_booklet\nX,X,2,4,A,A\n";
        let subjects = "exam_code,code,name,start,end\nX,GEN,Genel,1,2\nY,GEN,Genel,1,2\n";
        assert!(matches!(
            load_profiles_from_str(exams, subjects),
            Err(StandardsError::UnknownExam { ref exam }) if exam == "Y"
        ));
    }
}
