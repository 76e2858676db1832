use std::collections::BTreeMap;

use optik_map::infer_exam_type;
use optik_model::{
    BookletId, CanonicalField, ColumnMapping, ExamConfig, PenaltyDivisor, SubjectBoundary,
    SubjectLayout,
};

fn profile(code: &str, subjects: Vec<SubjectBoundary>, total: u32, penalty: &str) -> ExamConfig {
    ExamConfig::new(
        code,
        code,
        SubjectLayout::new(subjects, total).unwrap(),
        PenaltyDivisor::parse(penalty).unwrap(),
        vec![BookletId::A, BookletId::B],
        BookletId::A,
    )
    .unwrap()
}

fn profiles() -> Vec<ExamConfig> {
    vec![
        profile(
            "LGS",
            vec![
                SubjectBoundary::new("TUR", "Türkçe", 1, 20),
                SubjectBoundary::new("INK", "T.C. İnkılap Tarihi ve Atatürkçülük", 21, 30),
                SubjectBoundary::new("DIN", "Din Kültürü ve Ahlak Bilgisi", 31, 40),
                SubjectBoundary::new("ING", "Yabancı Dil", 41, 50),
                SubjectBoundary::new("MAT", "Matematik", 51, 70),
                SubjectBoundary::new("FEN", "Fen Bilimleri", 71, 90),
            ],
            90,
            "3",
        ),
        profile(
            "TYT",
            vec![
                SubjectBoundary::new("TUR", "Türkçe", 1, 40),
                SubjectBoundary::new("SOS", "Sosyal Bilimler", 41, 60),
                SubjectBoundary::new("MAT", "Temel Matematik", 61, 100),
                SubjectBoundary::new("FEN", "Fen Bilimleri", 101, 120),
            ],
            120,
            "4",
        ),
    ]
}

fn distribution(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
    entries
        .iter()
        .map(|(subject, count)| ((*subject).to_string(), *count))
        .collect()
}

#[test]
fn tyt_distribution_is_recognised() {
    let dist = distribution(&[("TÜRKÇE", 40), ("SOSYAL", 20), ("MATEMATİK", 40), ("FEN", 20)]);
    let guess = infer_exam_type(&ColumnMapping::new(), &dist, &profiles());
    assert_eq!(guess.exam_code.as_deref(), Some("TYT"));
    assert_eq!(guess.confidence, 94);
    insta::assert_snapshot!(guess.reasoning, @"TYT: 4/4 subjects matched, 120 questions (profile has 120)");
}

#[test]
fn lgs_distribution_with_booklet_column() {
    let dist = distribution(&[
        ("TUR", 20),
        ("INK", 10),
        ("DIN", 10),
        ("ING", 10),
        ("MAT", 20),
        ("FEN", 20),
    ]);
    let mapping = ColumnMapping::new()
        .with(CanonicalField::QuestionNumber, "Soru No")
        .with(CanonicalField::BookletQuestion(BookletId::B), "B Soru No");
    let guess = infer_exam_type(&mapping, &dist, &profiles());
    assert_eq!(guess.exam_code.as_deref(), Some("LGS"));
    assert_eq!(guess.confidence, 100);
    insta::assert_snapshot!(guess.reasoning, @"LGS: 6/6 subjects matched, 90 questions (profile has 90), booklet columns B");
}

#[test]
fn unknown_subjects_give_no_guess() {
    let dist = distribution(&[("XYZ", 5)]);
    let guess = infer_exam_type(&ColumnMapping::new(), &dist, &profiles());
    assert_eq!(guess.exam_code, None);
    assert!(guess.confidence < 50);
    assert!(guess.reasoning.starts_with("no convincing profile"));
}
