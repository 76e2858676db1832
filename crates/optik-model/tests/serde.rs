use optik_model::{
    BookletId, CanonicalField, ColumnMapping, ExamConfig, PenaltyDivisor, SubjectBoundary,
    SubjectLayout,
};

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
fn exam_config_round_trips_through_json() {
    let config = ExamConfig::new(
        "TYT",
        "Temel Yeterlilik Testi",
        tyt_layout(),
        PenaltyDivisor::parse("4").unwrap(),
        vec![BookletId::A, BookletId::B],
        BookletId::A,
    )
    .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: ExamConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert_eq!(back.total_questions(), 120);
}

#[test]
fn column_mapping_serializes_with_canonical_keys() {
    let mapping = ColumnMapping::new()
        .with(CanonicalField::QuestionNumber, "Soru No")
        .with(CanonicalField::BookletQuestion(BookletId::B), "B Kitapçığı");

    let value = serde_json::to_value(&mapping).unwrap();
    assert_eq!(value["fields"]["soru_no"], "Soru No");
    assert_eq!(value["fields"]["b_kitapcik_soru_no"], "B Kitapçığı");

    let back: ColumnMapping = serde_json::from_value(value).unwrap();
    assert_eq!(back, mapping);
}
