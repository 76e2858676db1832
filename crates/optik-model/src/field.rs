//! Canonical import fields and the alias configuration used to detect them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exam::BookletId;

/// The closed set of fields a spreadsheet column can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CanonicalField {
    // Answer-key sheets
    /// Question number in the base booklet.
    QuestionNumber,
    /// Subject code or name.
    Subject,
    /// Correct answer letter or cancelled marker.
    CorrectAnswer,
    /// Learning-outcome code.
    OutcomeCode,
    /// Learning-outcome description.
    OutcomeText,
    /// Question number of the same question in another booklet.
    BookletQuestion(BookletId),

    // Student sheets
    StudentNumber,
    StudentName,
    ClassName,
    Booklet,
    Answers,
}

impl CanonicalField {
    /// Stable snake-case key, e.g. `soru_no` or `b_kitapcik_soru_no`.
    pub fn key(&self) -> String {
        match self {
            Self::QuestionNumber => "soru_no".to_string(),
            Self::Subject => "ders_adi".to_string(),
            Self::CorrectAnswer => "dogru_cevap".to_string(),
            Self::OutcomeCode => "kazanim_kodu".to_string(),
            Self::OutcomeText => "kazanim_metni".to_string(),
            Self::BookletQuestion(booklet) => {
                format!("{}_kitapcik_soru_no", booklet.letter().to_ascii_lowercase())
            }
            Self::StudentNumber => "ogrenci_no".to_string(),
            Self::StudentName => "ad_soyad".to_string(),
            Self::ClassName => "sinif".to_string(),
            Self::Booklet => "kitapcik".to_string(),
            Self::Answers => "cevaplar".to_string(),
        }
    }

    /// Inverse of [`CanonicalField::key`].
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        let field = match key.as_str() {
            "soru_no" => Self::QuestionNumber,
            "ders_adi" => Self::Subject,
            "dogru_cevap" => Self::CorrectAnswer,
            "kazanim_kodu" => Self::OutcomeCode,
            "kazanim_metni" => Self::OutcomeText,
            "ogrenci_no" => Self::StudentNumber,
            "ad_soyad" => Self::StudentName,
            "sinif" => Self::ClassName,
            "kitapcik" => Self::Booklet,
            "cevaplar" => Self::Answers,
            other => {
                let letter = other.strip_suffix("_kitapcik_soru_no")?;
                let booklet = BookletId::parse(letter).ok()?;
                Self::BookletQuestion(booklet)
            }
        };
        Some(field)
    }

    /// True for fields that describe a student rather than a question.
    pub fn is_student_field(&self) -> bool {
        matches!(
            self,
            Self::StudentNumber | Self::StudentName | Self::ClassName | Self::Booklet | Self::Answers
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl TryFrom<String> for CanonicalField {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown field '{value}'"))
    }
}

impl From<CanonicalField> for String {
    fn from(value: CanonicalField) -> Self {
        value.key()
    }
}

/// Known header spellings for one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAlias {
    pub field: CanonicalField,
    pub aliases: Vec<String>,
    /// Minimum similarity (0.0 to 1.0) for a header to resolve to this field.
    pub threshold: f64,
    pub required: bool,
    /// Fold Turkish diacritics before comparing.
    pub locale_sensitive: bool,
    /// Compare without case folding.
    pub case_sensitive: bool,
}

impl FieldAlias {
    /// Optional field with locale-aware, case-insensitive comparison.
    pub fn new<I, S>(field: CanonicalField, aliases: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            aliases: aliases.into_iter().map(Into::into).collect(),
            threshold,
            required: false,
            locale_sensitive: true,
            case_sensitive: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, enable: bool) -> Self {
        self.case_sensitive = enable;
        self
    }

    #[must_use]
    pub fn locale_sensitive(mut self, enable: bool) -> Self {
        self.locale_sensitive = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let fields = [
            CanonicalField::QuestionNumber,
            CanonicalField::Subject,
            CanonicalField::CorrectAnswer,
            CanonicalField::OutcomeCode,
            CanonicalField::OutcomeText,
            CanonicalField::BookletQuestion(BookletId::C),
            CanonicalField::StudentNumber,
            CanonicalField::StudentName,
            CanonicalField::ClassName,
            CanonicalField::Booklet,
            CanonicalField::Answers,
        ];
        for field in fields {
            assert_eq!(CanonicalField::parse(&field.key()), Some(field));
        }
    }

    #[test]
    fn test_booklet_question_key() {
        assert_eq!(
            CanonicalField::BookletQuestion(BookletId::B).key(),
            "b_kitapcik_soru_no"
        );
        assert_eq!(CanonicalField::parse("zz_kitapcik_soru_no"), None);
        assert_eq!(CanonicalField::parse("unknown"), None);
    }

    #[test]
    fn test_alias_builder() {
        let alias = FieldAlias::new(CanonicalField::QuestionNumber, ["Soru No", "Q#"], 0.8)
            .required()
            .case_sensitive(true);
        assert!(alias.required);
        assert!(alias.case_sensitive);
        assert!(alias.locale_sensitive);
        assert_eq!(alias.aliases.len(), 2);
    }
}
