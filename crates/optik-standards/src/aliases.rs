//! Field-alias table loading.

use std::path::Path;

use optik_model::{CanonicalField, FieldAlias};
use serde::Deserialize;
use tracing::debug;

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::paths::{FIELD_ALIASES_FILE, profiles_dir_override, read_profile_file};
use crate::reader;

#[derive(Debug, Deserialize)]
struct AliasRow {
    field: String,
    /// `|`-separated header spellings.
    aliases: String,
    threshold: f64,
    required: bool,
    case_sensitive: bool,
    locale_sensitive: bool,
}

/// Loads the alias table from `OPTIK_PROFILES_DIR` when set, otherwise the
/// embedded default.
pub fn load_field_aliases() -> Result<Vec<FieldAlias>> {
    match profiles_dir_override() {
        Some(dir) => load_field_aliases_from_dir(&dir),
        None => load_field_aliases_from_str(embedded::FIELD_ALIASES),
    }
}

pub fn load_field_aliases_from_dir(dir: &Path) -> Result<Vec<FieldAlias>> {
    if !dir.is_dir() {
        return Err(StandardsError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    load_field_aliases_from_str(&read_profile_file(dir, FIELD_ALIASES_FILE)?)
}

/// Parses an alias table. Thresholds must lie in `(0, 1]`.
pub fn load_field_aliases_from_str(text: &str) -> Result<Vec<FieldAlias>> {
    let rows: Vec<AliasRow> = reader::read_rows(text, FIELD_ALIASES_FILE)?;
    let aliases = rows
        .into_iter()
        .map(|row| {
            let field =
                CanonicalField::parse(&row.field).ok_or_else(|| StandardsError::InvalidValue {
                    field: "field",
                    value: row.field.clone(),
                    file: FIELD_ALIASES_FILE.to_string(),
                })?;
            if !(row.threshold > 0.0 && row.threshold <= 1.0) {
                return Err(StandardsError::InvalidValue {
                    field: "threshold",
                    value: row.threshold.to_string(),
                    file: FIELD_ALIASES_FILE.to_string(),
                });
            }
            let spellings = row
                .aliases
                .split('|')
                .map(str::trim)
                .filter(|spelling| !spelling.is_empty());
            let mut alias = FieldAlias::new(field, spellings, row.threshold)
                .case_sensitive(row.case_sensitive)
                .locale_sensitive(row.locale_sensitive);
            if row.required {
                alias = alias.required();
            }
            Ok(alias)
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(count = aliases.len(), "field aliases loaded");
    Ok(aliases)
}

/// Aliases for answer-key sheets.
pub fn answer_key_aliases(all: &[FieldAlias]) -> Vec<FieldAlias> {
    all.iter()
        .filter(|alias| !alias.field.is_student_field())
        .cloned()
        .collect()
}

/// Aliases for student answer sheets.
pub fn student_aliases(all: &[FieldAlias]) -> Vec<FieldAlias> {
    all.iter()
        .filter(|alias| alias.field.is_student_field())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use optik_model::BookletId;

    use super::*;

    #[test]
    fn test_embedded_aliases() {
        let all = load_field_aliases_from_str(embedded::FIELD_ALIASES).unwrap();
        assert_eq!(all.len(), 14);
        assert_eq!(answer_key_aliases(&all).len(), 9);
        assert_eq!(student_aliases(&all).len(), 5);

        let question = all
            .iter()
            .find(|a| a.field == CanonicalField::QuestionNumber)
            .unwrap();
        assert!(question.required);
        assert!(question.aliases.iter().any(|a| a == "Q#"));

        assert!(
            all.iter()
                .any(|a| a.field == CanonicalField::BookletQuestion(BookletId::D))
        );
    }

    #[test]
    fn test_threshold_out_of_range() {
        let text = "field,aliases,threshold,required,case_sensitive,locale_sensitive\n\
                    soru_no,Soru No,1.5,true,false,true\n";
        assert!(matches!(
            load_field_aliases_from_str(text),
            Err(StandardsError::InvalidValue { field: "threshold", .. })
        ));
    }

    #[test]
    fn test_unknown_field() {
        let text = "field,aliases,threshold,required,case_sensitive,locale_sensitive\n\
                    puan,Puan,0.8,false,false,true\n";
        assert!(matches!(
            load_field_aliases_from_str(text),
            Err(StandardsError::InvalidValue { field: "field", .. })
        ));
    }
}
