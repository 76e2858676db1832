//! Raw spreadsheet rows and the column mapping resolved over them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// One data row keyed by header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based position among data rows (the header row is not counted).
    pub index: usize,
    pub cells: BTreeMap<String, String>,
}

impl RawRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    /// True when every cell is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.trim().is_empty())
    }
}

/// A decoded sheet: the header row plus data rows.
///
/// The header row is kept verbatim for traceability; duplicate header
/// spellings are disambiguated with a ` (2)`, ` (3)` suffix so every cell
/// stays addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub original_headers: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table from a header row and positional data rows.
    ///
    /// Short rows are padded with empty cells; surplus cells are dropped.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let unique = disambiguate_headers(&headers);
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, values)| {
                let mut cells = BTreeMap::new();
                for (pos, header) in unique.iter().enumerate() {
                    let value = values.get(pos).cloned().unwrap_or_default();
                    cells.insert(header.clone(), value);
                }
                RawRow {
                    index: idx + 1,
                    cells,
                }
            })
            .collect();
        Self {
            original_headers: headers,
            headers: unique,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn disambiguate_headers(headers: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    headers
        .iter()
        .map(|header| {
            let count = seen.entry(header.as_str()).or_insert(0);
            *count += 1;
            if *count == 1 {
                header.clone()
            } else {
                format!("{header} ({count})")
            }
        })
        .collect()
}

/// Resolved association from canonical field to the header present in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    fields: BTreeMap<CanonicalField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `field` is read from `header`.
    pub fn insert(&mut self, field: CanonicalField, header: impl Into<String>) {
        self.fields.insert(field, header.into());
    }

    /// Builder form of [`ColumnMapping::insert`].
    #[must_use]
    pub fn with(mut self, field: CanonicalField, header: impl Into<String>) -> Self {
        self.insert(field, header);
        self
    }

    pub fn header(&self, field: CanonicalField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.fields.iter().map(|(field, header)| (*field, header.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Booklets that have a per-booklet question-number column.
    pub fn booklet_question_columns(&self) -> impl Iterator<Item = (crate::BookletId, &str)> {
        self.fields.iter().filter_map(|(field, header)| match field {
            CanonicalField::BookletQuestion(booklet) => Some((*booklet, header.as_str())),
            _ => None,
        })
    }

    /// Trimmed, non-empty cell value of `field` in `row`.
    ///
    /// This is the only way later stages read row data, so they can only
    /// address canonical fields.
    pub fn value<'a>(&self, row: &'a RawRow, field: CanonicalField) -> Option<&'a str> {
        let header = self.fields.get(&field)?;
        row.get(header)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}
