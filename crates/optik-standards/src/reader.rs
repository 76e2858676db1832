use serde::de::DeserializeOwned;

use crate::error::{Result, StandardsError};

/// Deserializes every record of a headed CSV text, trimming fields.
pub(crate) fn read_rows<T: DeserializeOwned>(text: &str, file: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| StandardsError::Csv {
                file: file.to_string(),
                source,
            })
        })
        .collect()
}
