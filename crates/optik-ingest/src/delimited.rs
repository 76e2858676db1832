//! Delimited text (tab, semicolon, comma) to [`RawTable`].

use optik_model::RawTable;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Picks the delimiter from the header line: tab, then `;`, then `,`.
///
/// A line with none of them is a single tab-delimited column.
pub fn detect_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') {
        b'\t'
    } else if header_line.contains(';') {
        b';'
    } else if header_line.contains(',') {
        b','
    } else {
        b'\t'
    }
}

/// Parses pasted or exported delimited text.
///
/// The first non-empty line is the header row. Fewer than two rows in total
/// is an error, as is a header row whose cells are all empty. Header cells
/// are trimmed; data cells are kept verbatim.
pub fn parse_delimited(text: &str) -> Result<RawTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let header_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    let delimiter = detect_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    // Empty lines never produce records.
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    if records.len() < 2 {
        return Err(IngestError::TooFewRows {
            rows: records.len(),
        });
    }

    let mut rows = records.into_iter();
    let headers: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyHeader);
    }

    let table = RawTable::new(headers, rows.collect());
    debug!(
        delimiter = %char::from(delimiter).escape_default(),
        columns = table.headers.len(),
        rows = table.len(),
        "delimited text parsed"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a\tb;c"), b'\t');
        assert_eq!(detect_delimiter("a;b,c"), b';');
        assert_eq!(detect_delimiter("a,b"), b',');
        assert_eq!(detect_delimiter("Soru"), b'\t');
    }

    #[test]
    fn test_semicolon_text() {
        let table = parse_delimited("Soru No;Ders;Cevap\n1;MAT;A\n2;MAT;B\n").unwrap();
        assert_eq!(table.headers, vec!["Soru No", "Ders", "Cevap"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("Cevap"), Some("B"));
    }

    #[test]
    fn test_bom_and_leading_blank_lines() {
        let table = parse_delimited("\u{feff}\n Soru No ,Cevap\n1,A").unwrap();
        assert_eq!(table.headers, vec!["Soru No", "Cevap"]);
        assert_eq!(table.rows[0].index, 1);
    }

    #[test]
    fn test_short_rows_padded() {
        let table = parse_delimited("A\tB\tC\n1\n").unwrap();
        assert_eq!(table.rows[0].get("C"), Some(""));
    }

    #[test]
    fn test_too_few_rows() {
        assert!(matches!(
            parse_delimited("Soru No\tCevap"),
            Err(IngestError::TooFewRows { rows: 1 })
        ));
        assert!(matches!(
            parse_delimited(""),
            Err(IngestError::TooFewRows { rows: 0 })
        ));
    }

    #[test]
    fn test_empty_header() {
        assert!(matches!(
            parse_delimited("\t\n1\t2"),
            Err(IngestError::EmptyHeader)
        ));
    }
}
