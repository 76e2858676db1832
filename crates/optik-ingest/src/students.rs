//! Student answer sheets from optical-scan fields or spreadsheet rows.

use optik_model::{
    CanonicalField, ColumnMapping, ExamConfig, RawTable, StudentSheet, ValidationWarning,
};
use optik_normalization::{OcrCorrector, clean};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::answers::{normalize_answers, resolve_booklet};

/// One scan line already sliced into named fields by the fixed-width
/// field mapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub student_id: String,
    pub student_name: String,
    pub class_name: Option<String>,
    pub booklet: String,
    pub answers: String,
}

/// Sheets plus the warnings raised while reading them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetBatch {
    pub sheets: Vec<StudentSheet>,
    pub warnings: Vec<ValidationWarning>,
    /// Names altered by OCR correction.
    pub corrected_names: usize,
}

impl SheetBatch {
    pub fn merge(&mut self, other: SheetBatch) {
        self.sheets.extend(other.sheets);
        self.warnings.extend(other.warnings);
        self.corrected_names += other.corrected_names;
    }
}

/// Builds sheets from scan records. Names go through OCR correction; the
/// first record is row 1.
pub fn read_scan_records(
    records: &[ScanRecord],
    config: &ExamConfig,
    corrector: &OcrCorrector,
) -> SheetBatch {
    let names = corrector.correct_batch(records.iter().map(|record| record.student_name.as_str()));
    let mut batch = SheetBatch {
        corrected_names: names.changed,
        ..SheetBatch::default()
    };

    for (idx, (record, name)) in records.iter().zip(names.values).enumerate() {
        let row = idx + 1;
        let student_id = student_id_or_row(Some(&record.student_id), row, &mut batch.warnings);
        let mut sheet = build_sheet(
            student_id,
            name,
            Some(&record.booklet),
            &record.answers,
            config,
            row,
            &mut batch.warnings,
        );
        sheet.class_name = record
            .class_name
            .as_deref()
            .map(clean)
            .filter(|class| !class.is_empty());
        batch.sheets.push(sheet);
    }

    debug!(
        sheets = batch.sheets.len(),
        corrected = batch.corrected_names,
        "scan records read"
    );
    batch
}

/// Builds sheets from spreadsheet rows through a resolved mapping.
///
/// Fully blank rows are skipped. The answers cell is read untrimmed so
/// leading blanks keep their positions.
pub fn read_student_rows(
    table: &RawTable,
    mapping: &ColumnMapping,
    config: &ExamConfig,
) -> SheetBatch {
    let mut batch = SheetBatch::default();
    let answers_header = mapping.header(CanonicalField::Answers);

    for row in &table.rows {
        if row.is_blank() {
            continue;
        }
        let student_id = student_id_or_row(
            mapping.value(row, CanonicalField::StudentNumber),
            row.index,
            &mut batch.warnings,
        );
        let name = mapping
            .value(row, CanonicalField::StudentName)
            .map(clean)
            .unwrap_or_default();
        let raw_answers = answers_header
            .and_then(|header| row.get(header))
            .unwrap_or_default();
        if raw_answers.trim().is_empty() {
            batch.warnings.push(
                ValidationWarning::warning("No answers; every question counts as blank")
                    .at_row(row.index),
            );
        }
        let mut sheet = build_sheet(
            student_id,
            name,
            mapping.value(row, CanonicalField::Booklet),
            raw_answers,
            config,
            row.index,
            &mut batch.warnings,
        );
        sheet.class_name = mapping.value(row, CanonicalField::ClassName).map(clean);
        batch.sheets.push(sheet);
    }

    debug!(sheets = batch.sheets.len(), "student rows read");
    batch
}

fn student_id_or_row(
    raw: Option<&str>,
    row: usize,
    warnings: &mut Vec<ValidationWarning>,
) -> String {
    let id = raw.map(clean).unwrap_or_default();
    if id.is_empty() {
        warnings.push(
            ValidationWarning::warning(format!("Student number missing; using row {row}"))
                .at_row(row),
        );
        return format!("row-{row}");
    }
    id
}

fn build_sheet(
    student_id: String,
    student_name: String,
    booklet: Option<&str>,
    raw_answers: &str,
    config: &ExamConfig,
    row: usize,
    warnings: &mut Vec<ValidationWarning>,
) -> StudentSheet {
    let (booklet, booklet_warning) = resolve_booklet(booklet, config, row);
    if let Some(warning) = booklet_warning {
        warn!(row, "unknown or missing booklet, using base booklet");
        warnings.push(warning);
    }

    let total = config.total_questions() as usize;
    let (answers, adjusted) = normalize_answers(raw_answers, total);
    if adjusted && !raw_answers.trim().is_empty() {
        warnings.push(
            ValidationWarning::warning(format!(
                "Answer string has {} characters, expected {total}",
                raw_answers.trim_end_matches(['\r', '\n']).chars().count()
            ))
            .at_row(row),
        );
    }

    StudentSheet {
        student_id,
        student_name,
        class_name: None,
        booklet,
        answers,
    }
}
