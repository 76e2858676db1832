//! Column detection result types.

use std::collections::BTreeMap;

use optik_model::{CanonicalField, ColumnMapping, Severity, ValidationWarning};
use serde::{Deserialize, Serialize};

/// A header that scored above the alternatives floor for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub header: String,
    /// Similarity scaled to 0-100.
    pub confidence: u8,
}

/// Detection outcome for one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDetection {
    pub field: CanonicalField,
    pub required: bool,
    /// Resolved header, `None` when nothing reached the field's threshold.
    pub header: Option<String>,
    /// Similarity of the resolved header scaled to 0-100; 0 when unresolved.
    pub confidence: u8,
    /// Next-best headers, best first.
    pub alternatives: Vec<Alternative>,
}

impl FieldDetection {
    pub fn is_resolved(&self) -> bool {
        self.header.is_some()
    }
}

/// Best guess of which exam profile a sheet belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamTypeGuess {
    /// Profile code, `None` when no profile was convincing.
    pub exam_code: Option<String>,
    /// 0-100.
    pub confidence: u8,
    /// Human-readable evidence behind the guess.
    pub reasoning: String,
}

/// Everything column detection learns about a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// One entry per configured field, in configuration order.
    pub fields: Vec<FieldDetection>,
    /// Resolved fields only.
    pub mapping: ColumnMapping,
    /// Headers that no field claimed.
    pub unmapped_headers: Vec<String>,
    pub exam_type: ExamTypeGuess,
    /// Rows per subject value as written in the sheet (upper-cased).
    pub subject_distribution: BTreeMap<String, usize>,
    pub warnings: Vec<ValidationWarning>,
}

impl DetectionResult {
    pub fn field(&self, field: CanonicalField) -> Option<&FieldDetection> {
        self.fields.iter().find(|detection| detection.field == field)
    }

    /// True when every required field resolved.
    pub fn is_complete(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|warning| warning.severity == Severity::Error)
    }

    /// Mean confidence over resolved fields, 0 when none resolved.
    pub fn mean_confidence(&self) -> u8 {
        let resolved: Vec<u32> = self
            .fields
            .iter()
            .filter(|detection| detection.is_resolved())
            .map(|detection| u32::from(detection.confidence))
            .collect();
        if resolved.is_empty() {
            return 0;
        }
        (resolved.iter().sum::<u32>() / resolved.len() as u32) as u8
    }
}
