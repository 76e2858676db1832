//! Validation warning types.
//!
//! Recoverable problems found anywhere in the pipeline are collected as
//! [`ValidationWarning`] values next to the normal output. Only structural
//! faults are returned as errors.

use serde::{Deserialize, Serialize};

/// Warning severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Must be fixed or confirmed before the import is committed
    Error,
    /// Should review
    Warning,
    /// Informational only
    Info,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// A recoverable problem with optional row/column/value context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub severity: Severity,
    /// 1-based data row (the header row is not counted).
    pub row: Option<usize>,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationWarning {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            row: None,
            column: None,
            value: None,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    #[must_use]
    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Single-line rendering: `[Error] row 3, column 'Cevap': message (fix: ...)`.
    pub fn describe(&self) -> String {
        let mut out = format!("[{}]", self.severity.label());
        let mut context = Vec::new();
        if let Some(row) = self.row {
            context.push(format!("row {row}"));
        }
        if let Some(column) = &self.column {
            context.push(format!("column '{column}'"));
        }
        if let Some(value) = &self.value {
            context.push(format!("value '{value}'"));
        }
        if !context.is_empty() {
            out.push(' ');
            out.push_str(&context.join(", "));
            out.push(':');
        }
        out.push(' ');
        out.push_str(&self.message);
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!(" (fix: {suggestion})"));
        }
        out
    }
}

/// Counts of warnings by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl WarningSummary {
    pub fn from_warnings(warnings: &[ValidationWarning]) -> Self {
        let mut summary = Self::default();
        for warning in warnings {
            match warning.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}
