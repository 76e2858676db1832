//! Import pipeline with explicit stages.
//!
//! 1. **Answer key**: parse text, detect columns, parse rows, validate,
//!    assemble the key, build booklet rotations
//! 2. **Students**: read sheets from spreadsheet text or scan records
//! 3. **Score**: rotate answers to the base booklet, score in parallel
//!    batches, rank and summarise the cohort
//!
//! Fatal structural problems end the import with a [`PipelineError`];
//! everything else accumulates as warnings next to the output.

use optik_ingest::{
    RowParser, ScanRecord, SheetBatch, build_answer_key, parse_delimited, read_scan_records,
    read_student_rows, validate_questions,
};
use optik_map::{ColumnDetector, DetectionResult, DetectorConfig};
use optik_model::{
    AnswerKey, CohortStatistics, ExamConfig, FieldAlias, ParsedQuestion, RankedStudent,
    StudentAnswerAnalysis, StudentSheet, ValidationWarning, WarningSummary,
};
use optik_normalization::OcrCorrector;
use optik_scoring::{NetScoringEngine, ScoredCohort, rank_students, score_cohort, statistics_from};
use optik_standards::{
    answer_key_aliases, find_profile, load_field_aliases, load_profiles, student_aliases,
};
use optik_transform::RotationSet;
use tracing::{debug, info, info_span, warn};

use crate::error::{PipelineError, Result};

/// Students scored between two cancellation checks.
pub const DEFAULT_BATCH_SIZE: usize = 500;

// ============================================================================
// Stage results
// ============================================================================

/// Result of the answer-key stage.
#[derive(Debug, Clone)]
pub struct ImportedKey {
    /// Exam the key was matched to.
    pub config: ExamConfig,
    /// Key in base-booklet numbering.
    pub key: AnswerKey,
    pub rotations: RotationSet,
    pub detection: DetectionResult,
    /// Parsed rows, including ones left out of the key.
    pub questions: Vec<ParsedQuestion>,
    /// Rows dropped because every mapped cell was empty.
    pub skipped_rows: usize,
    /// Detection, parsing and validation warnings in that order.
    pub warnings: Vec<ValidationWarning>,
}

impl ImportedKey {
    pub fn summary(&self) -> WarningSummary {
        WarningSummary::from_warnings(&self.warnings)
    }
}

/// Where scoring stands when the cancellation callback is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub scored: usize,
    pub total: usize,
}

/// Result of the scoring stage.
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    /// Scored students in input order.
    pub students: Vec<StudentAnswerAnalysis>,
    /// Competition ranking, best first.
    pub ranking: Vec<RankedStudent>,
    pub statistics: CohortStatistics,
}

/// Everything a full import produces.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub key: ImportedKey,
    pub outcome: ScoringOutcome,
    /// Answer-key warnings followed by student-sheet warnings.
    pub warnings: Vec<ValidationWarning>,
    pub summary: WarningSummary,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Runs answer-key and student imports against a fixed set of exam
/// profiles and alias tables.
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    profiles: Vec<ExamConfig>,
    key_detector: ColumnDetector,
    student_detector: ColumnDetector,
    corrector: OcrCorrector,
    batch_size: usize,
}

impl ImportPipeline {
    /// Pipeline over explicit profiles and a combined alias table; the
    /// table is split into answer-key and student fields.
    pub fn new(profiles: Vec<ExamConfig>, aliases: &[FieldAlias]) -> Self {
        Self {
            key_detector: ColumnDetector::new(answer_key_aliases(aliases))
                .with_profiles(profiles.clone()),
            student_detector: ColumnDetector::new(student_aliases(aliases)),
            profiles,
            corrector: OcrCorrector::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Pipeline over the shipped (or `OPTIK_PROFILES_DIR`) configuration.
    pub fn from_standards() -> Result<Self> {
        let profiles = load_profiles()?;
        let aliases = load_field_aliases()?;
        Ok(Self::new(profiles, &aliases))
    }

    pub fn with_corrector(mut self, corrector: OcrCorrector) -> Self {
        self.corrector = corrector;
        self
    }

    pub fn with_detector_config(mut self, config: DetectorConfig) -> Self {
        self.key_detector = self.key_detector.with_config(config);
        self.student_detector = self.student_detector.with_config(config);
        self
    }

    /// Batch size for scoring; at least one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn profiles(&self) -> &[ExamConfig] {
        &self.profiles
    }

    pub fn profile(&self, code: &str) -> Result<&ExamConfig> {
        find_profile(&self.profiles, code).ok_or_else(|| PipelineError::UnknownExam {
            code: code.to_string(),
        })
    }

    // ------------------------------------------------------------------------
    // Stage 1: Answer key
    // ------------------------------------------------------------------------

    /// Column detection over answer-key text, without parsing rows.
    pub fn detect_answer_key_columns(&self, text: &str) -> Result<DetectionResult> {
        let table = parse_delimited(text)?;
        Ok(self.key_detector.detect(&table))
    }

    /// Imports an answer key. `exam` overrides the inferred exam type.
    pub fn import_answer_key(&self, text: &str, exam: Option<&str>) -> Result<ImportedKey> {
        let span = info_span!("answer_key");
        let _guard = span.enter();

        let table = parse_delimited(text)?;
        let detection = self.key_detector.detect(&table);
        debug!(
            rows = table.len(),
            mapped = detection.mapping.len(),
            unmapped = detection.unmapped_headers.len(),
            "columns detected"
        );

        let config = match exam {
            Some(code) => self.profile(code)?,
            None => {
                let code = detection.exam_type.exam_code.as_deref().ok_or_else(|| {
                    PipelineError::ExamNotDetermined {
                        reasoning: detection.exam_type.reasoning.clone(),
                    }
                })?;
                self.profile(code)?
            }
        }
        .clone();

        let parsed = RowParser::new(&detection.mapping).parse_rows(&table.rows);
        let validation = validate_questions(&parsed.questions, &config.layout);
        let key = build_answer_key(
            &parsed.questions,
            &config.layout,
            Some(config.base_booklet),
        );
        if key.is_empty() {
            return Err(PipelineError::EmptyAnswerKey);
        }
        NetScoringEngine::new(&config, &key)?;
        let rotations = RotationSet::from_answer_key(&config, &key)?;

        let mut warnings = detection.warnings.clone();
        warnings.extend(parsed.warnings);
        warnings.extend(validation);

        let imported = ImportedKey {
            config,
            key,
            rotations,
            detection,
            questions: parsed.questions,
            skipped_rows: parsed.skipped_rows,
            warnings,
        };
        let summary = imported.summary();
        info!(
            exam = %imported.config.code,
            questions = imported.key.len(),
            errors = summary.errors,
            warnings = summary.warnings,
            "answer key imported"
        );
        Ok(imported)
    }

    // ------------------------------------------------------------------------
    // Stage 2: Students
    // ------------------------------------------------------------------------

    /// Column detection over student-sheet text.
    pub fn detect_student_columns(&self, text: &str) -> Result<DetectionResult> {
        let table = parse_delimited(text)?;
        Ok(self.student_detector.detect(&table))
    }

    /// Reads student sheets from spreadsheet text.
    pub fn read_student_sheets(&self, text: &str, config: &ExamConfig) -> Result<SheetBatch> {
        let span = info_span!("students", exam = %config.code);
        let _guard = span.enter();

        let table = parse_delimited(text)?;
        let detection = self.student_detector.detect(&table);
        let mut batch = read_student_rows(&table, &detection.mapping, config);
        let mut warnings = detection.warnings;
        warnings.append(&mut batch.warnings);
        batch.warnings = warnings;
        info!(sheets = batch.sheets.len(), "student sheets read");
        Ok(batch)
    }

    /// Reads student sheets from sliced optical-scan records.
    pub fn read_scan_records(&self, records: &[ScanRecord], config: &ExamConfig) -> SheetBatch {
        let batch = read_scan_records(records, config, &self.corrector);
        info!(
            sheets = batch.sheets.len(),
            corrected_names = batch.corrected_names,
            "scan records read"
        );
        batch
    }

    // ------------------------------------------------------------------------
    // Stage 3: Score
    // ------------------------------------------------------------------------

    /// Scores `sheets` in batches.
    ///
    /// `should_continue` runs before every batch; returning `false` stops
    /// the import with [`PipelineError::Cancelled`]. Results never depend
    /// on the batch size.
    pub fn score_students<F>(
        &self,
        imported: &ImportedKey,
        sheets: &[StudentSheet],
        mut should_continue: F,
    ) -> Result<ScoringOutcome>
    where
        F: FnMut(BatchProgress) -> bool,
    {
        let span = info_span!("score", exam = %imported.config.code);
        let _guard = span.enter();

        let engine = NetScoringEngine::new(&imported.config, &imported.key)?;
        let mut scored = ScoredCohort::default();
        for batch in sheets.chunks(self.batch_size) {
            let progress = BatchProgress {
                scored: scored.students.len(),
                total: sheets.len(),
            };
            if !should_continue(progress) {
                warn!(scored = progress.scored, "scoring cancelled");
                return Err(PipelineError::Cancelled {
                    scored: progress.scored,
                });
            }
            let part = score_cohort(&engine, batch, |sheet| {
                imported.rotations.to_base(&sheet.answers, sheet.booklet)
            })?;
            scored.extend(part);
        }

        let statistics = statistics_from(&scored.students, &scored.accumulator);
        let ranking = rank_students(&scored.students);
        info!(
            students = statistics.student_count,
            mean = %statistics.mean,
            median = %statistics.median,
            "cohort scored"
        );
        Ok(ScoringOutcome {
            students: scored.students,
            ranking,
            statistics,
        })
    }

    /// Full import: answer key, student spreadsheet, scoring.
    pub fn run<F>(
        &self,
        key_text: &str,
        students_text: &str,
        exam: Option<&str>,
        should_continue: F,
    ) -> Result<ImportReport>
    where
        F: FnMut(BatchProgress) -> bool,
    {
        let key = self.import_answer_key(key_text, exam)?;
        let batch = self.read_student_sheets(students_text, &key.config)?;
        let outcome = self.score_students(&key, &batch.sheets, should_continue)?;

        let mut warnings = key.warnings.clone();
        warnings.extend(batch.warnings);
        let summary = WarningSummary::from_warnings(&warnings);
        Ok(ImportReport {
            key,
            outcome,
            warnings,
            summary,
        })
    }
}
