//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use optik_core::{ImportPipeline, ImportReport};
use optik_ingest::decode_bytes;
use optik_map::DetectionResult;
use optik_model::ExamConfig;
use optik_scoring::report::{StatisticsReport, score_lines};
use serde_json::json;
use tracing::{info_span, warn};

use crate::cli::{DetectArgs, ScoreArgs};

/// Reads a sheet file in whatever encoding the exporting program used.
pub fn read_sheet(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let decoded = decode_bytes(&bytes);
    if decoded.had_errors {
        warn!(
            path = %path.display(),
            encoding = decoded.encoding,
            "file contained bytes that could not be decoded"
        );
    }
    Ok(decoded.text)
}

pub fn run_exams() -> Result<Vec<ExamConfig>> {
    let pipeline = ImportPipeline::from_standards().context("load exam profiles")?;
    Ok(pipeline.profiles().to_vec())
}

pub fn run_detect(args: &DetectArgs) -> Result<DetectionResult> {
    let span = info_span!("detect", file = %args.file.display());
    let _guard = span.enter();
    let pipeline = ImportPipeline::from_standards().context("load exam profiles")?;
    let text = read_sheet(&args.file)?;
    let detection = if args.students {
        pipeline.detect_student_columns(&text)
    } else {
        pipeline.detect_answer_key_columns(&text)
    };
    detection.with_context(|| format!("detect columns of {}", args.file.display()))
}

pub fn run_score(args: &ScoreArgs) -> Result<ImportReport> {
    let pipeline = ImportPipeline::from_standards()
        .context("load exam profiles")?
        .with_batch_size(args.batch_size);
    let key_text = read_sheet(&args.key)?;
    let students_text = read_sheet(&args.answers)?;
    pipeline
        .run(&key_text, &students_text, args.exam.as_deref(), |_| true)
        .context("score students")
}

/// Machine-readable view of a scored import.
pub fn report_json(report: &ImportReport) -> serde_json::Value {
    json!({
        "exam": report.key.config.code,
        "summary": report.summary,
        "warnings": report.warnings,
        "students": score_lines(&report.outcome.students),
        "statistics": StatisticsReport::from(&report.outcome.statistics),
    })
}
