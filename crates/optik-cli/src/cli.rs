//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "optik",
    version,
    about = "Import and score optical exam answer keys and student sheets",
    long_about = "Import answer keys and student answer sheets exported from optical readers\n\
                  or spreadsheets, convert rotated booklets to the base booklet, and compute\n\
                  net scores, rankings and cohort statistics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the configured exam types.
    Exams,

    /// Show how the columns of a sheet are recognised.
    Detect(DetectArgs),

    /// Import an answer key, score a student sheet file and print the ranking.
    Score(ScoreArgs),
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Tab, semicolon or comma separated file; the first row is the header.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Match student-sheet columns instead of answer-key columns.
    #[arg(long = "students")]
    pub students: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Exam type code (e.g. TYT). Inferred from the answer key when omitted.
    #[arg(long = "exam", value_name = "CODE")]
    pub exam: Option<String>,

    /// Answer key file.
    #[arg(long = "key", value_name = "FILE")]
    pub key: PathBuf,

    /// Student sheet file with student number, name, booklet and answers columns.
    #[arg(long = "answers", value_name = "FILE")]
    pub answers: PathBuf,

    /// Students scored per batch.
    #[arg(long = "batch-size", default_value_t = optik_core::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Print the full report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
