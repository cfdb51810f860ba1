use crate::utils::config::{DEFAULT_OUTPUT_CSV, DEFAULT_TRACE_EXTENSION};
use std::path::PathBuf;

/// Arguments for the batch command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct BatchArgs {
    /// Directory holding one trace file per application
    pub trace_dir: PathBuf,

    /// Output path for the CSV dataset
    pub output_csv: PathBuf,

    /// Extension (without the dot) of files treated as traces
    pub extension: String,
}

impl Default for BatchArgs {
    fn default() -> Self {
        Self {
            trace_dir: PathBuf::from("traces"),
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            extension: DEFAULT_TRACE_EXTENSION.to_string(),
        }
    }
}

/// Output format of the single-trace report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// `name: value` lines
    #[default]
    Text,
    /// Pretty JSON with schema version and diagnostics
    Json,
}

/// Arguments for the single command
#[derive(Debug, Clone, Default)]
pub struct SingleArgs {
    /// Trace file to inspect
    pub trace_file: PathBuf,

    /// Package id override (defaults to the file name without its suffix)
    pub package: Option<String>,

    /// Report destination (stdout when `None`)
    pub output: Option<PathBuf>,

    pub format: ReportFormat,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Trace files matching the extension
    pub files_found: usize,
    /// Files parsed and turned into rows
    pub files_processed: usize,
    /// Files skipped because they could not be read
    pub files_skipped: usize,
    /// Data rows written (header excluded)
    pub rows_written: usize,
    /// Dataset path, `None` when nothing was written
    pub output: Option<PathBuf>,
}

impl BatchSummary {
    /// True when no trace files were found and no dataset was written
    pub fn nothing_processed(&self) -> bool {
        self.files_found == 0
    }
}
