//! Batch command implementation.
//!
//! The batch command:
//! 1. Lists trace files in a directory
//! 2. Parses each trace
//! 3. Extracts one feature vector per trace
//! 4. Writes the CSV dataset
//!
//! Traces are processed one at a time. An unreadable file is logged and
//! skipped; it never aborts the batch.

use super::models::{BatchArgs, BatchSummary};
use crate::aggregator::extract_features;
use crate::output::{write_dataset, Dataset};
use crate::parser::{package_id_from_path, parse_trace_file};
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the batch command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Summary of the run. When the directory holds no trace files nothing is
/// written and `BatchSummary::nothing_processed` is true.
///
/// # Errors
/// * Trace directory cannot be listed
/// * Dataset cannot be written, including schema drift
pub fn execute_batch(args: BatchArgs) -> Result<BatchSummary> {
    let start_time = Instant::now();

    let trace_files = discover_trace_files(&args.trace_dir, &args.extension)
        .with_context(|| format!("Failed to list trace directory {}", args.trace_dir.display()))?;

    let mut summary = BatchSummary {
        files_found: trace_files.len(),
        ..BatchSummary::default()
    };

    if trace_files.is_empty() {
        warn!("No trace files found in {}", args.trace_dir.display());
        return Ok(summary);
    }

    info!("Processing {} trace files...", trace_files.len());

    let dataset = collect_dataset(&trace_files, &mut summary);

    summary.rows_written = write_dataset(&dataset, &args.output_csv)
        .with_context(|| format!("Failed to write dataset {}", args.output_csv.display()))?;
    summary.output = Some(args.output_csv.clone());

    info!(
        "Total apps processed: {} ({} skipped, {} rows written to {}) in {:.2}s",
        summary.files_processed,
        summary.files_skipped,
        summary.rows_written,
        args.output_csv.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Parse and extract every trace in `trace_files`, in the given order
///
/// **Public** - an unreadable file is logged, counted in
/// `summary.files_skipped` and left out of the dataset
pub fn collect_dataset(trace_files: &[PathBuf], summary: &mut BatchSummary) -> Dataset {
    let mut dataset = Dataset::new();

    for (index, trace_path) in trace_files.iter().enumerate() {
        let file_name = file_name_of(trace_path);
        info!("  [{}/{}] Processing: {}", index + 1, trace_files.len(), file_name);

        let parsed = match parse_trace_file(trace_path) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Skipping {}: {}", file_name, e);
                summary.files_skipped += 1;
                continue;
            }
        };

        if parsed.stats.malformed_fields > 0 {
            warn!(
                "{}: dropped {} malformed field values",
                file_name, parsed.stats.malformed_fields
            );
        }
        debug!("{}: {}", file_name, parsed.stats.summary());

        let package = package_id_from_path(trace_path);
        let features = extract_features(&parsed.records, &package);
        dataset.push(file_name, features);
        summary.files_processed += 1;
    }

    dataset
}

/// Validate batch arguments before execution
///
/// **Public** - called from main.rs
pub fn validate_batch_args(args: &BatchArgs) -> Result<()> {
    if !args.trace_dir.is_dir() {
        bail!("Trace directory does not exist: {}", args.trace_dir.display());
    }

    if args.output_csv.as_os_str().is_empty() {
        bail!("Output path cannot be empty");
    }

    if args.extension.is_empty() || args.extension.contains(|c: char| c == '/' || c == '\\') {
        bail!("Invalid trace extension: {:?}", args.extension);
    }

    Ok(())
}

/// List regular files in `dir` ending in `.extension`, sorted by file name
///
/// **Public** - non-recursive; the order does not depend on the
/// filesystem's enumeration order
pub fn discover_trace_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && file_name_of(&path).ends_with(&suffix) {
            files.push(path);
        }
    }

    files.sort_by_key(|path| file_name_of(path));
    debug!("Found {} trace files in {}", files.len(), dir.display());

    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
