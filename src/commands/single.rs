//! Single-trace command implementation.
//!
//! Parses one trace, extracts its vector and prints it for inspection.
//! Unlike the batch command, an unreadable file is a hard failure here.

use super::models::{ReportFormat, SingleArgs};
use crate::aggregator::{extract_features, FeatureVector};
use crate::output::{render_text_report, report_to_json, write_report, FeatureReport};
use crate::parser::{package_id_from_path, parse_trace_file};
use anyhow::{Context, Result};
use log::{info, warn};

/// Execute the single command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The extracted vector, after the report has been written
///
/// # Errors
/// * Trace file cannot be read
/// * Report cannot be written
pub fn execute_single(args: SingleArgs) -> Result<FeatureVector> {
    info!("Processing trace: {}", args.trace_file.display());

    let parsed = parse_trace_file(&args.trace_file)
        .with_context(|| format!("Failed to read trace {}", args.trace_file.display()))?;

    if parsed.stats.malformed_fields > 0 {
        warn!(
            "Dropped {} malformed field values",
            parsed.stats.malformed_fields
        );
    }
    info!("Parsed: {}", parsed.stats.summary());

    let package = args
        .package
        .clone()
        .unwrap_or_else(|| package_id_from_path(&args.trace_file));

    let features = extract_features(&parsed.records, &package);

    let content = match args.format {
        ReportFormat::Text => render_text_report(&features),
        ReportFormat::Json => {
            let source = args.trace_file.display().to_string();
            let report = FeatureReport::new(source, &features, &parsed.stats);
            report_to_json(&report).context("Failed to serialize report")?
        }
    };

    write_report(&content, args.output.as_deref()).context("Failed to write report")?;

    Ok(features)
}
