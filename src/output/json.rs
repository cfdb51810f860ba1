//! JSON report for a single trace.
//!
//! Wraps the feature vector with the schema version, the source file and
//! the parse diagnostics, for tooling that prefers structured output.

use crate::aggregator::features::FeatureVector;
use crate::parser::line::ParseStats;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use serde::Serialize;

/// Top-level single-trace report
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Trace file the vector was extracted from
    pub source: String,

    pub features: &'a FeatureVector,

    pub diagnostics: &'a ParseStats,
}

impl<'a> FeatureReport<'a> {
    pub fn new(source: impl Into<String>, features: &'a FeatureVector, diagnostics: &'a ParseStats) -> Self {
        use chrono::Utc;

        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            source: source.into(),
            features,
            diagnostics,
        }
    }
}

/// Serialize a report as pretty JSON
pub fn report_to_json(report: &FeatureReport<'_>) -> Result<String, OutputError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
