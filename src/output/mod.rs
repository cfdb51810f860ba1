//! Output writers for feature data.
//!
//! This module handles writing data in various formats:
//! - CSV datasets (one row per trace)
//! - Text reports (`name: value` lines)
//! - JSON reports

pub mod csv;
pub mod json;
pub mod report;

use crate::utils::error::OutputError;
use std::path::Path;

// Re-export main functions
pub use self::csv::{
    check_schema, dataset_to_csv_string, row_cells, write_dataset, Dataset, DatasetRow, LINE_TERMINATOR,
};
pub use json::{report_to_json, FeatureReport};
pub use report::{render_text_report, write_report};

/// Validate that output path is writable
///
/// **Private** - shared by the writers in this module
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
