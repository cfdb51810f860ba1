//! CSV dataset writer.
//!
//! One header row from the schema accessor, then one row per trace sorted
//! by source file name. Every vector is checked against the schema before
//! the first byte is written.

use super::validate_output_path;
use crate::aggregator::features::FeatureVector;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Row terminator, matching datasets produced by earlier tooling
pub const LINE_TERMINATOR: &str = "\r\n";

/// One dataset row and the trace file it came from
#[derive(Debug, Clone)]
pub struct DatasetRow {
    pub source: String,
    pub features: FeatureVector,
}

/// Feature vectors of one batch
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the vector extracted from trace file `source`
    pub fn push(&mut self, source: impl Into<String>, features: FeatureVector) {
        self.rows.push(DatasetRow {
            source: source.into(),
            features,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in source file name order, independent of insertion order
    pub fn sorted_rows(&self) -> Vec<&DatasetRow> {
        let mut rows: Vec<&DatasetRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| a.source.cmp(&b.source));
        rows
    }
}

/// Render one vector as CSV cells, rejecting schema drift
///
/// **Public** - used by the writer and by tests
///
/// # Errors
/// * `OutputError::SchemaDrift` - exported names differ from `FeatureVector::columns()`
pub fn row_cells(features: &FeatureVector) -> Result<Vec<String>, OutputError> {
    let values = features.values();
    let names: Vec<&str> = values.iter().map(|(name, _)| *name).collect();
    check_schema(&features.package, &names)?;

    Ok(values.into_iter().map(|(_, v)| escape_field(&v.to_string())).collect())
}

/// Compare exported names against `FeatureVector::columns()`, order included
///
/// # Errors
/// * `OutputError::SchemaDrift` - a column is missing, extra or out of place
pub fn check_schema(package: &str, found: &[&str]) -> Result<(), OutputError> {
    let expected = FeatureVector::columns();

    if found == expected {
        return Ok(());
    }

    Err(OutputError::SchemaDrift {
        package: package.to_string(),
        expected: expected.iter().map(|c| c.to_string()).collect(),
        found: found.iter().map(|n| n.to_string()).collect(),
    })
}

/// Render the whole dataset, header included
pub fn dataset_to_csv_string(dataset: &Dataset) -> Result<String, OutputError> {
    let mut out = String::new();
    out.push_str(&FeatureVector::columns().join(","));
    out.push_str(LINE_TERMINATOR);

    for row in dataset.sorted_rows() {
        out.push_str(&row_cells(&row.features)?.join(","));
        out.push_str(LINE_TERMINATOR);
    }

    Ok(out)
}

/// Write the dataset to a CSV file
///
/// **Public** - main entry point for dataset output
///
/// # Returns
/// Number of data rows written (header excluded)
///
/// # Errors
/// * `OutputError::SchemaDrift` - a vector does not match the column contract
/// * `OutputError::InvalidPath` - path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_dataset(dataset: &Dataset, output_path: impl AsRef<Path>) -> Result<usize, OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing dataset to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Render first so drift is caught before the file is touched
    let content = dataset_to_csv_string(dataset)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    info!(
        "Dataset written successfully ({} rows, {} bytes)",
        dataset.len(),
        content.len()
    );

    Ok(dataset.len())
}

/// Quote a cell containing a separator, quote or line break
fn escape_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("com.app"), "com.app");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_check_schema_accepts_columns() {
        assert!(check_schema("x", FeatureVector::columns()).is_ok());
    }

    #[test]
    fn test_check_schema_rejects_reordered_columns() {
        let mut names = FeatureVector::columns().to_vec();
        names.swap(1, 2);

        match check_schema("com.drift", &names) {
            Err(OutputError::SchemaDrift { package, expected, found }) => {
                assert_eq!(package, "com.drift");
                assert_eq!(expected[1], "total_syscalls");
                assert_eq!(found[1], "trace_duration_sec");
            }
            other => panic!("expected schema drift, got {:?}", other),
        }
    }

    #[test]
    fn test_check_schema_rejects_missing_column() {
        let names = &FeatureVector::columns()[..FeatureVector::columns().len() - 1];
        let result = check_schema("x", names);
        assert!(matches!(result, Err(OutputError::SchemaDrift { .. })));
    }

    #[test]
    fn test_empty_dataset_is_header_only() {
        let csv = dataset_to_csv_string(&Dataset::new()).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("package,total_syscalls,trace_duration_sec,"));
        assert!(csv.ends_with("syscalls_per_second,threads_per_second\r\n"));
    }

    #[test]
    fn test_zero_row_rendering() {
        let mut dataset = Dataset::new();
        dataset.push("z.log", FeatureVector::new("z"));
        let csv = dataset_to_csv_string(&dataset).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.starts_with("z,0,0.0,0,0,"));
        assert!(row.ends_with(",0,0,0.0,0.0"));
        assert_eq!(row.split(',').count(), FeatureVector::columns().len());
    }

    #[test]
    fn test_rows_sorted_by_source() {
        let mut dataset = Dataset::new();
        dataset.push("b.log", FeatureVector::new("b"));
        dataset.push("a.log", FeatureVector::new("a"));
        dataset.push("c.log", FeatureVector::new("c"));

        let order: Vec<&str> = dataset.sorted_rows().iter().map(|r| r.features.package.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_write_dataset() {
        let mut dataset = Dataset::new();
        dataset.push("a.log", FeatureVector::new("a"));
        let temp_file = NamedTempFile::new().unwrap();

        let rows = write_dataset(&dataset, temp_file.path()).unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_write_dataset_to_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_dataset(&Dataset::new(), temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/features.csv");

        write_dataset(&Dataset::new(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
