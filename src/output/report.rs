//! Single-trace text report.
//!
//! Prints a vector as `name: value` lines for inspection. Not part of the
//! dataset contract.

use super::validate_output_path;
use crate::aggregator::features::FeatureVector;
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::Path;

/// Render `name: value` lines in column order
pub fn render_text_report(features: &FeatureVector) -> String {
    let mut out = String::new();
    out.push_str("Extracted Features:\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    for (name, value) in features.values() {
        out.push_str(&format!("  {}: {}\n", name, value));
    }

    out
}

/// Write report content to `destination`, or stdout when `None`
///
/// # Errors
/// * `OutputError::InvalidPath` - destination is empty or a directory
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_report(content: &str, destination: Option<&Path>) -> Result<(), OutputError> {
    match destination {
        Some(path) => {
            validate_output_path(path)?;
            std::fs::write(path, content)?;
            info!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_render_text_report() {
        let mut features = FeatureVector::new("com.example");
        features.total_syscalls = 12;
        features.has_okhttp_thread = true;

        let report = render_text_report(&features);

        assert!(report.contains("  package: com.example\n"));
        assert!(report.contains("  total_syscalls: 12\n"));
        assert!(report.contains("  has_okhttp_thread: 1\n"));
        assert!(report.contains("  threads_per_second: 0.0\n"));
        assert_eq!(
            report.lines().filter(|l| l.starts_with("  ")).count(),
            FeatureVector::columns().len()
        );
    }

    #[test]
    fn test_write_report_to_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_report("hello\n", Some(temp_file.path())).unwrap();
        assert_eq!(std::fs::read_to_string(temp_file.path()).unwrap(), "hello\n");
    }
}
