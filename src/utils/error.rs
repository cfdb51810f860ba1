//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing a single trace line
///
/// None of these abort parsing: the offending field is dropped and the
/// line is still accepted when it carries a syscall name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed value for '{key}': {value:?} ({reason})")]
    MalformedField {
        key: String,
        value: String,
        reason: String,
    },
}

/// Errors that can occur while reading a trace file
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Cannot read trace file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Feature schema drift for '{package}': expected columns {expected:?}, found {found:?}")]
    SchemaDrift {
        package: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
}
