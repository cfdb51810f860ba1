//! Reading a whole trace into event records.
//!
//! Trace files are read line by line through a buffered reader owned by
//! the call, so the handle is released on every exit path. Invalid UTF-8
//! is replaced rather than rejected.

use super::line::{parse_line, ParseStats};
use super::record::EventRecord;
use crate::utils::config::TRACE_FILE_SUFFIXES;
use crate::utils::error::TraceError;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// All records of one trace plus parse diagnostics
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    pub records: Vec<EventRecord>,
    pub stats: ParseStats,
}

/// Parse trace text already held in memory
pub fn parse_trace_str(text: &str) -> ParsedTrace {
    let mut stats = ParseStats::new();
    let records = text
        .lines()
        .filter_map(|line| parse_line(line, &mut stats))
        .collect();

    ParsedTrace { records, stats }
}

/// Parse a trace file from disk
///
/// **Public** - main entry point for file parsing
///
/// # Errors
/// * `TraceError::Unreadable` - file missing or an I/O error mid-read
pub fn parse_trace_file(path: impl AsRef<Path>) -> Result<ParsedTrace, TraceError> {
    let path = path.as_ref();
    let unreadable = |source| TraceError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    debug!("Reading trace: {}", path.display());

    let file = File::open(path).map_err(unreadable)?;
    let mut reader = BufReader::new(file);

    let mut stats = ParseStats::new();
    let mut records = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(unreadable)?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if let Some(record) = parse_line(line, &mut stats) {
            records.push(record);
        }
    }

    debug!("{}: {}", path.display(), stats.summary());

    Ok(ParsedTrace { records, stats })
}

/// Derive the package identifier from a trace file name
///
/// Strips the first matching known trace suffix (`.syscall.log`, then
/// `.log`). Names without a known suffix are returned unchanged.
pub fn package_id_from_path(path: impl AsRef<Path>) -> String {
    let name = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    TRACE_FILE_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .map(str::to_string)
        .unwrap_or(name)
}
