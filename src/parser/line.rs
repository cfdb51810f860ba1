//! Line parser for the `key=value` trace format.
//!
//! One event per line. Blank lines and `#` comments carry no event.
//! Tokens may appear in any order; values are either double-quoted
//! (taken verbatim) or a run of non-whitespace characters.

use super::record::{EventRecord, FieldKey};
use crate::utils::config::COMMENT_MARKER;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `key=value` or `key="quoted value"`
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)=("([^"]*)"|(\S+))"#).unwrap());

/// Diagnostic counters collected while parsing one trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines seen, including blanks and comments
    pub lines: u64,
    /// Blank and comment lines
    pub skipped_lines: u64,
    /// Data lines without a syscall name
    pub lines_without_syscall: u64,
    /// Records produced
    pub records: u64,
    /// Field values dropped because they failed type coercion
    pub malformed_fields: u64,
    /// First non-empty timestamp seen (diagnostics only)
    pub first_timestamp: Option<String>,
    /// Last non-empty timestamp seen (diagnostics only)
    pub last_timestamp: Option<String>,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} lines | {} records | {} skipped | {} without syscall | {} malformed fields",
            self.lines,
            self.records,
            self.skipped_lines,
            self.lines_without_syscall,
            self.malformed_fields
        )
    }

    fn observe_timestamp(&mut self, ts: &str) {
        if ts.is_empty() {
            return;
        }
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(ts.to_string());
        }
        self.last_timestamp = Some(ts.to_string());
    }
}

/// Returns true for lines that never carry an event
pub fn is_non_data_line(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(COMMENT_MARKER)
}

/// Split a line into its `(key, value)` tokens, in order of appearance
pub fn tokenize(line: &str) -> Vec<(&str, &str)> {
    TOKEN_PATTERN
        .captures_iter(line)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let value = caps.get(3).or_else(|| caps.get(4))?.as_str();
            Some((key, value))
        })
        .collect()
}

/// Parse one trace line into an event record
///
/// **Public** - main entry point for line parsing
///
/// Returns `None` for blank lines, comments, and lines with no (or an
/// empty) `syscall` value. Fields whose value fails coercion are left at
/// their default and counted in `stats.malformed_fields`. When a key is
/// repeated the last occurrence wins.
pub fn parse_line(line: &str, stats: &mut ParseStats) -> Option<EventRecord> {
    stats.lines += 1;

    if is_non_data_line(line) {
        stats.skipped_lines += 1;
        return None;
    }

    let tokens: Vec<(FieldKey, &str)> = tokenize(line)
        .into_iter()
        .filter_map(|(key, value)| FieldKey::from_key(key).map(|field| (field, value)))
        .collect();

    let syscall = tokens
        .iter()
        .rev()
        .find(|(field, _)| *field == FieldKey::Syscall)
        .map(|(_, value)| *value)
        .filter(|value| !value.is_empty());

    let Some(syscall) = syscall else {
        stats.lines_without_syscall += 1;
        return None;
    };

    let mut record = EventRecord::new(syscall).with_raw_line(line);

    for (field, value) in tokens {
        if let Err(e) = record.apply_field(field, value) {
            stats.malformed_fields += 1;
            debug!("Dropping field in line {}: {}", stats.lines, e);
        }
    }

    stats.records += 1;
    stats.observe_timestamp(&record.timestamp);

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<EventRecord> {
        parse_line(line, &mut ParseStats::new())
    }

    #[test]
    fn test_tokenize_quoted_and_bare() {
        let tokens = tokenize(r#"syscall=openat path="/data/my app/x.db" fd=3"#);
        assert_eq!(
            tokens,
            vec![
                ("syscall", "openat"),
                ("path", "/data/my app/x.db"),
                ("fd", "3"),
            ]
        );
    }

    #[test]
    fn test_tokenize_empty_quoted_value() {
        let tokens = tokenize(r#"comm="" syscall=read"#);
        assert_eq!(tokens, vec![("comm", ""), ("syscall", "read")]);
    }

    #[test]
    fn test_parse_line_basic() {
        let record = parse("ts=12.5 syscall=read pid=100 tid=101 comm=main fd=4 count=4096 actual=512")
            .unwrap();

        assert_eq!(record.timestamp, "12.5");
        assert_eq!(record.syscall, "read");
        assert_eq!(record.pid, 100);
        assert_eq!(record.tid, 101);
        assert_eq!(record.comm, "main");
        assert_eq!(record.fd, 4);
        assert_eq!(record.count, 4096);
        assert_eq!(record.actual, 512);
    }

    #[test]
    fn test_parse_line_any_order() {
        let record = parse(r#"type=thread child_pid=77 syscall=clone comm="OkHttp Dispatcher""#).unwrap();

        assert_eq!(record.syscall, "clone");
        assert_eq!(record.clone_type, "thread");
        assert_eq!(record.child_pid, 77);
        assert_eq!(record.comm, "OkHttp Dispatcher");
    }

    #[test]
    fn test_parse_line_skips_blank_and_comment() {
        let mut stats = ParseStats::new();
        assert!(parse_line("", &mut stats).is_none());
        assert!(parse_line("   \t", &mut stats).is_none());
        assert!(parse_line("# syscall=read", &mut stats).is_none());

        assert_eq!(stats.lines, 3);
        assert_eq!(stats.skipped_lines, 3);
        assert_eq!(stats.records, 0);
    }

    #[test]
    fn test_parse_line_indented_hash_is_data() {
        let record = parse("  # syscall=read").unwrap();
        assert_eq!(record.syscall, "read");
    }

    #[test]
    fn test_parse_line_without_syscall() {
        let mut stats = ParseStats::new();
        assert!(parse_line("pid=1 comm=main", &mut stats).is_none());
        assert!(parse_line(r#"syscall="" pid=1"#, &mut stats).is_none());
        assert_eq!(stats.lines_without_syscall, 2);
    }

    #[test]
    fn test_parse_line_malformed_field_dropped() {
        let mut stats = ParseStats::new();
        let record = parse_line("syscall=read pid=abc actual=10", &mut stats).unwrap();

        assert_eq!(record.pid, 0);
        assert_eq!(record.actual, 10);
        assert_eq!(stats.malformed_fields, 1);
        assert_eq!(stats.records, 1);
    }

    #[test]
    fn test_parse_line_unknown_keys_ignored() {
        let record = parse("syscall=mmap foo=bar prot=PROT_READ|PROT_EXEC len=4096").unwrap();
        assert_eq!(record.syscall, "mmap");
        assert_eq!(record.prot, "PROT_READ|PROT_EXEC");
    }

    #[test]
    fn test_parse_line_last_duplicate_wins() {
        let record = parse("syscall=read syscall=write port=80 port=443").unwrap();
        assert_eq!(record.syscall, "write");
        assert_eq!(record.port, 443);
    }

    #[test]
    fn test_parse_line_keeps_raw_line() {
        let line = "syscall=close fd=3";
        assert_eq!(parse(line).unwrap().raw_line, line);
    }

    #[test]
    fn test_stats_track_timestamps() {
        let mut stats = ParseStats::new();
        parse_line("ts=1.0 syscall=read", &mut stats);
        parse_line("syscall=read", &mut stats);
        parse_line("ts=3.0 syscall=write", &mut stats);

        assert_eq!(stats.first_timestamp.as_deref(), Some("1.0"));
        assert_eq!(stats.last_timestamp.as_deref(), Some("3.0"));
    }
}
