//! Trace parsing.
//!
//! This module handles:
//! - The event record model for one traced syscall
//! - Parsing `key=value` trace lines
//! - Reading whole trace files with parse diagnostics

pub mod line;
pub mod record;
pub mod trace;

// Re-export main types
pub use line::{parse_line, ParseStats};
pub use record::{EventRecord, FieldKey};
pub use trace::{package_id_from_path, parse_trace_file, parse_trace_str, ParsedTrace};
