//! Configuration and constants for the CLI.

/// Current feature schema version.
///
/// Bump this whenever the exported column set, its order, or the meaning of
/// a column changes. Downstream training code keys on it.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Assumed syscall sampling rate used to estimate trace duration.
///
/// Duration is `total_syscalls / ASSUMED_SYSCALLS_PER_SECOND`, not a
/// timestamp delta. Changing this value is a breaking schema change.
pub const ASSUMED_SYSCALLS_PER_SECOND: f64 = 100.0;

/// Lines starting with this marker are comments
pub const COMMENT_MARKER: char = '#';

// Trace file suffixes stripped (first match wins) to derive a package id
pub const TRACE_FILE_SUFFIXES: &[&str] = &[".syscall.log", ".log"];

/// Default extension of trace files picked up by the batch command
pub const DEFAULT_TRACE_EXTENSION: &str = "log";

/// Default dataset output path
pub const DEFAULT_OUTPUT_CSV: &str = "features.csv";

/// Opened paths with this suffix count towards `num_databases`
pub const DATABASE_FILE_SUFFIX: &str = ".db";

pub const HTTPS_PORT: u16 = 443;

// Syscall names tallied by the extraction engine
pub const SYSCALL_OPEN: &[&str] = &["open", "openat"];
pub const SYSCALL_READ: &str = "read";
pub const SYSCALL_WRITE: &str = "write";
pub const SYSCALL_CLOSE: &str = "close";
pub const SYSCALL_CLONE: &str = "clone";
pub const SYSCALL_MMAP: &str = "mmap";
pub const SYSCALL_SOCKET: &str = "socket";
pub const SYSCALL_CONNECT: &str = "connect";

// Values of the `family` and `type` fields
pub const FAMILY_IPV4: &str = "ipv4";
pub const FAMILY_IPV6: &str = "ipv6";
pub const FAMILY_UNIX: &str = "unix";
pub const CLONE_TYPE_THREAD: &str = "thread";
