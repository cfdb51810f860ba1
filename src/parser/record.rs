//! Typed representation of one traced system call.
//!
//! Every field except the syscall name is optional in the trace format.
//! Absent fields sit at a neutral default (empty string, zero, or -1 for
//! the file descriptor) so consumers never branch on presence.

use crate::utils::error::ParseError;

/// Key of a `key=value` token recognized in a trace line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Timestamp,
    Syscall,
    Pid,
    Tid,
    Uid,
    Comm,
    Path,
    Fd,
    Flags,
    Count,
    Actual,
    Family,
    Ip,
    Port,
    ChildPid,
    CloneType,
    Prot,
}

impl FieldKey {
    /// Map a raw token key to a field, `None` for keys we ignore
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "ts" => Self::Timestamp,
            "syscall" => Self::Syscall,
            "pid" => Self::Pid,
            "tid" => Self::Tid,
            "uid" => Self::Uid,
            "comm" => Self::Comm,
            "path" => Self::Path,
            "fd" => Self::Fd,
            "flags" => Self::Flags,
            "count" => Self::Count,
            "actual" => Self::Actual,
            "family" => Self::Family,
            "ip" => Self::Ip,
            "port" => Self::Port,
            "child_pid" => Self::ChildPid,
            "type" => Self::CloneType,
            "prot" => Self::Prot,
            _ => return None,
        })
    }

    /// Key as it appears in the trace format
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Timestamp => "ts",
            Self::Syscall => "syscall",
            Self::Pid => "pid",
            Self::Tid => "tid",
            Self::Uid => "uid",
            Self::Comm => "comm",
            Self::Path => "path",
            Self::Fd => "fd",
            Self::Flags => "flags",
            Self::Count => "count",
            Self::Actual => "actual",
            Self::Family => "family",
            Self::Ip => "ip",
            Self::Port => "port",
            Self::ChildPid => "child_pid",
            Self::CloneType => "type",
            Self::Prot => "prot",
        }
    }
}

/// One parsed trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Opaque trace-local timestamp
    pub timestamp: String,
    pub syscall: String,
    pub pid: i64,
    pub tid: i64,
    pub uid: i64,
    /// Command / thread name
    pub comm: String,
    pub path: String,
    /// File descriptor, -1 when not applicable
    pub fd: i64,
    pub flags: String,
    /// Requested byte count
    pub count: i64,
    /// Bytes actually transferred
    pub actual: i64,
    pub family: String,
    pub ip: String,
    pub port: u16,
    pub child_pid: i64,
    pub clone_type: String,
    pub prot: String,
    /// Original line, kept for diagnostics
    pub raw_line: String,
}

impl EventRecord {
    /// Create a record for `syscall` with every other field at its default
    pub fn new(syscall: impl Into<String>) -> Self {
        Self {
            timestamp: String::new(),
            syscall: syscall.into(),
            pid: 0,
            tid: 0,
            uid: 0,
            comm: String::new(),
            path: String::new(),
            fd: -1,
            flags: String::new(),
            count: 0,
            actual: 0,
            family: String::new(),
            ip: String::new(),
            port: 0,
            child_pid: 0,
            clone_type: String::new(),
            prot: String::new(),
            raw_line: String::new(),
        }
    }

    pub fn with_raw_line(mut self, line: impl Into<String>) -> Self {
        self.raw_line = line.into();
        self
    }

    /// Set one field from its raw token value
    ///
    /// Numeric fields are coerced; on failure the field keeps its
    /// current value and the error is returned for the caller to count.
    /// The syscall name is fixed at construction and ignored here.
    pub fn apply_field(&mut self, key: FieldKey, value: &str) -> Result<(), ParseError> {
        match key {
            FieldKey::Syscall => {}
            FieldKey::Timestamp => self.timestamp = value.to_string(),
            FieldKey::Comm => self.comm = value.to_string(),
            FieldKey::Path => self.path = value.to_string(),
            FieldKey::Flags => self.flags = value.to_string(),
            FieldKey::Family => self.family = value.to_string(),
            FieldKey::Ip => self.ip = value.to_string(),
            FieldKey::CloneType => self.clone_type = value.to_string(),
            FieldKey::Prot => self.prot = value.to_string(),
            FieldKey::Pid => self.pid = parse_int(key, value)?,
            FieldKey::Tid => self.tid = parse_int(key, value)?,
            FieldKey::Uid => self.uid = parse_int(key, value)?,
            FieldKey::Fd => self.fd = parse_int(key, value)?,
            FieldKey::Count => self.count = parse_int(key, value)?,
            FieldKey::Actual => self.actual = parse_int(key, value)?,
            FieldKey::ChildPid => self.child_pid = parse_int(key, value)?,
            FieldKey::Port => self.port = parse_int(key, value)?,
        }
        Ok(())
    }
}

fn parse_int<T>(key: FieldKey, value: &str) -> Result<T, ParseError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ParseError::MalformedField {
        key: key.as_key().to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = EventRecord::new("read");

        assert_eq!(record.syscall, "read");
        assert_eq!(record.timestamp, "");
        assert_eq!(record.pid, 0);
        assert_eq!(record.fd, -1);
        assert_eq!(record.port, 0);
        assert_eq!(record.actual, 0);
        assert!(record.path.is_empty());
        assert!(record.raw_line.is_empty());
    }

    #[test]
    fn test_field_key_round_trip() {
        for key in ["ts", "syscall", "pid", "type", "child_pid", "prot"] {
            let field = FieldKey::from_key(key).unwrap();
            assert_eq!(field.as_key(), key);
        }
        assert!(FieldKey::from_key("clone_type").is_none());
        assert!(FieldKey::from_key("bogus").is_none());
    }

    #[test]
    fn test_apply_field_coerces_numbers() {
        let mut record = EventRecord::new("connect");
        record.apply_field(FieldKey::Port, "443").unwrap();
        record.apply_field(FieldKey::Fd, "-1").unwrap();
        record.apply_field(FieldKey::Ip, "10.0.0.1").unwrap();

        assert_eq!(record.port, 443);
        assert_eq!(record.fd, -1);
        assert_eq!(record.ip, "10.0.0.1");
    }

    #[test]
    fn test_apply_field_malformed_keeps_default() {
        let mut record = EventRecord::new("read");
        let err = record.apply_field(FieldKey::Actual, "lots").unwrap_err();

        assert_eq!(record.actual, 0);
        match err {
            ParseError::MalformedField { key, value, .. } => {
                assert_eq!(key, "actual");
                assert_eq!(value, "lots");
            }
        }
    }

    #[test]
    fn test_port_out_of_range_is_malformed() {
        let mut record = EventRecord::new("connect");
        assert!(record.apply_field(FieldKey::Port, "70000").is_err());
        assert_eq!(record.port, 0);
    }

    #[test]
    fn test_apply_field_ignores_syscall() {
        let mut record = EventRecord::new("read");
        record.apply_field(FieldKey::Syscall, "write").unwrap();
        assert_eq!(record.syscall, "read");
    }
}
