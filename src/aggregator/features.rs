//! Feature vector definition and its exported column schema.
//!
//! The column list is the dataset contract: downstream training code
//! reads columns by position and name, so the order below is fixed for a
//! given `SCHEMA_VERSION`. Struct fields are declared in the same order so
//! the JSON report matches the CSV header.

use serde::{Serialize, Serializer};
use std::fmt;

/// Exported columns, in dataset order
pub const FEATURE_COLUMNS: &[&str] = &[
    "package",
    "total_syscalls",
    "trace_duration_sec",
    "has_okhttp_thread",
    "has_okhttp_task_thread",
    "has_rxjava_thread",
    "has_rxjava_cached_thread",
    "has_coroutine_thread",
    "has_workmanager_thread",
    "has_workmanager_alt_thread",
    "has_room_io_thread",
    "has_glide_thread",
    "has_glide_source_thread",
    "has_glide_disk_thread",
    "has_coil_thread",
    "has_fresco_thread",
    "has_exoplayer_thread",
    "has_flutter_thread",
    "has_async_task_thread",
    "has_room_wal",
    "has_room_shm",
    "has_room_journal",
    "has_workmanager_db",
    "has_datastore",
    "has_okhttp_cache",
    "has_okhttp_cache_dir",
    "has_okhttp_journal",
    "has_glide_cache",
    "has_glide_journal",
    "has_coil_cache",
    "has_coil_cache_v3",
    "has_coil_journal",
    "has_fresco_cache",
    "has_cacerts_access",
    "has_http_cache",
    "has_ipv4_connect",
    "has_ipv6_connect",
    "num_port_443_connects",
    "num_unique_threads",
    "num_threads_spawned",
    "num_databases",
    "num_shared_prefs",
    "num_native_libs",
    "num_tcp_sockets",
    "num_udp_sockets",
    "num_unix_sockets",
    "num_network_connects",
    "num_unique_ips",
    "num_openat",
    "num_read",
    "num_write",
    "num_close",
    "num_clone",
    "num_mmap",
    "num_socket",
    "num_connect",
    "total_bytes_read",
    "total_bytes_written",
    "syscalls_per_second",
    "threads_per_second",
];

/// One exported cell
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Count(u64),
    Bytes(i64),
    Rate(f64),
    Flag(bool),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{}", n),
            Self::Bytes(n) => write!(f, "{}", n),
            Self::Rate(x) => f.write_str(&format_rate(*x)),
            Self::Flag(b) => f.write_str(if *b { "1" } else { "0" }),
        }
    }
}

/// Shortest round-trip form, always with a fractional part (`100.0`, `0.25`)
///
/// Magnitudes below `1e-4` or from `1e16` up switch to exponent notation
/// with a signed, two-digit exponent (`1e-05`, `2.5e+16`), as the datasets
/// produced by earlier tooling do.
pub fn format_rate(value: f64) -> String {
    if value.is_finite() && value != 0.0 {
        let abs = value.abs();
        if abs < 1e-4 || abs >= 1e16 {
            return format_exponent(value);
        }
    }

    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn format_exponent(value: f64) -> String {
    let sci = format!("{:e}", value);
    match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => sci,
    }
}

fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// Feature vector of one trace
///
/// Built in a single call to `extract_features` and treated as read-only
/// afterwards. Boolean detections serialize as `1`/`0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub package: String,
    pub total_syscalls: u64,
    pub trace_duration_sec: f64,

    // Thread detections
    #[serde(serialize_with = "serialize_flag")]
    pub has_okhttp_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_okhttp_task_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_rxjava_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_rxjava_cached_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_coroutine_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_workmanager_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_workmanager_alt_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_room_io_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_glide_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_glide_source_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_glide_disk_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_coil_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_fresco_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_exoplayer_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_flutter_thread: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_async_task_thread: bool,

    // Path detections
    #[serde(serialize_with = "serialize_flag")]
    pub has_room_wal: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_room_shm: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_room_journal: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_workmanager_db: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_datastore: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_okhttp_cache: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_okhttp_cache_dir: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_okhttp_journal: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_glide_cache: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_glide_journal: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_coil_cache: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_coil_cache_v3: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_coil_journal: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_fresco_cache: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_cacerts_access: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_http_cache: bool,

    // Network
    #[serde(serialize_with = "serialize_flag")]
    pub has_ipv4_connect: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub has_ipv6_connect: bool,
    pub num_port_443_connects: u64,

    // Cardinalities and per-category counts
    pub num_unique_threads: u64,
    pub num_threads_spawned: u64,
    pub num_databases: u64,
    pub num_shared_prefs: u64,
    pub num_native_libs: u64,
    pub num_tcp_sockets: u64,
    /// Never incremented: socket family alone does not reveal the transport
    pub num_udp_sockets: u64,
    pub num_unix_sockets: u64,
    pub num_network_connects: u64,
    pub num_unique_ips: u64,

    // Per-syscall counts
    pub num_openat: u64,
    pub num_read: u64,
    pub num_write: u64,
    pub num_close: u64,
    pub num_clone: u64,
    pub num_mmap: u64,
    pub num_socket: u64,
    pub num_connect: u64,

    pub total_bytes_read: i64,
    pub total_bytes_written: i64,

    pub syscalls_per_second: f64,
    pub threads_per_second: f64,
}

impl FeatureVector {
    /// All-zero vector for `package`
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            total_syscalls: 0,
            trace_duration_sec: 0.0,
            has_okhttp_thread: false,
            has_okhttp_task_thread: false,
            has_rxjava_thread: false,
            has_rxjava_cached_thread: false,
            has_coroutine_thread: false,
            has_workmanager_thread: false,
            has_workmanager_alt_thread: false,
            has_room_io_thread: false,
            has_glide_thread: false,
            has_glide_source_thread: false,
            has_glide_disk_thread: false,
            has_coil_thread: false,
            has_fresco_thread: false,
            has_exoplayer_thread: false,
            has_flutter_thread: false,
            has_async_task_thread: false,
            has_room_wal: false,
            has_room_shm: false,
            has_room_journal: false,
            has_workmanager_db: false,
            has_datastore: false,
            has_okhttp_cache: false,
            has_okhttp_cache_dir: false,
            has_okhttp_journal: false,
            has_glide_cache: false,
            has_glide_journal: false,
            has_coil_cache: false,
            has_coil_cache_v3: false,
            has_coil_journal: false,
            has_fresco_cache: false,
            has_cacerts_access: false,
            has_http_cache: false,
            has_ipv4_connect: false,
            has_ipv6_connect: false,
            num_port_443_connects: 0,
            num_unique_threads: 0,
            num_threads_spawned: 0,
            num_databases: 0,
            num_shared_prefs: 0,
            num_native_libs: 0,
            num_tcp_sockets: 0,
            num_udp_sockets: 0,
            num_unix_sockets: 0,
            num_network_connects: 0,
            num_unique_ips: 0,
            num_openat: 0,
            num_read: 0,
            num_write: 0,
            num_close: 0,
            num_clone: 0,
            num_mmap: 0,
            num_socket: 0,
            num_connect: 0,
            total_bytes_read: 0,
            total_bytes_written: 0,
            syscalls_per_second: 0.0,
            threads_per_second: 0.0,
        }
    }

    /// Schema accessor: exported column names, in dataset order
    pub fn columns() -> &'static [&'static str] {
        FEATURE_COLUMNS
    }

    /// Exported `(column, value)` pairs of this vector
    ///
    /// Must list exactly `columns()` in the same order; the exporter
    /// rejects any vector where it does not.
    pub fn values(&self) -> Vec<(&'static str, FeatureValue)> {
        use FeatureValue::{Bytes, Count, Flag, Rate, Text};

        vec![
            ("package", Text(self.package.clone())),
            ("total_syscalls", Count(self.total_syscalls)),
            ("trace_duration_sec", Rate(self.trace_duration_sec)),
            ("has_okhttp_thread", Flag(self.has_okhttp_thread)),
            ("has_okhttp_task_thread", Flag(self.has_okhttp_task_thread)),
            ("has_rxjava_thread", Flag(self.has_rxjava_thread)),
            ("has_rxjava_cached_thread", Flag(self.has_rxjava_cached_thread)),
            ("has_coroutine_thread", Flag(self.has_coroutine_thread)),
            ("has_workmanager_thread", Flag(self.has_workmanager_thread)),
            ("has_workmanager_alt_thread", Flag(self.has_workmanager_alt_thread)),
            ("has_room_io_thread", Flag(self.has_room_io_thread)),
            ("has_glide_thread", Flag(self.has_glide_thread)),
            ("has_glide_source_thread", Flag(self.has_glide_source_thread)),
            ("has_glide_disk_thread", Flag(self.has_glide_disk_thread)),
            ("has_coil_thread", Flag(self.has_coil_thread)),
            ("has_fresco_thread", Flag(self.has_fresco_thread)),
            ("has_exoplayer_thread", Flag(self.has_exoplayer_thread)),
            ("has_flutter_thread", Flag(self.has_flutter_thread)),
            ("has_async_task_thread", Flag(self.has_async_task_thread)),
            ("has_room_wal", Flag(self.has_room_wal)),
            ("has_room_shm", Flag(self.has_room_shm)),
            ("has_room_journal", Flag(self.has_room_journal)),
            ("has_workmanager_db", Flag(self.has_workmanager_db)),
            ("has_datastore", Flag(self.has_datastore)),
            ("has_okhttp_cache", Flag(self.has_okhttp_cache)),
            ("has_okhttp_cache_dir", Flag(self.has_okhttp_cache_dir)),
            ("has_okhttp_journal", Flag(self.has_okhttp_journal)),
            ("has_glide_cache", Flag(self.has_glide_cache)),
            ("has_glide_journal", Flag(self.has_glide_journal)),
            ("has_coil_cache", Flag(self.has_coil_cache)),
            ("has_coil_cache_v3", Flag(self.has_coil_cache_v3)),
            ("has_coil_journal", Flag(self.has_coil_journal)),
            ("has_fresco_cache", Flag(self.has_fresco_cache)),
            ("has_cacerts_access", Flag(self.has_cacerts_access)),
            ("has_http_cache", Flag(self.has_http_cache)),
            ("has_ipv4_connect", Flag(self.has_ipv4_connect)),
            ("has_ipv6_connect", Flag(self.has_ipv6_connect)),
            ("num_port_443_connects", Count(self.num_port_443_connects)),
            ("num_unique_threads", Count(self.num_unique_threads)),
            ("num_threads_spawned", Count(self.num_threads_spawned)),
            ("num_databases", Count(self.num_databases)),
            ("num_shared_prefs", Count(self.num_shared_prefs)),
            ("num_native_libs", Count(self.num_native_libs)),
            ("num_tcp_sockets", Count(self.num_tcp_sockets)),
            ("num_udp_sockets", Count(self.num_udp_sockets)),
            ("num_unix_sockets", Count(self.num_unix_sockets)),
            ("num_network_connects", Count(self.num_network_connects)),
            ("num_unique_ips", Count(self.num_unique_ips)),
            ("num_openat", Count(self.num_openat)),
            ("num_read", Count(self.num_read)),
            ("num_write", Count(self.num_write)),
            ("num_close", Count(self.num_close)),
            ("num_clone", Count(self.num_clone)),
            ("num_mmap", Count(self.num_mmap)),
            ("num_socket", Count(self.num_socket)),
            ("num_connect", Count(self.num_connect)),
            ("total_bytes_read", Bytes(self.total_bytes_read)),
            ("total_bytes_written", Bytes(self.total_bytes_written)),
            ("syscalls_per_second", Rate(self.syscalls_per_second)),
            ("threads_per_second", Rate(self.threads_per_second)),
        ]
    }

    /// Number of boolean detections set
    pub fn detection_count(&self) -> usize {
        self.values()
            .iter()
            .filter(|(_, v)| matches!(v, FeatureValue::Flag(true)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_values_follow_columns() {
        let names: Vec<&str> = FeatureVector::new("x").values().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, FeatureVector::columns().to_vec());
    }

    #[test]
    fn test_json_field_order_follows_columns() {
        let json = serde_json::to_string(&FeatureVector::new("x")).unwrap();
        let mut last = 0;
        for column in FeatureVector::columns() {
            let pos = json.find(&format!("\"{}\":", column)).unwrap();
            assert!(pos >= last, "column {} out of order", column);
            last = pos;
        }
    }

    #[test]
    fn test_new_is_all_zero() {
        let vector = FeatureVector::new("com.example");
        assert_eq!(vector.package, "com.example");
        assert_eq!(vector.detection_count(), 0);
        for (name, value) in vector.values().into_iter().skip(1) {
            assert_eq!(value.to_string().trim_end_matches(".0"), "0", "column {}", name);
        }
    }

    #[test]
    fn test_flags_serialize_as_integers() {
        let mut vector = FeatureVector::new("x");
        vector.has_room_wal = true;
        let json = serde_json::to_value(&vector).unwrap();
        assert_eq!(json["has_room_wal"], 1);
        assert_eq!(json["has_room_shm"], 0);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0");
        assert_eq!(format_rate(100.0), "100.0");
        assert_eq!(format_rate(0.25), "0.25");
        assert_eq!(format_rate(0.0001), "0.0001");
        assert_eq!(format_rate(1234567890123456.0), "1234567890123456.0");
        assert_eq!(FeatureValue::Flag(true).to_string(), "1");
    }

    #[test]
    fn test_format_rate_exponent_notation() {
        assert_eq!(format_rate(1e-5), "1e-05");
        assert_eq!(format_rate(1.5e-7), "1.5e-07");
        assert_eq!(format_rate(1e16), "1e+16");
        assert_eq!(format_rate(2.5e123), "2.5e+123");
        assert_eq!(FeatureValue::Rate(1.0 / 100_000.0).to_string(), "1e-05");
    }
}
