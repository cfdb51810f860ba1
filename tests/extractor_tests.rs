use pretty_assertions::assert_eq;
use syscall_features::aggregator::{extract_features, FeatureValue, FeatureVector};
use syscall_features::parser::{parse_trace_file, parse_trace_str, EventRecord};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/com.example.shop.syscall.log");

fn record(syscall: &str) -> EventRecord {
    EventRecord::new(syscall)
}

#[test]
fn test_exported_names_match_schema() {
    let parsed = parse_trace_file(FIXTURE).unwrap();
    let features = extract_features(&parsed.records, "com.example.shop");

    let names: Vec<&str> = features.values().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, FeatureVector::columns().to_vec());
}

#[test]
fn test_empty_sequence_is_all_zero() {
    let features = extract_features(&[], "com.empty");

    for (name, value) in features.values() {
        match value {
            FeatureValue::Text(s) => assert_eq!(s, "com.empty"),
            FeatureValue::Count(n) => assert_eq!(n, 0, "{}", name),
            FeatureValue::Bytes(n) => assert_eq!(n, 0, "{}", name),
            FeatureValue::Rate(x) => assert_eq!(x, 0.0, "{}", name),
            FeatureValue::Flag(b) => assert!(!b, "{}", name),
        }
    }
}

#[test]
fn test_byte_totals_are_exact() {
    let mut records = Vec::new();
    for _ in 0..37 {
        let mut read = record("read");
        read.actual = 4096;
        records.push(read);

        let mut write = record("write");
        write.actual = 17;
        records.push(write);
    }

    let features = extract_features(&records, "x");

    assert_eq!(features.num_read, 37);
    assert_eq!(features.num_write, 37);
    assert_eq!(features.total_bytes_read, 37 * 4096);
    assert_eq!(features.total_bytes_written, 37 * 17);
}

#[test]
fn test_byte_total_past_i64_max_is_clamped() {
    let parsed = parse_trace_str("syscall=read actual=9223372036854775807\nsyscall=read actual=1\n");
    let features = extract_features(&parsed.records, "x");

    assert_eq!(features.num_read, 2);
    assert_eq!(features.total_bytes_read, i64::MAX);
}

#[test]
fn test_okhttp_dispatcher_sets_only_okhttp() {
    let mut read = record("read");
    read.comm = "OkHttp Dispatcher".to_string();
    let features = extract_features(&[read], "x");

    assert!(features.has_okhttp_thread);
    assert_eq!(features.detection_count(), 1);
    assert_eq!(features.num_unique_threads, 1);
}

#[test]
fn test_wal_path_sets_flag_only() {
    let mut open = record("openat");
    open.path = "/data/user/0/com.x/databases/app.db-wal".to_string();
    let features = extract_features(&[open], "x");

    let mut expected = FeatureVector::new("x");
    expected.total_syscalls = 1;
    expected.num_openat = 1;
    expected.has_room_wal = true;
    expected.trace_duration_sec = 0.01;
    expected.syscalls_per_second = 100.0;

    assert_eq!(features, expected);
}

#[test]
fn test_extraction_is_idempotent() {
    let parsed = parse_trace_file(FIXTURE).unwrap();

    let first = extract_features(&parsed.records, "com.example.shop");
    let second = extract_features(&parsed.records, "com.example.shop");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_no_connects() {
    let parsed = parse_trace_str("syscall=socket family=ipv4\nsyscall=read comm=OkHttp\n");
    let features = extract_features(&parsed.records, "x");

    assert_eq!(features.num_network_connects, 0);
    assert!(!features.has_ipv4_connect);
    assert!(!features.has_ipv6_connect);
    assert_eq!(features.num_port_443_connects, 0);
}

#[test]
fn test_fixture_features() {
    let parsed = parse_trace_file(FIXTURE).unwrap();
    let features = extract_features(&parsed.records, "com.example.shop");

    assert_eq!(features.total_syscalls, 15);
    assert_eq!(features.trace_duration_sec, 0.15);
    assert!(features.has_okhttp_thread);
    assert!(features.has_room_io_thread);
    assert!(features.has_room_wal);
    assert!(features.has_okhttp_cache_dir);
    assert!(features.has_okhttp_journal);
    assert!(features.has_ipv4_connect);
    assert_eq!(features.detection_count(), 6);
    assert_eq!(features.num_port_443_connects, 1);
    assert_eq!(features.num_unique_threads, 3);
    assert_eq!(features.num_threads_spawned, 2);
    assert_eq!(features.num_databases, 1);
    assert_eq!(features.num_shared_prefs, 1);
    assert_eq!(features.num_native_libs, 1);
    assert_eq!(features.num_tcp_sockets, 1);
    assert_eq!(features.num_unique_ips, 1);
    assert_eq!(features.num_openat, 5);
    assert_eq!(features.total_bytes_read, 2048);
    assert_eq!(features.total_bytes_written, 4613);
    assert_eq!(features.syscalls_per_second, 100.0);
    assert!((features.threads_per_second - 13.333333333333334).abs() < 1e-12);
}

#[test]
fn test_flags_are_independent() {
    let mut a = record("openat");
    a.path = "/data/cache/image_manager_disk_cache/journal".to_string();
    let mut b = record("read");
    b.comm = "glide-disk-cache-thread-0".to_string();

    let features = extract_features(&[a, b], "x");

    assert!(features.has_glide_cache);
    assert!(features.has_glide_journal);
    assert!(features.has_glide_thread);
    assert!(features.has_glide_disk_thread);
    assert_eq!(features.detection_count(), 4);
}
