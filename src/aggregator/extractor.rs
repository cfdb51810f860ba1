//! Feature extraction from a trace's event records.
//!
//! Two phases over one trace:
//! 1. Streaming tally: counters, byte totals, and the distinct thread
//!    names, paths, remote IPs and database files seen.
//! 2. Classification: every distinct thread name and path is tested
//!    against every rule of the matching table.
//!
//! The working sets live in a `Tally` created per call and dropped when
//! the vector is returned, so nothing carries over between traces.

use super::features::FeatureVector;
use crate::classifier::{classify_path, classify_thread, PathCategory, ThreadCategory};
use crate::parser::record::EventRecord;
use crate::utils::config::{
    ASSUMED_SYSCALLS_PER_SECOND, CLONE_TYPE_THREAD, DATABASE_FILE_SUFFIX, FAMILY_IPV4,
    FAMILY_IPV6, FAMILY_UNIX, HTTPS_PORT, SYSCALL_CLONE, SYSCALL_CLOSE, SYSCALL_CONNECT,
    SYSCALL_MMAP, SYSCALL_OPEN, SYSCALL_READ, SYSCALL_SOCKET, SYSCALL_WRITE,
};
use log::{debug, trace, warn};
use std::collections::BTreeSet;

/// Per-call working sets
///
/// Ordered sets keep the classification pass, and therefore its log
/// output, deterministic.
#[derive(Debug, Default)]
struct Tally<'a> {
    thread_names: BTreeSet<&'a str>,
    file_paths: BTreeSet<&'a str>,
    ip_addresses: BTreeSet<&'a str>,
    database_files: BTreeSet<&'a str>,
    /// Byte additions clamped at the `i64` range
    saturated_byte_adds: u64,
}

/// Extract the feature vector of one trace
///
/// **Public** - main entry point for feature extraction
///
/// # Arguments
/// * `records` - Event records in logged order
/// * `package` - Identifier stored in the `package` column
///
/// # Returns
/// A fully populated vector. Empty input yields an all-zero vector.
pub fn extract_features(records: &[EventRecord], package: &str) -> FeatureVector {
    let mut features = FeatureVector::new(package);

    if records.is_empty() {
        debug!("No records for {}, emitting zero vector", package);
        return features;
    }

    features.total_syscalls = records.len() as u64;

    let mut tally = Tally::default();
    for record in records {
        tally_record(&mut features, &mut tally, record);
    }

    for name in &tally.thread_names {
        for category in classify_thread(name) {
            trace!("thread {:?} -> {}", name, category.name());
            apply_thread_category(&mut features, category);
        }
    }

    for path in &tally.file_paths {
        for category in classify_path(path) {
            trace!("path {:?} -> {}", path, category.name());
            apply_path_category(&mut features, category);
        }
    }

    features.num_unique_threads = tally.thread_names.len() as u64;
    features.num_databases = tally.database_files.len() as u64;
    features.num_unique_ips = tally.ip_addresses.len() as u64;

    if tally.saturated_byte_adds > 0 {
        warn!(
            "{}: byte totals clamped after {} overflowing additions",
            package, tally.saturated_byte_adds
        );
    }

    apply_rates(&mut features);

    debug!(
        "Extracted {}: {} syscalls, {} threads, {} paths, {} detections",
        package,
        features.total_syscalls,
        tally.thread_names.len(),
        tally.file_paths.len(),
        features.detection_count()
    );

    features
}

/// Phase 1 for a single record
///
/// **Private** - internal helper for extract_features
fn tally_record<'a>(features: &mut FeatureVector, tally: &mut Tally<'a>, record: &'a EventRecord) {
    if !record.comm.is_empty() {
        tally.thread_names.insert(&record.comm);
    }
    if !record.path.is_empty() {
        tally.file_paths.insert(&record.path);
    }

    let syscall = record.syscall.as_str();

    if SYSCALL_OPEN.contains(&syscall) {
        features.num_openat += 1;
        if record.path.ends_with(DATABASE_FILE_SUFFIX) {
            tally.database_files.insert(&record.path);
        }
        return;
    }

    match syscall {
        SYSCALL_READ => {
            features.num_read += 1;
            add_bytes(&mut features.total_bytes_read, record.actual, tally);
        }
        SYSCALL_WRITE => {
            features.num_write += 1;
            add_bytes(&mut features.total_bytes_written, record.actual, tally);
        }
        SYSCALL_CLOSE => features.num_close += 1,
        SYSCALL_CLONE => {
            features.num_clone += 1;
            if record.clone_type == CLONE_TYPE_THREAD {
                features.num_threads_spawned += 1;
            }
        }
        SYSCALL_MMAP => features.num_mmap += 1,
        SYSCALL_SOCKET => {
            features.num_socket += 1;
            match record.family.as_str() {
                // Family does not reveal the transport; both IP families
                // are counted as stream sockets.
                FAMILY_IPV4 | FAMILY_IPV6 => features.num_tcp_sockets += 1,
                FAMILY_UNIX => features.num_unix_sockets += 1,
                _ => {}
            }
        }
        SYSCALL_CONNECT => {
            features.num_connect += 1;
            features.num_network_connects += 1;
            if !record.ip.is_empty() {
                tally.ip_addresses.insert(&record.ip);
            }
            match record.family.as_str() {
                FAMILY_IPV4 => features.has_ipv4_connect = true,
                FAMILY_IPV6 => features.has_ipv6_connect = true,
                _ => {}
            }
            if record.port == HTTPS_PORT {
                features.num_port_443_connects += 1;
            }
        }
        _ => {}
    }
}

/// Add a transfer size to a byte total, clamping instead of overflowing
fn add_bytes(total: &mut i64, actual: i64, tally: &mut Tally<'_>) {
    if total.checked_add(actual).is_none() {
        tally.saturated_byte_adds += 1;
    }
    *total = total.saturating_add(actual);
}

/// Set the detection for a thread-name category
///
/// **Private** - binder, generic pool and render threads are recognized
/// but have no exported column
fn apply_thread_category(features: &mut FeatureVector, category: ThreadCategory) {
    match category {
        ThreadCategory::OkHttp => features.has_okhttp_thread = true,
        ThreadCategory::OkHttpTaskRunner => features.has_okhttp_task_thread = true,
        ThreadCategory::RxJava => features.has_rxjava_thread = true,
        ThreadCategory::RxJavaCached => features.has_rxjava_cached_thread = true,
        ThreadCategory::Coroutines => features.has_coroutine_thread = true,
        ThreadCategory::WorkManager => features.has_workmanager_thread = true,
        ThreadCategory::WorkManagerAlt => features.has_workmanager_alt_thread = true,
        ThreadCategory::RoomIo => features.has_room_io_thread = true,
        ThreadCategory::Glide => features.has_glide_thread = true,
        ThreadCategory::GlideSource => features.has_glide_source_thread = true,
        ThreadCategory::GlideDisk => features.has_glide_disk_thread = true,
        ThreadCategory::Coil => features.has_coil_thread = true,
        ThreadCategory::Fresco => features.has_fresco_thread = true,
        ThreadCategory::ExoPlayer => features.has_exoplayer_thread = true,
        ThreadCategory::Flutter => features.has_flutter_thread = true,
        ThreadCategory::AsyncTask => features.has_async_task_thread = true,
        ThreadCategory::Binder | ThreadCategory::ThreadPool | ThreadCategory::RenderThread => {}
    }
}

/// Set the detection or bump the count for a path category
///
/// **Private** - generic database and sqlite files are counted from the
/// open tally instead
fn apply_path_category(features: &mut FeatureVector, category: PathCategory) {
    match category {
        PathCategory::RoomWal => features.has_room_wal = true,
        PathCategory::RoomShm => features.has_room_shm = true,
        PathCategory::RoomJournal => features.has_room_journal = true,
        PathCategory::WorkManagerDb => features.has_workmanager_db = true,
        PathCategory::DataStore => features.has_datastore = true,
        PathCategory::OkHttpCache => features.has_okhttp_cache = true,
        PathCategory::OkHttpCacheDir => features.has_okhttp_cache_dir = true,
        PathCategory::OkHttpJournal => features.has_okhttp_journal = true,
        PathCategory::GlideCache => features.has_glide_cache = true,
        PathCategory::GlideJournal => features.has_glide_journal = true,
        PathCategory::CoilCache => features.has_coil_cache = true,
        PathCategory::CoilCacheV3 => features.has_coil_cache_v3 = true,
        PathCategory::CoilJournal => features.has_coil_journal = true,
        PathCategory::FrescoCache => features.has_fresco_cache = true,
        PathCategory::CaCerts => features.has_cacerts_access = true,
        PathCategory::HttpCache => features.has_http_cache = true,
        PathCategory::SharedPrefs => features.num_shared_prefs += 1,
        PathCategory::NativeLib => features.num_native_libs += 1,
        PathCategory::Database | PathCategory::Sqlite | PathCategory::SqliteJournal => {}
    }
}

/// Estimate duration from the syscall count and derive the rates
///
/// **Private** - duration is `total / ASSUMED_SYSCALLS_PER_SECOND`, not a
/// timestamp delta; rates are zero when the duration is zero
fn apply_rates(features: &mut FeatureVector) {
    features.trace_duration_sec = features.total_syscalls as f64 / ASSUMED_SYSCALLS_PER_SECOND;

    if features.trace_duration_sec > 0.0 {
        features.syscalls_per_second =
            features.total_syscalls as f64 / features.trace_duration_sec;
        features.threads_per_second =
            features.num_threads_spawned as f64 / features.trace_duration_sec;
    }
}
