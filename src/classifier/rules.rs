//! Static rule tables for thread-name and path recognition.
//!
//! Each table is an ordered list of `(category, recognizer)` pairs built
//! once on first use and never mutated. Thread recognizers are anchored
//! at the start of the name; path recognizers match anywhere.

use once_cell::sync::Lazy;
use regex::Regex;

/// Worker-thread naming conventions of common Android frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThreadCategory {
    OkHttp,
    OkHttpTaskRunner,
    RxJava,
    RxJavaCached,
    Coroutines,
    WorkManager,
    WorkManagerAlt,
    RoomIo,
    Glide,
    GlideSource,
    GlideDisk,
    Coil,
    Fresco,
    Binder,
    AsyncTask,
    ThreadPool,
    ExoPlayer,
    Flutter,
    RenderThread,
}

impl ThreadCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OkHttp => "okhttp",
            Self::OkHttpTaskRunner => "okhttp_task",
            Self::RxJava => "rxjava",
            Self::RxJavaCached => "rxjava_cached",
            Self::Coroutines => "coroutines",
            Self::WorkManager => "workmanager",
            Self::WorkManagerAlt => "workmanager_alt",
            Self::RoomIo => "room_io",
            Self::Glide => "glide",
            Self::GlideSource => "glide_source",
            Self::GlideDisk => "glide_disk",
            Self::Coil => "coil",
            Self::Fresco => "fresco",
            Self::Binder => "binder",
            Self::AsyncTask => "async_task",
            Self::ThreadPool => "thread_pool",
            Self::ExoPlayer => "exoplayer",
            Self::Flutter => "flutter",
            Self::RenderThread => "render_thread",
        }
    }
}

/// Filesystem path conventions of the same framework set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathCategory {
    RoomWal,
    RoomShm,
    RoomJournal,
    WorkManagerDb,
    DataStore,
    OkHttpCache,
    OkHttpCacheDir,
    OkHttpJournal,
    GlideCache,
    GlideJournal,
    CoilCache,
    CoilCacheV3,
    CoilJournal,
    FrescoCache,
    Database,
    Sqlite,
    SqliteJournal,
    SharedPrefs,
    NativeLib,
    CaCerts,
    HttpCache,
}

impl PathCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RoomWal => "room_wal",
            Self::RoomShm => "room_shm",
            Self::RoomJournal => "room_journal",
            Self::WorkManagerDb => "workmanager_db",
            Self::DataStore => "datastore",
            Self::OkHttpCache => "okhttp_cache",
            Self::OkHttpCacheDir => "okhttp_cache_dir",
            Self::OkHttpJournal => "okhttp_journal",
            Self::GlideCache => "glide_cache",
            Self::GlideJournal => "glide_journal",
            Self::CoilCache => "coil_cache",
            Self::CoilCacheV3 => "coil_cache_v3",
            Self::CoilJournal => "coil_journal",
            Self::FrescoCache => "fresco_cache",
            Self::Database => "database",
            Self::Sqlite => "sqlite",
            Self::SqliteJournal => "sqlite_journal",
            Self::SharedPrefs => "shared_prefs",
            Self::NativeLib => "native_lib",
            Self::CaCerts => "cacerts",
            Self::HttpCache => "http_cache",
        }
    }
}

/// One `(category, recognizer)` entry of a rule table
#[derive(Debug)]
pub struct Rule<C> {
    pub category: C,
    pattern: Regex,
}

impl<C: Copy> Rule<C> {
    fn new(category: C, pattern: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

pub static THREAD_RULES: Lazy<Vec<Rule<ThreadCategory>>> = Lazy::new(|| {
    use ThreadCategory::*;
    vec![
        // Networking
        Rule::new(OkHttp, r"^OkHttp.*"),
        Rule::new(OkHttpTaskRunner, r"^OkHttp TaskRunn.*"),
        // Reactive / coroutine schedulers
        Rule::new(RxJava, r"^Rx(Cached|Computation|IO|Single|NewThread|Scheduler).*"),
        Rule::new(RxJavaCached, r"^RxCachedThreadS.*"),
        Rule::new(Coroutines, r"^DefaultDispatch.*"),
        // Background work
        Rule::new(WorkManager, r"^WM\.task.*"),
        Rule::new(WorkManagerAlt, r"^androidx\.work.*"),
        Rule::new(RoomIo, r"^arch_disk_io.*"),
        // Image loading
        Rule::new(Glide, r"^[Gg]lide.*"),
        Rule::new(GlideSource, r"^glide-source-th.*"),
        Rule::new(GlideDisk, r"^glide-disk-cach.*"),
        Rule::new(Coil, r"^[Cc]oil.*"),
        Rule::new(Fresco, r"^[Ff]resco.*"),
        // Platform and generic pools
        Rule::new(Binder, r"^binder:.*"),
        Rule::new(AsyncTask, r"^AsyncTask.*"),
        Rule::new(ThreadPool, r"^pool-\d+-thread-\d+"),
        // Media and cross-platform runtimes
        Rule::new(ExoPlayer, r"^ExoPlayer.*"),
        Rule::new(Flutter, r"^(flutter-worker-|DartWorker).*"),
        Rule::new(RenderThread, r"^RenderThread.*"),
    ]
});

pub static PATH_RULES: Lazy<Vec<Rule<PathCategory>>> = Lazy::new(|| {
    use PathCategory::*;
    vec![
        // SQLite / Room side files
        Rule::new(RoomWal, r"\.db-wal$"),
        Rule::new(RoomShm, r"\.db-shm$"),
        Rule::new(RoomJournal, r"\.db-journal$"),
        Rule::new(WorkManagerDb, r"androidx\.work\.workdb"),
        Rule::new(DataStore, r"datastore.*\.preferences_pb$"),
        // HTTP caches
        Rule::new(OkHttpCache, r"okHttpCache"),
        Rule::new(OkHttpCacheDir, r"/cache/okhttp/"),
        Rule::new(OkHttpJournal, r"okhttp.*journal"),
        // Image disk caches
        Rule::new(GlideCache, r"(glide|image_manager_disk_cache)"),
        Rule::new(GlideJournal, r"image_manager_disk_cache.*journal"),
        Rule::new(CoilCache, r"(coil|image_loader)"),
        Rule::new(CoilCacheV3, r"coil3?_disk_cache"),
        Rule::new(CoilJournal, r"coil.*journal"),
        Rule::new(FrescoCache, r"(fresco|imagepipeline)"),
        // Generic storage
        Rule::new(Database, r"\.db$"),
        Rule::new(Sqlite, r"\.sqlite$"),
        Rule::new(SqliteJournal, r"\.sqlite-journal$"),
        Rule::new(SharedPrefs, r"shared_prefs.*\.xml$"),
        Rule::new(NativeLib, r"\.so$"),
        // TLS trust store
        Rule::new(CaCerts, r"cacerts"),
        Rule::new(HttpCache, r"HTTP.*[Cc]ache"),
    ]
});
