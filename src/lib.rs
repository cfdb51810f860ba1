//! Syscall Features
//!
//! Turns per-application system-call traces into fixed-schema feature
//! vectors, one per trace, for ML training datasets.
//!
//! ## Pipeline
//!
//! trace file -> [`parser`] -> event records -> [`aggregator`] ->
//! feature vector -> [`output`] -> CSV dataset
//!
//! Thread names and file paths are recognized through the rule tables in
//! [`classifier`].
//!
//! ## Getting Started
//!
//! ```bash
//! syscall-features batch traces/ -o features.csv
//! syscall-features single traces/com.example.app.syscall.log
//! ```

pub mod aggregator;
pub mod classifier;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
