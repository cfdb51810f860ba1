//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod batch;
pub mod models;
pub mod single;
pub mod utils;

// Re-export main command functions
pub use batch::{collect_dataset, discover_trace_files, execute_batch, validate_batch_args};
pub use models::{BatchArgs, BatchSummary, ReportFormat, SingleArgs};
pub use single::execute_single;
pub use utils::{display_schema, display_version};
