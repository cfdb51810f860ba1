use crate::aggregator::FeatureVector;
use crate::utils::config::{ASSUMED_SYSCALLS_PER_SECOND, SCHEMA_VERSION};

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Syscall Features Dataset Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!("Columns: {}", FeatureVector::columns().len());
    println!();

    if show_details {
        println!("Columns (in dataset order):");
        for (index, column) in FeatureVector::columns().iter().enumerate() {
            println!("  {:>2}. {}", index + 1, column);
        }
        println!();
        println!("Booleans are written as 1/0.");
        println!(
            "trace_duration_sec = total_syscalls / {:.1} (estimate, not measured)",
            ASSUMED_SYSCALLS_PER_SECOND
        );
    } else {
        println!("Use --show for the full column list");
    }
}

/// Display version information
pub fn display_version() {
    println!("Syscall Features v{}", env!("CARGO_PKG_VERSION"));
    println!("Dataset Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Feature extraction from application syscall traces for ML datasets.");
}
