//! Syscall Features CLI
//!
//! Extracts ML feature vectors from application syscall traces.
//! Builds CSV datasets from trace directories and inspects single traces.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use syscall_features::commands::{
    display_schema, display_version, execute_batch, execute_single, validate_batch_args,
    BatchArgs, ReportFormat, SingleArgs,
};
use syscall_features::utils::config::{DEFAULT_OUTPUT_CSV, DEFAULT_TRACE_EXTENSION};

/// Syscall Features - ML feature extraction from syscall traces
#[derive(Parser, Debug)]
#[command(name = "syscall-features")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a CSV dataset from a directory of traces
    Batch {
        /// Directory with one trace file per application
        trace_dir: PathBuf,

        /// Output path for the CSV dataset
        #[arg(short, long, default_value = DEFAULT_OUTPUT_CSV)]
        output: PathBuf,

        /// Extension of trace files to pick up
        #[arg(long, default_value = DEFAULT_TRACE_EXTENSION)]
        extension: String,
    },

    /// Extract and print the features of one trace
    Single {
        /// Trace file to inspect
        trace_file: PathBuf,

        /// Package id (defaults to the file name without its trace suffix)
        #[arg(short, long)]
        package: Option<String>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Display schema information
    Schema {
        /// Show every column
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Batch {
            trace_dir,
            output,
            extension,
        } => {
            let args = BatchArgs {
                trace_dir,
                output_csv: output,
                extension,
            };

            // Validate args first
            validate_batch_args(&args)?;

            let summary = execute_batch(args).context("Batch extraction failed")?;

            if summary.nothing_processed() {
                println!("No trace files found; nothing written");
            } else {
                println!(
                    "Processed {} of {} trace files ({} skipped), {} rows written",
                    summary.files_processed,
                    summary.files_found,
                    summary.files_skipped,
                    summary.rows_written
                );
            }
        }

        Commands::Single {
            trace_file,
            package,
            output,
            format,
        } => {
            execute_single(SingleArgs {
                trace_file,
                package,
                output,
                format,
            })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
