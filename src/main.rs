use std::{path::PathBuf, process};

use archivist::{
    config::{Config, DEFAULT_LOG_FILE, DEFAULT_OUTPUT_FILE},
    interpreter::run_file,
    storage::codec::StorageFormat,
};
use clap::Parser;
use tracing::{error, info};

/// Runs a file of record-store commands, writing search results and an
/// operation log.
#[derive(Parser, Debug)]
#[command(name = "archivist", version)]
struct Cli {
    /// File of commands, one per line.
    input: PathBuf,

    /// Directory holding one storage file per type.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Search results, rewritten on every run.
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Operation log, appended across runs.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log: PathBuf,

    /// Storage format for type files (json or binary).
    #[arg(long, default_value_t = StorageFormat::Json)]
    format: StorageFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        data_dir: cli.data_dir,
        output_path: cli.output,
        log_path: cli.log,
        format: cli.format,
    };

    match run_file(&config, &cli.input) {
        Ok(summary) => {
            info!(
                operations = summary.operations,
                successes = summary.successes,
                failures = summary.failures,
                output_lines = summary.output_lines,
                "done"
            );
        }
        Err(e) => {
            error!(error = %e, "run aborted");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
