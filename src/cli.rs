//! Command-line interface components.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::IngestConfig;
use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_INITIAL_CAPACITY, LOG_TARGET};

#[derive(Parser, Debug)]
#[command(name = "ili-ingest")]
#[command(about = "Validate and load influenza-like-illness surveillance CSV files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Bytes read per chunk
    #[arg(long, global = true, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Row slots reserved before the first growth
    #[arg(long, global = true, default_value_t = DEFAULT_INITIAL_CAPACITY)]
    pub initial_capacity: usize,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and skip row output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read an ILI file (index, year, week, est_inc)
    Ili {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Read a single numeric column file (index, value)
    Column {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Build the ingestion configuration from command-line options
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig::default()
            .with_chunk_size(self.chunk_size)
            .with_initial_capacity(self.initial_capacity)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
