//! ILI Ingest Library
//!
//! A Rust library for loading influenza-like-illness (ILI) surveillance data
//! and auxiliary numeric series from delimited text files into strictly typed
//! columnar arrays for downstream simulation.
//!
//! This library provides tools for:
//! - Streaming, chunked CSV tokenization with fields spanning chunk boundaries
//! - Whole-field integer and floating-point validation with range checks
//! - Row shape validation with permissive extra trailing columns
//! - Doubling column growth with shrink-to-fit on completion
//! - First-error diagnostics carrying row, column and offending text
//!
//! ```no_run
//! let dataset = ili_ingest::ingest_ili("ili.csv")?;
//! for (year, week, est_inc) in dataset.rows() {
//!     println!("{}, {}, {}", year, week, est_inc);
//! }
//! # Ok::<(), ili_ingest::IngestError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod ingest;
pub mod models;

pub use config::IngestConfig;
pub use error::{IngestError, ParseErrorKind, Result, describe_status};
pub use ingest::{
    ingest_ili, ingest_ili_with_config, ingest_ili_with_stats, ingest_numeric_column,
    ingest_numeric_column_with_config, ingest_numeric_column_with_stats,
};
pub use models::{FluSeason, IliDataset, IngestStats, NumericColumn};
