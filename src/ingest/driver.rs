//! Ingestion driver
//!
//! Reads a file in fixed-size chunks, feeds the tokenizer and stops at the
//! first failure recorded by the row cursor. On success every column is shrunk
//! to the number of committed rows; on failure the partially built dataset is
//! dropped and the error is returned with row, column and field context.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::models::{IliDataset, IngestStats, NumericColumn};

use super::cursor::{Failure, ParseCursor};
use super::schema::{IliColumns, NumericColumnSink, RowSink};
use super::tokenizer::{CsvTokenizer, Tokenizer, TokenizerError};

/// Read an ILI file (`index, year, week, est_inc`) with default settings
pub fn ingest_ili(path: impl AsRef<Path>) -> Result<IliDataset> {
    ingest_ili_with_config(path, &IngestConfig::default())
}

pub fn ingest_ili_with_config(path: impl AsRef<Path>, config: &IngestConfig) -> Result<IliDataset> {
    ingest_ili_with_stats(path, config).map(|(dataset, _)| dataset)
}

/// Read an ILI file and report ingestion statistics
pub fn ingest_ili_with_stats(
    path: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<(IliDataset, IngestStats)> {
    config.validate()?;
    let sink = IliColumns::with_capacity(config.initial_capacity)?;
    let tokenizer = CsvTokenizer::new(config);
    ingest(path.as_ref(), config, tokenizer, sink)
}

/// Read a single floating-point column (`index, value`) with default settings
pub fn ingest_numeric_column(path: impl AsRef<Path>) -> Result<NumericColumn> {
    ingest_numeric_column_with_config(path, &IngestConfig::default())
}

pub fn ingest_numeric_column_with_config(
    path: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<NumericColumn> {
    ingest_numeric_column_with_stats(path, config).map(|(column, _)| column)
}

/// Read a single floating-point column and report ingestion statistics
pub fn ingest_numeric_column_with_stats(
    path: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<(NumericColumn, IngestStats)> {
    config.validate()?;
    let sink = NumericColumnSink::with_capacity(config.initial_capacity)?;
    let tokenizer = CsvTokenizer::new(config);
    ingest(path.as_ref(), config, tokenizer, sink)
}

/// Drive one sequential pass over `path` into `sink`
pub fn ingest<S, T>(
    path: &Path,
    config: &IngestConfig,
    mut tokenizer: T,
    sink: S,
) -> Result<(S::Output, IngestStats)>
where
    S: RowSink,
    T: Tokenizer,
{
    let start_time = Instant::now();
    info!("Ingesting {}", path.display());

    let mut file = File::open(path).map_err(|source| IngestError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut stats = IngestStats {
        path: path.to_path_buf(),
        ..IngestStats::default()
    };
    let mut cursor = ParseCursor::new(sink);
    let mut buf = vec![0u8; config.chunk_size];

    loop {
        let bytes_read = match file.read(&mut buf) {
            Ok(0) => {
                tokenizer
                    .finish(&mut cursor)
                    .map_err(|err| tokenizer_error(path, err))?;
                break;
            }
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(IngestError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        stats.chunks_read += 1;
        stats.bytes_read += bytes_read as u64;

        tokenizer
            .feed(&buf[..bytes_read], &mut cursor)
            .map_err(|err| tokenizer_error(path, err))?;

        if cursor.is_failed() {
            break;
        }
    }

    stats.records_seen = cursor.records();
    let (sink, failure) = cursor.into_parts();
    stats.rows_accepted = sink.rows();
    stats.growths = sink.growths();

    if let Some(failure) = failure {
        return Err(report_failure(path, failure));
    }

    let output = sink.finish();
    stats.processing_time_ms = start_time.elapsed().as_millis();

    debug!(
        "Ingest stats for {}: {} records, {} rows, {} chunks ({} bytes), {} growths",
        path.display(),
        stats.records_seen,
        stats.rows_accepted,
        stats.chunks_read,
        stats.bytes_read,
        stats.growths
    );
    info!(
        "Read {} rows from {} in {}ms",
        stats.rows_accepted,
        path.display(),
        stats.processing_time_ms
    );

    Ok((output, stats))
}

fn tokenizer_error(path: &Path, err: TokenizerError) -> IngestError {
    error!("Error while tokenizing {}: {}", path.display(), err);
    IngestError::Tokenizer {
        path: path.to_path_buf(),
        row: usize::try_from(err.line).unwrap_or(usize::MAX),
        message: err.message,
    }
}

fn report_failure(path: &Path, failure: Failure) -> IngestError {
    match failure {
        Failure::Field {
            kind,
            row,
            column,
            text,
        } => {
            error!(
                "Error parsing field {} (\"{}\") of line {}: {}",
                column, text, row, kind
            );
            IngestError::Parse {
                path: path.to_path_buf(),
                row,
                column,
                field: text,
                kind,
            }
        }
        Failure::Storage(err) => {
            error!("Error while reading {}: {}", path.display(), err);
            err
        }
    }
}
