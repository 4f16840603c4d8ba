//! Streaming ingestion engine.
//!
//! Turns delimited surveillance files into typed columns in one sequential
//! pass:
//! - [`tokenizer`] - push-based CSV scanning over fixed-size chunks
//! - [`cursor`] - header skipping, column dispatch and row validation
//! - [`schema`] - per-format column layouts
//! - [`convert`] - whole-field numeric conversion
//! - [`accumulator`] - doubling column storage
//! - [`driver`] - file reading and error reporting

pub mod accumulator;
pub mod convert;
pub mod cursor;
pub mod driver;
pub mod schema;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

pub use driver::{
    ingest, ingest_ili, ingest_ili_with_config, ingest_ili_with_stats, ingest_numeric_column,
    ingest_numeric_column_with_config, ingest_numeric_column_with_stats,
};
pub use schema::{IliColumns, NumericColumnSink, RowSink};
pub use tokenizer::{CsvTokenizer, RecordEvents, Tokenizer, TokenizerError};
