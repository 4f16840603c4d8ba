//! Application constants for the ILI ingestor
//!
//! This module contains buffer sizes, schema layouts and diagnostic messages
//! used throughout the ingestion pipeline.

// =============================================================================
// Reading and Buffering
// =============================================================================

/// Size, in bytes, of each chunk handed to the tokenizer
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Initial number of row slots reserved per column (one year of weekly data plus one)
pub const DEFAULT_INITIAL_CAPACITY: usize = 53;

/// Longest field the tokenizer accepts before reporting an error
pub const DEFAULT_MAX_FIELD_LEN: usize = 64 * 1024;

// =============================================================================
// File Layouts
// =============================================================================

/// Row number (1-based) of the header line, which is always skipped
pub const HEADER_ROW: usize = 1;

/// ILI file layout: `index, year, week, est_inc[, ...]`
pub mod ili_columns {
    /// Leading index column, ignored
    pub const INDEX: usize = 1;
    pub const YEAR: usize = 2;
    pub const WEEK: usize = 3;
    pub const EST_INC: usize = 4;

    /// Minimum number of fields in a data row
    pub const WIDTH: usize = 4;
}

/// Single numeric column layout: `index, value[, ...]`
pub mod numeric_columns {
    /// Leading index column, ignored
    pub const INDEX: usize = 1;
    pub const VALUE: usize = 2;

    /// Minimum number of fields in a data row
    pub const WIDTH: usize = 2;
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Messages for the numeric status codes reported by the row cursor
pub mod status_messages {
    pub const SUCCESS: &str = "success";
    pub const INVALID_FORMAT: &str = "could not convert field to a number";
    pub const OUT_OF_RANGE: &str = "value is out of range for the column type";
    pub const INSUFFICIENT_FIELDS: &str = "line has not enough fields";
    pub const INVALID_STATUS: &str = "invalid status code";
}

/// Log target used by the binary's default filter
pub const LOG_TARGET: &str = "ili_ingest";
