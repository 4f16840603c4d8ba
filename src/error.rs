//! Error handling for ILI ingestion operations.
//!
//! Provides the error taxonomy surfaced by the ingestion driver together
//! with the numeric status table used in diagnostics.

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::status_messages;

/// Failure kinds detected while validating a single field or row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Field text does not fully parse as the expected numeric type
    InvalidFormat,
    /// Parsed value does not fit the target numeric type
    OutOfRange,
    /// A completed data row carried fewer fields than the schema requires
    InsufficientFields,
}

impl ParseErrorKind {
    /// Numeric status code, 0 is reserved for success
    pub fn code(self) -> i32 {
        match self {
            ParseErrorKind::InvalidFormat => 1,
            ParseErrorKind::OutOfRange => 2,
            ParseErrorKind::InsufficientFields => 3,
        }
    }

    /// Inverse of [`ParseErrorKind::code`]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(ParseErrorKind::InvalidFormat),
            2 => Some(ParseErrorKind::OutOfRange),
            3 => Some(ParseErrorKind::InsufficientFields),
            _ => None,
        }
    }

    /// Human-readable description
    pub fn description(self) -> &'static str {
        describe_status(self.code())
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Map any status code to its message. Unknown codes get the sentinel message.
pub fn describe_status(code: i32) -> &'static str {
    match code {
        0 => status_messages::SUCCESS,
        1 => status_messages::INVALID_FORMAT,
        2 => status_messages::OUT_OF_RANGE,
        3 => status_messages::INSUFFICIENT_FIELDS,
        _ => status_messages::INVALID_STATUS,
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tokenizer error in {path} at line {row}: {message}")]
    Tokenizer {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("Error parsing field {column} (\"{field}\") of line {row} in {path}: {kind}")]
    Parse {
        path: PathBuf,
        row: usize,
        column: usize,
        field: String,
        kind: ParseErrorKind,
    },

    #[error("Failed to allocate {requested} column slots: {source}")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl IngestError {
    /// Field/row failure kind, when this error came from validation
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            IngestError::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
