//! Configuration management and validation.
//!
//! Provides the tunable parameters of one ingestion call: chunk size fed to the
//! tokenizer, initial column reservation and tokenizer limits.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_FIELD_LEN};
use crate::error::{IngestError, Result};

/// Global configuration for ILI ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Bytes read from the file per tokenizer call
    pub chunk_size: usize,

    /// Row slots reserved per column before the first growth
    pub initial_capacity: usize,

    /// Longest accepted field, in bytes
    pub max_field_len: usize,

    /// Strip spaces and tabs around unquoted fields
    pub trim_whitespace: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
            trim_whitespace: true,
        }
    }
}

impl IngestConfig {
    /// Set the read chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the initial column reservation
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the tokenizer field length limit
    pub fn with_max_field_len(mut self, max_field_len: usize) -> Self {
        self.max_field_len = max_field_len;
        self
    }

    /// Keep surrounding whitespace in field text
    pub fn without_trimming(mut self) -> Self {
        self.trim_whitespace = false;
        self
    }

    /// Reject settings the driver cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IngestError::configuration("chunk_size must be greater than 0"));
        }
        if self.initial_capacity == 0 {
            return Err(IngestError::configuration(
                "initial_capacity must be greater than 0",
            ));
        }
        if self.max_field_len == 0 {
            return Err(IngestError::configuration(
                "max_field_len must be greater than 0",
            ));
        }

        debug!(
            "Ingest configuration: chunk_size={}, initial_capacity={}, max_field_len={}",
            self.chunk_size, self.initial_capacity, self.max_field_len
        );
        Ok(())
    }
}
