//! Integration tests for the ingest module
//!
//! Tests the complete ingestion pipeline against fixture files on disk.

pub mod ili_ingestion;

use std::io::Write;
use tempfile::NamedTempFile;

/// Write `content` to a temporary CSV file
pub fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// ILI file with a header and `rows` generated data rows
pub fn generate_ili_csv(rows: usize) -> String {
    let mut content = String::from("idx,year,week,est_inc\n");
    for i in 0..rows {
        content.push_str(&format!("{},{},{},{}\n", i, 2000 + i / 52, i % 52 + 1, i * 3));
    }
    content
}
