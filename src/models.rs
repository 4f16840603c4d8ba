//! Core data structures produced by ingestion.
//!
//! Defines the columnar datasets handed back to callers and the statistics
//! gathered while reading a file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Boundaries of the influenza season within an ILI series
///
/// Filled by the downstream season detection step, never by ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluSeason {
    /// Row index of the first week of the season
    pub start: usize,
    /// Number of weeks in the season
    pub duration: usize,
}

/// Influenza-like-illness surveillance series in columnar form
///
/// `year`, `week` and `est_inc` always share one length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IliDataset {
    /// Year the data was collected
    pub year: Vec<i32>,
    /// Week of the year the data was collected
    pub week: Vec<i32>,
    /// Estimated incidence
    pub est_inc: Vec<i32>,
    /// Season boundaries, reserved for the downstream consumer
    pub flu_season: Option<FluSeason>,
}

impl IliDataset {
    /// Number of rows in every column
    pub fn size(&self) -> usize {
        self.year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterate rows as `(year, week, est_inc)`
    pub fn rows(&self) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        self.year
            .iter()
            .zip(&self.week)
            .zip(&self.est_inc)
            .map(|((&year, &week), &est_inc)| (year, week, est_inc))
    }
}

/// One floating-point column read from an auxiliary file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub values: Vec<f64>,
}

impl NumericColumn {
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ingestion statistics
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub path: PathBuf,
    /// Records reported by the tokenizer, header included
    pub records_seen: usize,
    /// Data rows committed to the columns
    pub rows_accepted: usize,
    pub chunks_read: usize,
    pub bytes_read: u64,
    /// Capacity doublings performed by the column buffers
    pub growths: usize,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ili_rows_iterate_in_order() {
        let dataset = IliDataset {
            year: vec![2020, 2020],
            week: vec![1, 2],
            est_inc: vec![100, 150],
            flu_season: None,
        };

        let rows: Vec<_> = dataset.rows().collect();
        assert_eq!(rows, vec![(2020, 1, 100), (2020, 2, 150)]);
        assert_eq!(dataset.size(), 2);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_empty_datasets() {
        assert!(IliDataset::default().is_empty());
        assert_eq!(NumericColumn::default().size(), 0);
    }
}
