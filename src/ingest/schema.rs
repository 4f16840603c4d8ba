//! Column layouts for the supported file formats
//!
//! Each layout implements [`RowSink`]: it routes a field to the converter of
//! the column it lands in, writes the value at the current logical row and
//! commits rows once the row cursor has validated them. Columns before the
//! first data column and beyond the declared width are ignored.

use crate::constants::{ili_columns, numeric_columns};
use crate::error::{ParseErrorKind, Result};
use crate::models::{IliDataset, NumericColumn};

use super::accumulator::ColumnBuffer;
use super::convert::FieldValue;

/// Destination of validated fields for one file layout
pub trait RowSink {
    /// Minimum number of fields a data row must contain
    const WIDTH: usize;

    /// Finished dataset type
    type Output;

    /// Convert and store the field found at 1-based `column` of the current row
    fn store(&mut self, column: usize, raw: &[u8]) -> std::result::Result<(), ParseErrorKind>;

    /// Count the current row and grow storage when it runs out
    fn commit_row(&mut self) -> Result<()>;

    /// Rows committed so far
    fn rows(&self) -> usize;

    /// Row slots currently allocated
    fn capacity(&self) -> usize;

    /// Capacity doublings performed so far
    fn growths(&self) -> usize;

    /// Shrink storage to the committed rows and build the dataset
    fn finish(self) -> Self::Output;
}

fn store_value<T: FieldValue>(
    buffer: &mut ColumnBuffer<T>,
    row: usize,
    raw: &[u8],
) -> std::result::Result<(), ParseErrorKind> {
    let value = T::parse_field(raw)?;
    buffer.set(row, value);
    Ok(())
}

/// Columns of an ILI file: `index, year, week, est_inc`
#[derive(Debug)]
pub struct IliColumns {
    year: ColumnBuffer<i32>,
    week: ColumnBuffer<i32>,
    est_inc: ColumnBuffer<i32>,
    size: usize,
}

impl IliColumns {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            year: ColumnBuffer::with_capacity(capacity)?,
            week: ColumnBuffer::with_capacity(capacity)?,
            est_inc: ColumnBuffer::with_capacity(capacity)?,
            size: 0,
        })
    }
}

impl RowSink for IliColumns {
    const WIDTH: usize = ili_columns::WIDTH;
    type Output = IliDataset;

    fn store(&mut self, column: usize, raw: &[u8]) -> std::result::Result<(), ParseErrorKind> {
        match column {
            ili_columns::INDEX => Ok(()),
            ili_columns::YEAR => store_value(&mut self.year, self.size, raw),
            ili_columns::WEEK => store_value(&mut self.week, self.size, raw),
            ili_columns::EST_INC => store_value(&mut self.est_inc, self.size, raw),
            _ => Ok(()),
        }
    }

    fn commit_row(&mut self) -> Result<()> {
        self.size += 1;
        if self.size >= self.capacity() {
            self.year.grow()?;
            self.week.grow()?;
            self.est_inc.grow()?;
        }
        Ok(())
    }

    fn rows(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.year.capacity()
    }

    fn growths(&self) -> usize {
        self.year.growths()
    }

    fn finish(mut self) -> IliDataset {
        self.year.truncate_to(self.size);
        self.week.truncate_to(self.size);
        self.est_inc.truncate_to(self.size);

        IliDataset {
            year: self.year.into_vec(),
            week: self.week.into_vec(),
            est_inc: self.est_inc.into_vec(),
            flu_season: None,
        }
    }
}

/// A single floating-point column: `index, value`
#[derive(Debug)]
pub struct NumericColumnSink {
    values: ColumnBuffer<f64>,
    size: usize,
}

impl NumericColumnSink {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            values: ColumnBuffer::with_capacity(capacity)?,
            size: 0,
        })
    }
}

impl RowSink for NumericColumnSink {
    const WIDTH: usize = numeric_columns::WIDTH;
    type Output = NumericColumn;

    fn store(&mut self, column: usize, raw: &[u8]) -> std::result::Result<(), ParseErrorKind> {
        match column {
            numeric_columns::INDEX => Ok(()),
            numeric_columns::VALUE => store_value(&mut self.values, self.size, raw),
            _ => Ok(()),
        }
    }

    fn commit_row(&mut self) -> Result<()> {
        self.size += 1;
        if self.size >= self.values.capacity() {
            self.values.grow()?;
        }
        Ok(())
    }

    fn rows(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.values.capacity()
    }

    fn growths(&self) -> usize {
        self.values.growths()
    }

    fn finish(mut self) -> NumericColumn {
        self.values.truncate_to(self.size);
        NumericColumn {
            values: self.values.into_vec(),
        }
    }
}
