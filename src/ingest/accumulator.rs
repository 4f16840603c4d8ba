//! Growable column storage
//!
//! A [`ColumnBuffer`] keeps a block of initialized slots whose length is the
//! physical capacity. Rows are written by index at the logical size tracked by
//! the owning schema, so a half-written row never becomes visible: truncating to
//! the logical size drops it.
//!
//! Capacity grows by exact doubling, which keeps the total copy work linear in
//! the number of rows and the number of reallocations logarithmic.

use tracing::debug;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone)]
pub struct ColumnBuffer<T> {
    slots: Vec<T>,
    growths: usize,
}

impl<T: Copy + Default> ColumnBuffer<T> {
    /// Reserve `capacity` slots up front
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| IngestError::Allocation {
                requested: capacity,
                source,
            })?;
        slots.resize(capacity, T::default());

        Ok(Self { slots, growths: 0 })
    }

    /// Number of slots currently allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of doublings performed so far
    pub fn growths(&self) -> usize {
        self.growths
    }

    /// Write `value` at `index`, which must be below [`capacity`](Self::capacity)
    pub fn set(&mut self, index: usize, value: T) {
        self.slots[index] = value;
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<T> {
        self.slots.get(index).copied()
    }

    /// Double the capacity, keeping every slot's value and index
    pub fn grow(&mut self) -> Result<()> {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity.max(1) * 2;

        self.slots
            .try_reserve_exact(new_capacity - old_capacity)
            .map_err(|source| IngestError::Allocation {
                requested: new_capacity,
                source,
            })?;
        self.slots.resize(new_capacity, T::default());
        self.growths += 1;

        debug!("Column buffer grown from {} to {} slots", old_capacity, new_capacity);
        Ok(())
    }

    /// Drop every slot at or beyond `size` and release the spare allocation
    pub fn truncate_to(&mut self, size: usize) {
        self.slots.truncate(size);
        self.slots.shrink_to_fit();
    }

    /// Hand the slots over as a plain vector
    pub fn into_vec(self) -> Vec<T> {
        self.slots
    }
}
