//! RAM-backed storage.
//!
//! Stands in for the flash partition on the host and counts commits.

use embedded_storage::{ReadStorage, Storage};

use crate::domain::ports::PersistenceError;

pub struct MemoryStorage<const SIZE: usize> {
    bytes: [u8; SIZE],
    writes: usize,
}

impl<const SIZE: usize> MemoryStorage<SIZE> {
    /// Zero-filled store
    pub const fn new() -> Self {
        Self {
            bytes: [0; SIZE],
            writes: 0,
        }
    }

    /// Store in the state of freshly erased flash
    pub const fn erased() -> Self {
        Self {
            bytes: [0xFF; SIZE],
            writes: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8; SIZE] {
        &self.bytes
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn range(offset: u32, len: usize) -> Result<core::ops::Range<usize>, PersistenceError> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(PersistenceError::OutOfBounds)?;
        if end > SIZE {
            return Err(PersistenceError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl<const SIZE: usize> Default for MemoryStorage<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> ReadStorage for MemoryStorage<SIZE> {
    type Error = PersistenceError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let range = Self::range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        SIZE
    }
}

impl<const SIZE: usize> Storage for MemoryStorage<SIZE> {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let range = Self::range(offset, bytes.len())?;
        self.bytes[range].copy_from_slice(bytes);
        self.writes += 1;
        Ok(())
    }
}
