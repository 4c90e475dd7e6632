//! Non-volatile region backed by the `settings` flash partition.

use embedded_storage::{ReadStorage, Storage};
use esp_hal::peripherals::FLASH;
use esp_storage::FlashStorage;
use plumbob::{PersistenceError, config::STORAGE_SIZE};

use crate::config::SETTINGS_PARTITION_OFFSET;

/// Offsets are relative to the partition start and never reach past
/// [`STORAGE_SIZE`]. `esp-storage` takes care of the sector erase.
pub(crate) struct PartitionStorage {
    flash: FlashStorage<'static>,
    base: u32,
}

impl PartitionStorage {
    pub(crate) fn new(flash: FLASH<'static>) -> Self {
        Self {
            flash: FlashStorage::new(flash),
            base: SETTINGS_PARTITION_OFFSET,
        }
    }

    fn address(&self, offset: u32, len: usize) -> Result<u32, PersistenceError> {
        let end = (offset as usize).saturating_add(len);
        if end > STORAGE_SIZE {
            return Err(PersistenceError::OutOfBounds);
        }
        Ok(self.base + offset)
    }
}

impl ReadStorage for PartitionStorage {
    type Error = PersistenceError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let address = self.address(offset, bytes.len())?;
        ReadStorage::read(&mut self.flash, address, bytes).map_err(|err| {
            log::error!("storage: read at {:#x} failed: {:?}", address, err);
            PersistenceError::DriverError
        })
    }

    fn capacity(&self) -> usize {
        STORAGE_SIZE
    }
}

impl Storage for PartitionStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let address = self.address(offset, bytes.len())?;
        Storage::write(&mut self.flash, address, bytes).map_err(|err| {
            log::error!("storage: write at {:#x} failed: {:?}", address, err);
            PersistenceError::DriverError
        })
    }
}
