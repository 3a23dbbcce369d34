//! Storage module for machine-settings.
//!
//! Defines the byte-addressable device seam, the fixed address layout, and
//! the device backends.

mod codec;
mod i2c_eeprom;
pub mod layout;
mod memory;
mod shared;

pub(crate) use codec::{ByteReader, ByteWriter};

pub use i2c_eeprom::{I2cEeprom, DEFAULT_ADDRESS, MAX_CAPACITY, MAX_PAGE_SIZE};
pub use layout::VersionRecord;
pub use memory::{MemoryStorage, ERASED};
pub use shared::SharedStorage;

use crate::error::StorageError;

/// Byte-addressable non-volatile storage.
///
/// Both calls complete before returning. A `write` is one device transaction;
/// callers that need several writes to appear together group them with
/// [`SharedStorage::transaction`].
pub trait NvStorage {
    /// Fill `buf` with the bytes starting at `offset`.
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `offset`.
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError>;

    /// Read a single byte.
    fn read_byte(&mut self, offset: u16) -> Result<u8, StorageError> {
        let mut buf = [0u8; 1];
        self.read(offset, &mut buf)?;
        Ok(buf[0])
    }
}

impl<T: NvStorage + ?Sized> NvStorage for &mut T {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        T::read(self, offset, buf)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        T::write(self, offset, data)
    }
}

/// Reject accesses that do not fit in a device of `capacity` bytes.
pub(crate) fn check_range(offset: u16, len: usize, capacity: usize) -> Result<(), StorageError> {
    if offset as usize + len > capacity {
        return Err(StorageError::OutOfRange { offset, len });
    }
    Ok(())
}
