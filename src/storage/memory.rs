//! In-memory storage device.
//!
//! Used on the host and in tests. Starts erased (0xFF) like a fresh EEPROM.

use super::{check_range, NvStorage};
use crate::error::StorageError;

/// Erased byte value.
pub const ERASED: u8 = 0xFF;

/// RAM-backed [`NvStorage`] of `N` bytes.
///
/// Counts write transactions so callers can verify write-through behavior.
///
/// # Example
///
/// ```
/// use machine_settings::storage::MemoryStorage;
/// use machine_settings::NvStorage;
///
/// let mut eeprom = MemoryStorage::<4096>::new();
/// eeprom.write(40, &[1, 2, 3]).unwrap();
///
/// let mut buf = [0u8; 3];
/// eeprom.read(40, &mut buf).unwrap();
/// assert_eq!(buf, [1, 2, 3]);
/// assert_eq!(eeprom.write_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStorage<const N: usize> {
    bytes: [u8; N],
    writes: u32,
}

impl<const N: usize> MemoryStorage<N> {
    /// Create an erased device.
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED; N],
            writes: 0,
        }
    }

    /// Number of write transactions since creation.
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Raw view of the device contents.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Read bytes without going through [`NvStorage`].
    ///
    /// # Panics
    ///
    /// Panics if the range is outside the device.
    pub fn peek(&self, offset: u16, len: usize) -> &[u8] {
        &self.bytes[offset as usize..offset as usize + len]
    }

    /// Overwrite bytes without counting a write transaction.
    ///
    /// For staging legacy layouts or injecting corruption.
    ///
    /// # Panics
    ///
    /// Panics if the range is outside the device.
    pub fn poke(&mut self, offset: u16, data: &[u8]) {
        self.bytes[offset as usize..offset as usize + data.len()].copy_from_slice(data);
    }
}

impl<const N: usize> Default for MemoryStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NvStorage for MemoryStorage<N> {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        check_range(offset, buf.len(), N)?;
        let start = offset as usize;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        check_range(offset, data.len(), N)?;
        let start = offset as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}
