//! 24-series serial EEPROM over embedded-hal 1.0 I2C.
//!
//! Word address is sent big-endian in two bytes. Writes are split on page
//! boundaries (the device wraps inside a page otherwise) and each page write
//! waits out the internal write cycle before the next one starts.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use super::{check_range, NvStorage};
use crate::error::StorageError;

/// Largest page size supported by the write buffer.
pub const MAX_PAGE_SIZE: usize = 64;

/// Default 7-bit bus address (A2..A0 tied low).
pub const DEFAULT_ADDRESS: u8 = 0x50;

/// Largest device reachable with a two-byte word address.
pub const MAX_CAPACITY: usize = 0x1_0000;

/// Internal write cycle time, worst case.
const WRITE_CYCLE_MS: u32 = 5;

/// Serial EEPROM driver.
///
/// Generic over:
/// - `I2C`: bus (must implement `I2c`)
/// - `DELAY`: delay provider for the write cycle (must implement `DelayNs`)
pub struct I2cEeprom<I2C, DELAY>
where
    I2C: I2c,
    DELAY: DelayNs,
{
    i2c: I2C,
    delay: DELAY,
    address: u8,
    page_size: usize,
    capacity: usize,
}

impl<I2C, DELAY> I2cEeprom<I2C, DELAY>
where
    I2C: I2c,
    DELAY: DelayNs,
{
    /// Create a driver for a device with the given geometry.
    ///
    /// `page_size` is clamped to `1..=MAX_PAGE_SIZE` and `capacity` to
    /// [`MAX_CAPACITY`]; larger parts need a different addressing scheme.
    pub fn new(i2c: I2C, delay: DELAY, address: u8, page_size: usize, capacity: usize) -> Self {
        Self {
            i2c,
            delay,
            address,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            capacity: capacity.min(MAX_CAPACITY),
        }
    }

    /// 24LC256: 32 KiB, 64-byte pages, default address.
    pub fn at24c256(i2c: I2C, delay: DELAY) -> Self {
        Self::new(i2c, delay, DEFAULT_ADDRESS, 64, 32 * 1024)
    }

    /// Device capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Release the bus and delay provider.
    pub fn release(self) -> (I2C, DELAY) {
        (self.i2c, self.delay)
    }

    fn write_page(&mut self, offset: u16, chunk: &[u8]) -> Result<(), StorageError> {
        let mut frame: Vec<u8, { MAX_PAGE_SIZE + 2 }> = Vec::new();
        frame
            .extend_from_slice(&offset.to_be_bytes())
            .map_err(|_| StorageError::OutOfRange { offset, len: chunk.len() })?;
        frame
            .extend_from_slice(chunk)
            .map_err(|_| StorageError::OutOfRange { offset, len: chunk.len() })?;

        self.i2c
            .write(self.address, &frame)
            .map_err(|_| StorageError::Bus)?;
        self.delay.delay_ms(WRITE_CYCLE_MS);
        Ok(())
    }
}

impl<I2C, DELAY> NvStorage for I2cEeprom<I2C, DELAY>
where
    I2C: I2c,
    DELAY: DelayNs,
{
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        check_range(offset, buf.len(), self.capacity)?;
        if buf.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(self.address, &offset.to_be_bytes(), buf)
            .map_err(|_| StorageError::Bus)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        check_range(offset, data.len(), self.capacity)?;

        let mut cursor = offset as usize;
        let mut remaining = data;
        while !remaining.is_empty() {
            let room = self.page_size - cursor % self.page_size;
            let (chunk, rest) = remaining.split_at(room.min(remaining.len()));
            self.write_page(cursor as u16, chunk)?;
            cursor += chunk.len();
            remaining = rest;
        }
        Ok(())
    }
}
