//! Fixed storage address map and the shared version record.
//!
//! ```text
//! offset   content
//! 0        VersionRecord (schema u16, marker u8)
//! 5/105/205  legacy per-axis validity markers
//! 9/109/209  legacy per-axis position (f32 rotations)
//! 10..40   StepsRecord region (spare room for more axes)
//! 40..     SettingsRecord region
//! ```
//!
//! The legacy offsets overlap the current regions; they are only consulted
//! when the version record does not validate.

use super::codec::{ByteReader, ByteWriter};
use super::NvStorage;
use crate::error::StorageError;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u16 = 1;

/// Sentinel byte written by this system's own save paths.
pub const VALID_MARKER: u8 = 56;

/// Offset of the [`VersionRecord`].
pub const VERSION_OFFSET: u16 = 0;

/// Start of the steps region.
pub const STEPS_OFFSET: u16 = 10;

/// Size of the steps region, including room for future axes.
pub const STEPS_REGION_LEN: usize = 30;

/// Start of the settings region.
pub const SETTINGS_OFFSET: u16 = 40;

/// Legacy per-axis validity markers (left, right, z).
pub const LEGACY_MARKER_OFFSETS: [u16; 3] = [5, 105, 205];

/// Legacy per-axis positions in rotations (left, right, z).
pub const LEGACY_POSITION_OFFSETS: [u16; 3] = [9, 109, 209];

/// Schema identifier plus validity marker at the bottom of storage.
///
/// Every other region is trustworthy only while this record reads back as
/// [`VersionRecord::current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRecord {
    /// Layout version of the stored records.
    pub schema_version: u16,
    /// Must equal [`VALID_MARKER`].
    pub valid_marker: u8,
}

impl VersionRecord {
    /// Size of the record in bytes.
    pub const SIZE: usize = 3;

    /// The record this build writes.
    pub const fn current() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            valid_marker: VALID_MARKER,
        }
    }

    /// Whether data at the other offsets can be trusted.
    pub fn is_current(&self) -> bool {
        self.schema_version == CURRENT_SCHEMA_VERSION && self.valid_marker == VALID_MARKER
    }

    /// Serialize to the packed layout.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        let mut w = ByteWriter::new(&mut buf);
        w.put_u16(self.schema_version);
        w.put_u8(self.valid_marker);
        buf
    }

    /// Deserialize from the packed layout.
    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        let mut r = ByteReader::new(buf);
        Self {
            schema_version: r.u16(),
            valid_marker: r.u8(),
        }
    }

    /// Read the version record from its fixed offset.
    pub fn read<S: NvStorage + ?Sized>(storage: &mut S) -> Result<Self, StorageError> {
        let mut buf = [0u8; Self::SIZE];
        storage.read(VERSION_OFFSET, &mut buf)?;
        Ok(Self::from_bytes(&buf))
    }

    /// Stamp the current version record at its fixed offset.
    pub fn write_current<S: NvStorage + ?Sized>(storage: &mut S) -> Result<(), StorageError> {
        storage.write(VERSION_OFFSET, &Self::current().to_bytes())
    }
}

const _: () = assert!(VERSION_OFFSET as usize + VersionRecord::SIZE <= LEGACY_MARKER_OFFSETS[0] as usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_record_validates() {
        assert!(VersionRecord::current().is_current());
    }

    #[test]
    fn test_wrong_schema_or_marker_rejected() {
        let old_schema = VersionRecord {
            schema_version: CURRENT_SCHEMA_VERSION + 1,
            valid_marker: VALID_MARKER,
        };
        let bad_marker = VersionRecord {
            schema_version: CURRENT_SCHEMA_VERSION,
            valid_marker: 0xFF,
        };

        assert!(!old_schema.is_current());
        assert!(!bad_marker.is_current());
    }

    #[test]
    fn test_erased_storage_is_not_current() {
        let erased = VersionRecord::from_bytes(&[0xFF; VersionRecord::SIZE]);
        assert!(!erased.is_current());
    }
}
