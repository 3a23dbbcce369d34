//! Probe for the pre-versioning position layout.
//!
//! Before the version record existed, each axis stored a validity byte and a
//! float position in rotations at its own fixed offset. This module only
//! reads that layout; nothing writes it any more.

use crate::error::StorageError;
use crate::storage::layout::{LEGACY_MARKER_OFFSETS, LEGACY_POSITION_OFFSETS, VALID_MARKER};
use crate::storage::NvStorage;
use crate::units::Rotations;

/// Positions recovered from the legacy layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyPosition {
    /// Left axis.
    pub left: Rotations,
    /// Right axis.
    pub right: Rotations,
    /// Z axis.
    pub z: Rotations,
}

/// Result of probing the legacy layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegacyProbe {
    /// Not every axis marker was present; no position was read.
    Absent {
        /// How many of the three markers were present.
        markers_present: u8,
    },
    /// All three markers present; positions read.
    Found(LegacyPosition),
}

/// Reader for the legacy address layout.
pub struct LegacyRecovery;

impl LegacyRecovery {
    /// Check the three axis markers and, only if all are present, read the
    /// three positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be read.
    pub fn probe<S: NvStorage + ?Sized>(storage: &mut S) -> Result<LegacyProbe, StorageError> {
        let mut markers_present = 0u8;
        for offset in LEGACY_MARKER_OFFSETS {
            if storage.read_byte(offset)? == VALID_MARKER {
                markers_present += 1;
            }
        }
        if usize::from(markers_present) < LEGACY_MARKER_OFFSETS.len() {
            return Ok(LegacyProbe::Absent { markers_present });
        }

        let [left, right, z] = LEGACY_POSITION_OFFSETS;
        Ok(LegacyProbe::Found(LegacyPosition {
            left: read_rotations(storage, left)?,
            right: read_rotations(storage, right)?,
            z: read_rotations(storage, z)?,
        }))
    }
}

fn read_rotations<S: NvStorage + ?Sized>(storage: &mut S, offset: u16) -> Result<Rotations, StorageError> {
    let mut buf = [0u8; 4];
    storage.read(offset, &mut buf)?;
    Ok(Rotations::new(f32::from_le_bytes(buf)))
}
