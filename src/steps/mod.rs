//! Axis position persistence.
//!
//! Step counters live in their own region with their own validity marker.
//! The realtime loop saves them every control cycle; they are loaded once at
//! boot.

mod legacy;

pub use legacy::{LegacyPosition, LegacyProbe, LegacyRecovery};

use crate::alarm::{AlarmFlags, AlarmState};
use crate::error::Result;
use crate::storage::layout::{STEPS_OFFSET, STEPS_REGION_LEN, VALID_MARKER};
use crate::storage::{ByteReader, ByteWriter, NvStorage, VersionRecord};
use crate::units::Steps;

/// Persisted axis step counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepsRecord {
    /// Left axis position.
    pub left: Steps,
    /// Right axis position.
    pub right: Steps,
    /// Z axis position.
    pub z: Steps,
    /// Must equal [`VALID_MARKER`] for the counters to be trusted.
    pub valid_marker: u8,
}

impl StepsRecord {
    /// Size of the packed record in bytes.
    pub const SIZE: usize = 3 * 4 + 1;

    /// All axes at the origin.
    pub const fn origin() -> Self {
        Self {
            left: Steps::new(0),
            right: Steps::new(0),
            z: Steps::new(0),
            valid_marker: VALID_MARKER,
        }
    }

    /// Serialize to the packed storage layout.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        let mut w = ByteWriter::new(&mut buf);
        w.put_i32(self.left.0);
        w.put_i32(self.right.0);
        w.put_i32(self.z.0);
        w.put_u8(self.valid_marker);
        debug_assert_eq!(w.position(), Self::SIZE);
        buf
    }

    /// Deserialize from the packed storage layout.
    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        let mut r = ByteReader::new(buf);
        Self {
            left: Steps::new(r.i32()),
            right: Steps::new(r.i32()),
            z: Steps::new(r.i32()),
            valid_marker: r.u8(),
        }
    }
}

impl Default for StepsRecord {
    fn default() -> Self {
        Self::origin()
    }
}

const _: () = assert!(StepsRecord::SIZE <= STEPS_REGION_LEN);

/// What [`StepsStore::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepsLoad {
    /// Stored counters adopted.
    Restored,
    /// Nothing trustworthy found; position-lost alarm raised.
    PositionLost,
    /// Legacy rotation data found. There is no conversion to steps, so it is
    /// reported but not applied, and the position-lost alarm is raised.
    LegacyUnconverted(LegacyPosition),
}

/// Owner of the in-memory [`StepsRecord`].
#[derive(Debug, Clone, Default)]
pub struct StepsStore {
    record: StepsRecord,
}

impl StepsStore {
    /// Create a store with all axes at the origin.
    pub const fn new() -> Self {
        Self {
            record: StepsRecord::origin(),
        }
    }

    /// Current counters.
    #[inline]
    pub fn record(&self) -> &StepsRecord {
        &self.record
    }

    /// Update the counters from the axis encoders.
    pub fn set_position(&mut self, left: Steps, right: Steps, z: Steps) {
        self.record.left = left;
        self.record.right = right;
        self.record.z = z;
    }

    /// Adopt stored counters if trustworthy, else raise
    /// [`AlarmFlags::POSITION_LOST`].
    ///
    /// When the version record does not validate, the legacy layout is
    /// probed instead. Unreadable storage counts as untrustworthy.
    pub fn load<S: NvStorage + ?Sized>(&mut self, storage: &mut S, alarms: &AlarmState) -> StepsLoad {
        let outcome = self.probe(storage);
        match outcome {
            StepsLoad::Restored => {
                log_info!(
                    "steps: restored left {} right {} z {}",
                    self.record.left.0,
                    self.record.right.0,
                    self.record.z.0
                );
            }
            StepsLoad::PositionLost => {
                log_warn!("steps: no trustworthy position, raising alarm");
                alarms.raise(AlarmFlags::POSITION_LOST);
            }
            StepsLoad::LegacyUnconverted(position) => {
                log_warn!(
                    "steps: legacy rotations left {} right {} z {} not convertible, raising alarm",
                    position.left.0,
                    position.right.0,
                    position.z.0
                );
                alarms.raise(AlarmFlags::POSITION_LOST);
            }
        }
        outcome
    }

    fn probe<S: NvStorage + ?Sized>(&mut self, storage: &mut S) -> StepsLoad {
        let version = match VersionRecord::read(storage) {
            Ok(version) => version,
            Err(_) => return StepsLoad::PositionLost,
        };

        if version.is_current() {
            let mut buf = [0u8; StepsRecord::SIZE];
            if storage.read(STEPS_OFFSET, &mut buf).is_err() {
                return StepsLoad::PositionLost;
            }
            let stored = StepsRecord::from_bytes(&buf);
            if stored.valid_marker != VALID_MARKER {
                return StepsLoad::PositionLost;
            }
            self.record = stored;
            return StepsLoad::Restored;
        }

        match LegacyRecovery::probe(storage) {
            Ok(LegacyProbe::Found(position)) => StepsLoad::LegacyUnconverted(position),
            Ok(LegacyProbe::Absent { .. }) | Err(_) => StepsLoad::PositionLost,
        }
    }

    /// Write the current version record and the counters.
    ///
    /// The written record always carries the valid marker. Called every
    /// control cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects either write.
    pub fn save<S: NvStorage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        let record = StepsRecord {
            valid_marker: VALID_MARKER,
            ..self.record
        };
        VersionRecord::write_current(storage)?;
        storage.write(STEPS_OFFSET, &record.to_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_record_fits_region() {
        assert_eq!(StepsRecord::SIZE, 13);
    }

    #[test]
    fn test_save_then_load_restores_counters() {
        let mut eeprom = MemoryStorage::<4096>::new();
        let alarms = AlarmState::new();

        let mut store = StepsStore::new();
        store.set_position(Steps(1200), Steps(-800), Steps(35));
        store.save(&mut eeprom).unwrap();

        let mut fresh = StepsStore::new();
        assert_eq!(fresh.load(&mut eeprom, &alarms), StepsLoad::Restored);
        assert_eq!(fresh.record(), store.record());
        assert!(alarms.flags().is_empty());
    }

    #[test]
    fn test_bad_steps_marker_raises_alarm() {
        let mut eeprom = MemoryStorage::<4096>::new();
        let alarms = AlarmState::new();
        StepsStore::new().save(&mut eeprom).unwrap();
        eeprom.poke(STEPS_OFFSET + 12, &[0]);

        let mut store = StepsStore::new();
        store.set_position(Steps(5), Steps(5), Steps(5));
        assert_eq!(store.load(&mut eeprom, &alarms), StepsLoad::PositionLost);
        assert!(alarms.is_raised(AlarmFlags::POSITION_LOST));
        // untrusted counters are not adopted
        assert_eq!(store.record().left, Steps(5));
    }

    #[test]
    fn test_erased_storage_raises_alarm() {
        let mut eeprom = MemoryStorage::<4096>::new();
        let alarms = AlarmState::new();

        assert_eq!(StepsStore::new().load(&mut eeprom, &alarms), StepsLoad::PositionLost);
        assert!(alarms.is_raised(AlarmFlags::POSITION_LOST));
    }

    #[test]
    fn test_save_is_two_writes() {
        let mut eeprom = MemoryStorage::<4096>::new();
        StepsStore::new().save(&mut eeprom).unwrap();

        assert_eq!(eeprom.write_count(), 2);
        assert_eq!(eeprom.peek(STEPS_OFFSET + 12, 1), &[VALID_MARKER]);
    }
}
