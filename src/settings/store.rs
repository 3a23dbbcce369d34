//! Settings persistence: reset, versioned load, save.

use crate::error::Result;
use crate::storage::layout::{SETTINGS_OFFSET, VALID_MARKER};
use crate::storage::{NvStorage, VersionRecord};

use super::SettingsRecord;

/// What [`SettingsStore::load`] found in storage.
///
/// Informational only: both outcomes leave a usable record in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsLoad {
    /// Stored record adopted.
    Loaded,
    /// Version check failed or storage unreadable; defaults kept.
    Defaults,
}

/// Owner of the in-memory [`SettingsRecord`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    record: SettingsRecord,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Create a store holding the factory defaults.
    pub const fn new() -> Self {
        Self {
            record: SettingsRecord::factory_defaults(),
        }
    }

    /// Current settings.
    #[inline]
    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    pub(crate) fn record_mut(&mut self) -> &mut SettingsRecord {
        &mut self.record
    }

    /// Overwrite the in-memory record with factory defaults.
    pub fn reset(&mut self) {
        self.record = SettingsRecord::factory_defaults();
    }

    /// Replace the in-memory record, e.g. with a validated machine profile.
    ///
    /// Not persisted until [`save`](Self::save).
    pub fn import(&mut self, mut record: SettingsRecord) {
        record.valid_marker = VALID_MARKER;
        self.record = record;
    }

    /// Reset, then adopt the stored record if the version record validates
    /// and the record carries its own valid marker.
    ///
    /// Never fails: an unreadable device, a stale schema or a bad record
    /// marker leaves the defaults in place, untouched by partial reads.
    pub fn load<S: NvStorage + ?Sized>(&mut self, storage: &mut S) -> SettingsLoad {
        self.reset();

        let version = match VersionRecord::read(storage) {
            Ok(version) => version,
            Err(_) => {
                log_warn!("settings: version record unreadable, keeping defaults");
                return SettingsLoad::Defaults;
            }
        };
        if !version.is_current() {
            log_info!(
                "settings: schema {} marker {} not current, keeping defaults",
                version.schema_version,
                version.valid_marker
            );
            return SettingsLoad::Defaults;
        }

        let mut buf = [0u8; SettingsRecord::SIZE];
        if storage.read(SETTINGS_OFFSET, &mut buf).is_err() {
            log_warn!("settings: record unreadable, keeping defaults");
            return SettingsLoad::Defaults;
        }
        let stored = SettingsRecord::from_bytes(&buf);
        if stored.valid_marker != VALID_MARKER {
            log_warn!(
                "settings: record marker {} not valid, keeping defaults",
                stored.valid_marker
            );
            return SettingsLoad::Defaults;
        }
        self.record = stored;
        log_info!("settings: loaded schema {}", version.schema_version);
        SettingsLoad::Loaded
    }

    /// Write the current version record followed by the full settings record.
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects either write.
    pub fn save<S: NvStorage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        VersionRecord::write_current(storage)?;
        storage.write(SETTINGS_OFFSET, &self.record.to_bytes())?;
        Ok(())
    }
}
