//! Boot-time facade over both stores.
//!
//! Owns the [`SettingsStore`] and [`StepsStore`] and runs the boot sequence:
//! settings first, then steps, each in its own storage transaction.

use crate::alarm::AlarmState;
use crate::dispatch::{CascadeTargets, ParameterDispatcher};
use crate::error::Result;
use crate::settings::{SettingsLoad, SettingsStore};
use crate::steps::{StepsLoad, StepsStore};
use crate::storage::{NvStorage, SharedStorage};

/// What boot found in storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootReport {
    /// Settings outcome.
    pub settings: SettingsLoad,
    /// Steps outcome.
    pub steps: StepsLoad,
}

/// Persistent configuration of one controller.
///
/// # Example
///
/// ```rust,ignore
/// let mut persistence = Persistence::new();
/// let report = persistence.init(&STORAGE, &ALARMS);
///
/// let mut dispatcher = persistence.dispatcher(&STORAGE, targets);
/// dispatcher.store(12, 8148.0)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Persistence {
    settings: SettingsStore,
    steps: StepsStore,
}

impl Persistence {
    /// Create with factory settings and all axes at the origin.
    pub const fn new() -> Self {
        Self {
            settings: SettingsStore::new(),
            steps: StepsStore::new(),
        }
    }

    /// Load settings, then steps. When settings fell back to defaults, the
    /// defaults are written back so the version record never vouches for an
    /// unwritten settings region.
    ///
    /// Never fails; see [`SettingsStore::load`] and [`StepsStore::load`] for
    /// the fallback rules. A failed write-back is logged and retried on the
    /// next boot.
    pub fn init<S: NvStorage>(&mut self, storage: &SharedStorage<S>, alarms: &AlarmState) -> BootReport {
        let settings = storage.transaction(|s| self.settings.load(s));
        let steps = storage.transaction(|s| self.steps.load(s, alarms));

        // After the steps load: the settings region overlaps legacy offsets.
        if settings == SettingsLoad::Defaults
            && storage.transaction(|s| self.settings.save(s)).is_err()
        {
            log_warn!("boot: could not persist default settings");
        }

        log_info!("boot: settings {} steps {}", settings_label(settings), steps_label(&steps));
        BootReport { settings, steps }
    }

    /// Settings store.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Mutable settings store, e.g. to import a machine profile.
    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    /// Steps store.
    pub fn steps(&self) -> &StepsStore {
        &self.steps
    }

    /// Mutable steps store, for the realtime loop.
    pub fn steps_mut(&mut self) -> &mut StepsStore {
        &mut self.steps
    }

    /// Persist the settings record in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage device rejects the write.
    pub fn save_settings<S: NvStorage>(&self, storage: &SharedStorage<S>) -> Result<()> {
        storage.transaction(|s| self.settings.save(s))
    }

    /// Persist the step counters in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage device rejects the write.
    pub fn save_steps<S: NvStorage>(&self, storage: &SharedStorage<S>) -> Result<()> {
        storage.transaction(|s| self.steps.save(s))
    }

    /// Borrow the settings store into a parameter dispatcher.
    pub fn dispatcher<'a, S: NvStorage>(
        &'a mut self,
        storage: &'a SharedStorage<S>,
        targets: CascadeTargets<'a>,
    ) -> ParameterDispatcher<'a, S> {
        ParameterDispatcher::new(&mut self.settings, storage, targets)
    }
}

fn settings_label(outcome: SettingsLoad) -> &'static str {
    match outcome {
        SettingsLoad::Loaded => "loaded",
        SettingsLoad::Defaults => "defaults",
    }
}

fn steps_label(outcome: &StepsLoad) -> &'static str {
    match outcome {
        StepsLoad::Restored => "restored",
        StepsLoad::PositionLost => "lost",
        StepsLoad::LegacyUnconverted(_) => "legacy",
    }
}
