//! Parameter dispatch for machine-settings.
//!
//! The command layer submits `(id, value)` pairs. Each accepted pair writes
//! one settings field, runs that parameter's cascades into the axis
//! controllers and kinematics solver, then persists the whole record.

mod table;
mod targets;

pub use table::{Cascade, ParameterEntry, PARAMETER_TABLE};
pub use targets::{AxisController, CascadeTargets, KinematicsSolver, MachineFlags};

use crate::error::{ParameterError, Result};
use crate::settings::{SettingsRecord, SettingsStore};
use crate::storage::{NvStorage, SharedStorage};

/// Status returned to the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StatusCode {
    /// Parameter stored.
    Ok = 0,
    /// Unknown parameter id; nothing changed.
    InvalidStatement = 3,
}

impl StatusCode {
    /// Numeric code sent back to the host.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Settings parameter identifiers, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ParameterId {
    MachineWidth = 0,
    MachineHeight = 1,
    MotorSpacing = 2,
    MotorOffsetY = 3,
    SledWidth = 4,
    SledHeight = 5,
    SledCg = 6,
    KinematicsMode = 7,
    RotationDiskRadius = 8,
    AxisHoldTime = 9,
    SolverGuessLimit = 10,
    LegacyChainLength = 11,
    EncoderSteps = 12,
    GearTeeth = 13,
    ChainPitch = 14,
    MaxFeed = 15,
    ZAttached = 16,
    ZAuto = 17,
    ZMaxRpm = 18,
    ZDistPerRotation = 19,
    ZEncoderSteps = 20,
    XyPosP = 21,
    XyPosI = 22,
    XyPosD = 23,
    XyPosWeight = 24,
    XyVelP = 25,
    XyVelI = 26,
    XyVelD = 27,
    XyVelWeight = 28,
    ZPosP = 29,
    ZPosI = 30,
    ZPosD = 31,
    ZPosWeight = 32,
    ZVelP = 33,
    ZVelI = 34,
    ZVelD = 35,
    ZVelWeight = 36,
}

impl ParameterId {
    /// Number of parameters.
    pub const COUNT: usize = 37;

    /// Table row for this parameter.
    #[inline]
    pub fn entry(self) -> &'static ParameterEntry {
        &PARAMETER_TABLE[self as usize]
    }

    /// Field name as used in machine profiles.
    #[inline]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Current value of this parameter's field (booleans as 0/1).
    #[inline]
    pub fn read(self, settings: &SettingsRecord) -> f32 {
        (self.entry().get)(settings)
    }

    /// Every parameter, in id order.
    pub fn all() -> impl Iterator<Item = ParameterId> {
        PARAMETER_TABLE.iter().map(|entry| entry.id)
    }
}

impl TryFrom<u8> for ParameterId {
    type Error = ParameterError;

    fn try_from(id: u8) -> core::result::Result<Self, Self::Error> {
        PARAMETER_TABLE
            .get(usize::from(id))
            .map(|entry| entry.id)
            .ok_or(ParameterError::UnknownId(id))
    }
}

/// Single entry point for settings changes.
///
/// Holds the settings store and the cascade targets for the duration of a
/// command session. `&mut` access serializes updates; each persist runs in
/// one storage transaction so it cannot interleave with a realtime steps save.
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = ParameterDispatcher::new(&mut settings, &STORAGE, targets);
/// assert_eq!(dispatcher.store(6, 85.0)?, StatusCode::Ok);
/// ```
pub struct ParameterDispatcher<'a, S: NvStorage> {
    settings: &'a mut SettingsStore,
    storage: &'a SharedStorage<S>,
    targets: CascadeTargets<'a>,
}

impl<'a, S: NvStorage> ParameterDispatcher<'a, S> {
    /// Create a dispatcher over a loaded settings store.
    pub fn new(
        settings: &'a mut SettingsStore,
        storage: &'a SharedStorage<S>,
        targets: CascadeTargets<'a>,
    ) -> Self {
        Self {
            settings,
            storage,
            targets,
        }
    }

    /// Current settings.
    #[inline]
    pub fn settings(&self) -> &SettingsRecord {
        self.settings.record()
    }

    /// Write one parameter, run its cascades, persist the record.
    ///
    /// Unknown ids return [`StatusCode::InvalidStatement`] without touching
    /// the record or storage. Values are not range-checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage device rejects the persist. The
    /// in-memory record and cascades have already been applied by then.
    pub fn store(&mut self, id: u8, value: f32) -> Result<StatusCode> {
        let id = match ParameterId::try_from(id) {
            Ok(id) => id,
            Err(ParameterError::UnknownId(raw)) => {
                log_warn!("dispatch: unknown parameter id {}", raw);
                return Ok(StatusCode::InvalidStatement);
            }
        };

        let entry = id.entry();
        (entry.set)(self.settings.record_mut(), value);
        log_debug!("dispatch: parameter {} = {}", id as u8, value);

        let record = self.settings.record();
        for &cascade in entry.cascades {
            run_cascade(cascade, record, &mut self.targets);
        }

        let settings = &*self.settings;
        self.storage.transaction(|storage| settings.save(storage))?;
        Ok(StatusCode::Ok)
    }
}

fn run_cascade(cascade: Cascade, record: &SettingsRecord, targets: &mut CascadeTargets<'_>) {
    match cascade {
        Cascade::MarkKinematicsReceived => targets.flags.insert(MachineFlags::KINEMATICS_RECEIVED),
        Cascade::FinalizeMachineSettings => targets.kinematics.finalize_machine_settings(record),
        Cascade::RecomputeGeometry => targets.kinematics.recompute_geometry(record),
        Cascade::PropagateEncoderSteps => {
            targets.left_axis.change_encoder_resolution(record.encoder_steps);
            targets.right_axis.change_encoder_resolution(record.encoder_steps);
        }
        Cascade::MarkEncoderStepsChanged => targets.flags.insert(MachineFlags::ENCODER_STEPS_CHANGED),
        Cascade::PropagateDrivePitch => {
            let pitch = record.drive_pitch();
            targets.left_axis.change_pitch(pitch);
            targets.right_axis.change_pitch(pitch);
        }
        Cascade::UpdateDriveRadius => targets.kinematics.set_drive_radius(record.drive_radius()),
        Cascade::PropagateZPitch => targets.z_axis.change_pitch(record.z_dist_per_rotation),
        Cascade::PropagateZEncoderSteps => {
            targets.z_axis.change_encoder_resolution(record.z_encoder_steps)
        }
        Cascade::MarkZEncoderStepsChanged => {
            targets.flags.insert(MachineFlags::Z_ENCODER_STEPS_CHANGED)
        }
        Cascade::PushXyGains => {
            targets.left_axis.set_pid_values(&record.xy_pid);
            targets.right_axis.set_pid_values(&record.xy_pid);
        }
        Cascade::PushZGains => targets.z_axis.set_pid_values(&record.z_pid),
    }
}
