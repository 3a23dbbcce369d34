//! Parameter table: id → field accessor → cascades.
//!
//! Adding a parameter means adding a [`ParameterId`] variant and one row
//! here. Rows are indexed by id.

use crate::settings::SettingsRecord;

use super::ParameterId;

/// A consistency update run after a field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cascade {
    /// Set [`MachineFlags::KINEMATICS_RECEIVED`](super::MachineFlags::KINEMATICS_RECEIVED).
    MarkKinematicsReceived,
    /// Kinematics: finalize derived machine settings.
    FinalizeMachineSettings,
    /// Kinematics: recompute geometry.
    RecomputeGeometry,
    /// Left and right axes: new encoder resolution.
    PropagateEncoderSteps,
    /// Set [`MachineFlags::ENCODER_STEPS_CHANGED`](super::MachineFlags::ENCODER_STEPS_CHANGED).
    MarkEncoderStepsChanged,
    /// Left and right axes: new pitch (teeth × chain pitch).
    PropagateDrivePitch,
    /// Kinematics: new sprocket radius (drive pitch / 2π).
    UpdateDriveRadius,
    /// Z axis: new distance per rotation.
    PropagateZPitch,
    /// Z axis: new encoder resolution.
    PropagateZEncoderSteps,
    /// Set [`MachineFlags::Z_ENCODER_STEPS_CHANGED`](super::MachineFlags::Z_ENCODER_STEPS_CHANGED).
    MarkZEncoderStepsChanged,
    /// Left and right axes: full horizontal gain set.
    PushXyGains,
    /// Z axis: full vertical gain set.
    PushZGains,
}

const NONE: &[Cascade] = &[];

const GEOMETRY: &[Cascade] = &[
    Cascade::MarkKinematicsReceived,
    Cascade::FinalizeMachineSettings,
    Cascade::RecomputeGeometry,
];

const ENCODER: &[Cascade] = &[Cascade::PropagateEncoderSteps, Cascade::MarkEncoderStepsChanged];

const DRIVETRAIN: &[Cascade] = &[Cascade::PropagateDrivePitch, Cascade::UpdateDriveRadius];

const Z_PITCH: &[Cascade] = &[Cascade::PropagateZPitch];

const Z_ENCODER: &[Cascade] = &[Cascade::PropagateZEncoderSteps, Cascade::MarkZEncoderStepsChanged];

const XY_GAINS: &[Cascade] = &[Cascade::PushXyGains];

const Z_GAINS: &[Cascade] = &[Cascade::PushZGains];

/// One row of the parameter table.
#[derive(Clone, Copy)]
pub struct ParameterEntry {
    /// Parameter this row describes.
    pub id: ParameterId,
    /// Field name as it appears in machine profiles.
    pub name: &'static str,
    /// Write the field from a command value.
    pub set: fn(&mut SettingsRecord, f32),
    /// Read the field back as a command value.
    pub get: fn(&SettingsRecord) -> f32,
    /// Cascades run after the write, in order.
    pub cascades: &'static [Cascade],
}

impl core::fmt::Debug for ParameterEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParameterEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("cascades", &self.cascades)
            .finish()
    }
}

// Command values arrive as floats; integer fields truncate and saturate.
fn to_i16(value: f32) -> i16 {
    value as i16
}

fn to_u8(value: f32) -> u8 {
    value as u8
}

fn to_bool(value: f32) -> bool {
    value != 0.0
}

fn from_bool(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Every parameter, indexed by id.
pub static PARAMETER_TABLE: [ParameterEntry; ParameterId::COUNT] = [
    ParameterEntry {
        id: ParameterId::MachineWidth,
        name: "machine_width",
        set: |s, v| s.machine_width = v,
        get: |s| s.machine_width,
        cascades: GEOMETRY,
    },
    ParameterEntry {
        id: ParameterId::MachineHeight,
        name: "machine_height",
        set: |s, v| s.machine_height = v,
        get: |s| s.machine_height,
        cascades: GEOMETRY,
    },
    ParameterEntry {
        id: ParameterId::MotorSpacing,
        name: "motor_spacing",
        set: |s, v| s.motor_spacing = v,
        get: |s| s.motor_spacing,
        cascades: GEOMETRY,
    },
    ParameterEntry {
        id: ParameterId::MotorOffsetY,
        name: "motor_offset_y",
        set: |s, v| s.motor_offset_y = v,
        get: |s| s.motor_offset_y,
        cascades: GEOMETRY,
    },
    ParameterEntry {
        id: ParameterId::SledWidth,
        name: "sled_width",
        set: |s, v| s.sled_width = v,
        get: |s| s.sled_width,
        cascades: GEOMETRY,
    },
    ParameterEntry {
        id: ParameterId::SledHeight,
        name: "sled_height",
        set: |s, v| s.sled_height = v,
        get: |s| s.sled_height,
        cascades: GEOMETRY,
    },
    ParameterEntry {
        id: ParameterId::SledCg,
        name: "sled_cg",
        set: |s, v| s.sled_cg = v,
        get: |s| s.sled_cg,
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::KinematicsMode,
        name: "kinematics_mode",
        set: |s, v| s.kinematics_mode = to_u8(v),
        get: |s| f32::from(s.kinematics_mode),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::RotationDiskRadius,
        name: "rotation_disk_radius",
        set: |s, v| s.rotation_disk_radius = v,
        get: |s| s.rotation_disk_radius,
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::AxisHoldTime,
        name: "axis_hold_time",
        set: |s, v| s.axis_hold_time = to_i16(v),
        get: |s| f32::from(s.axis_hold_time),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::SolverGuessLimit,
        name: "solver_guess_limit",
        set: |s, v| s.solver_guess_limit = to_i16(v),
        get: |s| f32::from(s.solver_guess_limit),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::LegacyChainLength,
        name: "legacy_chain_length",
        set: |s, v| s.legacy_chain_length = to_i16(v),
        get: |s| f32::from(s.legacy_chain_length),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::EncoderSteps,
        name: "encoder_steps",
        set: |s, v| s.encoder_steps = v,
        get: |s| s.encoder_steps,
        cascades: ENCODER,
    },
    ParameterEntry {
        id: ParameterId::GearTeeth,
        name: "gear_teeth",
        set: |s, v| s.gear_teeth = to_u8(v),
        get: |s| f32::from(s.gear_teeth),
        cascades: DRIVETRAIN,
    },
    ParameterEntry {
        id: ParameterId::ChainPitch,
        name: "chain_pitch",
        set: |s, v| s.chain_pitch = v,
        get: |s| s.chain_pitch,
        cascades: DRIVETRAIN,
    },
    ParameterEntry {
        id: ParameterId::MaxFeed,
        name: "max_feed",
        set: |s, v| s.max_feed = to_i16(v),
        get: |s| f32::from(s.max_feed),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::ZAttached,
        name: "z_attached",
        set: |s, v| s.z_attached = to_bool(v),
        get: |s| from_bool(s.z_attached),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::ZAuto,
        name: "z_auto",
        set: |s, v| s.z_auto = to_bool(v),
        get: |s| from_bool(s.z_auto),
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::ZMaxRpm,
        name: "z_max_rpm",
        set: |s, v| s.z_max_rpm = v,
        get: |s| s.z_max_rpm,
        cascades: NONE,
    },
    ParameterEntry {
        id: ParameterId::ZDistPerRotation,
        name: "z_dist_per_rotation",
        set: |s, v| s.z_dist_per_rotation = v,
        get: |s| s.z_dist_per_rotation,
        cascades: Z_PITCH,
    },
    ParameterEntry {
        id: ParameterId::ZEncoderSteps,
        name: "z_encoder_steps",
        set: |s, v| s.z_encoder_steps = v,
        get: |s| s.z_encoder_steps,
        cascades: Z_ENCODER,
    },
    ParameterEntry {
        id: ParameterId::XyPosP,
        name: "xy_pid.pos_p",
        set: |s, v| s.xy_pid.pos_p = v,
        get: |s| s.xy_pid.pos_p,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyPosI,
        name: "xy_pid.pos_i",
        set: |s, v| s.xy_pid.pos_i = v,
        get: |s| s.xy_pid.pos_i,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyPosD,
        name: "xy_pid.pos_d",
        set: |s, v| s.xy_pid.pos_d = v,
        get: |s| s.xy_pid.pos_d,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyPosWeight,
        name: "xy_pid.pos_weight",
        set: |s, v| s.xy_pid.pos_weight = v,
        get: |s| s.xy_pid.pos_weight,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyVelP,
        name: "xy_pid.vel_p",
        set: |s, v| s.xy_pid.vel_p = v,
        get: |s| s.xy_pid.vel_p,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyVelI,
        name: "xy_pid.vel_i",
        set: |s, v| s.xy_pid.vel_i = v,
        get: |s| s.xy_pid.vel_i,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyVelD,
        name: "xy_pid.vel_d",
        set: |s, v| s.xy_pid.vel_d = v,
        get: |s| s.xy_pid.vel_d,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::XyVelWeight,
        name: "xy_pid.vel_weight",
        set: |s, v| s.xy_pid.vel_weight = v,
        get: |s| s.xy_pid.vel_weight,
        cascades: XY_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZPosP,
        name: "z_pid.pos_p",
        set: |s, v| s.z_pid.pos_p = v,
        get: |s| s.z_pid.pos_p,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZPosI,
        name: "z_pid.pos_i",
        set: |s, v| s.z_pid.pos_i = v,
        get: |s| s.z_pid.pos_i,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZPosD,
        name: "z_pid.pos_d",
        set: |s, v| s.z_pid.pos_d = v,
        get: |s| s.z_pid.pos_d,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZPosWeight,
        name: "z_pid.pos_weight",
        set: |s, v| s.z_pid.pos_weight = v,
        get: |s| s.z_pid.pos_weight,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZVelP,
        name: "z_pid.vel_p",
        set: |s, v| s.z_pid.vel_p = v,
        get: |s| s.z_pid.vel_p,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZVelI,
        name: "z_pid.vel_i",
        set: |s, v| s.z_pid.vel_i = v,
        get: |s| s.z_pid.vel_i,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZVelD,
        name: "z_pid.vel_d",
        set: |s, v| s.z_pid.vel_d = v,
        get: |s| s.z_pid.vel_d,
        cascades: Z_GAINS,
    },
    ParameterEntry {
        id: ParameterId::ZVelWeight,
        name: "z_pid.vel_weight",
        set: |s, v| s.z_pid.vel_weight = v,
        get: |s| s.z_pid.vel_weight,
        cascades: Z_GAINS,
    },
];
