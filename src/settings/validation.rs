//! Machine profile validation.

use crate::error::{ConfigError, Error, Result};

use super::SettingsRecord;

/// Validate a settings record taken from a machine profile.
///
/// Checks:
/// - Machine, motor and sled dimensions are positive
/// - Encoder resolutions are positive
/// - Drivetrain pitch values are positive, sprocket has teeth
/// - Kinematics mode is known
///
/// The parameter dispatcher does not call this: values set one at a time
/// are stored as given.
pub fn validate_settings(record: &SettingsRecord) -> Result<()> {
    let dimensions = [
        ("machine_width", record.machine_width),
        ("machine_height", record.machine_height),
        ("motor_spacing", record.motor_spacing),
        ("sled_width", record.sled_width),
        ("sled_height", record.sled_height),
        ("chain_pitch", record.chain_pitch),
        ("z_dist_per_rotation", record.z_dist_per_rotation),
    ];
    for (field, value) in dimensions {
        if !is_positive(value) {
            return Err(Error::Config(ConfigError::InvalidDimension { field, value }));
        }
    }

    let resolutions = [
        ("encoder_steps", record.encoder_steps),
        ("z_encoder_steps", record.z_encoder_steps),
    ];
    for (field, value) in resolutions {
        if !is_positive(value) {
            return Err(Error::Config(ConfigError::InvalidEncoderSteps { field, value }));
        }
    }

    if record.gear_teeth == 0 {
        return Err(Error::Config(ConfigError::InvalidGearTeeth(record.gear_teeth)));
    }

    if !matches!(record.kinematics_mode, 1 | 2) {
        return Err(Error::Config(ConfigError::InvalidKinematicsMode(
            record.kinematics_mode,
        )));
    }

    Ok(())
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
