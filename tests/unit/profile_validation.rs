//! Unit tests for machine profile validation.

use machine_settings::error::{ConfigError, Error};
use machine_settings::{parse_profile, validate_settings, SettingsRecord};

/// Test validation of the factory record.
#[test]
fn test_factory_defaults_pass_validation() {
    assert!(validate_settings(&SettingsRecord::factory_defaults()).is_ok());
}

/// Test validation fails for a non-positive frame dimension.
#[test]
fn test_negative_machine_height() {
    let result = parse_profile("machine_height = -10.0");
    match result {
        Err(Error::Config(ConfigError::InvalidDimension { field, value })) => {
            assert_eq!(field, "machine_height");
            assert_eq!(value, -10.0);
        }
        other => panic!("Expected InvalidDimension, got {:?}", other),
    }
}

/// Test validation fails for a zero encoder resolution.
#[test]
fn test_zero_z_encoder_steps() {
    let result = parse_profile("z_encoder_steps = 0.0");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidEncoderSteps {
            field: "z_encoder_steps",
            ..
        }))
    ));
}

/// Test validation fails for a sprocket with no teeth.
#[test]
fn test_zero_gear_teeth() {
    let result = parse_profile("gear_teeth = 0");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidGearTeeth(0)))
    ));
}

/// Test validation fails for a non-finite value.
#[test]
fn test_infinite_chain_pitch() {
    let record = SettingsRecord {
        chain_pitch: f32::INFINITY,
        ..Default::default()
    };
    assert!(validate_settings(&record).is_err());
}

/// Test both kinematics modes are accepted.
#[test]
fn test_known_kinematics_modes() {
    for mode in [1u8, 2] {
        let record = SettingsRecord {
            kinematics_mode: mode,
            ..Default::default()
        };
        assert!(validate_settings(&record).is_ok(), "mode {}", mode);
    }
}

/// Test motor offset and sled cg are not range-checked.
#[test]
fn test_offsets_may_be_negative() {
    let record = SettingsRecord {
        motor_offset_y: -5.0,
        sled_cg: -1.0,
        ..Default::default()
    };
    assert!(validate_settings(&record).is_ok());
}
