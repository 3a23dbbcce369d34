//! Unit tests for TOML machine profile parsing.

use machine_settings::error::{ConfigError, Error};
use machine_settings::storage::layout::VALID_MARKER;
use machine_settings::{
    load_profile, parse_profile, MemoryStorage, SettingsLoad, SettingsRecord, SettingsStore,
};

const FULL_PROFILE: &str = r#"
machine_width = 3048.0
machine_height = 1524.0
motor_spacing = 3601.2
motor_offset_y = 468.0
sled_width = 310.0
sled_height = 139.0
sled_cg = 79.0
kinematics_mode = 2
rotation_disk_radius = 139.1
axis_hold_time = 2500
solver_guess_limit = 200
legacy_chain_length = 1650
encoder_steps = 8148.0
gear_teeth = 10
chain_pitch = 6.35
max_feed = 800
z_attached = true
z_auto = true
z_max_rpm = 12.6
z_dist_per_rotation = 3.17
z_encoder_steps = 7560.0

[xy_pid]
pos_p = 1300.0
pos_i = 0.0
pos_d = 34.0
pos_weight = 1.0
vel_p = 5.0
vel_i = 0.1
vel_d = 0.28
vel_weight = 1.0

[z_pid]
pos_p = 1100.0
vel_p = 6.0
"#;

/// Test parsing a profile that names every field.
#[test]
fn test_parse_full_profile() {
    let record = parse_profile(FULL_PROFILE).expect("Failed to parse profile");

    assert_eq!(record.machine_width, 3048.0);
    assert_eq!(record.kinematics_mode, 2);
    assert_eq!(record.axis_hold_time, 2500);
    assert_eq!(record.max_feed, 800);
    assert!(record.z_auto);
    assert_eq!(record.xy_pid.vel_p, 5.0);
    assert_eq!(record.xy_pid.vel_i, 0.1);
    assert_eq!(record.z_pid.pos_p, 1100.0);
    // unnamed gains keep their stock values
    assert_eq!(record.z_pid.pos_d, 34.0);
    assert_eq!(record.valid_marker, VALID_MARKER);
}

/// Test that a wrong value type is reported as a parse error.
#[test]
fn test_wrong_type_is_parse_error() {
    let result = parse_profile("gear_teeth = \"ten\"");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test that an out-of-range integer is reported as a parse error.
#[test]
fn test_gear_teeth_overflow_is_parse_error() {
    let result = parse_profile("gear_teeth = 300");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test loading a profile from disk.
#[test]
fn test_load_profile_from_file() {
    let path = std::env::temp_dir().join("machine_settings_profile_test.toml");
    std::fs::write(&path, FULL_PROFILE).expect("Failed to write profile");

    let record = load_profile(&path).expect("Failed to load profile");
    std::fs::remove_file(&path).ok();

    assert_eq!(record.motor_spacing, 3601.2);
}

/// Test that a missing file is reported as an I/O error.
#[test]
fn test_load_missing_profile() {
    let path = std::env::temp_dir().join("machine_settings_no_such_profile.toml");
    let result = load_profile(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}

/// Test that an imported profile persists like any other record.
#[test]
fn test_imported_profile_survives_power_cycle() {
    let mut eeprom = MemoryStorage::<4096>::new();
    let mut store = SettingsStore::new();
    store.import(parse_profile(FULL_PROFILE).unwrap());
    store.save(&mut eeprom).unwrap();

    let mut loaded = SettingsStore::new();
    assert_eq!(loaded.load(&mut eeprom), SettingsLoad::Loaded);
    assert_eq!(loaded.record(), store.record());
    assert_ne!(loaded.record(), &SettingsRecord::factory_defaults());
}
