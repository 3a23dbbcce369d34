//! # machine-settings
//!
//! Versioned EEPROM persistence for a cable-driven CNC controller.
//!
//! ## Features
//!
//! - **Defaults first**: the settings record is always populated before storage is read
//! - **Versioned load**: stored data is adopted only behind a matching schema + validity marker
//! - **Legacy detection**: pre-versioning position data is recognised, never fabricated into a position
//! - **Parameter dispatch**: one table maps each parameter id to its field and cascades
//! - **Write-through**: every accepted parameter is persisted immediately
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use machine_settings::{AlarmState, MemoryStorage, Persistence, SharedStorage};
//!
//! static ALARMS: AlarmState = AlarmState::new();
//!
//! let storage = SharedStorage::new(MemoryStorage::<4096>::new());
//! let mut persistence = Persistence::new();
//! let report = persistence.init(&storage, &ALARMS);
//!
//! // Realtime loop
//! persistence.steps_mut().set_position(left, right, z);
//! storage.transaction(|s| persistence.steps().save(s))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML machine profiles and file loading
//! - `defmt`: Enables defmt logging for embedded targets

// Tests always link std; the library itself only with the `std` feature.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod log;

// Core modules
pub mod alarm;
pub mod dispatch;
pub mod error;
pub mod persistence;
pub mod settings;
pub mod steps;
pub mod storage;
pub mod units;

// Re-exports for ergonomic API
pub use alarm::{AlarmFlags, AlarmState};
pub use dispatch::{
    AxisController, CascadeTargets, KinematicsSolver, MachineFlags, ParameterDispatcher,
    ParameterId, StatusCode,
};
pub use error::{Error, Result};
pub use persistence::{BootReport, Persistence};
pub use settings::{validate_settings, PidGains, SettingsLoad, SettingsRecord, SettingsStore};
pub use steps::{StepsLoad, StepsRecord, StepsStore};
pub use storage::{I2cEeprom, MemoryStorage, NvStorage, SharedStorage, VersionRecord};

// Machine profiles (std only)
#[cfg(feature = "std")]
pub use settings::{load_profile, parse_profile};

// Unit types
pub use units::{Rotations, Steps};
