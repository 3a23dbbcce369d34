//! Settings module for machine-settings.
//!
//! Provides the persisted settings record, its store, and machine profiles
//! (TOML, with `std` feature).

#[cfg(feature = "std")]
mod profile;
mod record;
mod store;
mod validation;

pub use record::{PidGains, SettingsRecord};
pub use store::{SettingsLoad, SettingsStore};
pub use validation::validate_settings;

#[cfg(feature = "std")]
pub use profile::{load_profile, parse_profile};
