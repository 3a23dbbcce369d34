//! Machine profile loading from files (std only).
//!
//! A profile is a TOML document naming any subset of [`SettingsRecord`]
//! fields; the rest keep their factory defaults.
//!
//! ```toml
//! machine_width = 2438.4
//! gear_teeth = 12
//!
//! [z_pid]
//! pos_p = 1100.0
//! ```

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SettingsRecord;

/// Load a machine profile from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
///
/// ```rust,ignore
/// use machine_settings::load_profile;
///
/// let record = load_profile("maslow.toml")?;
/// store.import(record);
/// ```
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<SettingsRecord> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_profile(&content)
}

/// Parse a machine profile from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_profile(content: &str) -> Result<SettingsRecord> {
    let record: SettingsRecord = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_settings(&record)?;

    Ok(record)
}
