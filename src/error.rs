//! Error types for machine-settings.
//!
//! Provides unified error handling across machine profiles, the storage
//! device, and parameter dispatch.
//!
//! Schema mismatches and lost positions are not errors: the former falls back
//! to defaults, the latter raises an alarm flag.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all machine-settings operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Machine profile parsing or validation error
    Config(ConfigError),
    /// Non-volatile storage device error
    Storage(StorageError),
    /// Parameter identification error
    Parameter(ParameterError),
}

/// Machine profile errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML profile
    ParseError(heapless::String<128>),
    /// A length or distance that must be positive and finite is not
    InvalidDimension {
        /// Name of the offending field
        field: &'static str,
        /// Value found
        value: f32,
    },
    /// Encoder resolution must be positive and finite
    InvalidEncoderSteps {
        /// Name of the offending field
        field: &'static str,
        /// Value found
        value: f32,
    },
    /// Sprocket must have at least one tooth
    InvalidGearTeeth(u8),
    /// Kinematics mode must be 1 (quadrilateral) or 2 (triangular)
    InvalidKinematicsMode(u8),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Storage device errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Access falls outside the device
    OutOfRange {
        /// Start offset of the access
        offset: u16,
        /// Length of the access in bytes
        len: usize,
    },
    /// Bus transaction failed
    Bus,
}

/// Parameter dispatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Id is outside the parameter enumeration
    UnknownId(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Storage(e) => write!(f, "Storage error: {}", e),
            Error::Parameter(e) => write!(f, "Parameter error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidDimension { field, value } => {
                write!(f, "Invalid {}: {}. Must be > 0", field, value)
            }
            ConfigError::InvalidEncoderSteps { field, value } => {
                write!(f, "Invalid {}: {}. Must be > 0", field, value)
            }
            ConfigError::InvalidGearTeeth(v) => write!(f, "Invalid gear teeth: {}. Must be > 0", v),
            ConfigError::InvalidKinematicsMode(v) => {
                write!(f, "Invalid kinematics mode: {}. Valid values: 1, 2", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OutOfRange { offset, len } => {
                write!(f, "Access of {} bytes at offset {} is out of range", len, offset)
            }
            StorageError::Bus => write!(f, "Storage bus transaction failed"),
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::UnknownId(id) => write!(f, "Unknown parameter id {}", id),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

impl From<ParameterError> for Error {
    fn from(e: ParameterError) -> Self {
        Error::Parameter(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

#[cfg(feature = "std")]
impl std::error::Error for ParameterError {}
