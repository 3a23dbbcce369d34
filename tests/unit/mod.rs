//! Unit test harness for machine-settings.
//!
//! This module organizes the machine profile tests.

mod profile_parsing;
mod profile_validation;
