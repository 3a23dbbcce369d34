//! Subsystems that parameter updates cascade into.
//!
//! The dispatcher borrows these; it never owns them.

use bitflags::bitflags;

use crate::settings::{PidGains, SettingsRecord};

/// One closed-loop axis (left, right, or z).
pub trait AxisController {
    /// New encoder resolution, steps per revolution.
    fn change_encoder_resolution(&mut self, steps_per_revolution: f32);

    /// New travel per revolution.
    fn change_pitch(&mut self, distance_per_revolution: f32);

    /// Replace the full position + velocity gain set.
    fn set_pid_values(&mut self, gains: &PidGains);
}

/// Geometry solver for the machine frame.
pub trait KinematicsSolver {
    /// Derive machine constants that depend on the frame dimensions.
    fn finalize_machine_settings(&mut self, settings: &SettingsRecord);

    /// Rebuild cached geometry from the current settings.
    fn recompute_geometry(&mut self, settings: &SettingsRecord);

    /// New sprocket pitch radius.
    fn set_drive_radius(&mut self, radius: f32);
}

bitflags! {
    /// Machine state flags set by parameter updates and consumed elsewhere
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MachineFlags: u8 {
        /// A frame dimension has been received since boot
        const KINEMATICS_RECEIVED = 0b0000_0001;
        /// Left/right encoder resolution changed; positions need rescaling
        const ENCODER_STEPS_CHANGED = 0b0000_0010;
        /// Z encoder resolution changed; position needs rescaling
        const Z_ENCODER_STEPS_CHANGED = 0b0000_0100;
    }
}

/// Handles to every subsystem a parameter update may touch.
pub struct CascadeTargets<'a> {
    /// Frame geometry solver.
    pub kinematics: &'a mut dyn KinematicsSolver,
    /// Left chain axis.
    pub left_axis: &'a mut dyn AxisController,
    /// Right chain axis.
    pub right_axis: &'a mut dyn AxisController,
    /// Z axis.
    pub z_axis: &'a mut dyn AxisController,
    /// Machine state flags.
    pub flags: &'a mut MachineFlags,
}
