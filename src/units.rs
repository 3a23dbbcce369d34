//! Unit types for persisted axis positions.
//!
//! Current records count encoder steps; the pre-versioning layout stored
//! fractional sprocket rotations. Keeping them as distinct types stops one
//! from being written where the other belongs.

/// Axis position in encoder steps (absolute from origin).
///
/// Persisted as a little-endian `i32`. Counters come from the axis encoders;
/// this crate never does arithmetic on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Steps(pub i32);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Axis position in sprocket rotations, as written by the legacy layout.
///
/// There is no conversion to [`Steps`]: the rotation count was derived from
/// encoder resolution or distance-per-rotation at the time it was written,
/// and either may have changed since.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Rotations(pub f32);

impl Rotations {
    /// Create a new Rotations value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}
