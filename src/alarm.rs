//! Process-wide alarm flags.
//!
//! Raised from the boot path and from the realtime loop. Setting a flag is a
//! single atomic OR, so concurrent raises never lose each other's bits.
//! Nothing in this crate clears a flag once set.

use core::sync::atomic::{AtomicU8, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Alarm conditions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AlarmFlags: u8 {
        /// Stored axis position could not be trusted at boot
        const POSITION_LOST = 0b0000_0001;
    }
}

/// Sticky, lock-free alarm register.
///
/// Usable as a `static`:
///
/// ```
/// use machine_settings::{AlarmFlags, AlarmState};
///
/// static ALARMS: AlarmState = AlarmState::new();
///
/// ALARMS.raise(AlarmFlags::POSITION_LOST);
/// assert!(ALARMS.is_raised(AlarmFlags::POSITION_LOST));
/// ```
#[derive(Debug, Default)]
pub struct AlarmState {
    bits: AtomicU8,
}

impl AlarmState {
    /// Create a register with no alarms raised.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// OR `flags` into the register.
    pub fn raise(&self, flags: AlarmFlags) {
        self.bits.fetch_or(flags.bits(), Ordering::AcqRel);
    }

    /// Current set of raised alarms.
    pub fn flags(&self) -> AlarmFlags {
        AlarmFlags::from_bits_truncate(self.bits.load(Ordering::Acquire))
    }

    /// Whether every flag in `flags` is raised.
    pub fn is_raised(&self, flags: AlarmFlags) -> bool {
        self.flags().contains(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_clear() {
        let alarms = AlarmState::new();
        assert!(alarms.flags().is_empty());
        assert!(!alarms.is_raised(AlarmFlags::POSITION_LOST));
    }

    #[test]
    fn test_raise_is_sticky() {
        let alarms = AlarmState::new();
        alarms.raise(AlarmFlags::POSITION_LOST);
        alarms.raise(AlarmFlags::empty());

        assert!(alarms.is_raised(AlarmFlags::POSITION_LOST));
    }

    #[test]
    fn test_concurrent_raises_keep_the_bit() {
        use std::sync::Arc;

        let alarms = Arc::new(AlarmState::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let alarms = Arc::clone(&alarms);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        alarms.raise(AlarmFlags::POSITION_LOST);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(alarms.flags(), AlarmFlags::POSITION_LOST);
    }
}
