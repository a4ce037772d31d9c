//! Unit types for timing quantities.
//!
//! One timer interrupt is one tick, and one step is two ticks (rising and
//! falling edge), so a tick period and a step rate describe the same clock.

use libm::roundf;
use serde::Deserialize;

/// Fastest step rate a [`Period`] can express (1 µs ticks).
pub const MAX_STEP_RATE: f32 = 500_000.0;

/// Timer period between two ticks, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Period(pub u32);

impl Period {
    /// Create a period from microseconds.
    #[inline]
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// Get the raw value in microseconds.
    #[inline]
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// Duration of one full step (two ticks), in microseconds.
    #[inline]
    pub const fn step_micros(self) -> u64 {
        self.0 as u64 * 2
    }

    /// Tick period producing `rate`, rounded to the nearest microsecond.
    ///
    /// Returns `None` for non-finite, non-positive, or too fast rates.
    pub fn from_step_rate(rate: StepsPerSec) -> Option<Self> {
        if !rate.is_valid() {
            return None;
        }
        let us = roundf(1_000_000.0 / (2.0 * rate.0));
        if us < 1.0 || us > u32::MAX as f32 {
            return None;
        }
        Some(Self(us as u32))
    }

    /// Step rate produced by this period.
    ///
    /// A zero period yields a zero rate.
    pub fn step_rate(self) -> StepsPerSec {
        if self.0 == 0 {
            StepsPerSec(0.0)
        } else {
            StepsPerSec(1_000_000.0 / (2.0 * self.0 as f32))
        }
    }
}

/// Step rate in full steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Finite, positive, and no faster than [`MAX_STEP_RATE`].
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0 && self.0 <= MAX_STEP_RATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_step_rate() {
        // 1000 steps/s = 2000 ticks/s = 500 us per tick
        assert_eq!(Period::from_step_rate(StepsPerSec(1000.0)), Some(Period(500)));
        // 3 steps/s: 166666.67 us rounds up
        assert_eq!(Period::from_step_rate(StepsPerSec(3.0)), Some(Period(166_667)));
        assert_eq!(Period::from_step_rate(StepsPerSec(MAX_STEP_RATE)), Some(Period(1)));
    }

    #[test]
    fn test_invalid_step_rates() {
        assert_eq!(Period::from_step_rate(StepsPerSec(0.0)), None);
        assert_eq!(Period::from_step_rate(StepsPerSec(-10.0)), None);
        assert_eq!(Period::from_step_rate(StepsPerSec(f32::NAN)), None);
        assert_eq!(Period::from_step_rate(StepsPerSec(MAX_STEP_RATE * 2.0)), None);
    }

    #[test]
    fn test_step_rate_round_trip() {
        let period = Period::from_micros(250);
        assert_eq!(period.step_micros(), 500);
        assert!((period.step_rate().value() - 2000.0).abs() < 0.01);
        assert_eq!(Period(0).step_rate(), StepsPerSec(0.0));
    }
}
