//! Logical pin levels, modes, and group read outcomes.

use embedded_hal::digital::PinState;

/// Logical level of a pin (state, value or direction line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0.
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// The opposite level.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// `true` for [`Level::High`].
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<PinState> for Level {
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => Level::Low,
            PinState::High => Level::High,
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// Pin direction as stored in the direction register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Direction bit clear.
    Input,
    /// Direction bit set.
    Output,
}

/// Outcome of reading the masked bits of a shared register.
///
/// A group of pins has no single boolean answer when its members disagree,
/// so reads report [`Uniformity::Mixed`] instead of picking a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Uniformity {
    /// Every masked bit is set.
    AllSet,
    /// Every masked bit is clear.
    AllClear,
    /// Masked bits disagree.
    Mixed,
}

/// Group reading of the output or input register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupLevel {
    /// All members read high.
    AllHigh,
    /// All members read low.
    AllLow,
    /// Members disagree.
    Mixed,
}

impl GroupLevel {
    /// The common level, if there is one.
    #[inline]
    pub fn level(self) -> Option<Level> {
        match self {
            GroupLevel::AllHigh => Some(Level::High),
            GroupLevel::AllLow => Some(Level::Low),
            GroupLevel::Mixed => None,
        }
    }
}

impl From<Uniformity> for GroupLevel {
    fn from(u: Uniformity) -> Self {
        match u {
            Uniformity::AllSet => GroupLevel::AllHigh,
            Uniformity::AllClear => GroupLevel::AllLow,
            Uniformity::Mixed => GroupLevel::Mixed,
        }
    }
}

/// Group reading of the direction register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupMode {
    /// All members are outputs.
    AllOutput,
    /// All members are inputs.
    AllInput,
    /// Members disagree.
    Mixed,
}

impl GroupMode {
    /// The common mode, if there is one.
    #[inline]
    pub fn mode(self) -> Option<Mode> {
        match self {
            GroupMode::AllOutput => Some(Mode::Output),
            GroupMode::AllInput => Some(Mode::Input),
            GroupMode::Mixed => None,
        }
    }
}

impl From<Uniformity> for GroupMode {
    fn from(u: Uniformity) -> Self {
        match u {
            Uniformity::AllSet => GroupMode::AllOutput,
            Uniformity::AllClear => GroupMode::AllInput,
            Uniformity::Mixed => GroupMode::Mixed,
        }
    }
}
