//! Error types for port-stepper library.
//!
//! Provides unified error handling across configuration, pin groups, and the
//! step pulse generator.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all port-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Pin group construction or precondition error
    Group(GroupError),
    /// Step pulse generator error
    Stepper(StepperError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Generator name not found in configuration
    GeneratorNotFound(heapless::String<32>),
    /// Invalid tick period in microseconds (must be > 0)
    InvalidPeriod(u32),
    /// Invalid step rate (must be finite, > 0 and at most 500 000 steps/s)
    InvalidStepRate(f32),
    /// Both `period_us` and `steps_per_second` were given
    AmbiguousTiming(heapless::String<32>),
    /// Neither `period_us` nor `steps_per_second` was given
    MissingTiming(heapless::String<32>),
    /// Builder field left unset
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Pin group errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupError {
    /// A group needs at least one pin
    Empty,
    /// A group holds at most 8 pins (one port register)
    TooManyPins(usize),
    /// Group members are spread over more than one port
    MixedPorts,
}

/// Step pulse generator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// A pulse train is still running
    Busy {
        /// Whole steps left in the running train
        remaining_steps: u32,
    },
    /// The timer has already been checked out by another generator
    TimerInUse,
    /// Step count does not fit in the tick counter
    StepCountOverflow(u32),
    /// The step pin is no longer attached to the timer
    Unbound,
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Group(e) => write!(f, "Pin group error: {}", e),
            Error::Stepper(e) => write!(f, "Stepper error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::GeneratorNotFound(name) => write!(f, "Generator '{}' not found", name),
            ConfigError::InvalidPeriod(v) => write!(f, "Invalid period: {} us. Must be > 0", v),
            ConfigError::InvalidStepRate(v) => {
                write!(f, "Invalid step rate: {}. Must be > 0 and at most 500000 steps/s", v)
            }
            ConfigError::AmbiguousTiming(name) => write!(
                f,
                "Generator '{}' sets both period_us and steps_per_second",
                name
            ),
            ConfigError::MissingTiming(name) => write!(
                f,
                "Generator '{}' needs one of period_us or steps_per_second",
                name
            ),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::Empty => write!(f, "Pin group is empty"),
            GroupError::TooManyPins(n) => write!(f, "Pin group has {} pins, max 8", n),
            GroupError::MixedPorts => write!(f, "Pin group members do not share one port"),
        }
    }
}

impl fmt::Display for StepperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepperError::Busy { remaining_steps } => {
                write!(f, "Generator busy, {} steps remaining", remaining_steps)
            }
            StepperError::TimerInUse => write!(f, "Step timer already bound to a generator"),
            StepperError::StepCountOverflow(steps) => {
                write!(f, "Step count {} exceeds the tick counter range", steps)
            }
            StepperError::Unbound => write!(f, "Step pin is not attached to the timer"),
            StepperError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<GroupError> for Error {
    fn from(e: GroupError) -> Self {
        Error::Group(e)
    }
}

impl From<StepperError> for Error {
    fn from(e: StepperError) -> Self {
        Error::Stepper(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for GroupError {}

#[cfg(feature = "std")]
impl std::error::Error for StepperError {}
