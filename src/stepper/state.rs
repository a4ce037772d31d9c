//! Generator run state and step direction.

use crate::port::Level;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (DIR pin high unless inverted).
    Clockwise,
    /// Counter-clockwise (DIR pin low unless inverted).
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// DIR pin level for this direction.
    #[inline]
    pub fn level(self, invert: bool) -> Level {
        let high = matches!(self, Direction::Clockwise) != invert;
        Level::from(high)
    }
}

impl From<Level> for Direction {
    /// Direction selected by a raw DIR level, without inversion.
    fn from(level: Level) -> Self {
        match level {
            Level::High => Direction::Clockwise,
            Level::Low => Direction::CounterClockwise,
        }
    }
}

/// Run state of a step pulse generator.
///
/// ```text
///   Paused --resume--> Idle/Stepping
///   Idle   --step----> Stepping --last tick--> Idle
///   any    --pause---> Paused
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeneratorState {
    /// No ticks pending, timer running; accepts step requests.
    Idle,
    /// Ticks pending, timer running; step requests are rejected.
    Stepping,
    /// Timer stopped; pending ticks are held.
    Paused,
}

impl GeneratorState {
    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            GeneratorState::Idle => "Idle",
            GeneratorState::Stepping => "Stepping",
            GeneratorState::Paused => "Paused",
        }
    }
}
