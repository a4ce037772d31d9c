//! Step pulse generator configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Period, StepsPerSec};

/// Complete generator configuration from TOML.
///
/// Timing is given either as a tick period or as a step rate, not both.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Timer period per tick (half step) in microseconds.
    #[serde(default, rename = "period_us")]
    pub period: Option<Period>,

    /// Step rate in full steps per second.
    #[serde(default)]
    pub steps_per_second: Option<StepsPerSec>,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

impl GeneratorConfig {
    /// Resolved tick period.
    ///
    /// An explicit `period_us` wins over `steps_per_second`. Returns `None`
    /// when neither is set or the step rate is out of range.
    pub fn tick_period(&self) -> Option<Period> {
        self.period
            .or_else(|| self.steps_per_second.and_then(Period::from_step_rate))
    }
}
