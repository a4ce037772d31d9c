//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::units::Period;
use super::{GeneratorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every generator:
/// - exactly one of `period_us` and `steps_per_second` is set
/// - the period is non-zero
/// - the step rate converts to a period of at least 1 µs
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, generator) in config.generators.iter() {
        validate_generator(name.as_str(), generator)?;
    }

    Ok(())
}

fn validate_generator(name: &str, config: &GeneratorConfig) -> Result<()> {
    let key = || heapless::String::try_from(name).unwrap_or_default();

    match (config.period, config.steps_per_second) {
        (Some(_), Some(_)) => Err(Error::Config(ConfigError::AmbiguousTiming(key()))),
        (None, None) => Err(Error::Config(ConfigError::MissingTiming(key()))),
        (Some(period), None) => {
            if period.as_micros() == 0 {
                return Err(Error::Config(ConfigError::InvalidPeriod(0)));
            }
            Ok(())
        }
        (None, Some(rate)) => {
            if Period::from_step_rate(rate).is_none() {
                return Err(Error::Config(ConfigError::InvalidStepRate(rate.value())));
            }
            Ok(())
        }
    }
}
