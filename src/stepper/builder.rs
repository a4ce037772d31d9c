//! Builder pattern for StepPulseGenerator.

use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::config::{GeneratorConfig, Period, StepsPerSec, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::port::SetMode;

use super::generator::StepPulseGenerator;
use super::timer::{PeriodicTimer, StepTimer};

/// Builder for creating StepPulseGenerator instances.
pub struct GeneratorBuilder<DIR, STEP>
where
    DIR: OutputPin + SetMode,
    STEP: StatefulOutputPin + SetMode,
{
    dir_pin: Option<DIR>,
    step_pin: Option<STEP>,
    name: Option<heapless::String<32>>,
    period: Option<Period>,
    rejected_rate: Option<StepsPerSec>,
    invert_direction: bool,
}

impl<DIR, STEP> Default for GeneratorBuilder<DIR, STEP>
where
    DIR: OutputPin + SetMode,
    STEP: StatefulOutputPin + SetMode,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DIR, STEP> GeneratorBuilder<DIR, STEP>
where
    DIR: OutputPin + SetMode,
    STEP: StatefulOutputPin + SetMode,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            dir_pin: None,
            step_pin: None,
            name: None,
            period: None,
            rejected_rate: None,
            invert_direction: false,
        }
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the generator name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the tick period programmed at init.
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self.rejected_rate = None;
        self
    }

    /// Set the tick period from a step rate.
    ///
    /// An out-of-range rate keeps any earlier period and makes
    /// [`init`](Self::init) fail with [`ConfigError::InvalidStepRate`].
    pub fn step_rate(mut self, rate: StepsPerSec) -> Self {
        match Period::from_step_rate(rate) {
            Some(period) => {
                self.period = Some(period);
                self.rejected_rate = None;
            }
            None => self.rejected_rate = Some(rate),
        }
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure from a GeneratorConfig.
    pub fn from_generator_config(mut self, config: &GeneratorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.invert_direction = config.invert_direction;
        match (config.period, config.steps_per_second) {
            (Some(period), _) => self.period(period),
            (None, Some(rate)) => self.step_rate(rate),
            (None, None) => self,
        }
    }

    /// Configure from SystemConfig by generator name.
    pub fn from_config(self, config: &SystemConfig, generator_name: &str) -> Result<Self> {
        let generator_config = config.generator(generator_name).ok_or_else(|| {
            Error::Config(ConfigError::GeneratorNotFound(
                heapless::String::try_from(generator_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_generator_config(generator_config))
    }

    /// Bind the generator to `timer`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin is missing, the step rate was out of range,
    /// the timer is already bound, or a pin cannot be configured.
    pub fn init<T: PeriodicTimer>(
        self,
        timer: &StepTimer<T, STEP>,
    ) -> Result<StepPulseGenerator<'_, T, DIR, STEP>> {
        if let Some(rate) = self.rejected_rate {
            return Err(Error::Config(ConfigError::InvalidStepRate(rate.value())));
        }
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingField("step_pin")))?;
        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("stepper").unwrap_or_default());

        StepPulseGenerator::bind(
            timer,
            dir_pin,
            step_pin,
            name,
            self.invert_direction,
            self.period,
        )
    }
}
