//! Interrupt-driven step pulse generator.
//!
//! Generic over embedded-hal 1.0 pin types and a [`PeriodicTimer`].

use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::config::Period;
use crate::error::{Error, Result, StepperError};
use crate::fmt::debug;
use crate::port::{Mode, SetMode};

use super::state::{Direction, GeneratorState};
use super::timer::{PeriodicTimer, StepTimer, TimerLease};

/// Step pulse generator bound to the step timer.
///
/// Each requested step becomes two timer ticks: the interrupt toggles the
/// STEP pin once per tick until the train is exhausted, with no help from
/// the main flow.
///
/// Generic over:
/// - `T`: Timer driver (must implement [`PeriodicTimer`])
/// - `DIR`: DIR pin type (must implement `OutputPin` and [`SetMode`])
/// - `STEP`: STEP pin type (must implement `StatefulOutputPin` and [`SetMode`])
pub struct StepPulseGenerator<'a, T, DIR, STEP>
where
    T: PeriodicTimer,
    DIR: OutputPin + SetMode,
    STEP: StatefulOutputPin + SetMode,
{
    /// Exclusive use of the timer and its pulse train.
    lease: TimerLease<'a, T, STEP>,

    /// DIR pin.
    dir_pin: DIR,

    /// Last direction written to the DIR pin.
    direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Last period programmed into the timer.
    period: Option<Period>,

    /// Timer stopped by `pause`.
    paused: bool,

    /// Generator name for logging/debugging.
    name: heapless::String<32>,
}

impl<'a, T, DIR, STEP> StepPulseGenerator<'a, T, DIR, STEP>
where
    T: PeriodicTimer,
    DIR: OutputPin + SetMode,
    STEP: StatefulOutputPin + SetMode,
{
    /// Bind to `timer` and enter the paused state.
    ///
    /// Makes both pins outputs, moves the STEP pin into the timer's pulse
    /// train, initializes and stops the timer.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError::TimerInUse`] if another generator holds the
    /// timer, or [`StepperError::PinError`] if a pin cannot be configured.
    pub fn init(timer: &'a StepTimer<T, STEP>, dir_pin: DIR, step_pin: STEP) -> Result<Self> {
        Self::bind(timer, dir_pin, step_pin, heapless::String::new(), false, None)
    }

    pub(crate) fn bind(
        timer: &'a StepTimer<T, STEP>,
        mut dir_pin: DIR,
        mut step_pin: STEP,
        name: heapless::String<32>,
        invert_direction: bool,
        period: Option<Period>,
    ) -> Result<Self> {
        let mut lease = timer.acquire()?;

        dir_pin
            .set_mode(Mode::Output)
            .map_err(|_| StepperError::PinError)?;
        step_pin
            .set_mode(Mode::Output)
            .map_err(|_| StepperError::PinError)?;

        lease.initialize();
        lease.train().attach(step_pin);
        lease.stop();

        let mut generator = Self {
            lease,
            dir_pin,
            direction: None,
            invert_direction,
            period: None,
            paused: false,
            name,
        };
        if let Some(period) = period {
            generator.set_period(period);
        }
        generator.pause();

        debug!("generator bound, paused");
        Ok(generator)
    }

    /// Get the generator name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Program the interval between ticks.
    ///
    /// Not guarded: changing the period mid-train changes the rate of the
    /// running train. Use [`step_with_period`](Self::step_with_period) to
    /// change it only between trains.
    pub fn set_period(&mut self, period: Period) {
        self.lease.set_period(period);
        self.period = Some(period);
        debug!("period set to {=u32} us", period.as_micros());
    }

    /// Last programmed tick period, if any.
    #[inline]
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    /// Last direction written to the DIR pin.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Queue `steps` steps in `direction`.
    ///
    /// Drives the DIR pin and loads `2 * steps` ticks. Does not start the
    /// timer: a paused generator holds the train until
    /// [`resume`](Self::resume).
    ///
    /// # Errors
    ///
    /// Returns [`StepperError::Busy`] while a train is running (nothing is
    /// changed), [`StepperError::StepCountOverflow`] if `2 * steps` does not
    /// fit in `u32`, or [`StepperError::PinError`] if the DIR pin fails.
    pub fn step(&mut self, steps: u32, direction: Direction) -> Result<()> {
        self.ensure_idle()?;
        let ticks = Self::ticks_for(steps)?;

        self.set_direction(direction)?;
        self.lease.train().load(ticks);

        debug!("queued {=u32} steps {}", steps, direction);
        Ok(())
    }

    /// Resume the timer, program `period`, then queue the steps.
    ///
    /// A rejected request leaves the timer state and period untouched.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Self::step).
    pub fn step_with_period(&mut self, steps: u32, direction: Direction, period: Period) -> Result<()> {
        self.ensure_idle()?;
        Self::ticks_for(steps)?;

        self.resume();
        self.set_period(period);
        self.step(steps, direction)
    }

    /// Abandon the current train and return the whole steps not taken.
    ///
    /// The timer is stopped while the count is cut. A half-finished step
    /// keeps its falling edge (one tick) so the STEP line ends low, and the
    /// timer is started again: after a stop the generator runs, it is not
    /// paused.
    pub fn stop(&mut self) -> u32 {
        self.lease.stop();
        let ticks = self.lease.train().truncate();
        self.lease.start();
        self.paused = false;

        let remaining = ticks / 2;
        debug!("stopped with {=u32} steps remaining", remaining);
        remaining
    }

    /// Stop the timer and hold any pending ticks.
    pub fn pause(&mut self) {
        self.lease.stop();
        self.paused = true;
    }

    /// Restart the timer after [`pause`](Self::pause).
    ///
    /// No-op unless paused.
    pub fn resume(&mut self) {
        if self.paused {
            self.lease.start();
            self.paused = false;
        }
    }

    /// Ticks remain in the current train.
    #[inline]
    pub fn is_stepping(&self) -> bool {
        self.remaining_ticks() > 0
    }

    /// No ticks remain.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.remaining_ticks() == 0
    }

    /// Timer held by [`pause`](Self::pause).
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whole steps left in the current train.
    #[inline]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining_ticks() / 2
    }

    /// Ticks (half steps) left in the current train.
    #[inline]
    pub fn remaining_ticks(&self) -> u32 {
        self.lease.train().remaining_ticks()
    }

    /// Current run state.
    pub fn state(&self) -> GeneratorState {
        if self.paused {
            GeneratorState::Paused
        } else if self.is_stepping() {
            GeneratorState::Stepping
        } else {
            GeneratorState::Idle
        }
    }

    /// Stop the timer, free it for another generator, and hand back the pins.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError::Unbound`] if the STEP pin was taken out of the
    /// pulse train behind the generator's back.
    pub fn release(self) -> Result<(DIR, STEP)> {
        let Self {
            mut lease, dir_pin, ..
        } = self;

        lease.stop();
        let step_pin = lease.train().detach().ok_or(StepperError::Unbound)?;
        debug!("generator released");
        Ok((dir_pin, step_pin))
    }

    fn ensure_idle(&self) -> Result<()> {
        let ticks = self.remaining_ticks();
        if ticks > 0 {
            return Err(Error::Stepper(StepperError::Busy {
                remaining_steps: ticks / 2,
            }));
        }
        Ok(())
    }

    fn ticks_for(steps: u32) -> Result<u32> {
        steps
            .checked_mul(2)
            .ok_or(Error::Stepper(StepperError::StepCountOverflow(steps)))
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        let level = direction.level(self.invert_direction);
        self.dir_pin
            .set_state(level.into())
            .map_err(|_| StepperError::PinError)?;
        self.direction = Some(direction);
        Ok(())
    }
}
