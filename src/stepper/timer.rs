//! The periodic timer that clocks pulse trains.
//!
//! There is one hardware timer and one interrupt vector, so at most one
//! generator can own them at a time. [`StepTimer`] is that single slot: it
//! holds the timer driver and the [`PulseTrain`] its interrupt advances, and
//! is checked out by a generator on init and returned when the generator is
//! released or dropped.
//!
//! # Wiring
//!
//! ```rust,ignore
//! static STEP_TIMER: StepTimer<Timer1, StepPin> = StepTimer::new(Timer1::new());
//!
//! #[interrupt]
//! fn TIMER1_COMPA() {
//!     STEP_TIMER.on_tick();
//! }
//! ```

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use embedded_hal::digital::StatefulOutputPin;

use crate::config::Period;
use crate::error::StepperError;
use crate::fmt::trace;

use super::train::PulseTrain;

/// Periodic interrupt source.
///
/// Implementations program the hardware. There is no runtime
/// attach-interrupt call: the handler is fixed at build time by the
/// application's interrupt vector, which calls [`StepTimer::on_tick`] on the
/// `static` slot holding this timer. Binding a generator to the slot is what
/// attaches its pulse train to that handler; releasing or dropping the
/// generator detaches it.
///
/// ```rust,ignore
/// struct Timer1 { /* peripheral handle */ }
///
/// impl PeriodicTimer for Timer1 {
///     fn initialize(&mut self) { /* CTC mode, enable compare-match interrupt */ }
///     fn set_period(&mut self, period: Period) { /* write OCR1A from period */ }
///     fn start(&mut self) { /* select clock source */ }
///     fn stop(&mut self) { /* clear clock source */ }
/// }
/// ```
pub trait PeriodicTimer {
    /// Bring the peripheral to a known configuration and enable its interrupt.
    fn initialize(&mut self);

    /// Set the interval between interrupts.
    fn set_period(&mut self, period: Period);

    /// Start (or restart) counting.
    fn start(&mut self);

    /// Stop counting; no interrupt fires until the next start.
    fn stop(&mut self);
}

/// Single-owner slot for the step timer and its interrupt target.
pub struct StepTimer<T, STEP> {
    timer: Mutex<RefCell<T>>,
    bound: Mutex<Cell<bool>>,
    train: PulseTrain<STEP>,
}

impl<T, STEP> StepTimer<T, STEP> {
    /// Wrap a timer driver. Usable in a `static`.
    pub const fn new(timer: T) -> Self {
        Self {
            timer: Mutex::new(RefCell::new(timer)),
            bound: Mutex::new(Cell::new(false)),
            train: PulseTrain::new(),
        }
    }

    /// Whether a generator currently owns the timer.
    pub fn is_bound(&self) -> bool {
        critical_section::with(|cs| self.bound.borrow(cs).get())
    }

    /// The pulse train advanced by this timer's interrupt.
    #[inline]
    pub fn train(&self) -> &PulseTrain<STEP> {
        &self.train
    }

    fn with_timer<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| {
            let mut timer = self.timer.borrow_ref_mut(cs);
            f(&mut *timer)
        })
    }
}

impl<T: PeriodicTimer, STEP> StepTimer<T, STEP> {
    /// Check the timer out for exclusive use.
    ///
    /// # Errors
    ///
    /// Returns [`StepperError::TimerInUse`] if another lease is alive.
    pub(crate) fn acquire(&self) -> Result<TimerLease<'_, T, STEP>, StepperError> {
        critical_section::with(|cs| {
            let bound = self.bound.borrow(cs);
            if bound.get() {
                return Err(StepperError::TimerInUse);
            }
            bound.set(true);
            Ok(TimerLease { slot: self })
        })
    }
}

impl<T, STEP: StatefulOutputPin> StepTimer<T, STEP> {
    /// Timer interrupt entry point.
    ///
    /// Call from the timer's interrupt vector. Does nothing unless a
    /// generator is bound and ticks remain.
    #[inline]
    pub fn on_tick(&self) {
        self.train.on_tick();
    }
}

/// Exclusive use of a [`StepTimer`], held by one generator.
///
/// Dropping the lease stops the timer, detaches the step pin, and frees the
/// slot.
pub(crate) struct TimerLease<'a, T: PeriodicTimer, STEP> {
    slot: &'a StepTimer<T, STEP>,
}

impl<'a, T: PeriodicTimer, STEP> TimerLease<'a, T, STEP> {
    #[inline]
    pub(crate) fn train(&self) -> &'a PulseTrain<STEP> {
        &self.slot.train
    }

    pub(crate) fn initialize(&mut self) {
        self.slot.with_timer(|t| t.initialize());
    }

    pub(crate) fn set_period(&mut self, period: Period) {
        self.slot.with_timer(|t| t.set_period(period));
    }

    pub(crate) fn start(&mut self) {
        self.slot.with_timer(|t| t.start());
    }

    pub(crate) fn stop(&mut self) {
        self.slot.with_timer(|t| t.stop());
    }
}

impl<T: PeriodicTimer, STEP> Drop for TimerLease<'_, T, STEP> {
    fn drop(&mut self) {
        self.stop();
        let _ = self.slot.train.detach();
        critical_section::with(|cs| self.slot.bound.borrow(cs).set(false));
        trace!("step timer released");
    }
}
