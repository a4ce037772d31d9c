//! Pulse train state shared with the timer interrupt.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use embedded_hal::digital::StatefulOutputPin;

/// Remaining ticks and the step pin they toggle.
///
/// Written by the main flow when a train is loaded or truncated, and
/// consumed one tick at a time by [`on_tick`](Self::on_tick) from interrupt
/// context. Two ticks make one step.
pub struct PulseTrain<STEP> {
    ticks: Mutex<Cell<u32>>,
    step_pin: Mutex<RefCell<Option<STEP>>>,
}

impl<STEP> PulseTrain<STEP> {
    /// An empty train with no step pin attached.
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
            step_pin: Mutex::new(RefCell::new(None)),
        }
    }

    /// Ticks left in the current train.
    ///
    /// May lag the interrupt by one tick; the count only moves toward zero
    /// while a train runs.
    #[inline]
    pub fn remaining_ticks(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Whether a step pin is attached.
    pub fn is_attached(&self) -> bool {
        critical_section::with(|cs| self.step_pin.borrow_ref(cs).is_some())
    }

    /// Replace the tick count.
    pub(crate) fn load(&self, ticks: u32) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(ticks));
    }

    /// Drop all whole steps, keeping a pending falling edge.
    ///
    /// Returns the tick count before truncation.
    pub(crate) fn truncate(&self) -> u32 {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            let before = ticks.get();
            ticks.set(before & 1);
            before
        })
    }

    pub(crate) fn attach(&self, pin: STEP) {
        critical_section::with(|cs| {
            self.ticks.borrow(cs).set(0);
            self.step_pin.borrow_ref_mut(cs).replace(pin);
        });
    }

    pub(crate) fn detach(&self) -> Option<STEP> {
        critical_section::with(|cs| {
            self.ticks.borrow(cs).set(0);
            self.step_pin.borrow_ref_mut(cs).take()
        })
    }
}

impl<STEP> Default for PulseTrain<STEP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP: StatefulOutputPin> PulseTrain<STEP> {
    /// Advance the train by one tick.
    ///
    /// Toggles the step pin and consumes a tick if any remain; otherwise does
    /// nothing. Runs in interrupt context, so it does no other work.
    #[inline]
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            let remaining = ticks.get();
            if remaining == 0 {
                return;
            }
            if let Some(pin) = self.step_pin.borrow_ref_mut(cs).as_mut() {
                if pin.toggle().is_ok() {
                    ticks.set(remaining - 1);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{Pin, SimulatedPort};

    #[test]
    fn test_tick_without_pin_is_noop() {
        let train: PulseTrain<Pin<crate::port::SimRegister<'_>>> = PulseTrain::new();
        train.load(4);
        train.on_tick();
        assert_eq!(train.remaining_ticks(), 4);
    }

    #[test]
    fn test_ticks_toggle_pin() {
        let port = SimulatedPort::new();
        let train = PulseTrain::new();
        train.attach(Pin::new(9, 1, port.registers()));
        train.load(3);

        train.on_tick();
        assert_eq!(port.output(), 0b10);
        train.on_tick();
        assert_eq!(port.output(), 0);
        train.on_tick();
        train.on_tick();

        assert_eq!(train.remaining_ticks(), 0);
        assert_eq!(port.output(), 0b10);
    }

    #[test]
    fn test_truncate_keeps_odd_tick() {
        let train: PulseTrain<Pin<crate::port::SimRegister<'_>>> = PulseTrain::new();
        train.load(13);
        assert_eq!(train.truncate(), 13);
        assert_eq!(train.remaining_ticks(), 1);

        train.load(12);
        assert_eq!(train.truncate(), 12);
        assert_eq!(train.remaining_ticks(), 0);
    }
}
