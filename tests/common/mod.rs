//! Shared test harness: a simulated periodic timer.
//!
//! The harness only delivers ticks while the timer is logically running,
//! mirroring hardware where a stopped timer raises no interrupt.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::StatefulOutputPin;
use port_stepper::{Period, PeriodicTimer, StepTimer};

/// Everything the generator asked the timer to do.
#[derive(Debug, Default, Clone)]
pub struct TimerLog {
    pub initialized: bool,
    pub running: bool,
    pub period: Option<Period>,
    pub starts: usize,
    pub stops: usize,
}

/// Timer driver that records calls into a shared [`TimerLog`].
pub struct SimTimer {
    log: Rc<RefCell<TimerLog>>,
}

impl SimTimer {
    pub fn new() -> (Self, Rc<RefCell<TimerLog>>) {
        let log = Rc::new(RefCell::new(TimerLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl PeriodicTimer for SimTimer {
    fn initialize(&mut self) {
        let mut log = self.log.borrow_mut();
        log.initialized = true;
        log.running = true;
    }

    fn set_period(&mut self, period: Period) {
        self.log.borrow_mut().period = Some(period);
    }

    fn start(&mut self) {
        let mut log = self.log.borrow_mut();
        log.running = true;
        log.starts += 1;
    }

    fn stop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.running = false;
        log.stops += 1;
    }
}

/// Raise `n` timer interrupts; returns how many reached the handler.
pub fn fire<STEP: StatefulOutputPin>(
    slot: &StepTimer<SimTimer, STEP>,
    log: &Rc<RefCell<TimerLog>>,
    n: usize,
) -> usize {
    let mut delivered = 0;
    for _ in 0..n {
        if log.borrow().running {
            slot.on_tick();
            delivered += 1;
        }
    }
    delivered
}
