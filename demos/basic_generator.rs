//! Basic step pulse generator example.
//!
//! Wires a static `StepTimer` to a timer interrupt and runs pulse trains on a
//! simulated port. A background thread stands in for the hardware timer and
//! calls the interrupt handler once per period while the timer runs.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use port_stepper::port::{Pin, SimRegister, SimulatedPort};
use port_stepper::{Direction, GeneratorBuilder, Period, PeriodicTimer, PinGroup, StepTimer};

static PORT_B: SimulatedPort = SimulatedPort::new();
static PORT_D: SimulatedPort = SimulatedPort::new();

static TIMER_RUNNING: AtomicBool = AtomicBool::new(false);
static TIMER_PERIOD_US: AtomicU32 = AtomicU32::new(1000);

/// Stand-in for a hardware timer peripheral.
struct DemoTimer;

impl PeriodicTimer for DemoTimer {
    fn initialize(&mut self) {
        TIMER_RUNNING.store(true, Ordering::SeqCst);
    }

    fn set_period(&mut self, period: Period) {
        TIMER_PERIOD_US.store(period.as_micros(), Ordering::SeqCst);
    }

    fn start(&mut self) {
        TIMER_RUNNING.store(true, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        TIMER_RUNNING.store(false, Ordering::SeqCst);
    }
}

type DemoPin = Pin<SimRegister<'static>>;

static STEP_TIMER: StepTimer<DemoTimer, DemoPin> = StepTimer::new(DemoTimer);

/// Timer compare-match interrupt.
fn timer_isr() {
    STEP_TIMER.on_tick();
}

fn wait_idle<F: Fn() -> bool>(stepping: F) {
    while stepping() {
        thread::sleep(Duration::from_millis(1));
    }
}

fn main() {
    println!("=== Basic Step Pulse Generator Example ===\n");

    thread::spawn(|| loop {
        if TIMER_RUNNING.load(Ordering::SeqCst) {
            timer_isr();
        }
        let period = TIMER_PERIOD_US.load(Ordering::SeqCst);
        thread::sleep(Duration::from_micros(u64::from(period)));
    });

    // Driver enable lines share port D: one masked write drives both
    let mut enable = PinGroup::new(&[
        Pin::new(2, 2, PORT_D.registers()),
        Pin::new(3, 3, PORT_D.registers()),
    ])
    .expect("Failed to build pin group");
    enable.ensure_valid().expect("Enable pins must share a port");
    enable.set_output_low();
    println!("Enable group mask: {:#010b}", enable.mask().bits());

    let mut stepper = GeneratorBuilder::new()
        .name("demo")
        .dir_pin(Pin::new(12, 4, PORT_B.registers()))
        .step_pin(Pin::new(13, 5, PORT_B.registers()))
        .period(Period::from_micros(500))
        .init(&STEP_TIMER)
        .expect("Failed to bind generator");

    println!("Generator '{}' bound, state: {}", stepper.name(), stepper.state().name());

    // A second generator cannot take the same timer
    let second = GeneratorBuilder::new()
        .dir_pin(Pin::new(10, 2, PORT_B.registers()))
        .step_pin(Pin::new(11, 3, PORT_B.registers()))
        .init(&STEP_TIMER);
    if let Err(e) = second {
        println!("Second generator rejected: {}", e);
    }

    println!("\n=== 50 steps clockwise at 200 us per edge ===");
    stepper
        .step_with_period(50, Direction::Clockwise, Period::from_micros(200))
        .expect("Failed to queue steps");
    wait_idle(|| stepper.is_stepping());
    println!("Done, state: {}", stepper.state().name());

    println!("\n=== 1000 steps counter-clockwise, stopped early ===");
    stepper
        .step(1000, Direction::CounterClockwise)
        .expect("Failed to queue steps");
    thread::sleep(Duration::from_millis(20));
    let remaining = stepper.stop();
    println!("Stopped with {} steps not taken", remaining);
    wait_idle(|| stepper.is_stepping());
    println!("STEP line low: {}", PORT_B.output() & (1 << 5) == 0);

    enable.set_high();
    let (_dir, _step) = stepper.release().expect("Failed to release generator");
    println!("\nTimer free again: {}", !STEP_TIMER.is_bound());

    println!("\n=== Example Complete ===");
}
