//! End-to-end: TOML configuration to a running pulse train.

mod common;

use common::{fire, SimTimer};
use port_stepper::port::{Pin, SimRegister, SimulatedPort};
use port_stepper::{
    parse_config, ConfigError, Direction, Error, GeneratorBuilder, Level, Period, PinGroup,
    StepTimer,
};

const CONFIG: &str = r#"
[generators.x_axis]
name = "X-Axis"
steps_per_second = 1000.0

[generators.feeder]
name = "Feeder"
period_us = 400
invert_direction = true
"#;

#[test]
fn config_to_pulses() {
    let config = parse_config(CONFIG).unwrap();
    let names: Vec<&str> = config.generator_names().collect();
    assert_eq!(names, ["x_axis", "feeder"]);

    let port = SimulatedPort::new();
    let (timer, log) = SimTimer::new();
    let slot = StepTimer::new(timer);

    let mut stepper = GeneratorBuilder::new()
        .from_config(&config, "x_axis")
        .unwrap()
        .dir_pin(Pin::new(2, 2, port.registers()))
        .step_pin(Pin::new(3, 3, port.registers()))
        .init(&slot)
        .unwrap();

    assert_eq!(stepper.name(), "X-Axis");
    // 1000 steps/s is 2000 ticks/s
    assert_eq!(log.borrow().period, Some(Period::from_micros(500)));

    stepper
        .step_with_period(25, Direction::Clockwise, Period::from_micros(100))
        .unwrap();
    assert_eq!(log.borrow().period, Some(Period::from_micros(100)));

    let mut rising = 0;
    let mut last = port.output() & 0b1000 != 0;
    while stepper.is_stepping() {
        fire(&slot, &log, 1);
        let now = port.output() & 0b1000 != 0;
        if now && !last {
            rising += 1;
        }
        last = now;
    }

    assert_eq!(rising, 25);
    assert!(!last);
}

#[test]
fn unknown_generator_name() {
    let config = parse_config(CONFIG).unwrap();
    let result =
        GeneratorBuilder::<Pin<SimRegister<'_>>, Pin<SimRegister<'_>>>::new().from_config(&config, "z_axis");

    match result {
        Err(Error::Config(ConfigError::GeneratorNotFound(name))) => assert_eq!(name, "z_axis"),
        _ => panic!("expected GeneratorNotFound"),
    }
}

#[test]
fn group_enables_driver_then_generator_steps() {
    let config = parse_config(CONFIG).unwrap();

    // Enable lines on one port, step/dir on another
    let control = SimulatedPort::new();
    let motion = SimulatedPort::new();

    let mut enable = PinGroup::new(&[
        Pin::new(8, 0, control.registers()),
        Pin::new(9, 1, control.registers()),
    ])
    .unwrap();
    enable.ensure_valid().unwrap();
    enable.set_output_high();

    let (timer, log) = SimTimer::new();
    let slot = StepTimer::new(timer);
    let mut feeder = GeneratorBuilder::new()
        .from_config(&config, "feeder")
        .unwrap()
        .dir_pin(Pin::new(4, 4, motion.registers()))
        .step_pin(Pin::new(5, 5, motion.registers()))
        .init(&slot)
        .unwrap();

    feeder.resume();
    feeder.step(2, Direction::Clockwise).unwrap();
    // Inverted: clockwise drives DIR low
    assert_eq!(motion.output() & 0b1_0000, 0);

    fire(&slot, &log, 4);
    assert!(feeder.is_stopped());

    enable.set_low();
    control.set_input(control.output());
    assert!(enable.is(Level::Low));
    assert_eq!(control.direction(), 0b11);
}
