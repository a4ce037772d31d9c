//! Pin group behaviour against a simulated port.

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use proptest::prelude::*;

use port_stepper::port::{BitMask, Pin, SimRegister, SimulatedPort};
use port_stepper::{GroupError, GroupLevel, GroupMode, Level, Mode, PinGroup};

fn group_of<'p>(port: &'p SimulatedPort, bits: &[u8]) -> PinGroup<SimRegister<'p>> {
    let pins: Vec<Pin<SimRegister<'p>>> = bits
        .iter()
        .map(|&bit| Pin::new(bit + 8, bit, port.registers()))
        .collect();
    PinGroup::new(&pins).unwrap()
}

#[test]
fn output_round_trip() {
    let port = SimulatedPort::new();
    let mut group = group_of(&port, &[4, 5, 6, 7]);

    group.set_output_low();
    assert_eq!(group.mode(), GroupMode::AllOutput);
    assert_eq!(group.state(), GroupLevel::AllLow);

    group.set_high();
    assert_eq!(port.output(), 0xF0);
    assert_eq!(group.state(), GroupLevel::AllHigh);

    // Input register follows the driven lines on real hardware
    port.set_input(port.output());
    assert!(group.is(Level::High));
    assert!(group.is_not(Level::Low));
    assert!(!group.is(Level::Low));
}

#[test]
fn mixed_group_is_neither_level() {
    let port = SimulatedPort::new();
    let group = group_of(&port, &[0, 1]);

    port.set_input(0b01);
    assert_eq!(group.value(), GroupLevel::Mixed);
    assert_eq!(group.value().level(), None);

    for level in [Level::High, Level::Low] {
        assert!(!group.is(level));
        assert!(!group.is_not(level));
    }
}

#[test]
fn pins_on_two_ports_make_invalid_group() {
    let port_b = SimulatedPort::new();
    let port_d = SimulatedPort::new();
    let pins = [
        Pin::new(8, 0, port_b.registers()),
        Pin::new(2, 2, port_d.registers()),
    ];

    let mut group = PinGroup::new(&pins).unwrap();
    assert!(!group.is_valid());
    assert_eq!(group.ensure_valid(), Err(GroupError::MixedPorts));

    // Accesses go to the first member's port
    group.set_output_high();
    assert_eq!(port_b.output(), 0b0000_0101);
    assert_eq!(port_d.output(), 0);
}

#[test]
fn mode_reads_reflect_direction_register() {
    let port = SimulatedPort::new();
    let mut group = group_of(&port, &[2, 3]);

    assert_eq!(group.mode(), GroupMode::AllInput);
    assert_eq!(group.mode().mode(), Some(Mode::Input));

    port.set_direction(0b0000_0100);
    assert_eq!(group.mode(), GroupMode::Mixed);
    assert_eq!(group.mode().mode(), None);

    group.toggle_mode();
    assert_eq!(port.direction(), 0b0000_1000);

    group.set_output();
    assert_eq!(group.mode().mode(), Some(Mode::Output));
    group.set_input();
    assert_eq!(group.mode(), GroupMode::AllInput);
}

#[test]
fn pullups_and_toggles() {
    let port = SimulatedPort::new();
    let mut group = group_of(&port, &[1, 6]);

    group.set_input_pullup_on();
    assert_eq!(port.direction(), 0);
    assert_eq!(port.output(), 0b0100_0010);

    group.set_pullup_off();
    assert_eq!(port.output(), 0);

    group.set_pullup_on();
    group.set_input_pullup_off();
    assert_eq!(port.output(), 0);

    group.set(Mode::Output, Level::Low);
    group.toggle_state();
    assert_eq!(group.state(), GroupLevel::AllHigh);
    group.toggle_state();
    assert_eq!(group.state(), GroupLevel::AllLow);
}

#[test]
fn hal_traits_drive_whole_group() {
    let port = SimulatedPort::new();
    let mut group = group_of(&port, &[0, 3]);
    group.set_output();

    OutputPin::set_high(&mut group).unwrap();
    assert!(StatefulOutputPin::is_set_high(&mut group).unwrap());

    StatefulOutputPin::toggle(&mut group).unwrap();
    assert!(StatefulOutputPin::is_set_low(&mut group).unwrap());

    port.set_input(0b0000_1001);
    assert!(InputPin::is_high(&mut group).unwrap());
    port.set_input(0b0000_0001);
    assert!(!InputPin::is_high(&mut group).unwrap());
    assert!(!InputPin::is_low(&mut group).unwrap());
}

#[test]
fn too_many_pins_rejected() {
    let port = SimulatedPort::new();
    let pins: Vec<_> = (0..9u8)
        .map(|bit| Pin::new(bit, bit % 8, port.registers()))
        .collect();

    assert_eq!(PinGroup::new(&pins).unwrap_err(), GroupError::TooManyPins(9));
}

proptest! {
    #[test]
    fn writes_never_touch_foreign_bits(
        members in 1u8..=255,
        direction in any::<u8>(),
        output in any::<u8>(),
        op in 0usize..10,
    ) {
        let port = SimulatedPort::new();
        port.set_direction(direction);
        port.set_output(output);

        let bits: Vec<u8> = (0..8).filter(|b| members & (1 << b) != 0).collect();
        let mut group = group_of(&port, &bits);
        let foreign = BitMask(members).inverse();

        match op {
            0 => group.set_output_high(),
            1 => group.set_output_low(),
            2 => group.set_input_pullup_on(),
            3 => group.set_input_pullup_off(),
            4 => group.toggle_mode(),
            5 => group.toggle_state(),
            6 => group.set_high(),
            7 => group.set_low(),
            8 => group.set_output(),
            _ => group.set_input(),
        }

        prop_assert_eq!(port.direction() & foreign, direction & foreign);
        prop_assert_eq!(port.output() & foreign, output & foreign);
    }

    #[test]
    fn set_then_read_back(members in 1u8..=255, high in any::<bool>()) {
        let port = SimulatedPort::new();
        let bits: Vec<u8> = (0..8).filter(|b| members & (1 << b) != 0).collect();
        let mut group = group_of(&port, &bits);

        let level = Level::from(high);
        group.set(Mode::Output, level);

        prop_assert_eq!(group.state().level(), Some(level));
        prop_assert_eq!(group.mode(), GroupMode::AllOutput);
    }
}
