//! Simultaneous operations on pins of one port.
//!
//! A [`PinGroup`] folds up to eight pins into a single bit mask over their
//! shared registers, so a whole group changes state or direction with one
//! register write.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use heapless::Vec;

use crate::error::GroupError;
use crate::fmt::{trace, warning};

use super::level::{GroupLevel, GroupMode, Level, Mode};
use super::mask::BitMask;
use super::pin::{PortPin, SetMode};
use super::register::{PortRegisters, Register};

/// Maximum number of pins in a group (one 8-bit port).
pub const MAX_GROUP_PINS: usize = 8;

/// Group of pins on the same port, read and written as one.
///
/// Members are expected to share one port. If they do not, construction
/// still succeeds but [`is_valid`](Self::is_valid) reports `false`, and
/// every register access goes to the first member's port. Check it (or call
/// [`ensure_valid`](Self::ensure_valid)) before driving hardware.
///
/// # Example
///
/// ```rust,ignore
/// let mut bus = PinGroup::new(&[d4, d5, d6, d7])?;
/// bus.ensure_valid()?;
/// bus.set_output_low();
/// bus.set_high();
/// assert!(bus.is(Level::High));
/// ```
#[derive(Debug, Clone)]
pub struct PinGroup<R> {
    numbers: Vec<u8, MAX_GROUP_PINS>,
    mask: BitMask,
    registers: PortRegisters<R>,
    valid: bool,
}

impl<R: Register> PinGroup<R> {
    /// Build a group from resolved pins.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Empty`] for no pins and
    /// [`GroupError::TooManyPins`] for more than [`MAX_GROUP_PINS`]. Pins on
    /// different ports are not an error; see [`is_valid`](Self::is_valid).
    pub fn new<P>(pins: &[P]) -> Result<Self, GroupError>
    where
        P: PortPin<Register = R>,
    {
        let first = pins.first().ok_or(GroupError::Empty)?;
        if pins.len() > MAX_GROUP_PINS {
            return Err(GroupError::TooManyPins(pins.len()));
        }

        let registers = first.registers();
        let port = registers.direction.address();
        let mut numbers = Vec::new();
        let mut mask = BitMask::EMPTY;
        let mut valid = true;

        for pin in pins {
            if pin.registers().direction.address() != port {
                valid = false;
            }
            mask = mask | pin.mask();
            // Length was checked above
            let _ = numbers.push(pin.number());
        }

        if valid {
            trace!("pin group: {} pins, mask {=u8:#b}", numbers.len(), mask.bits());
        } else {
            warning!("pin group spans several ports, mask {=u8:#b}", mask.bits());
        }

        Ok(Self {
            numbers,
            mask,
            registers,
            valid,
        })
    }

    /// Pin numbers in construction order.
    #[inline]
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// Combined bit mask of all members.
    #[inline]
    pub fn mask(&self) -> BitMask {
        self.mask
    }

    /// Complement of [`mask`](Self::mask).
    #[inline]
    pub fn inverse_mask(&self) -> u8 {
        self.mask.inverse()
    }

    /// Registers of the group's port (the first member's).
    #[inline]
    pub fn registers(&self) -> PortRegisters<R> {
        self.registers
    }

    /// `true` iff every member shares the first member's direction register.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Precondition check for callers that propagate errors.
    pub fn ensure_valid(&self) -> Result<(), GroupError> {
        if self.valid {
            Ok(())
        } else {
            Err(GroupError::MixedPorts)
        }
    }

    // Reads

    /// Direction of the group from the direction register.
    #[inline]
    pub fn mode(&self) -> GroupMode {
        self.mask.classify(self.registers.direction.read()).into()
    }

    /// Driven state of the group from the output register.
    #[inline]
    pub fn state(&self) -> GroupLevel {
        self.mask.classify(self.registers.output.read()).into()
    }

    /// Input value of the group from the input register.
    #[inline]
    pub fn value(&self) -> GroupLevel {
        self.mask.classify(self.registers.input.read()).into()
    }

    /// `true` if every member reads `level`.
    ///
    /// A mixed group is neither equal nor unequal to any level, so both
    /// this and [`is_not`](Self::is_not) return `false` for it.
    pub fn is(&self, level: Level) -> bool {
        self.value().level() == Some(level)
    }

    /// `true` if every member reads the opposite of `level`.
    pub fn is_not(&self, level: Level) -> bool {
        self.value().level() == Some(level.toggled())
    }

    // Generic writes

    /// Set direction and output state in one critical section.
    pub fn set(&mut self, mode: Mode, level: Level) {
        self.write(|mask, regs| {
            regs.direction.modify(|v| mask.assign_in(v, mode == Mode::Output));
            regs.output.modify(|v| mask.assign_in(v, level.is_high()));
        });
    }

    /// Set the direction of every member.
    pub fn set_mode(&mut self, mode: Mode) {
        self.write(|mask, regs| {
            regs.direction.modify(|v| mask.assign_in(v, mode == Mode::Output));
        });
    }

    /// Set the output state of every member.
    pub fn set_state(&mut self, level: Level) {
        self.write(|mask, regs| {
            regs.output.modify(|v| mask.assign_in(v, level.is_high()));
        });
    }

    // Input

    /// Make every member an input.
    pub fn set_input(&mut self) {
        self.set_mode(Mode::Input);
    }

    /// Enable pull-ups (output register bits set while input).
    pub fn set_pullup_on(&mut self) {
        self.set_state(Level::High);
    }

    /// Disable pull-ups.
    pub fn set_pullup_off(&mut self) {
        self.set_state(Level::Low);
    }

    /// Make every member an input with pull-up enabled.
    pub fn set_input_pullup_on(&mut self) {
        self.set(Mode::Input, Level::High);
    }

    /// Make every member an input with pull-up disabled.
    pub fn set_input_pullup_off(&mut self) {
        self.set(Mode::Input, Level::Low);
    }

    // Output

    /// Make every member an output.
    pub fn set_output(&mut self) {
        self.set_mode(Mode::Output);
    }

    /// Drive every member high.
    pub fn set_high(&mut self) {
        self.set_state(Level::High);
    }

    /// Drive every member low.
    pub fn set_low(&mut self) {
        self.set_state(Level::Low);
    }

    /// Make every member an output driven high.
    pub fn set_output_high(&mut self) {
        self.set(Mode::Output, Level::High);
    }

    /// Make every member an output driven low.
    pub fn set_output_low(&mut self) {
        self.set(Mode::Output, Level::Low);
    }

    // Toggle

    /// Flip the direction of every member.
    pub fn toggle_mode(&mut self) {
        self.write(|mask, regs| regs.direction.modify(|v| mask.toggle_in(v)));
    }

    /// Flip the output state of every member.
    pub fn toggle_state(&mut self) {
        self.write(|mask, regs| regs.output.modify(|v| mask.toggle_in(v)));
    }

    /// Run a register mutation with interrupts masked.
    ///
    /// The previous interrupt state is restored on exit, so this nests inside
    /// an outer critical section.
    #[inline]
    fn write<F>(&mut self, f: F)
    where
        F: FnOnce(BitMask, &PortRegisters<R>),
    {
        let mask = self.mask;
        let regs = &self.registers;
        critical_section::with(|_| f(mask, regs));
    }
}

impl<R> ErrorType for PinGroup<R> {
    type Error = Infallible;
}

impl<R: Register> SetMode for PinGroup<R> {
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        PinGroup::set_mode(self, mode);
        Ok(())
    }
}

impl<R: Register> InputPin for PinGroup<R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.value() == GroupLevel::AllHigh)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.value() == GroupLevel::AllLow)
    }
}

impl<R: Register> OutputPin for PinGroup<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        PinGroup::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        PinGroup::set_high(self);
        Ok(())
    }
}

impl<R: Register> StatefulOutputPin for PinGroup<R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state() == GroupLevel::AllHigh)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state() == GroupLevel::AllLow)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.toggle_state();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{Pin, SimulatedPort};

    #[test]
    fn test_mask_and_numbers() {
        let port = SimulatedPort::new();
        let pins = [
            Pin::new(8, 0, port.registers()),
            Pin::new(10, 2, port.registers()),
            Pin::new(13, 5, port.registers()),
        ];

        let group = PinGroup::new(&pins).unwrap();

        assert!(group.is_valid());
        assert_eq!(group.numbers(), &[8, 10, 13]);
        assert_eq!(group.mask().bits(), 0b0010_0101);
        assert_eq!(group.inverse_mask(), 0b1101_1010);
    }

    #[test]
    fn test_construction_limits() {
        let port = SimulatedPort::new();
        let none: [Pin<crate::port::SimRegister<'_>>; 0] = [];
        assert_eq!(PinGroup::new(&none).unwrap_err(), GroupError::Empty);

        let nine: [Pin<_>; 9] = core::array::from_fn(|i| Pin::new(i as u8, (i % 8) as u8, port.registers()));
        assert_eq!(PinGroup::new(&nine).unwrap_err(), GroupError::TooManyPins(9));
    }

    #[test]
    fn test_mixed_ports_flagged() {
        let port_b = SimulatedPort::new();
        let port_d = SimulatedPort::new();
        let pins = [Pin::new(8, 0, port_b.registers()), Pin::new(4, 4, port_d.registers())];

        let group = PinGroup::new(&pins).unwrap();

        assert!(!group.is_valid());
        assert_eq!(group.ensure_valid(), Err(GroupError::MixedPorts));
        assert_eq!(group.mask().bits(), 0b0001_0001);
    }

    #[test]
    fn test_single_critical_section_write() {
        let port = SimulatedPort::new();
        let pins = [Pin::new(2, 2, port.registers()), Pin::new(3, 3, port.registers())];
        let mut group = PinGroup::new(&pins).unwrap();

        group.set_output_high();

        // One write per register touched
        assert_eq!(port.write_count(), 2);
        assert_eq!(port.direction(), 0b0000_1100);
        assert_eq!(port.output(), 0b0000_1100);
        assert_eq!(group.state(), GroupLevel::AllHigh);
        assert_eq!(group.mode(), GroupMode::AllOutput);
    }

    #[test]
    fn test_reads_do_not_write() {
        let port = SimulatedPort::new();
        let pins = [Pin::new(0, 0, port.registers()), Pin::new(1, 1, port.registers())];
        let group = PinGroup::new(&pins).unwrap();

        let _ = group.state();
        let _ = group.value();
        let _ = group.mode();
        let _ = group.is(Level::High);

        assert_eq!(port.write_count(), 0);
    }
}
