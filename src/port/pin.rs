//! Single-pin capability.
//!
//! A pin is a bit position inside one port's register triple. Every write
//! goes through a critical section so the read-modify-write of the shared
//! register cannot interleave with an interrupt touching the same port.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use super::level::{Level, Mode};
use super::mask::BitMask;
use super::register::{PortRegisters, Register};

/// A resolved pin: number, bit mask, and the registers of its port.
pub trait PortPin {
    /// Register handle type of the port.
    type Register: Register;

    /// Board pin number.
    fn number(&self) -> u8;

    /// Bit of this pin within its port registers.
    fn mask(&self) -> BitMask;

    /// Registers of the port the pin belongs to.
    fn registers(&self) -> PortRegisters<Self::Register>;
}

/// Pins whose direction can be switched at runtime.
pub trait SetMode: ErrorType {
    /// Switch the pin between input and output.
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;
}

/// GPIO pin on an 8-bit port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin<R> {
    number: u8,
    mask: BitMask,
    registers: PortRegisters<R>,
}

impl<R: Register> Pin<R> {
    /// Create a pin at `bit` (0-7) of the given port.
    pub fn new(number: u8, bit: u8, registers: PortRegisters<R>) -> Self {
        Self {
            number,
            mask: BitMask::bit(bit),
            registers,
        }
    }

    /// Direction register bit.
    #[inline]
    pub fn mode(&self) -> Mode {
        if self.registers.direction.read() & self.mask.bits() != 0 {
            Mode::Output
        } else {
            Mode::Input
        }
    }

    /// Output register bit.
    #[inline]
    pub fn state(&self) -> Level {
        Level::from(self.registers.output.read() & self.mask.bits() != 0)
    }

    /// Input register bit.
    #[inline]
    pub fn value(&self) -> Level {
        Level::from(self.registers.input.read() & self.mask.bits() != 0)
    }

    /// Set the direction register bit.
    pub fn set_output(&mut self) {
        self.write_direction(Mode::Output);
    }

    /// Clear the direction register bit.
    pub fn set_input(&mut self) {
        self.write_direction(Mode::Input);
    }

    /// Drive the output register bit.
    pub fn set_state(&mut self, level: Level) {
        let mask = self.mask;
        let output = self.registers.output;
        critical_section::with(|_| output.modify(|v| mask.assign_in(v, level.is_high())));
    }

    /// Flip the output register bit.
    pub fn toggle_state(&mut self) {
        let mask = self.mask;
        let output = self.registers.output;
        critical_section::with(|_| output.modify(|v| mask.toggle_in(v)));
    }

    fn write_direction(&mut self, mode: Mode) {
        let mask = self.mask;
        let direction = self.registers.direction;
        critical_section::with(|_| direction.modify(|v| mask.assign_in(v, mode == Mode::Output)));
    }
}

impl<R: Register> PortPin for Pin<R> {
    type Register = R;

    #[inline]
    fn number(&self) -> u8 {
        self.number
    }

    #[inline]
    fn mask(&self) -> BitMask {
        self.mask
    }

    #[inline]
    fn registers(&self) -> PortRegisters<R> {
        self.registers
    }
}

impl<P: PortPin> PortPin for &P {
    type Register = P::Register;

    fn number(&self) -> u8 {
        (*self).number()
    }

    fn mask(&self) -> BitMask {
        (*self).mask()
    }

    fn registers(&self) -> PortRegisters<P::Register> {
        (*self).registers()
    }
}

impl<R> ErrorType for Pin<R> {
    type Error = Infallible;
}

impl<R: Register> SetMode for Pin<R> {
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.write_direction(mode);
        Ok(())
    }
}

impl<R: Register> InputPin for Pin<R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.value().is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.value().is_high())
    }
}

impl<R: Register> OutputPin for Pin<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_state(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_state(Level::High);
        Ok(())
    }
}

impl<R: Register> StatefulOutputPin for Pin<R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state().is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state().is_high())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.toggle_state();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::SimulatedPort;

    #[test]
    fn test_pin_touches_only_its_bit() {
        let port = SimulatedPort::new();
        port.set_output(0b1010_0000);
        let mut pin = Pin::new(13, 1, port.registers());

        pin.set_output();
        pin.set_high().unwrap();
        assert_eq!(port.direction(), 0b0000_0010);
        assert_eq!(port.output(), 0b1010_0010);

        pin.toggle().unwrap();
        assert_eq!(port.output(), 0b1010_0000);
        assert!(pin.is_set_low().unwrap());
    }

    #[test]
    fn test_pin_reads_input_register() {
        let port = SimulatedPort::new();
        let mut pin = Pin::new(4, 4, port.registers());

        port.set_input(0b0001_0000);
        assert!(pin.is_high().unwrap());
        assert_eq!(pin.value(), Level::High);

        port.set_input(0b1110_1111);
        assert!(pin.is_low().unwrap());
    }
}
