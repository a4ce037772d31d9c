//! Port register access.
//!
//! A port is three 8-bit registers: the input register (pin values), the
//! output register (driven state, or pull-up enable for inputs) and the
//! direction register (set bit = output).

#[cfg(target_has_atomic = "ptr")]
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// An 8-bit port register.
///
/// Handles are cheap to copy; two handles refer to the same register iff
/// their [`address`](Register::address) is equal.
pub trait Register: Copy {
    /// Identity of the register (its bus address for MMIO).
    fn address(&self) -> usize;

    /// Read the whole register.
    fn read(&self) -> u8;

    /// Write the whole register.
    fn write(&self, value: u8);

    /// Read, transform, and write back.
    ///
    /// Not atomic on its own; callers wrap it in a critical section.
    #[inline]
    fn modify<F: FnOnce(u8) -> u8>(&self, f: F) {
        self.write(f(self.read()));
    }
}

/// The three registers of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRegisters<R> {
    /// Input (value) register.
    pub input: R,
    /// Output (state) register.
    pub output: R,
    /// Direction (mode) register.
    pub direction: R,
}

/// Memory-mapped register accessed with volatile reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioRegister {
    addr: usize,
}

#[allow(unsafe_code)]
impl MmioRegister {
    /// Wrap a register address.
    ///
    /// # Safety
    ///
    /// `addr` must be the address of a readable and writable 8-bit hardware
    /// register that stays valid for the life of the program.
    #[inline]
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }
}

#[allow(unsafe_code)]
impl Register for MmioRegister {
    #[inline]
    fn address(&self) -> usize {
        self.addr
    }

    #[inline]
    fn read(&self) -> u8 {
        // SAFETY: validity of the address is the constructor's contract.
        unsafe { core::ptr::read_volatile(self.addr as *const u8) }
    }

    #[inline]
    fn write(&self, value: u8) {
        // SAFETY: validity of the address is the constructor's contract.
        unsafe { core::ptr::write_volatile(self.addr as *mut u8, value) }
    }
}

/// Software model of a port, for host tests and simulation.
///
/// Counts register writes so tests can check that reads stay reads.
#[cfg(target_has_atomic = "ptr")]
#[derive(Debug, Default)]
pub struct SimulatedPort {
    input: AtomicU8,
    output: AtomicU8,
    direction: AtomicU8,
    writes: AtomicUsize,
}

#[cfg(target_has_atomic = "ptr")]
impl SimulatedPort {
    /// A port with every register cleared.
    pub const fn new() -> Self {
        Self {
            input: AtomicU8::new(0),
            output: AtomicU8::new(0),
            direction: AtomicU8::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Register handles for this port.
    pub fn registers(&self) -> PortRegisters<SimRegister<'_>> {
        PortRegisters {
            input: SimRegister::new(&self.input, &self.writes),
            output: SimRegister::new(&self.output, &self.writes),
            direction: SimRegister::new(&self.direction, &self.writes),
        }
    }

    /// Drive the external side of the input register.
    pub fn set_input(&self, value: u8) {
        self.input.store(value, Ordering::SeqCst);
    }

    /// Current input register contents.
    pub fn input(&self) -> u8 {
        self.input.load(Ordering::SeqCst)
    }

    /// Preload the output register without counting a write.
    pub fn set_output(&self, value: u8) {
        self.output.store(value, Ordering::SeqCst);
    }

    /// Current output register contents.
    pub fn output(&self) -> u8 {
        self.output.load(Ordering::SeqCst)
    }

    /// Preload the direction register without counting a write.
    pub fn set_direction(&self, value: u8) {
        self.direction.store(value, Ordering::SeqCst);
    }

    /// Current direction register contents.
    pub fn direction(&self) -> u8 {
        self.direction.load(Ordering::SeqCst)
    }

    /// Number of register writes made through handles.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

/// Handle to one register of a [`SimulatedPort`].
#[cfg(target_has_atomic = "ptr")]
#[derive(Debug, Clone, Copy)]
pub struct SimRegister<'a> {
    cell: &'a AtomicU8,
    writes: &'a AtomicUsize,
}

#[cfg(target_has_atomic = "ptr")]
impl<'a> SimRegister<'a> {
    fn new(cell: &'a AtomicU8, writes: &'a AtomicUsize) -> Self {
        Self { cell, writes }
    }
}

#[cfg(target_has_atomic = "ptr")]
impl Register for SimRegister<'_> {
    #[inline]
    fn address(&self) -> usize {
        self.cell as *const AtomicU8 as usize
    }

    #[inline]
    fn read(&self) -> u8 {
        self.cell.load(Ordering::SeqCst)
    }

    #[inline]
    fn write(&self, value: u8) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.cell.store(value, Ordering::SeqCst);
    }
}

#[cfg(target_has_atomic = "ptr")]
impl PartialEq for SimRegister<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

#[cfg(target_has_atomic = "ptr")]
impl Eq for SimRegister<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_registers_are_distinct() {
        let port = SimulatedPort::new();
        let regs = port.registers();

        assert_ne!(regs.input.address(), regs.output.address());
        assert_ne!(regs.output.address(), regs.direction.address());
        assert_eq!(regs.direction, port.registers().direction);
    }

    #[test]
    fn test_modify_counts_one_write() {
        let port = SimulatedPort::new();
        port.set_output(0b1000_0001);

        port.registers().output.modify(|v| v | 0b0000_0110);

        assert_eq!(port.output(), 0b1000_0111);
        assert_eq!(port.write_count(), 1);
    }
}
