//! Port module for port-stepper.
//!
//! Register access, bit masks, single pins, and atomic pin groups.

mod group;
mod level;
mod mask;
mod pin;
mod register;

pub use group::{PinGroup, MAX_GROUP_PINS};
pub use level::{GroupLevel, GroupMode, Level, Mode, Uniformity};
pub use mask::BitMask;
pub use pin::{Pin, PortPin, SetMode};
#[cfg(target_has_atomic = "ptr")]
pub use register::{SimRegister, SimulatedPort};
pub use register::{MmioRegister, PortRegisters, Register};
