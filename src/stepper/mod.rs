//! Stepper module for port-stepper.
//!
//! Provides the interrupt-driven step pulse generator and the single timer
//! slot it binds to.

mod builder;
mod generator;
mod state;
mod timer;
mod train;

pub use builder::GeneratorBuilder;
pub use generator::StepPulseGenerator;
pub use state::{Direction, GeneratorState};
pub use timer::{PeriodicTimer, StepTimer};
pub use train::PulseTrain;
