//! # port-stepper
//!
//! Atomic multi-pin port access and an interrupt-driven step pulse generator,
//! with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Pin groups**: Up to 8 pins of one port read and written with a single
//!   masked register access
//! - **Three-way reads**: Group reads report all-high, all-low, or mixed
//! - **Interrupt safety**: Every register read-modify-write runs inside a
//!   `critical-section` that restores the previous interrupt state
//! - **Step pulse generator**: A timer interrupt toggles STEP twice per step
//!   until the requested count is exhausted
//! - **Single timer owner**: The timer is a slot checked out by at most one
//!   generator
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use port_stepper::{Direction, GeneratorBuilder, Period, StepTimer};
//!
//! static STEP_TIMER: StepTimer<Timer1, StepPin> = StepTimer::new(Timer1::new());
//!
//! #[interrupt]
//! fn TIMER1_COMPA() {
//!     STEP_TIMER.on_tick();
//! }
//!
//! let mut stepper = GeneratorBuilder::new()
//!     .dir_pin(dir_pin)
//!     .step_pin(step_pin)
//!     .init(&STEP_TIMER)?;
//!
//! // 200 steps clockwise, 500 us per edge
//! stepper.step_with_period(200, Direction::Clockwise, Period::from_micros(500))?;
//! while stepper.is_stepping() {}
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod port;
pub mod stepper;

// Re-exports for ergonomic API
pub use config::{validate_config, GeneratorConfig, SystemConfig};
pub use error::{ConfigError, Error, GroupError, Result, StepperError};
pub use port::{GroupLevel, GroupMode, Level, Mode, Pin, PinGroup, PortPin, Register, SetMode};
pub use stepper::{
    Direction, GeneratorBuilder, GeneratorState, PeriodicTimer, StepPulseGenerator, StepTimer,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Period, StepsPerSec};
