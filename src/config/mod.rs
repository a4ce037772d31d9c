//! Configuration module for port-stepper.
//!
//! Provides types for loading and validating step pulse generator
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod generator;
#[cfg(feature = "std")]
mod loader;
mod system;
pub mod units;
mod validation;

pub use generator::GeneratorConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Period, StepsPerSec, MAX_STEP_RATE};
