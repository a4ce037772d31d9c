//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::generator::GeneratorConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named generator configurations.
    #[serde(default)]
    pub generators: FnvIndexMap<String<32>, GeneratorConfig, 8>,
}

impl SystemConfig {
    /// Get a generator configuration by name.
    pub fn generator(&self, name: &str) -> Option<&GeneratorConfig> {
        self.generators
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all generator names.
    pub fn generator_names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(|s| s.as_str())
    }
}
