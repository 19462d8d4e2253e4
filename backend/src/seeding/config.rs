//! Seeding configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub(crate) const DEFAULT_COUNT: usize = 10;
pub(crate) const DEFAULT_RNG_SEED: u64 = 0x5EED;

/// Controls whether and how sample animals are inserted at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHELTER_SEED")]
pub struct SeedSettings {
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Number of animals to generate.
    pub count: Option<usize>,
    /// RNG seed; the same value always yields the same animals.
    pub rng_seed: Option<u64>,
}

impl SeedSettings {
    /// Enabled settings with explicit values, mostly for tests and tooling.
    pub fn enabled_with(count: usize, rng_seed: u64) -> Self {
        Self {
            enabled: true,
            count: Some(count),
            rng_seed: Some(rng_seed),
        }
    }

    pub fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_COUNT)
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed.unwrap_or(DEFAULT_RNG_SEED)
    }
}
