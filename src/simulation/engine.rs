//! High-level runtime engine settings
//!
//! Selects how colliding pairs are deduplicated, how densely the domain is
//! seeded, the grid cell size and the random seed used when building and
//! stepping a `World`

use crate::configuration::config::{EngineConfig, PairPolicy};

#[derive(Debug, Clone)]
pub struct Engine {
    pub pair_policy: PairPolicy, // legacy = resolve per co-occurrence, unique = once per step
    pub density: f64, // particles per unit of world area
    pub cell_extent: f64, // grid cell side, clamped to the particle diameter
    pub seed: u64, // deterministic seed
}

impl Default for Engine {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        Self {
            pair_policy: cfg.pair_policy,
            density: cfg.density,
            cell_extent: cfg.cell_extent,
            seed: cfg.seed,
        }
    }
}
