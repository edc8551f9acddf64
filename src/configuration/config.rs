//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]  – pair resolution policy, particle density, grid cell size, seed
//! - [`WorldConfig`]   – domain extent, thermal speed and wind
//! - [`AirfoilConfig`] – airfoil shape, placement, chord width and angle of attack
//! - [`RunConfig`]     – frame loop and output settings for the binary
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   pair_policy: "unique"   # or "legacy"
//!   density: 10.0           # particles per unit area
//!   seed: 42
//!
//! world:
//!   width: 128.0
//!   height: 72.0
//!   max_particle_speed: 0.0005
//!   wind: [0.11, 0.0]
//!
//! airfoil:
//!   shape: "naca2412"       # "legacy" or "custom"
//!   left: 16.0
//!   bottom: 36.0
//!   width: 32.0
//!   alpha_deg: 10.0
//!
//! run:
//!   frames: 600
//!   steps_per_frame: 10
//!   output_dir: "out"
//! ```
//!
//! Everything except `world` and `airfoil` has defaults.

use serde::Deserialize;

use crate::simulation::states::PARTICLE_RADIUS;

/// How the broad phase treats particle pairs that share more than one cell
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairPolicy {
    #[serde(rename = "legacy")] // buckets keep repeated samples, pairs resolve once per co-occurrence
    Legacy,

    #[default]
    #[serde(rename = "unique")] // one bucket entry per cell, each pair resolves at most once per step
    Unique,
}

/// Which vertex table the airfoil is built from
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AirfoilShape {
    #[default]
    #[serde(rename = "naca2412")]
    Naca2412,

    #[serde(rename = "legacy")] // coarse 12-point profile
    Legacy,

    #[serde(rename = "custom")] // vertices given in the scenario
    Custom,
}

/// Engine-level configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub pair_policy: PairPolicy,
    #[serde(default = "default_density")]
    pub density: f64, // particles per unit of world area
    #[serde(default = "default_cell_extent")]
    pub cell_extent: f64, // grid cell side, at least one particle diameter
    #[serde(default)]
    pub seed: u64, // deterministic seed to make runs reproducible
    pub threads: Option<usize>, // rayon pool size, None = rayon default
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pair_policy: PairPolicy::default(),
            density: default_density(),
            cell_extent: default_cell_extent(),
            seed: 0,
            threads: None,
        }
    }
}

/// Simulation domain and particle seeding speeds
#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub max_particle_speed: f64, // bound on the random (thermal) speed component
    #[serde(default = "default_wind")]
    pub wind: [f64; 2], // ambient wind velocity added to every seeded particle
}

#[derive(Deserialize, Debug, Clone)]
pub struct AirfoilConfig {
    #[serde(default)]
    pub shape: AirfoilShape,
    pub left: f64, // x of the leading edge before rotation
    pub bottom: f64, // y offset of the normalized profile
    pub width: f64, // chord length in world units
    #[serde(default)]
    pub alpha_deg: f64, // angle of attack, degrees, positive = nose up
    #[serde(default)]
    pub vertices: Vec<[f64; 2]>, // only read for `custom`
}

/// Frame loop settings used by the binary
#[derive(Deserialize, Debug, Clone)]
pub struct RunConfig {
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_true")]
    pub write_positions: bool, // one positions_NNNN.csv per frame
    #[serde(default = "default_force_window")]
    pub force_window: usize, // frames in the running force average
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            steps_per_frame: default_steps_per_frame(),
            output_dir: default_output_dir(),
            write_positions: true,
            force_window: default_force_window(),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub world: WorldConfig,
    pub airfoil: AirfoilConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

fn default_density() -> f64 {
    10.0
}

fn default_cell_extent() -> f64 {
    2.0 * PARTICLE_RADIUS
}

fn default_wind() -> [f64; 2] {
    [0.0, 0.0]
}

fn default_frames() -> usize {
    600
}

fn default_steps_per_frame() -> usize {
    10
}

fn default_output_dir() -> String {
    "out".to_string()
}

fn default_true() -> bool {
    true
}

fn default_force_window() -> usize {
    30
}
