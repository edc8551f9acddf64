//! Physical parameters of the simulated domain
//!
//! Speeds are in world units per step, and should keep particles moving
//! well under one diameter per step or collisions get skipped.

use crate::configuration::config::WorldConfig;
use super::geometry::Vec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub width: f64, // domain extent along x
    pub height: f64, // domain extent along y
    pub max_particle_speed: f64, // bound on the random velocity component
    pub wind: Vec2, // ambient velocity given to seeded and recycled particles
}

impl From<&WorldConfig> for Parameters {
    fn from(cfg: &WorldConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            max_particle_speed: cfg.max_particle_speed,
            wind: Vec2::new(cfg.wind[0], cfg.wind[1]),
        }
    }
}
