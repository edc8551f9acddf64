//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! the seeded `World` (engine settings, parameters and airfoil included)
//! and the frame loop settings the binary runs with.

use crate::configuration::config::{AirfoilConfig, AirfoilShape, RunConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::airfoil::Airfoil;
use crate::simulation::engine::Engine;
use crate::simulation::geometry::Vec2;
use crate::simulation::params::Parameters;
use crate::simulation::world::World;

pub struct Scenario {
    pub world: World,
    pub run: RunConfig,
}

/// Airfoil described by the `airfoil` section
pub fn build_airfoil(cfg: &AirfoilConfig) -> SimResult<Airfoil> {
    let alpha = cfg.alpha_deg.to_radians();
    match cfg.shape {
        AirfoilShape::Naca2412 => Airfoil::naca2412(cfg.left, cfg.bottom, cfg.width, alpha),
        AirfoilShape::Legacy => Airfoil::legacy_profile(cfg.left, cfg.bottom, cfg.width, alpha),
        AirfoilShape::Custom => {
            if cfg.vertices.is_empty() {
                return Err(SimError::InvalidConfig("custom airfoil needs a vertex list".to_string()));
            }
            // custom vertices are taken in world coordinates as given
            let foil = Airfoil::from_vertices(cfg.vertices.iter().map(|v| Vec2::new(v[0], v[1])).collect())?;
            // containment cannot see vertical edges
            if foil.shape.has_vertical_edge() {
                return Err(SimError::InvalidConfig(
                    "custom airfoil must not have vertical edges".to_string(),
                ));
            }
            Ok(foil)
        }
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        if cfg.run.steps_per_frame == 0 {
            return Err(SimError::InvalidConfig("steps_per_frame must be at least 1".to_string()));
        }

        // Engine (runtime) from EngineConfig
        let engine = Engine::from(&cfg.engine);

        // Parameters (runtime) from WorldConfig
        let parameters = Parameters::from(&cfg.world);

        let airfoil = build_airfoil(&cfg.airfoil)?;
        let world = World::new(airfoil, parameters, engine)?;

        Ok(Self { world, run: cfg.run })
    }
}
