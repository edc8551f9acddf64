pub mod error;
pub mod simulation;
pub mod configuration;
pub mod export;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::geometry::{BoundingBox, Extent, Polygon, Segment, Vec2, VecExt};
pub use simulation::states::{Particle, PARTICLE_MASS, PARTICLE_RADIUS, RESTITUTION};
pub use simulation::grid::Grid;
pub use simulation::collisions::collide_particles;
pub use simulation::sat::{Contact, SatCollider};
pub use simulation::airfoil::{Airfoil, AirfoilCollision, Impact};
pub use simulation::forces::{ReactionForce, SlidingWindowVector};
pub use simulation::integrator::{integrate, Recycler};
pub use simulation::world::World;
pub use simulation::scenario::Scenario;

pub use configuration::config::{AirfoilConfig, AirfoilShape, EngineConfig, PairPolicy, RunConfig, ScenarioConfig, WorldConfig};

pub use export::frames::FrameWriter;

pub use benchmark::benchmark::bench_step;
