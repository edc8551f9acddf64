//! The simulated world: a fixed population of particles around one airfoil
//!
//! `World::step` runs one tick as a straight pipeline:
//!
//! 1. partition: rebuild the grid from current positions
//! 2. particle-particle pass over grid cells
//! 3. airfoil pass over particles, summing the reaction force
//! 4. integrate positions
//! 5. recycle particles that left the domain
//!
//! Each stage fans out over rayon and finishes before the next starts.
//! The reaction force keeps accumulating across steps until the caller
//! resets it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use super::airfoil::{Airfoil, AirfoilCollision};
use super::collisions::collide_particles;
use super::engine::Engine;
use super::forces::ReactionForce;
use super::geometry::Vec2;
use super::grid::Grid;
use super::integrator::{integrate, Recycler};
use super::params::Parameters;
use super::states::Particle;

pub struct World {
    engine: Engine, // fixed at construction, the grid is sized from it
    parameters: Parameters,
    airfoil: Airfoil,
    particles: Vec<Particle>, // fixed-size arena, everything else refers to it by index
    grid: Grid,
    force: ReactionForce,
    rng: StdRng,
    steps: u64,
}

fn validate(parameters: &Parameters, engine: &Engine) -> SimResult<()> {
    let (w, h) = (parameters.width, parameters.height);
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(SimError::InvalidDomain { width: w, height: h });
    }
    if !(engine.density.is_finite() && engine.density > 0.0) {
        return Err(SimError::InvalidConfig(format!("density must be positive, got {}", engine.density)));
    }
    let s = parameters.max_particle_speed;
    if !(s.is_finite() && s >= 0.0) {
        return Err(SimError::InvalidConfig(format!("max particle speed must be non-negative, got {s}")));
    }
    Ok(())
}

impl World {
    /// Build a world seeded with `width * height * density` particles placed
    /// uniformly outside the airfoil
    pub fn new(airfoil: Airfoil, parameters: Parameters, engine: Engine) -> SimResult<Self> {
        validate(&parameters, &engine)?;

        let count = (parameters.width * parameters.height * engine.density) as usize;
        let mut rng = StdRng::seed_from_u64(engine.seed);
        let mut particles = vec![Particle::default(); count];
        {
            let recycler = Recycler::new(&parameters, &airfoil.shape);
            for p in particles.iter_mut() {
                recycler.place_randomly(p, &mut rng);
            }
        }

        let world = Self::assemble(airfoil, parameters, engine, particles, rng);
        info!(
            particles = world.particles.len(),
            width = world.parameters.width,
            height = world.parameters.height,
            cells = world.grid.len(),
            "world created"
        );
        Ok(world)
    }

    /// Build a world around a caller-supplied population
    pub fn with_particles(
        airfoil: Airfoil,
        parameters: Parameters,
        engine: Engine,
        particles: Vec<Particle>,
    ) -> SimResult<Self> {
        validate(&parameters, &engine)?;
        let rng = StdRng::seed_from_u64(engine.seed);
        Ok(Self::assemble(airfoil, parameters, engine, particles, rng))
    }

    fn assemble(airfoil: Airfoil, parameters: Parameters, engine: Engine, particles: Vec<Particle>, rng: StdRng) -> Self {
        let grid = Grid::new(parameters.width, parameters.height, engine.cell_extent);
        let force = ReactionForce::new(airfoil.num_edges());
        Self { engine, parameters, airfoil, particles, grid, force, rng, steps: 0 }
    }

    // =========================================================================================
    // Step pipeline
    // =========================================================================================

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        self.partition();
        let pairs = collide_particles(&mut self.particles, &self.grid, self.engine.pair_policy);
        let hits = self.collide_with_airfoil();
        integrate(&mut self.particles);
        let recycled = self.recycle();

        self.steps += 1;
        debug!(step = self.steps, pairs, hits, recycled, momentum = self.momentum(), "step");
    }

    fn partition(&mut self) {
        self.grid.clear();
        self.grid.populate(&self.particles, self.engine.pair_policy);
    }

    /// Resolve airfoil hits and fold their forces into the accumulator.
    /// Returns the number of hits.
    fn collide_with_airfoil(&mut self) -> usize {
        let collider = AirfoilCollision::new(&self.airfoil);
        let num_edges = self.airfoil.num_edges();

        let (hits, sum) = self
            .particles
            .par_iter_mut()
            .fold(
                || (0usize, ReactionForce::new(num_edges)),
                |(hits, mut acc), p| match collider.collide(p) {
                    Some(impact) => {
                        acc.record(&impact);
                        (hits + 1, acc)
                    }
                    None => (hits, acc),
                },
            )
            .reduce(
                || (0usize, ReactionForce::new(num_edges)),
                |(ha, a), (hb, b)| (ha + hb, a.merge(b)),
            );

        self.force.absorb(&sum);
        hits
    }

    fn recycle(&mut self) -> usize {
        let step_seed: u64 = self.rng.gen();
        let recycler = Recycler::new(&self.parameters, &self.airfoil.shape);
        recycler.recycle_all(&mut self.particles, step_seed)
    }

    // =========================================================================================
    // Readouts
    // =========================================================================================

    /// Reaction force accumulated since the last reset
    pub fn force_on_foil(&self) -> Vec2 {
        self.force.net
    }

    /// Accumulated force per airfoil edge, same order as the polygon edges
    pub fn edge_forces(&self) -> &[Vec2] {
        &self.force.edges
    }

    /// Zero the net and per-edge accumulators
    pub fn reset_force_on_foil(&mut self) {
        self.force.reset();
    }

    /// Sum of `mass * |v|` over all particles. Not a conserved quantity,
    /// only a rough stability indicator.
    pub fn momentum(&self) -> f64 {
        self.particles.par_iter().map(Particle::momentum).sum()
    }

    /// Particles per unit of area not covered by the airfoil's bounding box
    pub fn density(&self) -> f64 {
        let area = self.parameters.width * self.parameters.height - self.airfoil.shape.bbox().area();
        self.particles.len() as f64 / area
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn airfoil(&self) -> &Airfoil {
        &self.airfoil
    }

    /// Grid as populated by the most recent step
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One `[x, y, vx, vy]` row per particle
    pub fn particle_records(&self) -> impl Iterator<Item = [f64; 4]> + '_ {
        self.particles.iter().map(|p| [p.x.x, p.x.y, p.v.x, p.v.y])
    }

    /// Current net force as an `[x, y]` row
    pub fn force_record(&self) -> [f64; 2] {
        [self.force.net.x, self.force.net.y]
    }
}
