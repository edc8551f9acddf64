//! Time integration and out-of-domain recycling
//!
//! Particles advance by explicit Euler with an implicit unit time step.
//! Any particle that leaves the domain afterwards is recycled: its x wraps
//! back into the domain, it gets a fresh random height clear of the airfoil
//! and a new velocity of wind plus bounded jitter. The population size
//! never changes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::geometry::{BoundingBox, Polygon, Vec2, VecExt};
use super::params::Parameters;
use super::states::Particle;

/// Advance every particle by its velocity
pub fn integrate(particles: &mut [Particle]) {
    particles.par_iter_mut().for_each(Particle::integrate);
}

/// Independent generator for one particle within one step
fn particle_rng(step_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(step_seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Bring `x` into `[0, width)` by whole-width shifts
fn wrap(mut x: f64, width: f64) -> f64 {
    while x < 0.0 {
        x += width;
    }
    while x >= width {
        x -= width;
    }
    x
}

/// Places particles inside the domain, away from the airfoil
pub struct Recycler<'a> {
    pub domain: BoundingBox, // [0, width) x [0, height)
    airfoil: &'a Polygon,
    max_speed: f64,
    wind: Vec2,
}

impl<'a> Recycler<'a> {
    pub fn new(params: &Parameters, airfoil: &'a Polygon) -> Self {
        Self {
            domain: BoundingBox::new(0.0, 0.0, params.width, params.height),
            airfoil,
            max_speed: params.max_particle_speed,
            wind: params.wind,
        }
    }

    pub fn is_out_of_world(&self, particle: &Particle) -> bool {
        !self.domain.contains(particle.x)
    }

    fn jitter<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let m = self.max_speed;
        Vec2::new(rng.gen_range(-m..=m), rng.gen_range(-m..=m))
    }

    /// Initial seeding: uniform position outside the airfoil, velocity of
    /// wind plus a random direction at full thermal speed
    pub fn place_randomly<R: Rng>(&self, particle: &mut Particle, rng: &mut R) {
        let (w, h) = (self.domain.width(), self.domain.height());
        let mut x = Vec2::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
        while self.airfoil.contains(x) {
            x = Vec2::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
        }
        particle.x = x;
        particle.v = self.wind + self.jitter(rng).unit() * self.max_speed;
    }

    /// Re-enter one particle that left the domain
    pub fn recycle<R: Rng>(&self, particle: &mut Particle, rng: &mut R) {
        let x = wrap(particle.x.x, self.domain.width());
        let h = self.domain.height();

        let mut pos = Vec2::new(x, rng.gen_range(0.0..h));
        while self.airfoil.contains(pos) {
            pos.y = rng.gen_range(0.0..h);
        }
        particle.x = pos;
        particle.v = self.wind + self.jitter(rng);
    }

    /// Recycle every out-of-domain particle. Each particle draws from its
    /// own generator derived from `step_seed`, so the outcome does not
    /// depend on how the work is scheduled. Returns how many were recycled.
    pub fn recycle_all(&self, particles: &mut [Particle], step_seed: u64) -> usize {
        particles
            .par_iter_mut()
            .enumerate()
            .filter(|(_, p)| self.is_out_of_world(p))
            .map(|(i, p)| {
                self.recycle(p, &mut particle_rng(step_seed, i));
                1
            })
            .sum()
    }
}
