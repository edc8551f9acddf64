//! Particle state
//!
//! Every particle shares the same mass and radius; only position and
//! velocity vary. Particles live in a fixed-length arena owned by the
//! `World` and are referred to everywhere else by index.

use super::geometry::{BoundingBox, Extent, Vec2, VecExt};

pub const PARTICLE_MASS: f64 = 1.0;
pub const PARTICLE_RADIUS: f64 = 0.5;

/// Coefficient of restitution, e = 1 is perfectly elastic
pub const RESTITUTION: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: Vec2, // position
    pub v: Vec2, // velocity
}

impl Particle {
    pub fn new(x: Vec2, v: Vec2) -> Self {
        Self { x, v }
    }

    pub fn mass(&self) -> f64 {
        PARTICLE_MASS
    }

    pub fn radius(&self) -> f64 {
        PARTICLE_RADIUS
    }

    pub fn bbox(&self) -> BoundingBox {
        let r = self.radius();
        BoundingBox::new(self.x.x - r, self.x.y - r, self.x.x + r, self.x.y + r)
    }

    pub fn dist_sqr(&self, other: &Particle) -> f64 {
        (self.x - other.x).norm_squared()
    }

    /// Touching counts as colliding
    pub fn is_colliding_with(&self, other: &Particle) -> bool {
        let reach = self.radius() + other.radius();
        self.dist_sqr(other) <= reach * reach
    }

    /// Velocities of both particles after an elastic collision along the
    /// line joining their centers
    pub fn resolve_collision_with(&self, other: &Particle) -> (Vec2, Vec2) {
        // n points from other to self; zero when the centers coincide
        let n = (self.x - other.x).unit();
        let v_rel = self.v - other.v;

        // Ignore rotational inertia
        let j = -(1.0 + RESTITUTION) * v_rel.dot(&n) / (1.0 / self.mass() + 1.0 / other.mass());

        // self receives +j along n, other receives -j
        (self.v + (j / self.mass()) * n, other.v - (j / other.mass()) * n)
    }

    /// Collide with `other`, writing both new velocities immediately
    pub fn collide_with(&mut self, other: &mut Particle) {
        let (v_self, v_other) = self.resolve_collision_with(other);
        self.v = v_self;
        other.v = v_other;
    }

    /// Explicit Euler with an implicit unit time step
    pub fn integrate(&mut self) {
        self.x += self.v;
    }

    /// Scalar momentum, mass * |v|
    pub fn momentum(&self) -> f64 {
        self.mass() * self.v.norm()
    }

    /// Interval covered by the particle's disc projected onto a unit axis
    pub fn projected_extrema(&self, axis: &Vec2) -> Extent {
        let c = self.x.dot(axis);
        Extent { min: c - self.radius(), max: c + self.radius() }
    }
}
