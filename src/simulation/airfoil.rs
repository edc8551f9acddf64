//! Airfoil obstacle and particle-vs-airfoil collision resolution
//!
//! The airfoil is an immovable polygon. Its shape comes from a unit-chord
//! vertex table which is normalized, rotated clockwise by the angle of
//! attack, scaled to the requested chord width and moved so that the
//! normalized profile's origin lands on (`left`, `bottom`).

use super::geometry::{Polygon, Vec2, VecExt};
use super::sat::SatCollider;
use super::states::{Particle, RESTITUTION};
use crate::error::{SimError, SimResult};

/// NACA 2412 profile (airfoiltools.com 4-digit generator), trailing edge thinned out
const NACA_2412: [(f64, f64); 26] = [
    (0.0000, 0.0000),
    (0.0092, 0.0188),
    (0.0403, 0.0373),
    (0.0920, 0.0543),
    (0.1622, 0.0679),
    (0.2478, 0.0766),
    (0.3447, 0.0792),
    (0.4480, 0.0758),
    (0.5531, 0.0681),
    (0.6557, 0.0573),
    (0.7512, 0.0448),
    (0.8356, 0.0318),
    (0.9053, 0.0198),
    (1.0001, 0.0013),
    (0.9037, -0.0080),
    (0.8335, -0.0128),
    (0.7488, -0.0184),
    (0.6534, -0.0245),
    (0.5514, -0.0306),
    (0.4474, -0.0360),
    (0.3463, -0.0399),
    (0.2522, -0.0422),
    (0.1686, -0.0417),
    (0.0990, -0.0375),
    (0.0462, -0.0292),
    (0.0126, -0.0166),
];

/// Coarse hand-drawn profile, chord of 10 units before normalization
const LEGACY_PROFILE: [(f64, f64); 12] = [
    (0.0, 0.0),
    (0.2, 0.3),
    (0.4275, 0.5),
    (1.0, 0.7),
    (1.75, 0.87),
    (2.5, 0.9),
    (4.25, 0.7),
    (10.0, -0.7),
    (5.0, -0.55),
    (1.25, -0.35),
    (0.4275, -0.3),
    (0.2, -0.2),
];

/// Effectively infinite next to a unit-mass particle
pub const AIRFOIL_MASS: f64 = 1.0e3;

#[derive(Debug, Clone)]
pub struct Airfoil {
    pub shape: Polygon,
    pub x: Vec2, // anchor, lower-left corner of the shape's bounding box
    pub v: Vec2, // always zero, the foil does not move
    pub mass: f64,
}

/// Normalize a profile table by its chord, rotate it clockwise by `alpha_rad`
/// around the leading edge, then scale and offset it into world space
fn profile_vertices(table: &[(f64, f64)], left: f64, bottom: f64, width: f64, alpha_rad: f64) -> Vec<Vec2> {
    let xmin = table.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let xmax = table.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
    let ymin = table.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let chord = xmax - xmin;

    let (sin_a, cos_a) = (-alpha_rad).sin_cos();

    table
        .iter()
        .map(|&(x, y)| {
            let xn = (x - xmin) / chord;
            let yn = (y - ymin) / chord;
            let rx = cos_a * xn - sin_a * yn;
            let ry = sin_a * xn + cos_a * yn;
            Vec2::new(rx * width + left, ry * width + bottom)
        })
        .collect()
}

impl Airfoil {
    /// Wrap an existing polygon as an immovable foil
    pub fn from_polygon(shape: Polygon) -> Self {
        let bbox = *shape.bbox();
        Self {
            shape,
            x: Vec2::new(bbox.xmin, bbox.ymin),
            v: Vec2::zeros(),
            mass: AIRFOIL_MASS,
        }
    }

    /// Foil with the given world-space vertices, used as is
    pub fn from_vertices(vertices: Vec<Vec2>) -> SimResult<Self> {
        Ok(Self::from_polygon(Polygon::new(vertices)?))
    }

    fn from_table(table: &[(f64, f64)], left: f64, bottom: f64, width: f64, alpha_rad: f64) -> SimResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SimError::InvalidConfig(format!("airfoil width must be positive, got {width}")));
        }
        Self::from_vertices(profile_vertices(table, left, bottom, width, alpha_rad))
    }

    pub fn naca2412(left: f64, bottom: f64, width: f64, alpha_rad: f64) -> SimResult<Self> {
        Self::from_table(&NACA_2412, left, bottom, width, alpha_rad)
    }

    pub fn legacy_profile(left: f64, bottom: f64, width: f64, alpha_rad: f64) -> SimResult<Self> {
        Self::from_table(&LEGACY_PROFILE, left, bottom, width, alpha_rad)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.shape.contains(p)
    }

    pub fn num_edges(&self) -> usize {
        self.shape.edges().len()
    }
}

// =========================================================================================
// Collision resolution
// =========================================================================================

/// One resolved particle hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub force: Vec2, // reaction force contribution of this hit
    pub edge: Option<usize>, // edge that supplied the contact axis, if any
}

/// Resolves particle hits against one airfoil. Borrowing the foil keeps the
/// collider cheap to build once per step and shareable across workers.
pub struct AirfoilCollision<'a> {
    foil_vel: Vec2,
    collider: SatCollider<'a>,
}

impl<'a> AirfoilCollision<'a> {
    pub fn new(foil: &'a Airfoil) -> Self {
        Self {
            foil_vel: foil.v,
            collider: SatCollider::new(&foil.shape),
        }
    }

    /// Test one particle and resolve the hit if there is one.
    /// Only the particle is written.
    pub fn collide(&self, particle: &mut Particle) -> Option<Impact> {
        let contact = self.collider.find_contact(particle)?;
        let force = self.resolve(particle, contact.translation);
        Some(Impact { force, edge: contact.edge })
    }

    /// Push the particle out along `translation` and bounce it off the
    /// infinite-mass foil. Returns `impulse * particle mass`.
    pub fn resolve(&self, particle: &mut Particle, translation: Vec2) -> Vec2 {
        particle.x += translation;

        let n = translation.unit();
        let v_rel = self.foil_vel - particle.v;

        // Ignore rotational inertia
        let a = -(1.0 + RESTITUTION) * v_rel.dot(&n);
        let impulse = n * -a;
        particle.v += impulse;

        impulse * particle.mass()
    }
}
