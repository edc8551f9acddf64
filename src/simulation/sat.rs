//! Separating-axis test of a particle (as a disc) against a convex polygon
//!
//! Candidate axes are the polygon's edge normals plus one extra axis built
//! from the vertex nearest the particle center, which covers contact at a
//! corner. The first axis with no overlap ends the test. Otherwise the axis
//! with the smallest overlap, scaled by that overlap, is the minimum
//! translation vector.
//!
//! Ref: https://www.metanetsoftware.com/technique/tutorialA.html

use super::geometry::{Extent, Polygon, Vec2, VecExt};
use super::states::Particle;

/// Minimum translation that separates a particle from the polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub translation: Vec2, // add to the particle position to push it clear
    pub overlap: f64, // penetration depth along the chosen axis
    pub edge: Option<usize>, // edge whose normal was chosen, None for the vertex axis
}

/// Overlap of two projected intervals, oriented so that moving the particle
/// along `sign * axis` by the returned distance separates them.
/// `None` when the axis separates the shapes.
fn oriented_overlap(poly: Extent, part: Extent) -> Option<(f64, f64)> {
    let push_back = part.max - poly.min; // particle leaves through the low side
    let push_forward = poly.max - part.min; // particle leaves through the high side
    let (overlap, sign) = if push_back < push_forward { (push_back, -1.0) } else { (push_forward, 1.0) };
    if overlap <= 0.0 {
        None
    } else {
        Some((overlap, sign))
    }
}

pub struct SatCollider<'a> {
    polygon: &'a Polygon,
}

impl<'a> SatCollider<'a> {
    pub fn new(polygon: &'a Polygon) -> Self {
        Self { polygon }
    }

    fn overlap_along(&self, particle: &Particle, axis: &Vec2) -> Option<(f64, f64)> {
        oriented_overlap(self.polygon.projected_extrema(axis), particle.projected_extrema(axis))
    }

    /// Axis from the nearest vertex: the perpendicular of the
    /// center-to-vertex direction
    fn vertex_axis(&self, particle: &Particle) -> Vec2 {
        let nearest = self.polygon.nearest_vertex_to(particle.x);
        (nearest - particle.x).normal().unit()
    }

    /// Minimum translation for an overlapping particle, `None` if some axis separates
    pub fn find_contact(&self, particle: &Particle) -> Option<Contact> {
        let mut best: Option<Contact> = None;

        for (i, axis) in self.polygon.edge_normals().iter().enumerate() {
            if *axis == Vec2::zeros() {
                continue;
            }
            let (overlap, sign) = self.overlap_along(particle, axis)?;
            if best.map_or(true, |b| overlap < b.overlap) {
                best = Some(Contact { translation: *axis * (sign * overlap), overlap, edge: Some(i) });
            }
        }

        let axis = self.vertex_axis(particle);
        if axis != Vec2::zeros() { // zero when the center sits exactly on a vertex
            let (overlap, sign) = self.overlap_along(particle, &axis)?;
            if best.map_or(true, |b| overlap < b.overlap) {
                best = Some(Contact { translation: axis * (sign * overlap), overlap, edge: None });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // clockwise triangle, so edge normals point outward
    fn triangle() -> Polygon {
        Polygon::new(vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0), Vec2::new(4.0, 0.0)]).unwrap()
    }

    #[test]
    fn interval_overlap_orientation() {
        let poly = Extent { min: 0.0, max: 4.0 };
        assert_eq!(oriented_overlap(poly, Extent { min: 3.5, max: 4.5 }), Some((0.5, 1.0)));
        assert_eq!(oriented_overlap(poly, Extent { min: -0.75, max: 0.25 }), Some((0.25, -1.0)));
        assert_eq!(oriented_overlap(poly, Extent { min: 4.0, max: 5.0 }), None);
    }

    #[test]
    fn far_particle_is_not_colliding() {
        let tri = triangle();
        let sat = SatCollider::new(&tri);
        let p = Particle::new(Vec2::new(-20.0, -20.0), Vec2::zeros());
        assert!(sat.find_contact(&p).is_none());

        // same shape, axes visited in a different order
        let rotated = Polygon::new(vec![Vec2::new(4.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0)]).unwrap();
        assert!(SatCollider::new(&rotated).find_contact(&p).is_none());
    }

    #[test]
    fn particle_below_base_is_pushed_down() {
        let tri = triangle();
        let sat = SatCollider::new(&tri);
        // center 0.2 below the base: the disc pokes 0.3 into the triangle
        let p = Particle::new(Vec2::new(2.0, -0.2), Vec2::zeros());
        let c = sat.find_contact(&p).unwrap();
        assert_eq!(c.edge, Some(2));
        assert!((c.overlap - 0.3).abs() < 1e-12);
        assert!((c.translation - Vec2::new(0.0, -0.3)).norm() < 1e-12);
    }

    #[test]
    fn translation_clears_the_polygon() {
        let tri = triangle();
        let sat = SatCollider::new(&tri);
        for start in [Vec2::new(2.0, 3.0), Vec2::new(1.0, 1.0), Vec2::new(3.1, 0.4), Vec2::new(2.0, 0.1)] {
            let mut p = Particle::new(start, Vec2::zeros());
            let c = sat.find_contact(&p).unwrap();
            p.x += c.translation;
            assert!(!tri.contains(p.x), "{:?} still inside after {:?}", p.x, c);
        }
    }

    #[test]
    fn closing_vertex_does_not_add_a_null_axis() {
        let sq = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 0.0),
        ])
        .unwrap();
        // 1.3 deep through the left side, deeper than the particle radius
        let p = Particle::new(Vec2::new(0.8, 2.0), Vec2::zeros());
        let c = SatCollider::new(&sq).find_contact(&p).unwrap();
        assert!((c.overlap - 1.3).abs() < 1e-12);
        assert!((c.translation - Vec2::new(-1.3, 0.0)).norm() < 1e-12, "{:?}", c);
    }
}
