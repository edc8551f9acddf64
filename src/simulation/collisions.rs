//! Particle-particle collision pass (narrow phase over grid buckets)
//!
//! Every cell is scanned in parallel. Within a cell each pair of distinct
//! indices is tested for overlap and resolved with an elastic impulse that
//! writes both velocities immediately.
//!
//! A particle can sit in several cells, so two workers may reach for the
//! same particle at once. Each particle gets its own lock for the duration
//! of the pass and a pair is always locked lower index first, which keeps
//! exclusion scoped to the pair without a global lock or deadlock.
//!
//! Positions do not change during this pass, only velocities.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rayon::prelude::*;

use crate::configuration::config::PairPolicy;
use super::grid::Grid;
use super::states::Particle;

type Guarded<'a> = Mutex<&'a mut Particle>;

fn lock<'g, 'a>(m: &'g Guarded<'a>) -> MutexGuard<'g, &'a mut Particle> {
    // a poisoned lock means another worker already panicked; the step is lost either way
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Resolve all overlapping pairs found in the grid. Returns how many pair
/// resolutions were applied.
///
/// Under `PairPolicy::Unique` a pair is resolved only in its canonical cell
/// (the lowest cell both particles occupy), so at most once per step.
/// Under `PairPolicy::Legacy` a pair is resolved once for every time it
/// co-occurs in a bucket, repeats included.
pub fn collide_particles(particles: &mut [Particle], grid: &Grid, policy: PairPolicy) -> usize {
    let guarded: Vec<Guarded<'_>> = particles.iter_mut().map(Mutex::new).collect();

    grid.cells()
        .par_iter()
        .enumerate()
        .map(|(c, cell)| collide_cell(c, cell, &guarded, grid, policy))
        .sum()
}

fn collide_cell(cell_index: usize, cell: &[usize], guarded: &[Guarded<'_>], grid: &Grid, policy: PairPolicy) -> usize {
    let mut resolved = 0;

    for (k, &i) in cell.iter().enumerate() {
        for &j in &cell[k + 1..] {
            if i == j { // duplicate entry of the same particle
                continue;
            }
            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            let mut a = lock(&guarded[lo]);
            let mut b = lock(&guarded[hi]);

            if !a.is_colliding_with(&b) {
                continue;
            }
            if policy == PairPolicy::Unique && grid.shared_cell(&a, &b) != Some(cell_index) {
                continue;
            }

            a.collide_with(&mut b);
            resolved += 1;
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::geometry::Vec2;

    fn head_on_pair() -> Vec<Particle> {
        vec![
            Particle::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)),
            Particle::new(Vec2::new(1.6, 1.0), Vec2::new(-1.0, 0.0)),
        ]
    }

    fn run(policy: PairPolicy, particles: &mut [Particle]) -> usize {
        let mut grid = Grid::new(4.0, 4.0, 1.0);
        grid.populate(particles, policy);
        collide_particles(particles, &grid, policy)
    }

    #[test]
    fn unique_policy_resolves_a_pair_once() {
        let mut ps = head_on_pair();
        assert_eq!(run(PairPolicy::Unique, &mut ps), 1);
        assert_eq!(ps[0].v, Vec2::new(-1.0, 0.0));
        assert_eq!(ps[1].v, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn legacy_policy_resolves_every_co_occurrence() {
        let mut ps = head_on_pair();
        // 2x2 entries share cell 1 and 4x4 share cell 5
        assert_eq!(run(PairPolicy::Legacy, &mut ps), 20);
        // an even number of swaps lands back on the starting velocities
        assert_eq!(ps[0].v, Vec2::new(1.0, 0.0));
        assert_eq!(ps[1].v, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn separated_particles_are_untouched() {
        let mut ps = vec![
            Particle::new(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0)),
            Particle::new(Vec2::new(1.6, 0.5), Vec2::new(-1.0, 0.0)),
        ];
        assert_eq!(run(PairPolicy::Unique, &mut ps), 0);
        assert_eq!(ps[0].v, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn momentum_vector_is_conserved_across_a_crowd() {
        let mut ps: Vec<Particle> = (0..200)
            .map(|i| {
                let f = i as f64;
                Particle::new(
                    Vec2::new((f * 0.618).fract() * 9.0 + 0.5, (f * 0.382).fract() * 9.0 + 0.5),
                    Vec2::new((f * 1.3).sin(), (f * 0.7).cos()),
                )
            })
            .collect();
        let before: Vec2 = ps.iter().map(|p| p.v * p.mass()).sum();

        let mut grid = Grid::new(10.0, 10.0, 1.0);
        grid.populate(&ps, PairPolicy::Unique);
        let resolved = collide_particles(&mut ps, &grid, PairPolicy::Unique);

        let after: Vec2 = ps.iter().map(|p| p.v * p.mass()).sum();
        assert!(resolved > 0);
        assert!((after - before).norm() < 1e-9, "momentum drifted: {:?} -> {:?}", before, after);
    }
}
