//! Uniform spatial partition grid (broad phase)
//!
//! Buckets particle indices into square cells covering the world. The grid
//! is rebuilt from scratch every step. A particle goes into every cell
//! touched by the 9 sample points `{x-r, x, x+r} x {y-r, y, y+r}`, so two
//! overlapping particles always share at least one cell as long as the
//! cell extent is at least one particle diameter.

use rayon::prelude::*;
use tracing::warn;

use crate::configuration::config::PairPolicy;
use crate::error::{SimError, SimResult};
use super::geometry::Vec2;
use super::states::{Particle, PARTICLE_RADIUS};

pub type Cell = Vec<usize>;

#[derive(Debug, Clone)]
pub struct Grid {
    pub cell_extent: f64, // side length of one cell
    pub num_horiz: usize, // columns
    pub num_vert: usize, // rows
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: f64, height: f64, cell_extent: f64) -> Self {
        let min_extent = 2.0 * PARTICLE_RADIUS;
        let cell_extent = if cell_extent < min_extent {
            warn!(cell_extent, min_extent, "cell extent below particle diameter, clamping");
            min_extent
        } else {
            cell_extent
        };

        let num_horiz = (width / cell_extent).ceil().max(1.0) as usize;
        let num_vert = (height / cell_extent).ceil().max(1.0) as usize;

        Self {
            cell_extent,
            num_horiz,
            num_vert,
            cells: vec![Cell::new(); num_horiz * num_vert],
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bucket for one cell; out-of-range indices are a caller error
    pub fn cell(&self, index: usize) -> SimResult<&[usize]> {
        self.cells
            .get(index)
            .map(Vec::as_slice)
            .ok_or(SimError::CellIndexOutOfRange { index, count: self.cells.len() })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every bucket, keeping allocations
    pub fn clear(&mut self) {
        self.cells.par_iter_mut().for_each(Vec::clear);
    }

    /// Cell containing `p`, or `None` outside the grid
    pub fn cell_index_of(&self, p: Vec2) -> Option<usize> {
        let col = (p.x / self.cell_extent).floor();
        let row = (p.y / self.cell_extent).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.num_horiz || row >= self.num_vert {
            return None;
        }
        Some(row * self.num_horiz + col)
    }

    /// Cells hit by the 9 sample points, repeats included
    fn sampled_cells(&self, particle: &Particle) -> impl Iterator<Item = usize> + '_ {
        let r = particle.radius();
        let (x, y) = (particle.x.x, particle.x.y);
        let xs = [x - r, x, x + r];
        let ys = [y - r, y, y + r];
        ys.into_iter()
            .flat_map(move |yc| xs.into_iter().map(move |xc| Vec2::new(xc, yc)))
            .filter_map(move |p| self.cell_index_of(p))
    }

    /// Distinct cells a particle is registered in, ascending
    pub fn footprint(&self, particle: &Particle) -> Vec<usize> {
        let mut cells: Vec<usize> = self.sampled_cells(particle).collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    /// Lowest-indexed cell both particles are registered in
    pub fn shared_cell(&self, a: &Particle, b: &Particle) -> Option<usize> {
        let fb = self.footprint(b);
        self.footprint(a).into_iter().find(|c| fb.binary_search(c).is_ok())
    }

    /// Cells a particle is inserted into under `policy`. `Legacy` keeps
    /// one entry per sample, so a particle can appear several times in the
    /// same bucket.
    fn insertion_cells(&self, particle: &Particle, policy: PairPolicy) -> Vec<usize> {
        match policy {
            PairPolicy::Legacy => self.sampled_cells(particle).collect(),
            PairPolicy::Unique => self.footprint(particle),
        }
    }

    /// Insert one particle index
    pub fn add(&mut self, particle: &Particle, index: usize, policy: PairPolicy) {
        for c in self.insertion_cells(particle, policy) {
            self.cells[c].push(index);
        }
    }

    /// Insert every particle. Work is split by destination cell: the
    /// (cell, particle) pairs are computed and sorted in parallel, then each
    /// bucket copies its own run, so no bucket is written by two workers.
    pub fn populate(&mut self, particles: &[Particle], policy: PairPolicy) {
        let mut entries: Vec<(usize, usize)> = particles
            .par_iter()
            .enumerate()
            .flat_map_iter(|(i, p)| self.insertion_cells(p, policy).into_iter().map(move |c| (c, i)))
            .collect();
        entries.par_sort_unstable();

        let entries = &entries;
        self.cells.par_iter_mut().enumerate().for_each(|(c, bucket)| {
            let lo = entries.partition_point(|e| e.0 < c);
            let hi = entries.partition_point(|e| e.0 <= c);
            bucket.extend(entries[lo..hi].iter().map(|e| e.1));
        });
    }
}
