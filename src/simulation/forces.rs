//! Reaction-force bookkeeping for the airfoil
//!
//! `ReactionForce` sums impacts into a net vector plus one vector per
//! airfoil edge. It is the reduction target of the airfoil pass: each
//! worker folds into its own copy and the copies are merged, so the shared
//! accumulator is only touched once per step.
//!
//! `SlidingWindowVector` averages the most recent samples of a vector,
//! used to smooth the per-frame force readings.

use std::collections::VecDeque;

use super::airfoil::Impact;
use super::geometry::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct ReactionForce {
    pub net: Vec2, // sum of every impact
    pub edges: Vec<Vec2>, // impacts attributed to each polygon edge
}

impl ReactionForce {
    pub fn new(num_edges: usize) -> Self {
        Self {
            net: Vec2::zeros(),
            edges: vec![Vec2::zeros(); num_edges],
        }
    }

    /// Add one impact. Vertex-axis impacts only count toward `net`.
    pub fn record(&mut self, impact: &Impact) {
        self.net += impact.force;
        if let Some(e) = impact.edge {
            self.edges[e] += impact.force;
        }
    }

    /// Add another partial sum into this one
    pub fn absorb(&mut self, other: &ReactionForce) {
        self.net += other.net;
        for (mine, theirs) in self.edges.iter_mut().zip(&other.edges) {
            *mine += *theirs;
        }
    }

    /// Combine two partial sums, for use as a rayon `reduce` operator
    pub fn merge(mut self, other: ReactionForce) -> ReactionForce {
        self.absorb(&other);
        self
    }

    pub fn reset(&mut self) {
        self.net = Vec2::zeros();
        self.edges.iter_mut().for_each(|e| *e = Vec2::zeros());
    }
}

pub const DEFAULT_WINDOW: usize = 30;

/// Running mean over the last `window_size` samples
#[derive(Debug, Clone)]
pub struct SlidingWindowVector {
    window_size: usize,
    values: VecDeque<Vec2>,
    sum: Vec2,
}

impl Default for SlidingWindowVector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl SlidingWindowVector {
    /// A window of zero is treated as a window of one
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window_size,
            values: VecDeque::with_capacity(window_size),
            sum: Vec2::zeros(),
        }
    }

    pub fn add(&mut self, value: Vec2) {
        if self.values.len() >= self.window_size {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
        self.values.push_back(value);
        self.sum += value;
    }

    /// Mean of the samples in the window, zero before the first sample
    pub fn value(&self) -> Vec2 {
        if self.values.is_empty() {
            return Vec2::zeros();
        }
        self.sum / self.values.len() as f64
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
