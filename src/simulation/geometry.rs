//! 2D geometry primitives used by the collision passes
//!
//! - `Vec2` doubles as point, displacement and velocity
//! - `BoundingBox` is half-open: `[xmin, xmax) x [ymin, ymax)`
//! - `Segment` is a directed edge used by the crossing-number test
//! - `Polygon` caches its edges, outward unit normals and bounding box
//!
//! Nothing here holds mutable simulation state.

use nalgebra::Vector2;

use crate::error::{SimError, SimResult};

pub type Vec2 = Vector2<f64>;

/// Runs narrower than this are treated as vertical by `Segment::x_intercept`
const VERTICAL_EPS: f64 = 1.0e-6;

/// Operations `nalgebra` does not provide in the form the collision code needs
pub trait VecExt {
    /// Unit vector in the same direction, or the zero vector for zero input
    fn unit(&self) -> Vec2;
    /// Rotate 90 degrees counter-clockwise
    fn normal(&self) -> Vec2;
}

impl VecExt for Vec2 {
    fn unit(&self) -> Vec2 {
        self.try_normalize(0.0).unwrap_or_else(Vec2::zeros)
    }

    fn normal(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
}

/// Minimum and maximum projection of a shape onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

// =========================================================================================
// Bounding box
// =========================================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    /// Degenerate box sitting on a single point
    pub fn at(p: Vec2) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open containment: points on xmax or ymax are outside
    pub fn contains(&self, p: Vec2) -> bool {
        self.xmin <= p.x && p.x < self.xmax && self.ymin <= p.y && p.y < self.ymax
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.xmax < other.xmin
            || self.xmin > other.xmax
            || self.ymax < other.ymin
            || self.ymin > other.ymax)
    }

    /// Grow to enclose `p`
    pub fn enclose(&mut self, p: Vec2) {
        self.xmin = self.xmin.min(p.x);
        self.xmax = self.xmax.max(p.x);
        self.ymin = self.ymin.min(p.y);
        self.ymax = self.ymax.max(p.y);
    }
}

// =========================================================================================
// Segment
// =========================================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Upward edge: includes its start y, excludes its end y
    pub fn crosses_upward(&self, y: f64) -> bool {
        self.start.y < self.end.y && self.start.y <= y && y < self.end.y
    }

    /// Downward edge: excludes its start y, includes its end y
    pub fn crosses_downward(&self, y: f64) -> bool {
        self.start.y > self.end.y && self.end.y <= y && y < self.start.y
    }

    /// x coordinate where the edge crosses the horizontal line through `p`.
    /// Near-vertical edges report a point left of `p`, so they never count
    /// as a rightward crossing.
    pub fn x_intercept(&self, p: Vec2) -> f64 {
        if self.is_vertical() {
            return p.x - 1.0;
        }
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        self.start.x + (p.y - self.start.y) / dy * dx
    }

    /// True when the run is too narrow for `x_intercept` to use
    pub fn is_vertical(&self) -> bool {
        (self.end.x - self.start.x).abs() < VERTICAL_EPS
    }

    pub fn as_vector(&self) -> Vec2 {
        self.end - self.start
    }
}

// =========================================================================================
// Polygon
// =========================================================================================

/// Closed, consistently wound polygon. Immutable after construction.
///
/// Either winding is accepted: edge normals are flipped as needed so they
/// always point out of the shape.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    edges: Vec<Segment>,
    edge_normals: Vec<Vec2>,
    bbox: BoundingBox,
}

impl Polygon {
    /// Repeated consecutive vertices (a closing copy of the first one
    /// included) are dropped, so no edge has zero length.
    pub fn new(mut vertices: Vec<Vec2>) -> SimResult<Self> {
        vertices.dedup();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }

        let n = vertices.len();
        if n < 3 {
            return Err(SimError::DegeneratePolygon { vertices: n });
        }

        let mut bbox = BoundingBox::at(vertices[0]);
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            edges.push(Segment::new(vertices[i], vertices[(i + 1) % n]));
            bbox.enclose(vertices[i]);
        }

        // normal() is the left-hand side, which is inside for ccw winding
        let outward = if signed_area(&edges) > 0.0 { -1.0 } else { 1.0 };
        let edge_normals = edges.iter().map(|e| e.as_vector().normal().unit() * outward).collect();

        Ok(Self { vertices, edges, edge_normals, bbox })
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    /// Outward unit normal per edge, same order as `edges()`
    pub fn edge_normals(&self) -> &[Vec2] {
        &self.edge_normals
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// True if any edge is narrower than the crossing test can see
    pub fn has_vertical_edge(&self) -> bool {
        self.edges.iter().any(Segment::is_vertical)
    }

    /// Crossing-number test with a rightward horizontal ray.
    /// The bounding box only rejects early; the edge rules decide.
    pub fn contains(&self, p: Vec2) -> bool {
        if !self.bbox.contains(p) {
            return false;
        }
        let crossings = self
            .edges
            .iter()
            .filter(|e| e.crosses_upward(p.y) || e.crosses_downward(p.y))
            .filter(|e| p.x < e.x_intercept(p))
            .count();
        crossings % 2 == 1
    }

    /// Interval covered by the vertices projected onto `axis`
    pub fn projected_extrema(&self, axis: &Vec2) -> Extent {
        let first = self.vertices[0].dot(axis);
        self.vertices[1..].iter().fold(Extent { min: first, max: first }, |acc, v| {
            let d = v.dot(axis);
            Extent { min: acc.min.min(d), max: acc.max.max(d) }
        })
    }

    /// Closest vertex by squared distance; ties go to the lowest index
    pub fn nearest_vertex_to(&self, p: Vec2) -> Vec2 {
        let mut best = self.vertices[0];
        let mut best_d2 = (best - p).norm_squared();
        for v in &self.vertices[1..] {
            let d2 = (v - p).norm_squared();
            if d2 < best_d2 {
                best = *v;
                best_d2 = d2;
            }
        }
        best
    }
}

/// Shoelace area, positive for counter-clockwise winding
fn signed_area(edges: &[Segment]) -> f64 {
    edges.iter().map(|e| e.start.x * e.end.y - e.end.x * e.start.y).sum::<f64>() / 2.0
}
