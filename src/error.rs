//! Error type for the simulation library
//!
//! Physics routines are total over their numeric domain and never fail.
//! Errors only come from bad usage (cell lookups) or from inputs that
//! cannot describe a world (degenerate polygons, empty domains).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Grid cell lookup past the end of the grid
    #[error("cell index {index} is out of range (grid has {count} cells)")]
    CellIndexOutOfRange { index: usize, count: usize },

    /// Polygons need at least three vertices
    #[error("polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon { vertices: usize },

    /// World extent must be finite and positive on both axes
    #[error("invalid world domain {width} x {height}")]
    InvalidDomain { width: f64, height: f64 },

    #[error("invalid scenario configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;
