pub mod geometry;
pub mod states;
pub mod grid;
pub mod collisions;
pub mod sat;
pub mod airfoil;
pub mod forces;
pub mod integrator;
pub mod params;
pub mod engine;
pub mod world;
pub mod scenario;
