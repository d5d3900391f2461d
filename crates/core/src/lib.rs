//! Wave Simulation Core Library
//!
//! Explicit finite-difference time-domain (FDTD) integration of the 2D scalar
//! wave equation on a rectangular grid, built around a double-slit
//! interference experiment.
//!
//! ## Components
//!
//! - Grid geometry sized from the CFL stability bound
//! - Three-level leapfrog solver with obstacle masking
//! - Pluggable boundary injectors (pulse source, fixed edges, closures)
//! - Double-slit obstacle authoring
//! - Screen probe with a running interference envelope
//! - A ready-made double-slit simulation driven by a serde config

// Error type shared by all modules
#[allow(clippy::module_name_repetitions)]
mod error;

pub mod grid;
pub mod simulation;
pub mod solver;

pub use error::SolverError;

// Re-export main types
pub use grid::GridGeometry;
pub use simulation::{DoubleSlitConfig, DoubleSlitSimulation, FrameStats};
pub use solver::{
    Alignment, BoundaryInjector, FieldData, LineProbe, PulseSource, SlitGeometry, WaveSolver,
};
