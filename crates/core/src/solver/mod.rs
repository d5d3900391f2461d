//! FDTD wave solver module
//!
//! The core abstraction is [`WaveSolver`], which advances a 2D scalar field
//! with the explicit leapfrog scheme. Edge and source conditions plug in
//! through the [`BoundaryInjector`] trait so the stepper never needs to know
//! what drives the wave.
//!
//! # Example
//!
//! ```rust
//! use wave_sim_core::grid::GridGeometry;
//! use wave_sim_core::solver::{Alignment, PulseSource, SlitGeometry, WaveSolver};
//!
//! let grid = GridGeometry::from_domain(0.2, 0.1, 0.001, 0.9).unwrap();
//! let mut solver = WaveSolver::new(grid);
//! let pulse = PulseSource::new(0.05, 45.0, 0.2);
//!
//! solver.seed_pulse(&pulse);
//! solver.set_boundary_injector(pulse);
//! solver
//!     .set_obstacle(SlitGeometry::default().mask(grid.x_nodes(), grid.y_nodes()))
//!     .unwrap();
//! solver.configure_screen(0.8, 0.7, 0.5, Alignment::Vertical).unwrap();
//!
//! for step in 0..10 {
//!     solver.step(step).unwrap();
//! }
//! let envelope = solver.screen_envelope().unwrap();
//! assert!(envelope.iter().all(|v| v.is_finite()));
//! ```

mod boundary;
mod cpu;
mod fields;
mod history;
mod obstacle;
#[allow(clippy::module_name_repetitions)]
mod screen;
mod stencil;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use boundary::{FixedEdges, PulseSource};
pub use cpu::{SolverSettings, WaveSolver};
pub use fields::FieldData;
pub use history::TimeLevels;
pub use obstacle::{visualization_mask, SlitBounds, SlitGeometry};
pub use r#trait::BoundaryInjector;
pub use screen::{Alignment, LineProbe};
pub use stencil::{advance_interior, StepCoefficients};
