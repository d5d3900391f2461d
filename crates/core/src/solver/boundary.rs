//! Concrete boundary injectors
//!
//! - [`PulseSource`]: sinusoidal line source on the left edge, zero right
//!   edge and zero-gradient top/bottom edges. This is the excitation used by
//!   the double-slit experiment.
//! - [`FixedEdges`]: clamps every edge to zero (the quiescent fixed point).

use super::fields::FieldData;
use super::BoundaryInjector;
use crate::grid::GridGeometry;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Two levels are already populated before step 0 runs
const STEP_TIME_OFFSET: usize = 2;

/// Sinusoidal plane-wave source on the left edge
///
/// At step `n` the source time is `dt * (n + 2)`. The left column is driven
/// with `amplitude * sin(2π f t)` while `t <= duration`, then held at zero.
/// A non-positive `duration` keeps the source on for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseSource {
    /// Peak displacement of the source column
    pub amplitude: f64,
    /// Source frequency in Hz
    pub frequency: f64,
    /// How long the source stays on, in seconds (<= 0 means forever)
    pub duration: f64,
}

impl PulseSource {
    /// Create a new pulse source
    #[must_use]
    pub fn new(amplitude: f64, frequency: f64, duration: f64) -> Self {
        Self {
            amplitude,
            frequency,
            duration,
        }
    }

    /// Source value at time `t`, honoring the pulse duration
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 || t <= self.duration {
            self.amplitude * (TAU * self.frequency * t).sin()
        } else {
            0.0
        }
    }

    /// Seed levels `t-1` and `t` before the first step
    ///
    /// The oldest level is cleared and the left column of the current level
    /// carries the source value one time step in.
    pub fn seed(&self, oldest: &mut FieldData, current: &mut FieldData, grid: &GridGeometry) {
        oldest.fill(0.0);
        current.fill_column(0, self.amplitude * (TAU * self.frequency * grid.dt()).sin());
    }
}

impl BoundaryInjector for PulseSource {
    fn apply(&mut self, step: usize, field: &mut FieldData, grid: &GridGeometry) {
        let t = grid.dt() * (step + STEP_TIME_OFFSET) as f64;
        let (width, height) = field.shape();

        field.fill_column(0, self.value_at(t));
        field.fill_column(width - 1, 0.0);

        // Zero-gradient reflecting top and bottom edges
        field.copy_row(1, 0);
        field.copy_row(height - 2, height - 1);
    }
}

/// Holds all four edges at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedEdges;

impl BoundaryInjector for FixedEdges {
    fn apply(&mut self, _step: usize, field: &mut FieldData, _grid: &GridGeometry) {
        let (width, height) = field.shape();
        field.fill_column(0, 0.0);
        field.fill_column(width - 1, 0.0);
        for x in 0..width {
            field.set(x, 0, 0.0);
            field.set(x, height - 1, 0.0);
        }
    }
}
