//! Double-slit interference run
//!
//! This module wires a [`WaveSolver`] into the reference experiment: a plane
//! pulse launched from the left edge hits a two-slit barrier and the
//! screen records the running maximum of `|u|`, which builds up the
//! interference fringes.

use super::config::DoubleSlitConfig;
use crate::grid::GridGeometry;
use crate::solver::{Alignment, FieldData, LineProbe, WaveSolver};
use crate::SolverError;
use serde::Serialize;
use tracing::{debug, info};

/// Per-frame summary returned by [`DoubleSlitSimulation::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameStats {
    /// Zero-based index of the step just taken
    pub step: usize,
    /// Simulated time after the step, in seconds
    pub time: f64,
    /// Largest envelope value on the screen
    pub max_on_screen: f64,
    /// Fraction of the configured run completed
    pub progress: f64,
}

/// Double-slit simulation built from a [`DoubleSlitConfig`]
pub struct DoubleSlitSimulation {
    config: DoubleSlitConfig,
    solver: WaveSolver,
    envelope: Vec<f64>,
    frame: usize,
}

impl DoubleSlitSimulation {
    /// Build the grid, solver, barrier, screen and source for a run
    ///
    /// # Errors
    ///
    /// Returns an error when the config is invalid, the derived grid is too
    /// small, or the screen does not fit on the grid.
    pub fn new(config: DoubleSlitConfig) -> Result<Self, SolverError> {
        config.validate()?;
        info!("Creating double-slit simulation");

        let grid = GridGeometry::from_domain(config.width, config.height, config.dt, config.speed)?;
        let mut solver = WaveSolver::with_settings(grid, config.solver);

        let screen = config.screen;
        solver.configure_screen(
            screen.size,
            screen.x_position,
            screen.y_position,
            screen.alignment,
        )?;

        let pulse = config.pulse();
        solver.seed_pulse(&pulse);
        solver.set_boundary_injector(pulse);
        solver.set_obstacle(config.slit.mask(grid.x_nodes(), grid.y_nodes()))?;

        let bounds = config.slit.bounds(grid.x_nodes(), grid.y_nodes());
        info!(
            "Double slit at columns {}..{}, openings {}..{} and {}..{}",
            bounds.left,
            bounds.right,
            bounds.upper_far,
            bounds.upper_near,
            bounds.lower_near,
            bounds.lower_far
        );

        let screen_nodes = solver.screen().map_or(0, LineProbe::node_count);
        Ok(Self {
            config,
            solver,
            envelope: vec![0.0; screen_nodes],
            frame: 0,
        })
    }

    /// Run configuration
    #[must_use]
    pub fn config(&self) -> &DoubleSlitConfig {
        &self.config
    }

    /// Underlying solver
    #[must_use]
    pub fn solver(&self) -> &WaveSolver {
        &self.solver
    }

    /// Frames in the configured run
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.config.total_steps()
    }

    /// Frames taken so far
    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Whether the configured run is complete
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.frame >= self.total_steps()
    }

    /// Take one step and refresh the screen envelope
    ///
    /// The frame counter follows the solver, so a step that completed but
    /// failed its finite check still counts as taken.
    ///
    /// # Errors
    ///
    /// Propagates solver failures (numeric instability in particular). The
    /// envelope keeps its value from the last successful frame.
    pub fn advance(&mut self) -> Result<FrameStats, SolverError> {
        let step = self.frame;
        let stepped = self.solver.step(step);
        self.frame = self.solver.steps_taken();
        stepped?;
        self.envelope = self.solver.screen_envelope()?;

        let time = self.config.dt * (step + 1) as f64;
        let stats = FrameStats {
            step,
            time,
            max_on_screen: self.envelope.iter().copied().fold(0.0, f64::max),
            progress: time / self.config.total_time,
        };
        debug!(
            "Frame {}: t={:.3}s, max on screen={:.5}",
            stats.step, stats.time, stats.max_on_screen
        );
        Ok(stats)
    }

    /// Take `steps` steps, calling `on_frame` after each
    ///
    /// # Errors
    ///
    /// Stops at and returns the first solver failure.
    pub fn run<F>(&mut self, steps: usize, mut on_frame: F) -> Result<(), SolverError>
    where
        F: FnMut(&FrameStats),
    {
        for _ in 0..steps {
            let stats = self.advance()?;
            on_frame(&stats);
        }
        Ok(())
    }

    /// Running `|u|` maximum on every screen node
    #[must_use]
    pub fn envelope(&self) -> &[f64] {
        &self.envelope
    }

    /// Physical coordinate of each screen node along the screen, in meters
    ///
    /// Nodes are spread evenly over `extent * (position ± size / 2)`.
    #[must_use]
    pub fn screen_positions(&self) -> Vec<f64> {
        let screen = self.config.screen;
        let (extent, centre) = match screen.alignment {
            Alignment::Vertical => (self.config.height, screen.y_position),
            Alignment::Horizontal => (self.config.width, screen.x_position),
        };
        linspace(
            extent * (centre - screen.size / 2.0),
            extent * (centre + screen.size / 2.0),
            self.envelope.len(),
        )
    }

    /// Display copy of the field (obstacle and screen nodes are NaN)
    #[must_use]
    pub fn field_view(&self) -> FieldData {
        self.solver.current_field_view()
    }
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let spacing = (end - start) / (count - 1) as f64;
            (0..count).map(|k| start + spacing * k as f64).collect()
        }
    }
}
