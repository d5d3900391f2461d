//! CPU wave solver
//!
//! `WaveSolver` owns every piece of simulation state: the three time levels,
//! the obstacle and display masks, the boundary injector and the optional
//! screen. One call to [`WaveSolver::step`] runs, in order:
//!
//! 1. interior leapfrog stencil into the newest level (rows in parallel)
//! 2. elementwise multiply by the obstacle mask
//! 3. boundary injector on the newest level
//! 4. level rotation (newest becomes current)

use super::boundary::PulseSource;
use super::fields::FieldData;
use super::history::TimeLevels;
use super::obstacle::visualization_mask;
use super::screen::{Alignment, LineProbe};
use super::stencil::{advance_interior, StepCoefficients};
use super::BoundaryInjector;
use crate::grid::GridGeometry;
use crate::SolverError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Runtime switches for the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Scan the field after every step and fail on NaN or infinity
    pub check_finite: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self { check_finite: true }
    }
}

/// Explicit FDTD solver for the 2D scalar wave equation
pub struct WaveSolver {
    grid: GridGeometry,
    coeffs: StepCoefficients,
    levels: TimeLevels,

    // Transmission coefficients applied every step
    obstacle: FieldData,
    // NaN over blocked nodes, 1.0 elsewhere; only used for display
    display_mask: FieldData,

    injector: Option<Box<dyn BoundaryInjector>>,
    screen: Option<LineProbe>,
    settings: SolverSettings,
    steps_taken: usize,
}

impl WaveSolver {
    /// Create a solver with zeroed levels and a fully transmissive obstacle
    #[must_use]
    pub fn new(grid: GridGeometry) -> Self {
        Self::with_settings(grid, SolverSettings::default())
    }

    /// Create a solver with explicit settings
    #[must_use]
    pub fn with_settings(grid: GridGeometry, settings: SolverSettings) -> Self {
        let (width, height) = (grid.x_nodes(), grid.y_nodes());

        info!(
            "Wave solver initialized: {}x{} grid, dx={:.5}m, dy={:.5}m, dt={}s, courant={:.3}",
            width,
            height,
            grid.dx(),
            grid.dy(),
            grid.dt(),
            grid.courant_number()
        );
        if !grid.is_stable() {
            warn!(
                "Courant number {:.3} exceeds 1, the explicit scheme will diverge",
                grid.courant_number()
            );
        }

        Self {
            grid,
            coeffs: StepCoefficients::from_grid(&grid),
            levels: TimeLevels::new(width, height),
            obstacle: FieldData::with_value(width, height, 1.0),
            display_mask: FieldData::with_value(width, height, 1.0),
            injector: None,
            screen: None,
            settings,
            steps_taken: 0,
        }
    }

    /// Grid the solver runs on
    #[must_use]
    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// Number of completed steps
    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Install an obstacle mask
    ///
    /// The mask is stored as given and the display mask is rebuilt from it.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ShapeMismatch`] when the mask shape differs from
    /// the grid; the previous obstacle stays in place.
    pub fn set_obstacle(&mut self, mask: FieldData) -> Result<(), SolverError> {
        let expected = (self.grid.x_nodes(), self.grid.y_nodes());
        if mask.shape() != expected {
            return Err(SolverError::ShapeMismatch {
                expected,
                actual: mask.shape(),
            });
        }

        self.display_mask = visualization_mask(&mask);
        self.obstacle = mask;

        let blocked = self.obstacle.data.iter().filter(|&&v| v == 0.0).count();
        info!("Obstacle installed: {} of {} nodes blocked", blocked, self.grid.node_count());
        Ok(())
    }

    /// Current obstacle mask
    #[must_use]
    pub fn obstacle(&self) -> &FieldData {
        &self.obstacle
    }

    /// Display mask derived from the obstacle
    #[must_use]
    pub fn display_mask(&self) -> &FieldData {
        &self.display_mask
    }

    /// Install the boundary injector, replacing any previous one
    pub fn set_boundary_injector<B>(&mut self, injector: B)
    where
        B: BoundaryInjector + 'static,
    {
        self.injector = Some(Box::new(injector));
    }

    /// Whether a boundary injector is installed
    #[must_use]
    pub fn has_boundary_injector(&self) -> bool {
        self.injector.is_some()
    }

    /// Place the screen probe
    ///
    /// Reconfiguring after stepping has started is allowed; the envelope
    /// starts over from the new placement.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] when the screen does not fit the
    /// grid (see [`LineProbe::new`]).
    pub fn configure_screen(
        &mut self,
        size: f64,
        x_position: f64,
        y_position: f64,
        alignment: Alignment,
    ) -> Result<(), SolverError> {
        let probe = LineProbe::new(
            size,
            x_position,
            y_position,
            alignment,
            self.grid.x_nodes(),
            self.grid.y_nodes(),
        )?;

        if self.steps_taken > 0 {
            warn!(
                "Screen reconfigured after {} steps, envelope history discarded",
                self.steps_taken
            );
        }
        info!(
            "Screen configured: {:?} line of {} nodes centred on node {:?}",
            alignment,
            probe.node_count(),
            probe.centre()
        );
        self.screen = Some(probe);
        Ok(())
    }

    /// Configured screen, if any
    #[must_use]
    pub fn screen(&self) -> Option<&LineProbe> {
        self.screen.as_ref()
    }

    /// Seed the two history levels for a left-edge pulse source
    pub fn seed_pulse(&mut self, pulse: &PulseSource) {
        let (oldest, current) = self.levels.history_mut();
        pulse.seed(oldest, current, &self.grid);
    }

    /// Mutable access to levels `t-1` and `t` for custom initial conditions
    pub fn history_mut(&mut self) -> (&mut FieldData, &mut FieldData) {
        self.levels.history_mut()
    }

    /// Advance the field by one time step
    ///
    /// `step` is handed to the boundary injector unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] when no boundary injector is set,
    /// and [`SolverError::NumericInstability`] when finite checking is enabled
    /// and the new level holds a NaN or infinity.
    pub fn step(&mut self, step: usize) -> Result<(), SolverError> {
        let injector = self.injector.as_mut().ok_or_else(|| {
            SolverError::Configuration(
                "boundary injector must be set before the first step".to_string(),
            )
        })?;

        let (width, height) = (self.grid.x_nodes(), self.grid.y_nodes());
        let (oldest, current, newest) = self.levels.split_mut();

        // Edges carry forward until the injector decides otherwise
        newest.copy_edges_from(current);
        advance_interior(
            oldest.as_slice(),
            current.as_slice(),
            newest.as_mut_slice(),
            width,
            height,
            self.coeffs,
        );
        newest.multiply_by(&self.obstacle);
        injector.apply(step, newest, &self.grid);

        self.levels.rotate();
        self.steps_taken += 1;

        debug!(
            "Step {}: t={:.4}s, max|u|={:.6}",
            step,
            self.grid.dt() * self.steps_taken as f64,
            self.levels.current().max_abs()
        );

        if self.settings.check_finite {
            if let Some((x, y, value)) = self.levels.current().first_non_finite() {
                warn!("Non-finite value {} at ({}, {}) after step {}", value, x, y, step);
                return Err(SolverError::NumericInstability { step, x, y, value });
            }
        }

        Ok(())
    }

    /// Advance one step using the internal step counter as the step index
    ///
    /// # Errors
    ///
    /// Same as [`WaveSolver::step`].
    pub fn advance(&mut self) -> Result<(), SolverError> {
        self.step(self.steps_taken)
    }

    /// Latest completed level, unmasked
    #[must_use]
    pub fn current(&self) -> &FieldData {
        self.levels.current()
    }

    /// Display copy of the latest level
    ///
    /// Obstacle nodes and screen nodes read as NaN. The copy never touches
    /// the live buffers, so calling this between steps has no effect on the
    /// simulation.
    #[must_use]
    pub fn current_field_view(&self) -> FieldData {
        let mut view = self.levels.current().clone();
        view.multiply_by(&self.display_mask);
        if let Some(screen) = &self.screen {
            screen.blank(&mut view);
        }
        view
    }

    /// Sample the screen from the latest level
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NotConfigured`] when no screen is configured.
    pub fn screen_sample(&mut self) -> Result<Vec<f64>, SolverError> {
        let screen = self.screen.as_mut().ok_or(SolverError::NotConfigured)?;
        Ok(screen.sample(self.levels.current()))
    }

    /// Sample the screen, then return the running `|u|` maximum per node
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NotConfigured`] when no screen is configured.
    pub fn screen_envelope(&mut self) -> Result<Vec<f64>, SolverError> {
        let screen = self.screen.as_mut().ok_or(SolverError::NotConfigured)?;
        screen.sample(self.levels.current());
        Ok(screen.envelope().to_vec())
    }

    /// Zero the field, forget screen history and restart the step counter
    ///
    /// Obstacle, injector and screen placement are kept.
    pub fn reset(&mut self) {
        self.levels.clear();
        if let Some(screen) = self.screen.as_mut() {
            screen.reset();
        }
        self.steps_taken = 0;
        debug!("Wave solver reset");
    }
}
