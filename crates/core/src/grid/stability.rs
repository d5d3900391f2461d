//! Stability-constrained grid sizing
//!
//! The explicit leapfrog scheme stays bounded only while the Courant number
//! ```text
//! C = speed * dt * sqrt(1/dx² + 1/dy²) <= 1
//! ```
//! Node counts are therefore derived from the time step: the spacing is held
//! strictly above `sqrt(2) * speed * dt` by sizing each axis as
//! `floor(extent / (sqrt(2) * speed * dt)) - 1` nodes.

use crate::SolverError;
use serde::Serialize;

/// Fewest nodes an axis may have and still own an interior stencil node
pub const MIN_NODES: usize = 3;

/// Immutable grid description shared by the solver and its collaborators
///
/// Only [`GridGeometry::new`] and [`GridGeometry::from_domain`] build one, so
/// every instance has at least [`MIN_NODES`] nodes per axis and positive
/// spacings, time step and speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridGeometry {
    x_nodes: usize,
    y_nodes: usize,
    dx: f64,
    dy: f64,
    dt: f64,
    speed: f64,
}

fn require_positive(name: &str, value: f64) -> Result<(), SolverError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidGrid(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

fn require_nodes(name: &str, nodes: usize) -> Result<(), SolverError> {
    if nodes >= MIN_NODES {
        Ok(())
    } else {
        Err(SolverError::InvalidGrid(format!(
            "{name} must be at least {MIN_NODES}, got {nodes}"
        )))
    }
}

impl GridGeometry {
    /// Build a grid from explicit node counts and spacings
    ///
    /// No stability check is made here; see [`GridGeometry::is_stable`].
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidGrid`] when a spacing, `dt` or `speed` is
    /// not finite and positive, or when an axis has fewer than three nodes.
    pub fn new(
        x_nodes: usize,
        y_nodes: usize,
        dx: f64,
        dy: f64,
        dt: f64,
        speed: f64,
    ) -> Result<Self, SolverError> {
        require_nodes("x_nodes", x_nodes)?;
        require_nodes("y_nodes", y_nodes)?;
        require_positive("dx", dx)?;
        require_positive("dy", dy)?;
        require_positive("dt", dt)?;
        require_positive("speed", speed)?;

        Ok(Self {
            x_nodes,
            y_nodes,
            dx,
            dy,
            dt,
            speed,
        })
    }

    /// Derive node counts and spacings for a `width` x `height` domain
    ///
    /// # Arguments
    ///
    /// * `width` - Domain extent along x in meters
    /// * `height` - Domain extent along y in meters
    /// * `dt` - Time step in seconds
    /// * `speed` - Wave speed in meters/second
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidGrid`] for non-positive inputs or when the
    /// derived node count on either axis is below three.
    pub fn from_domain(width: f64, height: f64, dt: f64, speed: f64) -> Result<Self, SolverError> {
        require_positive("width", width)?;
        require_positive("height", height)?;
        require_positive("dt", dt)?;
        require_positive("speed", speed)?;

        let min_spacing = std::f64::consts::SQRT_2 * speed * dt;
        let x_nodes = Self::nodes_for(width, min_spacing);
        let y_nodes = Self::nodes_for(height, min_spacing);
        require_nodes("x_nodes", x_nodes)?;
        require_nodes("y_nodes", y_nodes)?;

        Self::new(
            x_nodes,
            y_nodes,
            width / x_nodes as f64,
            height / y_nodes as f64,
            dt,
            speed,
        )
    }

    // floor(extent / spacing) - 1, saturating at zero
    fn nodes_for(extent: f64, min_spacing: f64) -> usize {
        let nodes = (extent / min_spacing).floor() - 1.0;
        if nodes > 0.0 {
            nodes as usize
        } else {
            0
        }
    }

    /// Number of nodes along x
    #[must_use]
    pub fn x_nodes(&self) -> usize {
        self.x_nodes
    }

    /// Number of nodes along y
    #[must_use]
    pub fn y_nodes(&self) -> usize {
        self.y_nodes
    }

    /// Node spacing along x in meters
    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Node spacing along y in meters
    #[must_use]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Time step in seconds
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Wave propagation speed in meters/second
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Physical extent along x covered by the nodes (`x_nodes * dx`)
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_nodes as f64 * self.dx
    }

    /// Physical extent along y covered by the nodes (`y_nodes * dy`)
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_nodes as f64 * self.dy
    }

    /// Courant number `speed * dt * sqrt(1/dx² + 1/dy²)`
    #[must_use]
    pub fn courant_number(&self) -> f64 {
        let inv_dx = 1.0 / self.dx;
        let inv_dy = 1.0 / self.dy;
        self.speed * self.dt * (inv_dx * inv_dx + inv_dy * inv_dy).sqrt()
    }

    /// Whether the explicit scheme is stable on this grid
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.courant_number() <= 1.0
    }

    /// Physical coordinates in meters of node `(i, j)`
    #[must_use]
    pub fn position(&self, i: usize, j: usize) -> (f64, f64) {
        (i as f64 * self.dx, j as f64 * self.dy)
    }

    /// Total node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.x_nodes * self.y_nodes
    }
}
