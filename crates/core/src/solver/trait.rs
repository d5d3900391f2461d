//! Boundary injector trait definition
//!
//! The stepper never writes edge nodes. After the interior update and the
//! obstacle mask, it hands the newest level to a `BoundaryInjector`, which
//! owns the four edges and any hard source terms.

use super::fields::FieldData;
use crate::grid::GridGeometry;

/// Pluggable edge and source condition applied once per step
///
/// Implementations receive the newest level after the interior stencil and
/// obstacle mask have run, and may overwrite any node. Edges left untouched
/// keep the values of the previous step.
///
/// Any `FnMut(usize, &mut FieldData, &GridGeometry)` closure is an injector.
pub trait BoundaryInjector: Send {
    /// Apply the condition for step `step` to the newest level
    ///
    /// # Arguments
    ///
    /// * `step` - Zero-based step index
    /// * `field` - Newest level, writable
    /// * `grid` - Grid the field lives on
    fn apply(&mut self, step: usize, field: &mut FieldData, grid: &GridGeometry);
}

impl<F> BoundaryInjector for F
where
    F: FnMut(usize, &mut FieldData, &GridGeometry) + Send,
{
    fn apply(&mut self, step: usize, field: &mut FieldData, grid: &GridGeometry) {
        self(step, field, grid);
    }
}
