//! Leapfrog finite-difference update for the 2D scalar wave equation
//!
//! Discretizing `∂²u/∂t² = c²∇²u` with second-order central differences in
//! space and time gives, for every interior node:
//! ```text
//! u⁺[i,j] = rx·(u[i+1,j] + u[i-1,j] - 2u[i,j])
//!         + ry·(u[i,j+1] + u[i,j-1] - 2u[i,j])
//!         + 2u[i,j] - u⁻[i,j]
//! ```
//! with `rx = (c·dt/dx)²` and `ry = (c·dt/dy)²`. Edge nodes are never
//! written here; they belong to the boundary injector.

use crate::grid::GridGeometry;
use rayon::prelude::*;

/// Squared Courant ratios along each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCoefficients {
    /// `(speed * dt / dx)²`
    pub rx: f64,
    /// `(speed * dt / dy)²`
    pub ry: f64,
}

impl StepCoefficients {
    /// Coefficients for a grid
    #[must_use]
    pub fn from_grid(grid: &GridGeometry) -> Self {
        let cx = grid.dt() * grid.speed() / grid.dx();
        let cy = grid.dt() * grid.speed() / grid.dy();
        Self {
            rx: cx * cx,
            ry: cy * cy,
        }
    }
}

/// Compute interior nodes of `newest` from `current` and `oldest`
///
/// Rows are processed in parallel; every node only reads the two previous
/// levels, so row order does not matter.
///
/// # Arguments
///
/// * `oldest` - Level `t-1` in row-major order
/// * `current` - Level `t` in row-major order
/// * `newest` - Output level `t+1`; only interior nodes are written
/// * `width` - Nodes along x (row length)
/// * `height` - Nodes along y (row count)
/// * `coeffs` - Squared Courant ratios
pub fn advance_interior(
    oldest: &[f64],
    current: &[f64],
    newest: &mut [f64],
    width: usize,
    height: usize,
    coeffs: StepCoefficients,
) {
    debug_assert_eq!(oldest.len(), width * height);
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(newest.len(), width * height);

    newest
        .par_chunks_mut(width)
        .enumerate()
        .filter(|(row, _)| *row > 0 && *row < height - 1)
        .for_each(|(row, out)| {
            let base = row * width;
            for col in 1..width - 1 {
                let idx = base + col;
                let here = current[idx];
                let lap_x = current[idx + 1] + current[idx - 1] - 2.0 * here;
                let lap_y = current[idx + width] + current[idx - width] - 2.0 * here;
                out[col] = coeffs.rx * lap_x + coeffs.ry * lap_y + 2.0 * here - oldest[idx];
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coefficients() {
        let grid = GridGeometry::new(5, 5, 0.1, 0.2, 0.05, 1.0).unwrap();
        let coeffs = StepCoefficients::from_grid(&grid);
        assert_relative_eq!(coeffs.rx, 0.25, epsilon = 1e-12);
        assert_relative_eq!(coeffs.ry, 0.0625, epsilon = 1e-12);
    }

    #[test]
    fn test_single_impulse_update() {
        let (width, height) = (5, 5);
        let oldest = vec![0.0; 25];
        let mut current = vec![0.0; 25];
        current[2 * width + 2] = 1.0;
        let mut newest = vec![-7.0; 25];
        let coeffs = StepCoefficients { rx: 0.25, ry: 0.25 };

        advance_interior(&oldest, &current, &mut newest, width, height, coeffs);

        // Centre: 0.25*(-2) + 0.25*(-2) + 2
        assert_relative_eq!(newest[2 * width + 2], 1.0);
        // Direct neighbours receive rx (or ry)
        assert_relative_eq!(newest[2 * width + 1], 0.25);
        assert_relative_eq!(newest[2 * width + 3], 0.25);
        assert_relative_eq!(newest[width + 2], 0.25);
        assert_relative_eq!(newest[3 * width + 2], 0.25);
        // Diagonals untouched by a 5-point stencil
        assert_relative_eq!(newest[width + 1], 0.0);
        // Edges are never written
        assert_eq!(newest[0], -7.0);
        assert_eq!(newest[2 * width], -7.0);
        assert_eq!(newest[4 * width + 2], -7.0);
    }

    #[test]
    fn test_constant_field_is_preserved() {
        // A uniform field with no time derivative is a fixed point
        let (width, height) = (6, 4);
        let level = vec![3.0; width * height];
        let mut newest = vec![0.0; width * height];
        let coeffs = StepCoefficients { rx: 0.3, ry: 0.2 };

        advance_interior(&level, &level, &mut newest, width, height, coeffs);

        for row in 1..height - 1 {
            for col in 1..width - 1 {
                assert_relative_eq!(newest[row * width + col], 3.0);
            }
        }
    }
}
