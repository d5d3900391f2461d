//! Obstacle masks
//!
//! An obstacle is a per-node transmission coefficient multiplied into the
//! newest level after every step; `0.0` blocks the wave, `1.0` lets it
//! through. The double-slit barrier is a thin column band that is opaque
//! everywhere except two horizontal openings.

use super::fields::FieldData;
use serde::{Deserialize, Serialize};

/// Double-slit barrier geometry, every value a proportion of the domain
///
/// x-quantities scale with the node count along x, y-quantities with the
/// node count along y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlitGeometry {
    /// Barrier centre along x
    pub x_position: f64,
    /// Midpoint between the two slits along y
    pub y_position: f64,
    /// Gap between the inner edges of the two slits
    pub separation: f64,
    /// Barrier extent along x
    pub thickness: f64,
    /// Opening of each slit along y
    pub aperture: f64,
}

impl Default for SlitGeometry {
    fn default() -> Self {
        Self {
            x_position: 0.375,
            y_position: 0.5,
            separation: 0.05,
            thickness: 0.001,
            aperture: 0.006,
        }
    }
}

/// Node index bounds of a double-slit barrier
///
/// Columns `[left, right)` carry the barrier. Within them rows
/// `[upper_far, upper_near)` and `[lower_near, lower_far)` stay open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlitBounds {
    /// First barrier column
    pub left: usize,
    /// One past the last barrier column
    pub right: usize,
    /// Outer edge of the upper slit
    pub upper_far: usize,
    /// Inner edge of the upper slit
    pub upper_near: usize,
    /// Inner edge of the lower slit
    pub lower_near: usize,
    /// Outer edge of the lower slit
    pub lower_far: usize,
}

// Proportion * nodes truncated toward zero, clamped into [0, nodes]
fn to_index(proportion: f64, nodes: usize) -> usize {
    let scaled = (nodes as f64 * proportion).trunc();
    if scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(nodes)
    }
}

impl SlitGeometry {
    /// Index bounds of the barrier on an `x_nodes` x `y_nodes` grid
    #[must_use]
    pub fn bounds(&self, x_nodes: usize, y_nodes: usize) -> SlitBounds {
        let half_thickness = self.thickness / 2.0;
        let half_separation = self.separation / 2.0;
        SlitBounds {
            left: to_index(self.x_position - half_thickness, x_nodes),
            right: to_index(self.x_position + half_thickness, x_nodes),
            upper_far: to_index(self.y_position - half_separation - self.aperture, y_nodes),
            upper_near: to_index(self.y_position - half_separation, y_nodes),
            lower_near: to_index(self.y_position + half_separation, y_nodes),
            lower_far: to_index(self.y_position + half_separation + self.aperture, y_nodes),
        }
    }

    /// Build the transmission mask for this barrier
    ///
    /// Three bands inside the barrier columns are zeroed in order: above the
    /// upper slit, between the slits, below the lower slit. Pathological
    /// parameters (non-positive aperture, inverted slits) are not validated;
    /// overlapping bands simply stay zero.
    #[must_use]
    pub fn mask(&self, x_nodes: usize, y_nodes: usize) -> FieldData {
        let bounds = self.bounds(x_nodes, y_nodes);
        let mut mask = FieldData::with_value(x_nodes, y_nodes, 1.0);

        let bands = [
            (0, bounds.upper_far),
            (bounds.upper_near, bounds.lower_near),
            (bounds.lower_far, y_nodes),
        ];
        for (start, end) in bands {
            for y in start..end {
                for x in bounds.left..bounds.right {
                    mask.set(x, y, 0.0);
                }
            }
        }

        mask
    }
}

/// Display mask for an obstacle: NaN where the obstacle is exactly zero, 1 elsewhere
#[must_use]
pub fn visualization_mask(obstacle: &FieldData) -> FieldData {
    FieldData {
        data: obstacle
            .data
            .iter()
            .map(|&v| if v == 0.0 { f64::NAN } else { 1.0 })
            .collect(),
        width: obstacle.width,
        height: obstacle.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact_geometry() -> SlitGeometry {
        // Every proportion is exact in binary on a 64x64 grid
        SlitGeometry {
            x_position: 0.5,
            y_position: 0.5,
            separation: 0.25,
            thickness: 0.125,
            aperture: 0.125,
        }
    }

    #[test]
    fn test_bounds() {
        let bounds = exact_geometry().bounds(64, 64);
        assert_eq!(
            bounds,
            SlitBounds {
                left: 28,
                right: 36,
                upper_far: 16,
                upper_near: 24,
                lower_near: 40,
                lower_far: 48,
            }
        );
    }

    #[test]
    fn test_mask_openings() {
        let mask = exact_geometry().mask(64, 64);
        for x in 28..36 {
            for y in 0..64 {
                let open = (16..24).contains(&y) || (40..48).contains(&y);
                let expected = if open { 1.0 } else { 0.0 };
                assert_eq!(mask.get(x, y), expected, "node ({x}, {y})");
            }
        }
        assert!((0..64).all(|y| mask.get(27, y) == 1.0 && mask.get(36, y) == 1.0));
    }

    #[test]
    fn test_bounds_clamped_to_grid() {
        let geometry = SlitGeometry {
            x_position: 0.0,
            y_position: 0.5,
            separation: 0.2,
            thickness: 0.5,
            aperture: 0.9,
        };
        let bounds = geometry.bounds(10, 10);
        assert_eq!(bounds.left, 0);
        assert_eq!(bounds.upper_far, 0);
        assert_eq!(bounds.lower_far, 10);
    }

    #[test]
    fn test_visualization_mask() {
        let mut obstacle = FieldData::with_value(3, 2, 1.0);
        obstacle.set(1, 0, 0.0);
        obstacle.set(2, 1, 0.5);

        let vis = visualization_mask(&obstacle);
        assert!(vis.get(1, 0).is_nan());
        assert_eq!(vis.get(2, 1), 1.0);
        assert_eq!(vis.get(0, 0), 1.0);
    }
}
