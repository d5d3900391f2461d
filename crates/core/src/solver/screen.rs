//! Line probe ("screen") sampling the field
//!
//! A screen is a straight run of nodes, vertical or horizontal, whose values
//! are copied out of the current level on demand. Every sample also feeds a
//! per-node running maximum of `|u|`, the interference envelope.

use super::fields::FieldData;
use crate::SolverError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Orientation of the screen line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Fixed x, varying y
    #[default]
    Vertical,
    /// Fixed y, varying x
    Horizontal,
}

impl Alignment {
    /// Map the numeric alignment code (`0` vertical, `1` horizontal)
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Vertical),
            1 => Some(Self::Horizontal),
            _ => None,
        }
    }
}

/// Configured screen with its sample buffer and envelope
#[derive(Debug, Clone, PartialEq)]
pub struct LineProbe {
    alignment: Alignment,
    /// Node index along x of the screen centre
    x_index: usize,
    /// Node index along y of the screen centre
    y_index: usize,
    /// Nodes covered along the varying axis
    span: Range<usize>,
    latest: Vec<f64>,
    envelope: Vec<f64>,
}

impl LineProbe {
    /// Place a screen on an `x_nodes` x `y_nodes` grid
    ///
    /// # Arguments
    ///
    /// * `size` - Screen length as a proportion of the varying axis
    /// * `x_position` - Screen centre along x, proportion in `[0, 1]`
    /// * `y_position` - Screen centre along y, proportion in `[0, 1]`
    /// * `alignment` - Screen orientation
    /// * `x_nodes`, `y_nodes` - Grid shape
    ///
    /// The centre index is `trunc(position * (nodes - 1))`, the length
    /// `trunc(size * nodes)` and the first node `trunc(centre - length / 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] when a proportion lies outside
    /// `[0, 1]`, the screen is empty, or it would extend past the grid.
    pub fn new(
        size: f64,
        x_position: f64,
        y_position: f64,
        alignment: Alignment,
        x_nodes: usize,
        y_nodes: usize,
    ) -> Result<Self, SolverError> {
        let proportions = [
            ("size", size),
            ("x_position", x_position),
            ("y_position", y_position),
        ];
        for (name, value) in proportions {
            if !(0.0..=1.0).contains(&value) {
                return Err(SolverError::Configuration(format!(
                    "screen {name} must lie in [0, 1], got {value}"
                )));
            }
        }

        let x_index = (x_position * (x_nodes - 1) as f64) as usize;
        let y_index = (y_position * (y_nodes - 1) as f64) as usize;
        let (centre, extent) = match alignment {
            Alignment::Vertical => (y_index, y_nodes),
            Alignment::Horizontal => (x_index, x_nodes),
        };

        let length = (size * extent as f64) as usize;
        if length == 0 {
            return Err(SolverError::Configuration(
                "screen covers no nodes".to_string(),
            ));
        }

        let start = (centre as f64 - length as f64 / 2.0).trunc();
        if start < 0.0 || start as usize + length > extent {
            return Err(SolverError::Configuration(format!(
                "screen of {length} nodes centred on node {centre} does not fit in {extent} nodes"
            )));
        }
        let start = start as usize;

        Ok(Self {
            alignment,
            x_index,
            y_index,
            span: start..start + length,
            latest: vec![0.0; length],
            envelope: vec![0.0; length],
        })
    }

    /// Screen orientation
    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Centre node as `(x, y)`
    #[must_use]
    pub fn centre(&self) -> (usize, usize) {
        (self.x_index, self.y_index)
    }

    /// Node range covered along the varying axis
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Number of nodes on the screen
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.span.len()
    }

    /// Grid nodes on the screen as `(x, y)` pairs
    pub fn nodes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.span.clone().map(move |k| match self.alignment {
            Alignment::Vertical => (self.x_index, k),
            Alignment::Horizontal => (k, self.y_index),
        })
    }

    /// Copy the screen values out of `field` and update the envelope
    ///
    /// The returned vector is an owned copy; later steps never alias it.
    pub fn sample(&mut self, field: &FieldData) -> Vec<f64> {
        let values: Vec<f64> = self.nodes().map(|(x, y)| field.get(x, y)).collect();
        for (peak, value) in self.envelope.iter_mut().zip(&values) {
            *peak = peak.max(value.abs());
        }
        self.latest.clone_from(&values);
        values
    }

    /// Values captured by the most recent [`LineProbe::sample`]
    #[must_use]
    pub fn latest(&self) -> &[f64] {
        &self.latest
    }

    /// Running per-node maximum of `|u|` over every sample so far
    #[must_use]
    pub fn envelope(&self) -> &[f64] {
        &self.envelope
    }

    /// Overwrite the screen nodes of `field` with NaN for display
    pub fn blank(&self, field: &mut FieldData) {
        for (x, y) in self.nodes() {
            field.set(x, y, f64::NAN);
        }
    }

    /// Forget every sample, keeping the placement
    pub fn reset(&mut self) {
        self.latest.fill(0.0);
        self.envelope.fill(0.0);
    }
}
