//! Field data container for the wave solver
//!
//! A `FieldData` is a flat `Vec<f64>` covering the whole grid in row-major
//! order, with `width` nodes along x and `height` nodes along y. Rows are
//! contiguous so the stencil can hand whole rows to worker threads.

/// 2D scalar field stored as a flat row-major buffer
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<f64>,
    /// Number of nodes along x
    pub width: usize,
    /// Number of nodes along y
    pub height: usize,
}

impl FieldData {
    /// Create a new field with given dimensions, initialized to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Number of nodes along x
    /// * `height` - Number of nodes along y
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new field with every node set to `value`
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Grid shape as `(width, height)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Flat index of node `(x, y)`
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[self.index(x, y)]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Set every node of column `x` to `value`
    pub fn fill_column(&mut self, x: usize, value: f64) {
        for y in 0..self.height {
            self.set(x, y, value);
        }
    }

    /// Copy row `from` onto row `to`
    pub fn copy_row(&mut self, from: usize, to: usize) {
        let src = self.index(0, from);
        let dst = self.index(0, to);
        self.data.copy_within(src..src + self.width, dst);
    }

    /// Overwrite the outermost ring of nodes with the values in `other`
    ///
    /// # Panics
    ///
    /// Panics if the two fields have different shapes
    pub fn copy_edges_from(&mut self, other: &Self) {
        assert_eq!(self.shape(), other.shape(), "Field shapes differ");
        let (width, height) = self.shape();
        let last_row = self.index(0, height - 1);
        self.data[..width].copy_from_slice(&other.data[..width]);
        self.data[last_row..].copy_from_slice(&other.data[last_row..]);
        for y in 1..height - 1 {
            let left = self.index(0, y);
            let right = self.index(width - 1, y);
            self.data[left] = other.data[left];
            self.data[right] = other.data[right];
        }
    }

    /// Elementwise multiply by another field of the same shape
    ///
    /// # Panics
    ///
    /// Panics if the two fields have different shapes
    pub fn multiply_by(&mut self, other: &Self) {
        assert_eq!(self.shape(), other.shape(), "Field shapes differ");
        for (value, factor) in self.data.iter_mut().zip(&other.data) {
            *value *= factor;
        }
    }

    /// Largest absolute value in the field (NaN entries are ignored)
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.data
            .iter()
            .filter(|v| !v.is_nan())
            .fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Position and value of the first non-finite node, if any
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|v| !v.is_finite())
            .map(|idx| (idx % self.width, idx / self.width, self.data[idx]))
    }
}
