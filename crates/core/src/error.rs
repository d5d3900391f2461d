//! Error type shared by every fallible solver operation

/// Errors raised while building or driving a wave solver
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Grid parameters cannot produce a usable grid
    InvalidGrid(String),
    /// Required setup is missing or inconsistent (e.g. no boundary injector)
    Configuration(String),
    /// The screen probe was queried before it was configured
    NotConfigured,
    /// An obstacle mask does not have the grid's shape
    ShapeMismatch {
        /// Grid shape as `(width, height)`
        expected: (usize, usize),
        /// Shape of the rejected mask
        actual: (usize, usize),
    },
    /// A non-finite value appeared in the field after a step
    NumericInstability {
        /// Step index that produced the value
        step: usize,
        /// Node x index
        x: usize,
        /// Node y index
        y: usize,
        /// Offending value
        value: f64,
    },
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::InvalidGrid(msg) => write!(f, "Invalid grid: {msg}"),
            SolverError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            SolverError::NotConfigured => write!(f, "Screen probe has not been configured"),
            SolverError::ShapeMismatch { expected, actual } => write!(
                f,
                "Obstacle shape {}x{} does not match grid shape {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            SolverError::NumericInstability { step, x, y, value } => write!(
                f,
                "Non-finite value {value} at node ({x}, {y}) after step {step}"
            ),
        }
    }
}

impl std::error::Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SolverError::ShapeMismatch {
            expected: (10, 5),
            actual: (5, 10),
        };
        assert_eq!(
            err.to_string(),
            "Obstacle shape 5x10 does not match grid shape 10x5"
        );
        assert_eq!(
            SolverError::NotConfigured.to_string(),
            "Screen probe has not been configured"
        );
    }
}
