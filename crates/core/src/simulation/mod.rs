//! Ready-made double-slit experiment
//!
//! `DoubleSlitSimulation` orchestrates grid sizing, barrier authoring, the
//! pulse source and the screen from a single serde-friendly config.

pub mod config;
#[allow(clippy::module_name_repetitions)]
pub mod double_slit;

// Re-export main types
pub use config::{default_pulse_duration, DoubleSlitConfig, ScreenConfig};
pub use double_slit::{DoubleSlitSimulation, FrameStats};
