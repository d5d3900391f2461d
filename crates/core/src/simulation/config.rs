//! Double-slit experiment configuration
//!
//! Every field has a default reproducing the reference run: a 2 m x 1 m
//! domain, 0.9 m/s waves, a 45 Hz pulse and a screen at 70% of the width.

use crate::solver::{Alignment, PulseSource, SlitGeometry, SolverSettings};
use crate::SolverError;
use serde::{Deserialize, Serialize};

/// Screen placement, proportions of the domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Screen centre along x
    pub x_position: f64,
    /// Screen centre along y
    pub y_position: f64,
    /// Screen length along its varying axis
    pub size: f64,
    /// Screen orientation
    pub alignment: Alignment,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            x_position: 0.7,
            y_position: 0.5,
            size: 0.8,
            alignment: Alignment::Vertical,
        }
    }
}

/// Complete description of a double-slit run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleSlitConfig {
    /// Simulated time in seconds
    pub total_time: f64,
    /// Domain width in meters
    pub width: f64,
    /// Domain height in meters
    pub height: f64,
    /// Time step in seconds
    pub dt: f64,
    /// Wave speed in meters/second
    pub speed: f64,

    /// Peak displacement of the source
    pub pulse_amplitude: f64,
    /// Source frequency in Hz
    pub pulse_frequency: f64,
    /// Source duration in seconds (<= 0 keeps the source on)
    pub pulse_duration: f64,

    /// Barrier geometry
    pub slit: SlitGeometry,
    /// Screen placement
    pub screen: ScreenConfig,

    /// Display cap as a fraction of the pulse amplitude
    pub color_cap: f64,
    /// Highest fringe order to predict
    pub prediction_order: usize,

    /// Solver switches
    pub solver: SolverSettings,
}

/// Pulse length covering a whole number of periods, about `0.5625 / speed` seconds
#[must_use]
pub fn default_pulse_duration(frequency: f64, speed: f64) -> f64 {
    (frequency * 0.5625 / speed).round() / frequency
}

impl Default for DoubleSlitConfig {
    fn default() -> Self {
        let speed = 0.9;
        let pulse_frequency = 45.0;
        Self {
            total_time: 4.5,
            width: 2.0,
            height: 1.0,
            dt: 0.001,
            speed,
            pulse_amplitude: 0.05,
            pulse_frequency,
            pulse_duration: default_pulse_duration(pulse_frequency, speed),
            slit: SlitGeometry::default(),
            screen: ScreenConfig::default(),
            color_cap: 0.195,
            prediction_order: 5,
            solver: SolverSettings::default(),
        }
    }
}

impl DoubleSlitConfig {
    /// Check the physical parameters
    ///
    /// Grid and screen placement are validated later, when the solver is
    /// built.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] naming the first non-positive or
    /// non-finite quantity.
    pub fn validate(&self) -> Result<(), SolverError> {
        let checks = [
            ("total_time", self.total_time),
            ("width", self.width),
            ("height", self.height),
            ("dt", self.dt),
            ("speed", self.speed),
            ("pulse_frequency", self.pulse_frequency),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SolverError::Configuration(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.pulse_amplitude.is_finite() {
            return Err(SolverError::Configuration(format!(
                "pulse_amplitude must be finite, got {}",
                self.pulse_amplitude
            )));
        }
        Ok(())
    }

    /// Source driving the left edge
    #[must_use]
    pub fn pulse(&self) -> PulseSource {
        PulseSource::new(self.pulse_amplitude, self.pulse_frequency, self.pulse_duration)
    }

    /// Number of frames in the run, `trunc(total_time / dt)`
    #[must_use]
    pub fn total_steps(&self) -> usize {
        (self.total_time / self.dt) as usize
    }

    /// Wavelength of the source, `speed / frequency`
    #[must_use]
    pub fn wavelength(&self) -> f64 {
        self.speed / self.pulse_frequency
    }

    /// Display cap in field units
    #[must_use]
    pub fn display_cap(&self) -> f64 {
        self.color_cap * self.pulse_amplitude
    }
}
