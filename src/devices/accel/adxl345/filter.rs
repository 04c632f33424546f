//! Per-axis exponential low-pass filter

use crate::devices::traits::AccelError;
use nalgebra::Vector3;

/// Smoothing factor used when the caller has no preference
pub const DEFAULT_FILTER_ALPHA: f32 = 0.5;

/// Exponential smoothing: `filtered = new * alpha + filtered * (1 - alpha)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    state: Vector3<f32>,
}

impl Default for LowPassFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LowPassFilter {
    /// Filter with zero initial state
    pub fn new() -> Self {
        Self {
            state: Vector3::zeros(),
        }
    }

    /// Blend `sample` into the state and return the new state
    ///
    /// `alpha` must lie in [0, 1]; 1 passes the sample through, 0 holds
    /// the previous output.
    pub fn apply(&mut self, sample: Vector3<f32>, alpha: f32) -> Result<Vector3<f32>, AccelError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(AccelError::InvalidArgument);
        }
        self.state = sample * alpha + self.state * (1.0 - alpha);
        Ok(self.state)
    }

    /// Last filter output
    pub fn state(&self) -> Vector3<f32> {
        self.state
    }

    /// Return to zero state
    pub fn reset(&mut self) {
        self.state = Vector3::zeros();
    }
}
