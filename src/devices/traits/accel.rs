//! Accelerometer Sensor Trait and Data Types
//!
//! Device-independent interface for 3-axis accelerometers. Consumers that
//! only need acceleration samples can be written against `AccelSensor`
//! and tested with any implementation of it.
//!
//! ## Usage
//!
//! ```ignore
//! use adxl345_driver::devices::traits::{AccelError, AccelSensor};
//!
//! fn tilt_z<A: AccelSensor>(accel: &mut A) -> Result<f32, AccelError> {
//!     Ok(accel.read_g()?.z)
//! }
//! ```

use crate::platform::I2cError;
use core::fmt;
use nalgebra::Vector3;

/// Standard gravity (m/s²)
pub const GRAVITY: f32 = 9.80665;

/// Accelerometer error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelError {
    /// I2C communication failed
    I2c(I2cError),

    /// Argument outside the range the device accepts; no bus traffic issued
    InvalidArgument,

    /// Device ID register did not hold the expected signature
    DeviceIdMismatch {
        /// Value actually read from the ID register
        found: u8,
    },
}

impl From<I2cError> for AccelError {
    fn from(err: I2cError) -> Self {
        AccelError::I2c(err)
    }
}

impl fmt::Display for AccelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccelError::I2c(e) => write!(f, "{}", e),
            AccelError::InvalidArgument => write!(f, "Invalid argument"),
            AccelError::DeviceIdMismatch { found } => {
                write!(f, "Unexpected device ID {:#04x}", found)
            }
        }
    }
}

/// One raw accelerometer sample in device counts (LSB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    /// Create a sample from per-axis counts
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode X/Y/Z from little-endian low/high byte pairs
    pub fn from_le_bytes(buf: &[u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([buf[0], buf[1]]),
            y: i16::from_le_bytes([buf[2], buf[3]]),
            z: i16::from_le_bytes([buf[4], buf[5]]),
        }
    }

    /// Counts as a float vector
    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Multiply each axis by its gain
    pub fn scale(self, gains: &Vector3<f32>) -> Vector3<f32> {
        self.to_vector().component_mul(gains)
    }
}

/// Device-independent accelerometer interface
///
/// All methods block until the underlying bus transaction completes.
pub trait AccelSensor {
    /// Read one raw sample (device counts)
    fn read_raw(&mut self) -> Result<RawSample, AccelError>;

    /// Read acceleration in g
    fn read_g(&mut self) -> Result<Vector3<f32>, AccelError>;

    /// Read acceleration in m/s² (includes gravity)
    fn read_m_s2(&mut self) -> Result<Vector3<f32>, AccelError> {
        Ok(self.read_g()? * GRAVITY)
    }
}
