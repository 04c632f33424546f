//! ADXL345 3-Axis Accelerometer Driver
//!
//! Blocking I2C driver for the Analog Devices ADXL345 digital accelerometer.
//!
//! ## Features
//!
//! - Measurement range: ±2, ±4, ±8, ±16 g (10-bit or full resolution)
//! - Output data rate: 0.10 Hz to 3200 Hz
//! - Tap, double-tap, activity, inactivity and free-fall detection
//! - 32-sample FIFO (bypass, FIFO, stream, trigger)
//! - Two interrupt pins with per-event mapping
//! - I2C address 0x53 (ALT ADDRESS low)
//!
//! ## Usage
//!
//! ```ignore
//! use adxl345_driver::devices::accel::adxl345::{Adxl345Driver, InterruptPin};
//! use core::time::Duration;
//!
//! let mut accel = Adxl345Driver::new(i2c);
//! accel.begin()?;
//!
//! accel.set_tap_threshold(2.5)?;
//! accel.set_tap_duration(Duration::from_millis(15))?;
//! accel.set_tap_xyz(true)?;
//! accel.use_interrupt(InterruptPin::Int1)?;
//!
//! let events = accel.read_activities()?;
//! if events.is_tap {
//!     let g = accel.read_scaled()?;
//! }
//! ```

mod config;
mod driver;
mod filter;
pub mod registers;
mod status;
pub mod units;

pub use config::{
    Adxl345Config, Axis, DataRate, FifoMode, Interrupt, InterruptPin, InterruptPolarity, Range,
};
pub use driver::Adxl345Driver;
pub use filter::{LowPassFilter, DEFAULT_FILTER_ALPHA};
pub use status::{ActTapStatus, Activities, InterruptSource};
