#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! adxl345_driver - Blocking I2C driver for the ADXL345 3-axis accelerometer
//!
//! This library provides register-level access, typed configuration, sample
//! decoding and motion-event status for the Analog Devices ADXL345, written
//! against the `embedded-hal` 1.0 blocking I2C trait.
//!
//! ## Usage
//!
//! ```ignore
//! use adxl345_driver::devices::accel::adxl345::{Adxl345Config, Adxl345Driver};
//!
//! let mut accel = Adxl345Driver::new(i2c);
//! accel.begin_with_config(&Adxl345Config::default())?;
//! let g = accel.read_scaled()?;
//! ```

// Logging macros (log_info!, log_error!, ...) and other shared infrastructure
pub mod core;

// Bus error classification and the mock platform used by host tests
pub mod platform;

// Device traits and the ADXL345 driver
pub mod devices;
