//! Accelerometer Drivers
//!
//! This module contains accelerometer drivers implementing the `AccelSensor` trait.
//!
//! ## Available Drivers
//!
//! - `adxl345`: Analog Devices ADXL345 3-axis accelerometer (I2C)

pub mod adxl345;

pub use adxl345::Adxl345Driver;
