//! Device drivers
//!
//! This module contains device drivers written against `embedded-hal`
//! traits, so they run on any platform that provides an I2C bus.
//!
//! ## Modules
//!
//! - `accel`: Accelerometer drivers (ADXL345)
//! - `traits`: Device trait definitions (AccelSensor, etc.)

pub mod accel;
pub mod traits;
