//! Device traits
//!
//! This module contains hardware-independent trait definitions for device drivers.
//! These traits enable:
//! - Unit testing with mock implementations
//! - Sensor independence for higher-level code
//! - Future hardware upgrades without consumer changes

pub mod accel;

pub use accel::{AccelError, AccelSensor, RawSample, GRAVITY};
