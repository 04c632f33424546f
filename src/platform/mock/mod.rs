//! Mock platform implementation for testing
//!
//! This module provides mock implementations of the `embedded-hal` traits
//! the driver depends on, so it can be unit tested without hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use adxl345_driver::platform::mock::MockI2c;
//! use embedded_hal::i2c::I2c;
//!
//! let mut i2c = MockI2c::new(0x53).with_register(0x00, 0xE5);
//! let mut id = [0u8; 1];
//! i2c.write_read(0x53, &[0x00], &mut id).unwrap();
//! assert_eq!(id[0], 0xE5);
//! ```

#![cfg(any(test, feature = "mock"))]

mod i2c;
mod timer;

pub use i2c::{I2cTransaction, MockI2c, REGISTER_FILE_SIZE};
pub use timer::MockDelay;
