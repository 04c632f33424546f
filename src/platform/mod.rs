//! Platform abstraction layer
//!
//! The driver talks to hardware only through `embedded-hal` traits. This
//! module holds the error classification shared by device drivers and, for
//! host testing, a mock platform that stands in for a real I2C bus.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::I2cError;
