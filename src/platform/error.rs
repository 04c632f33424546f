//! Platform error types
//!
//! Bus implementations report failures through `embedded_hal::i2c::Error`.
//! This module folds those HAL-specific errors into one small, copyable
//! classification that device drivers can store and compare.

use core::fmt;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// I2C-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Bus error occurred (misplaced START/STOP)
    BusError,
    /// No acknowledgment received for the address or a data byte
    Nack,
    /// Arbitration lost to another bus master
    ArbitrationLost,
    /// Peripheral data overrun or underrun
    Overrun,
    /// Any other HAL-reported failure (including timeouts)
    Other,
}

impl I2cError {
    /// Classify any `embedded-hal` I2C error
    pub fn from_hal<E: embedded_hal::i2c::Error>(err: &E) -> Self {
        Self::from(err.kind())
    }
}

impl From<ErrorKind> for I2cError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cError::BusError,
            ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address | NoAcknowledgeSource::Data | NoAcknowledgeSource::Unknown,
            ) => I2cError::Nack,
            ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
            ErrorKind::Overrun => I2cError::Overrun,
            _ => I2cError::Other,
        }
    }
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I2cError::BusError => write!(f, "I2C bus error"),
            I2cError::Nack => write!(f, "I2C no acknowledge"),
            I2cError::ArbitrationLost => write!(f, "I2C arbitration lost"),
            I2cError::Overrun => write!(f, "I2C overrun"),
            I2cError::Other => write!(f, "I2C transaction failed"),
        }
    }
}
