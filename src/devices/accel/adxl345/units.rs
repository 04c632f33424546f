//! Unit conversions between physical values and register counts
//!
//! All conversions round to the nearest LSB. Values that do not fit in the
//! unsigned 8-bit register are rejected rather than saturated.

use super::registers::{
    BASE_RATE_CODE, BASE_RATE_HZ, OFFSET_G_PER_LSB, THRESHOLD_G_PER_LSB,
};
use crate::devices::traits::AccelError;
use core::time::Duration;

/// Output data rate (Hz) for a bandwidth code: `2^(code - 6) * 6.25`
///
/// Only the low four bits of `code` are used.
pub fn code_to_rate(code: u8) -> f32 {
    let code = code & 0x0F;
    if code >= BASE_RATE_CODE {
        BASE_RATE_HZ * (1u32 << (code - BASE_RATE_CODE)) as f32
    } else {
        BASE_RATE_HZ / (1u32 << (BASE_RATE_CODE - code)) as f32
    }
}

/// Nearest bandwidth code for an output data rate in Hz
///
/// Fails with `InvalidArgument` if the rate is not positive or lies more than
/// half a step outside the 0x0-0xF code range.
pub fn rate_to_code(hz: f32) -> Result<u8, AccelError> {
    if !hz.is_finite() || hz <= 0.0 {
        return Err(AccelError::InvalidArgument);
    }
    let steps = libm::roundf(libm::log2f(hz / BASE_RATE_HZ));
    let code = steps + BASE_RATE_CODE as f32;
    if !(0.0..=15.0).contains(&code) {
        return Err(AccelError::InvalidArgument);
    }
    Ok(code as u8)
}

/// Threshold in g to register counts (62.5 mg/LSB)
pub fn threshold_to_lsb(g: f32) -> Result<u8, AccelError> {
    scaled_to_lsb(g, THRESHOLD_G_PER_LSB)
}

/// Register counts to threshold in g
pub fn lsb_to_threshold(lsb: u8) -> f32 {
    lsb as f32 * THRESHOLD_G_PER_LSB
}

/// Offset register counts (two's complement) to g
pub fn offset_to_g(lsb: i8) -> f32 {
    lsb as f32 * OFFSET_G_PER_LSB
}

/// Duration to register counts for a register scaled at `us_per_lsb`
pub fn duration_to_lsb(duration: Duration, us_per_lsb: u64) -> Result<u8, AccelError> {
    let us = duration.as_micros();
    let step = us_per_lsb as u128;
    let lsb = (us + step / 2) / step;
    u8::try_from(lsb).map_err(|_| AccelError::InvalidArgument)
}

/// Register counts to duration for a register scaled at `us_per_lsb`
pub fn lsb_to_duration(lsb: u8, us_per_lsb: u64) -> Duration {
    Duration::from_micros(lsb as u64 * us_per_lsb)
}

fn scaled_to_lsb(value: f32, per_lsb: f32) -> Result<u8, AccelError> {
    if !value.is_finite() {
        return Err(AccelError::InvalidArgument);
    }
    let lsb = libm::roundf(value / per_lsb);
    if !(0.0..=255.0).contains(&lsb) {
        return Err(AccelError::InvalidArgument);
    }
    Ok(lsb as u8)
}
