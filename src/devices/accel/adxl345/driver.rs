//! ADXL345 I2C Driver Implementation
//!
//! Register-level access and typed configuration for the ADXL345. All
//! operations are blocking: each one issues one or more I2C transactions
//! and returns when they complete or fail.
//!
//! This driver is platform-agnostic and works with any
//! `embedded_hal::i2c::I2c` implementation.
//!
//! Read-modify-write operations span two bus transactions. The driver takes
//! `&mut self` everywhere, but if the bus is shared with other devices the
//! caller must serialize access to it.

use super::config::{
    Adxl345Config, Axis, DataRate, FifoMode, Interrupt, InterruptPin, InterruptPolarity, Range,
};
use super::filter::LowPassFilter;
use super::registers::{self, BitField};
use super::status::{Activities, InterruptSource};
use super::units;
use crate::devices::traits::{AccelError, AccelSensor, RawSample, GRAVITY};
use crate::platform::I2cError;
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use nalgebra::Vector3;

/// ADXL345 I2C Driver
///
/// Owns the bus handle, the per-axis gain table used for g conversion and
/// the low-pass filter state. The device address is fixed at 0x53.
///
/// # Type Parameters
///
/// * `I2C` - Any type implementing `embedded_hal::i2c::I2c`
pub struct Adxl345Driver<I2C>
where
    I2C: I2c,
{
    /// I2C bus handle
    i2c: I2C,

    /// Per-axis gain (g per LSB)
    gains: Vector3<f32>,

    /// Low-pass filter state
    filter: LowPassFilter,
}

impl<I2C> Adxl345Driver<I2C>
where
    I2C: I2c,
{
    /// Create a new ADXL345 driver
    ///
    /// No bus traffic is issued. Call `begin()` (recommended) or
    /// `power_on()` before reading samples.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            gains: Vector3::repeat(registers::FULL_RES_G_PER_LSB),
            filter: LowPassFilter::new(),
        }
    }

    /// Release the bus handle
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Borrow the bus handle
    pub fn bus(&self) -> &I2C {
        &self.i2c
    }

    /// Mutably borrow the bus handle
    pub fn bus_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Get the I2C address
    pub fn address(&self) -> u8 {
        registers::ADXL345_ADDR
    }

    // =========================================================================
    // Register Primitives
    // =========================================================================

    /// Read `buf.len()` consecutive registers starting at `reg`
    pub fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), AccelError> {
        self.i2c
            .write_read(registers::ADXL345_ADDR, &[reg], buf)
            .map_err(|e| AccelError::I2c(I2cError::from_hal(&e)))
    }

    /// Read a single register
    pub fn read_register(&mut self, reg: u8) -> Result<u8, AccelError> {
        let mut buf = [0u8; 1];
        self.read_registers(reg, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single register
    pub fn write_register(&mut self, reg: u8, value: u8) -> Result<(), AccelError> {
        self.i2c
            .write(registers::ADXL345_ADDR, &[reg, value])
            .map_err(|e| AccelError::I2c(I2cError::from_hal(&e)))
    }

    /// Read one bit of a register
    pub fn read_bit(&mut self, reg: u8, bit: u8) -> Result<bool, AccelError> {
        if bit > 7 {
            return Err(AccelError::InvalidArgument);
        }
        Ok(self.read_register(reg)? & (1 << bit) != 0)
    }

    /// Set or clear one bit of a register, preserving the others
    pub fn write_bit(&mut self, reg: u8, bit: u8, value: bool) -> Result<(), AccelError> {
        if bit > 7 {
            return Err(AccelError::InvalidArgument);
        }
        let mask = 1 << bit;
        self.modify_register(reg, mask, if value { mask } else { 0 })
    }

    /// Read a multi-bit field of a register
    pub fn read_field(&mut self, reg: u8, field: BitField) -> Result<u8, AccelError> {
        Ok(field.extract(self.read_register(reg)?))
    }

    /// Replace a multi-bit field of a register, preserving bits outside it
    ///
    /// A value wider than the field is rejected before any bus traffic.
    pub fn write_field(&mut self, reg: u8, field: BitField, value: u8) -> Result<(), AccelError> {
        if value > field.max_value() {
            return Err(AccelError::InvalidArgument);
        }
        self.modify_register(reg, field.mask(), value << field.shift)
    }

    /// Read `reg`, replace the bits in `mask` with `bits`, write it back
    fn modify_register(&mut self, reg: u8, mask: u8, bits: u8) -> Result<(), AccelError> {
        let current = self.read_register(reg)?;
        let updated = (current & !mask) | (bits & mask);
        crate::log_trace!("reg {:#x}: {:#x} -> {:#x}", reg, current, updated);
        self.write_register(reg, updated)
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Read the device ID register (0xE5 for a genuine ADXL345)
    pub fn read_device_id(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::DEVID)
    }

    /// Verify the device ID and enable measurement
    ///
    /// Fails with `DeviceIdMismatch` if DEVID does not read 0xE5; in that
    /// case POWER_CTL is left untouched.
    pub fn begin(&mut self) -> Result<(), AccelError> {
        let id = self.read_device_id()?;
        if id != registers::ADXL345_DEVICE_ID {
            crate::log_error!(
                "ADXL345 DEVID mismatch: expected {:#x}, got {:#x}",
                registers::ADXL345_DEVICE_ID,
                id
            );
            return Err(AccelError::DeviceIdMismatch { found: id });
        }
        crate::log_info!("ADXL345 detected (DEVID: {:#x})", id);

        self.write_register(registers::POWER_CTL, registers::POWER_CTL_MEASURE)?;
        crate::log_info!("ADXL345 measurement enabled");
        Ok(())
    }

    /// `begin()` followed by `apply_config()`
    pub fn begin_with_config(&mut self, config: &Adxl345Config) -> Result<(), AccelError> {
        self.begin()?;
        self.apply_config(config)
    }

    /// Write range, resolution, polarity, data rate and power mode
    ///
    /// Bits of DATA_FORMAT and BW_RATE not covered by the configuration
    /// (self-test, SPI, justify) are preserved.
    pub fn apply_config(&mut self, config: &Adxl345Config) -> Result<(), AccelError> {
        let data_format_mask = registers::DATA_FORMAT_RANGE.mask()
            | (1 << registers::DATA_FORMAT_FULL_RES_BIT)
            | (1 << registers::DATA_FORMAT_INT_INVERT_BIT);
        self.modify_register(
            registers::DATA_FORMAT,
            data_format_mask,
            config.data_format_bits(),
        )?;

        let bw_rate_mask =
            registers::BW_RATE_RATE.mask() | (1 << registers::BW_RATE_LOW_POWER_BIT);
        self.modify_register(registers::BW_RATE, bw_rate_mask, config.bw_rate_bits())?;

        crate::log_debug!(
            "ADXL345 configured: range {} g, rate code {:#x}, full res {}",
            config.range.g(),
            config.data_rate.code(),
            config.full_resolution
        );
        Ok(())
    }

    /// Power-on sequence: reset, auto-sleep, then measure
    ///
    /// The three POWER_CTL writes are issued back to back.
    pub fn power_on(&mut self) -> Result<(), AccelError> {
        for value in Self::POWER_ON_SEQUENCE {
            self.write_register(registers::POWER_CTL, value)?;
        }
        Ok(())
    }

    /// Power-on sequence with a settle delay after each POWER_CTL write
    pub fn power_on_with_delay<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), AccelError> {
        for value in Self::POWER_ON_SEQUENCE {
            self.write_register(registers::POWER_CTL, value)?;
            delay.delay_us(registers::POWER_CTL_SETTLE_US);
        }
        Ok(())
    }

    const POWER_ON_SEQUENCE: [u8; 3] = [
        0,
        registers::POWER_CTL_AUTO_SLEEP,
        registers::POWER_CTL_MEASURE,
    ];

    /// Leave measurement mode (other POWER_CTL bits preserved)
    pub fn standby(&mut self) -> Result<(), AccelError> {
        self.write_bit(registers::POWER_CTL, registers::POWER_CTL_MEASURE_BIT, false)
    }

    /// Whether the MEASURE bit is set
    pub fn is_measuring(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::POWER_CTL, registers::POWER_CTL_MEASURE_BIT)
    }

    /// Reset detection settings to a known state
    ///
    /// Range ±2 g, 100 Hz, all thresholds and timings zero, detection axes
    /// disabled, all interrupts disabled and mapped to INT1.
    pub fn clear_settings(&mut self) -> Result<(), AccelError> {
        self.set_range(Range::G2)?;
        self.set_data_rate(DataRate::Hz100)?;

        for reg in [
            registers::THRESH_TAP,
            registers::DUR,
            registers::LATENT,
            registers::WINDOW,
            registers::THRESH_ACT,
            registers::THRESH_INACT,
            registers::TIME_INACT,
            registers::THRESH_FF,
            registers::TIME_FF,
        ] {
            self.write_register(reg, 0)?;
        }

        self.set_activity_xyz(false)?;
        self.set_inactivity_xyz(false)?;
        self.set_tap_xyz(false)?;

        self.write_register(registers::INT_MAP, 0)?;
        self.write_register(registers::INT_ENABLE, 0)?;
        Ok(())
    }

    // =========================================================================
    // Data Format
    // =========================================================================

    /// Current measurement range
    pub fn range(&mut self) -> Result<Range, AccelError> {
        let bits = self.read_field(registers::DATA_FORMAT, registers::DATA_FORMAT_RANGE)?;
        Ok(Range::from_register(bits))
    }

    /// Set the measurement range (other DATA_FORMAT bits preserved)
    pub fn set_range(&mut self, range: Range) -> Result<(), AccelError> {
        self.write_field(
            registers::DATA_FORMAT,
            registers::DATA_FORMAT_RANGE,
            range.register_value(),
        )?;
        crate::log_debug!("Range set to {} g", range.g());
        Ok(())
    }

    /// Set the range from a full-scale value in g; unknown values select ±2 g
    pub fn set_range_g(&mut self, g: u8) -> Result<(), AccelError> {
        self.set_range(Range::from_g(g))
    }

    /// SELF_TEST bit
    pub fn self_test(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::DATA_FORMAT, registers::DATA_FORMAT_SELF_TEST_BIT)
    }

    /// Apply (true) or remove (false) the self-test force
    pub fn set_self_test(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::DATA_FORMAT,
            registers::DATA_FORMAT_SELF_TEST_BIT,
            enabled,
        )
    }

    /// SPI bit (true = 3-wire SPI)
    pub fn spi_3wire(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::DATA_FORMAT, registers::DATA_FORMAT_SPI_BIT)
    }

    pub fn set_spi_3wire(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(registers::DATA_FORMAT, registers::DATA_FORMAT_SPI_BIT, enabled)
    }

    /// Interrupt pin polarity
    pub fn interrupt_polarity(&mut self) -> Result<InterruptPolarity, AccelError> {
        let inverted =
            self.read_bit(registers::DATA_FORMAT, registers::DATA_FORMAT_INT_INVERT_BIT)?;
        Ok(if inverted {
            InterruptPolarity::ActiveLow
        } else {
            InterruptPolarity::ActiveHigh
        })
    }

    pub fn set_interrupt_polarity(
        &mut self,
        polarity: InterruptPolarity,
    ) -> Result<(), AccelError> {
        self.write_bit(
            registers::DATA_FORMAT,
            registers::DATA_FORMAT_INT_INVERT_BIT,
            polarity == InterruptPolarity::ActiveLow,
        )
    }

    /// FULL_RES bit
    pub fn full_resolution(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::DATA_FORMAT, registers::DATA_FORMAT_FULL_RES_BIT)
    }

    /// Full resolution keeps 3.9 mg/LSB at every range; otherwise 10-bit output
    pub fn set_full_resolution(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::DATA_FORMAT,
            registers::DATA_FORMAT_FULL_RES_BIT,
            enabled,
        )
    }

    /// JUSTIFY bit (true = left-justified)
    pub fn left_justify(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::DATA_FORMAT, registers::DATA_FORMAT_JUSTIFY_BIT)
    }

    pub fn set_left_justify(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::DATA_FORMAT,
            registers::DATA_FORMAT_JUSTIFY_BIT,
            enabled,
        )
    }

    // =========================================================================
    // Data Rate and Power Mode
    // =========================================================================

    /// Current bandwidth code (BW_RATE[3:0])
    pub fn bandwidth_code(&mut self) -> Result<u8, AccelError> {
        self.read_field(registers::BW_RATE, registers::BW_RATE_RATE)
    }

    /// Set the bandwidth code; only 0x6 (6.25 Hz) to 0xF (3200 Hz) are accepted
    pub fn set_bandwidth_code(&mut self, code: u8) -> Result<(), AccelError> {
        if !(registers::BW_CODE_MIN..=registers::BW_CODE_MAX).contains(&code) {
            crate::log_warn!("Rejected bandwidth code {:#x}", code);
            return Err(AccelError::InvalidArgument);
        }
        self.write_field(registers::BW_RATE, registers::BW_RATE_RATE, code)
    }

    /// Current output data rate
    pub fn data_rate(&mut self) -> Result<DataRate, AccelError> {
        Ok(DataRate::from_code(self.bandwidth_code()?))
    }

    /// Set the output data rate (any of the 16 codes)
    pub fn set_data_rate(&mut self, rate: DataRate) -> Result<(), AccelError> {
        self.write_field(registers::BW_RATE, registers::BW_RATE_RATE, rate.code())?;
        crate::log_debug!("Data rate code set to {:#x}", rate.code());
        Ok(())
    }

    /// Current output data rate in Hz
    pub fn rate_hz(&mut self) -> Result<f32, AccelError> {
        Ok(units::code_to_rate(self.bandwidth_code()?))
    }

    /// Set the output data rate to the nearest supported value
    pub fn set_rate_hz(&mut self, hz: f32) -> Result<(), AccelError> {
        let code = units::rate_to_code(hz)?;
        self.set_data_rate(DataRate::from_code(code))
    }

    /// LOW_POWER bit
    pub fn low_power(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::BW_RATE, registers::BW_RATE_LOW_POWER_BIT)
    }

    pub fn set_low_power(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(registers::BW_RATE, registers::BW_RATE_LOW_POWER_BIT, enabled)
    }

    // =========================================================================
    // Thresholds (62.5 mg/LSB)
    // =========================================================================

    fn threshold(&mut self, reg: u8) -> Result<f32, AccelError> {
        Ok(units::lsb_to_threshold(self.read_register(reg)?))
    }

    fn set_threshold(&mut self, reg: u8, g: f32) -> Result<(), AccelError> {
        let lsb = units::threshold_to_lsb(g)?;
        self.write_register(reg, lsb)
    }

    /// Tap threshold in g
    pub fn tap_threshold(&mut self) -> Result<f32, AccelError> {
        self.threshold(registers::THRESH_TAP)
    }

    /// Set the tap threshold in g (0 to 15.9375)
    pub fn set_tap_threshold(&mut self, g: f32) -> Result<(), AccelError> {
        self.set_threshold(registers::THRESH_TAP, g)
    }

    pub fn tap_threshold_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::THRESH_TAP)
    }

    pub fn set_tap_threshold_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::THRESH_TAP, lsb)
    }

    /// Activity threshold in g
    pub fn activity_threshold(&mut self) -> Result<f32, AccelError> {
        self.threshold(registers::THRESH_ACT)
    }

    pub fn set_activity_threshold(&mut self, g: f32) -> Result<(), AccelError> {
        self.set_threshold(registers::THRESH_ACT, g)
    }

    pub fn activity_threshold_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::THRESH_ACT)
    }

    pub fn set_activity_threshold_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::THRESH_ACT, lsb)
    }

    /// Inactivity threshold in g
    pub fn inactivity_threshold(&mut self) -> Result<f32, AccelError> {
        self.threshold(registers::THRESH_INACT)
    }

    pub fn set_inactivity_threshold(&mut self, g: f32) -> Result<(), AccelError> {
        self.set_threshold(registers::THRESH_INACT, g)
    }

    pub fn inactivity_threshold_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::THRESH_INACT)
    }

    pub fn set_inactivity_threshold_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::THRESH_INACT, lsb)
    }

    /// Free-fall threshold in g (compared against the root-sum-square of all axes)
    pub fn free_fall_threshold(&mut self) -> Result<f32, AccelError> {
        self.threshold(registers::THRESH_FF)
    }

    pub fn set_free_fall_threshold(&mut self, g: f32) -> Result<(), AccelError> {
        self.set_threshold(registers::THRESH_FF, g)
    }

    pub fn free_fall_threshold_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::THRESH_FF)
    }

    pub fn set_free_fall_threshold_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::THRESH_FF, lsb)
    }

    // =========================================================================
    // Timing
    // =========================================================================

    fn timing(&mut self, reg: u8, us_per_lsb: u64) -> Result<Duration, AccelError> {
        Ok(units::lsb_to_duration(self.read_register(reg)?, us_per_lsb))
    }

    fn set_timing(&mut self, reg: u8, duration: Duration, us_per_lsb: u64) -> Result<(), AccelError> {
        let lsb = units::duration_to_lsb(duration, us_per_lsb)?;
        self.write_register(reg, lsb)
    }

    /// Maximum time above THRESH_TAP for a tap (625 µs/LSB, 0 disables taps)
    pub fn tap_duration(&mut self) -> Result<Duration, AccelError> {
        self.timing(registers::DUR, registers::TAP_DURATION_US_PER_LSB)
    }

    pub fn set_tap_duration(&mut self, duration: Duration) -> Result<(), AccelError> {
        self.set_timing(registers::DUR, duration, registers::TAP_DURATION_US_PER_LSB)
    }

    pub fn tap_duration_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::DUR)
    }

    pub fn set_tap_duration_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::DUR, lsb)
    }

    /// Wait from a tap to the start of the double-tap window (1.25 ms/LSB)
    pub fn double_tap_latency(&mut self) -> Result<Duration, AccelError> {
        self.timing(registers::LATENT, registers::TAP_LATENCY_US_PER_LSB)
    }

    pub fn set_double_tap_latency(&mut self, duration: Duration) -> Result<(), AccelError> {
        self.set_timing(registers::LATENT, duration, registers::TAP_LATENCY_US_PER_LSB)
    }

    pub fn double_tap_latency_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::LATENT)
    }

    pub fn set_double_tap_latency_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::LATENT, lsb)
    }

    /// Window in which a second tap can begin (1.25 ms/LSB)
    pub fn double_tap_window(&mut self) -> Result<Duration, AccelError> {
        self.timing(registers::WINDOW, registers::TAP_LATENCY_US_PER_LSB)
    }

    pub fn set_double_tap_window(&mut self, duration: Duration) -> Result<(), AccelError> {
        self.set_timing(registers::WINDOW, duration, registers::TAP_LATENCY_US_PER_LSB)
    }

    pub fn double_tap_window_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::WINDOW)
    }

    pub fn set_double_tap_window_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::WINDOW, lsb)
    }

    /// Time below THRESH_INACT before inactivity is declared (1 s/LSB)
    pub fn time_inactivity(&mut self) -> Result<Duration, AccelError> {
        self.timing(registers::TIME_INACT, registers::TIME_INACT_US_PER_LSB)
    }

    pub fn set_time_inactivity(&mut self, duration: Duration) -> Result<(), AccelError> {
        self.set_timing(registers::TIME_INACT, duration, registers::TIME_INACT_US_PER_LSB)
    }

    pub fn time_inactivity_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::TIME_INACT)
    }

    pub fn set_time_inactivity_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::TIME_INACT, lsb)
    }

    /// Minimum time below THRESH_FF for a free-fall event (5 ms/LSB)
    pub fn free_fall_duration(&mut self) -> Result<Duration, AccelError> {
        self.timing(registers::TIME_FF, registers::TIME_FF_US_PER_LSB)
    }

    pub fn set_free_fall_duration(&mut self, duration: Duration) -> Result<(), AccelError> {
        self.set_timing(registers::TIME_FF, duration, registers::TIME_FF_US_PER_LSB)
    }

    pub fn free_fall_duration_raw(&mut self) -> Result<u8, AccelError> {
        self.read_register(registers::TIME_FF)
    }

    pub fn set_free_fall_duration_raw(&mut self, lsb: u8) -> Result<(), AccelError> {
        self.write_register(registers::TIME_FF, lsb)
    }

    // =========================================================================
    // Offsets
    // =========================================================================

    /// User offsets [X, Y, Z] in LSB (15.6 mg/LSB, two's complement)
    pub fn axis_offsets(&mut self) -> Result<[i8; 3], AccelError> {
        let mut buf = [0u8; 3];
        self.read_registers(registers::OFSX, &mut buf)?;
        Ok(buf.map(|b| b as i8))
    }

    /// Write user offsets [X, Y, Z] in LSB
    pub fn set_axis_offsets(&mut self, offsets: [i8; 3]) -> Result<(), AccelError> {
        self.write_register(registers::OFSX, offsets[0] as u8)?;
        self.write_register(registers::OFSY, offsets[1] as u8)?;
        self.write_register(registers::OFSZ, offsets[2] as u8)?;

        crate::log_debug!(
            "Axis offset set: X={}, Y={}, Z={}",
            offsets[0],
            offsets[1],
            offsets[2]
        );
        Ok(())
    }

    // =========================================================================
    // Activity / Inactivity / Tap Axis Control
    // =========================================================================

    /// Whether activity detection uses `axis`
    pub fn activity_axis_enabled(&mut self, axis: Axis) -> Result<bool, AccelError> {
        self.read_bit(
            registers::ACT_INACT_CTL,
            axis.bit_in_group(registers::ACT_INACT_CTL_ACT_X_BIT),
        )
    }

    pub fn set_activity_axis(&mut self, axis: Axis, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::ACT_INACT_CTL,
            axis.bit_in_group(registers::ACT_INACT_CTL_ACT_X_BIT),
            enabled,
        )
    }

    /// Enable or disable activity detection on all three axes at once
    pub fn set_activity_xyz(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_field(
            registers::ACT_INACT_CTL,
            registers::ACT_INACT_CTL_ACT_AXES,
            if enabled { 0b111 } else { 0 },
        )
    }

    /// Whether inactivity detection uses `axis`
    pub fn inactivity_axis_enabled(&mut self, axis: Axis) -> Result<bool, AccelError> {
        self.read_bit(
            registers::ACT_INACT_CTL,
            axis.bit_in_group(registers::ACT_INACT_CTL_INACT_X_BIT),
        )
    }

    pub fn set_inactivity_axis(&mut self, axis: Axis, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::ACT_INACT_CTL,
            axis.bit_in_group(registers::ACT_INACT_CTL_INACT_X_BIT),
            enabled,
        )
    }

    pub fn set_inactivity_xyz(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_field(
            registers::ACT_INACT_CTL,
            registers::ACT_INACT_CTL_INACT_AXES,
            if enabled { 0b111 } else { 0 },
        )
    }

    /// Activity AC coupling (true = AC, false = DC)
    pub fn activity_ac_coupled(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::ACT_INACT_CTL, registers::ACT_INACT_CTL_ACT_AC_BIT)
    }

    pub fn set_activity_ac_coupled(&mut self, ac: bool) -> Result<(), AccelError> {
        self.write_bit(registers::ACT_INACT_CTL, registers::ACT_INACT_CTL_ACT_AC_BIT, ac)
    }

    /// Inactivity AC coupling (true = AC, false = DC)
    pub fn inactivity_ac_coupled(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::ACT_INACT_CTL, registers::ACT_INACT_CTL_INACT_AC_BIT)
    }

    pub fn set_inactivity_ac_coupled(&mut self, ac: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::ACT_INACT_CTL,
            registers::ACT_INACT_CTL_INACT_AC_BIT,
            ac,
        )
    }

    /// Whether tap detection uses `axis`
    pub fn tap_axis_enabled(&mut self, axis: Axis) -> Result<bool, AccelError> {
        self.read_bit(
            registers::TAP_AXES,
            axis.bit_in_group(registers::TAP_AXES_X_BIT),
        )
    }

    pub fn set_tap_axis(&mut self, axis: Axis, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(
            registers::TAP_AXES,
            axis.bit_in_group(registers::TAP_AXES_X_BIT),
            enabled,
        )
    }

    pub fn set_tap_xyz(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_field(
            registers::TAP_AXES,
            registers::TAP_AXES_AXES,
            if enabled { 0b111 } else { 0 },
        )
    }

    /// Double-tap suppression when acceleration stays above threshold between taps
    pub fn tap_suppress(&mut self) -> Result<bool, AccelError> {
        self.read_bit(registers::TAP_AXES, registers::TAP_AXES_SUPPRESS_BIT)
    }

    pub fn set_tap_suppress(&mut self, enabled: bool) -> Result<(), AccelError> {
        self.write_bit(registers::TAP_AXES, registers::TAP_AXES_SUPPRESS_BIT, enabled)
    }

    // =========================================================================
    // Interrupts
    // =========================================================================

    pub fn interrupt_enabled(&mut self, interrupt: Interrupt) -> Result<bool, AccelError> {
        self.read_bit(registers::INT_ENABLE, interrupt.bit())
    }

    pub fn set_interrupt_enabled(
        &mut self,
        interrupt: Interrupt,
        enabled: bool,
    ) -> Result<(), AccelError> {
        self.write_bit(registers::INT_ENABLE, interrupt.bit(), enabled)
    }

    /// Pin an interrupt is routed to
    pub fn interrupt_mapping(&mut self, interrupt: Interrupt) -> Result<InterruptPin, AccelError> {
        let int2 = self.read_bit(registers::INT_MAP, interrupt.bit())?;
        Ok(if int2 {
            InterruptPin::Int2
        } else {
            InterruptPin::Int1
        })
    }

    pub fn set_interrupt_mapping(
        &mut self,
        interrupt: Interrupt,
        pin: InterruptPin,
    ) -> Result<(), AccelError> {
        self.write_bit(
            registers::INT_MAP,
            interrupt.bit(),
            pin == InterruptPin::Int2,
        )
    }

    /// Route every interrupt to `pin` and enable them all
    ///
    /// Owns INT_MAP and INT_ENABLE entirely; both are overwritten.
    pub fn use_interrupt(&mut self, pin: InterruptPin) -> Result<(), AccelError> {
        let map = match pin {
            InterruptPin::Int1 => 0x00,
            InterruptPin::Int2 => 0xFF,
        };
        self.write_register(registers::INT_MAP, map)?;
        self.write_register(registers::INT_ENABLE, 0xFF)?;
        crate::log_debug!("All interrupts routed to INT{}", if map == 0 { 1 } else { 2 });
        Ok(())
    }

    /// Raw INT_SOURCE flags
    pub fn interrupt_source(&mut self) -> Result<InterruptSource, AccelError> {
        Ok(InterruptSource::from_bits_retain(
            self.read_register(registers::INT_SOURCE)?,
        ))
    }

    // =========================================================================
    // FIFO
    // =========================================================================

    pub fn fifo_mode(&mut self) -> Result<FifoMode, AccelError> {
        let bits = self.read_field(registers::FIFO_CTL, registers::FIFO_CTL_MODE)?;
        Ok(FifoMode::from_register(bits))
    }

    pub fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), AccelError> {
        self.write_field(
            registers::FIFO_CTL,
            registers::FIFO_CTL_MODE,
            mode.register_value(),
        )
    }

    /// Watermark (FIFO/stream) or pre-trigger (trigger mode) sample count
    pub fn fifo_samples(&mut self) -> Result<u8, AccelError> {
        self.read_field(registers::FIFO_CTL, registers::FIFO_CTL_SAMPLES)
    }

    /// Set the sample count (0 to 31)
    pub fn set_fifo_samples(&mut self, samples: u8) -> Result<(), AccelError> {
        self.write_field(registers::FIFO_CTL, registers::FIFO_CTL_SAMPLES, samples)
    }

    /// Number of samples currently held in the FIFO
    pub fn fifo_entries(&mut self) -> Result<u8, AccelError> {
        self.read_field(registers::FIFO_STATUS, registers::FIFO_STATUS_ENTRIES)
    }

    // =========================================================================
    // Sample Reading
    // =========================================================================

    /// Per-axis gain (g per LSB)
    pub fn axis_gains(&self) -> Vector3<f32> {
        self.gains
    }

    /// Replace the per-axis gain table (no bus traffic)
    pub fn set_axis_gains(&mut self, gains: Vector3<f32>) {
        self.gains = gains;
    }

    /// Read X/Y/Z in device counts with one 6-byte transaction
    pub fn read_raw(&mut self) -> Result<RawSample, AccelError> {
        let mut buf = [0u8; registers::DATA_LEN];
        self.read_registers(registers::DATAX0, &mut buf)?;
        Ok(RawSample::from_le_bytes(&buf))
    }

    /// Read acceleration in g (raw x gain)
    pub fn read_scaled(&mut self) -> Result<Vector3<f32>, AccelError> {
        Ok(self.read_raw()?.scale(&self.gains))
    }

    /// Read acceleration in m/s² (raw x gain x standard gravity)
    pub fn read_normalized(&mut self) -> Result<Vector3<f32>, AccelError> {
        Ok(self.read_scaled()? * GRAVITY)
    }

    /// Blend `sample` into the driver's filter state and return the result
    ///
    /// `filtered = sample * alpha + filtered * (1 - alpha)`; `alpha` must be
    /// within [0, 1].
    pub fn low_pass_filter(
        &mut self,
        sample: Vector3<f32>,
        alpha: f32,
    ) -> Result<Vector3<f32>, AccelError> {
        self.filter.apply(sample, alpha)
    }

    /// Last low-pass filter output
    pub fn filtered(&self) -> Vector3<f32> {
        self.filter.state()
    }

    /// Zero the low-pass filter state
    pub fn reset_filter(&mut self) {
        self.filter.reset();
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Read INT_SOURCE and ACT_TAP_STATUS and decode every flag
    pub fn read_activities(&mut self) -> Result<Activities, AccelError> {
        let int_source = self.read_register(registers::INT_SOURCE)?;
        let act_tap_status = self.read_register(registers::ACT_TAP_STATUS)?;
        Ok(Activities::from_registers(int_source, act_tap_status))
    }
}

// =============================================================================
// AccelSensor Trait Implementation
// =============================================================================

impl<I2C> AccelSensor for Adxl345Driver<I2C>
where
    I2C: I2c,
{
    fn read_raw(&mut self) -> Result<RawSample, AccelError> {
        Adxl345Driver::read_raw(self)
    }

    fn read_g(&mut self) -> Result<Vector3<f32>, AccelError> {
        self.read_scaled()
    }

    fn read_m_s2(&mut self) -> Result<Vector3<f32>, AccelError> {
        self.read_normalized()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{I2cTransaction, MockDelay, MockI2c};
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

    /// Mock bus preloaded with the ADXL345 power-on register values
    fn mock_device() -> MockI2c {
        MockI2c::new(registers::ADXL345_ADDR)
            .with_register(registers::DEVID, registers::ADXL345_DEVICE_ID)
            .with_register(registers::BW_RATE, registers::BW_RATE_RESET)
    }

    fn driver() -> Adxl345Driver<MockI2c> {
        Adxl345Driver::new(mock_device())
    }

    #[test]
    fn test_new_issues_no_traffic() {
        let accel = driver();
        assert!(accel.bus().transactions().is_empty());
        assert_eq!(accel.address(), 0x53);
        assert_eq!(accel.axis_gains(), Vector3::repeat(0.0039));
    }

    #[test]
    fn test_begin_enables_measurement() {
        let mut accel = driver();
        accel.begin().unwrap();
        assert_eq!(accel.bus().writes_to(registers::POWER_CTL), vec![0x08]);
        assert!(accel.is_measuring().unwrap());
    }

    #[test]
    fn test_begin_rejects_wrong_device_id() {
        let mut accel = Adxl345Driver::new(mock_device().with_register(registers::DEVID, 0x1D));
        assert_eq!(
            accel.begin(),
            Err(AccelError::DeviceIdMismatch { found: 0x1D })
        );
        assert!(accel.bus().written_registers().is_empty());
        assert_eq!(accel.bus().register(registers::POWER_CTL), 0);
    }

    #[test]
    fn test_power_on_sequence() {
        let mut accel = driver();
        accel.power_on().unwrap();
        assert_eq!(
            accel.bus().writes_to(registers::POWER_CTL),
            vec![0x00, 0x10, 0x08]
        );
    }

    #[test]
    fn test_power_on_with_delay_waits_after_each_write() {
        let mut accel = driver();
        let mut delay = MockDelay::new();
        accel.power_on_with_delay(&mut delay).unwrap();
        assert_eq!(
            accel.bus().writes_to(registers::POWER_CTL),
            vec![0x00, 0x10, 0x08]
        );
        assert_eq!(
            delay.elapsed_us(),
            3 * registers::POWER_CTL_SETTLE_US as u64
        );
    }

    #[test]
    fn test_standby_preserves_other_power_bits() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::POWER_CTL, 0x38));
        accel.standby().unwrap();
        assert_eq!(accel.bus().register(registers::POWER_CTL), 0x30);
        assert!(!accel.is_measuring().unwrap());
    }

    #[test]
    fn test_read_register_transaction_shape() {
        let mut accel = driver();
        assert_eq!(accel.read_device_id().unwrap(), 0xE5);
        assert_eq!(
            accel.bus().transactions(),
            &[
                I2cTransaction::Write {
                    addr: 0x53,
                    data: vec![registers::DEVID]
                },
                I2cTransaction::Read { addr: 0x53, len: 1 },
            ]
        );
    }

    #[test]
    fn test_bit_helpers_reject_bad_position() {
        let mut accel = driver();
        assert_eq!(
            accel.write_bit(registers::INT_ENABLE, 8, true),
            Err(AccelError::InvalidArgument)
        );
        assert_eq!(
            accel.read_bit(registers::INT_ENABLE, 9),
            Err(AccelError::InvalidArgument)
        );
        assert!(accel.bus().transactions().is_empty());
    }

    #[test]
    fn test_write_field_rejects_wide_value() {
        let mut accel = driver();
        assert_eq!(
            accel.write_field(registers::DATA_FORMAT, registers::DATA_FORMAT_RANGE, 4),
            Err(AccelError::InvalidArgument)
        );
        assert!(accel.bus().transactions().is_empty());
    }

    #[test]
    fn test_set_range_preserves_data_format_bits() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::DATA_FORMAT, 0xEC));

        for range in [Range::G16, Range::G4, Range::G8, Range::G2] {
            accel.set_range(range).unwrap();
            assert_eq!(accel.range().unwrap(), range);
            assert_eq!(accel.bus().register(registers::DATA_FORMAT) & 0xFC, 0xEC);
        }
        assert_eq!(accel.bus().register(registers::DATA_FORMAT), 0xEC);
    }

    #[test]
    fn test_set_range_g_clamps_unknown() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::DATA_FORMAT, 0x03));
        accel.set_range_g(5).unwrap();
        assert_eq!(accel.range().unwrap(), Range::G2);
        accel.set_range_g(8).unwrap();
        assert_eq!(accel.range().unwrap(), Range::G8);
    }

    #[test]
    fn test_data_format_flags() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::DATA_FORMAT, 0x01));

        accel.set_self_test(true).unwrap();
        accel.set_full_resolution(true).unwrap();
        accel.set_interrupt_polarity(InterruptPolarity::ActiveLow).unwrap();
        assert_eq!(accel.bus().register(registers::DATA_FORMAT), 0xA9);
        assert!(accel.self_test().unwrap());
        assert!(accel.full_resolution().unwrap());
        assert_eq!(
            accel.interrupt_polarity().unwrap(),
            InterruptPolarity::ActiveLow
        );
        assert!(!accel.spi_3wire().unwrap());
        assert!(!accel.left_justify().unwrap());

        accel.set_self_test(false).unwrap();
        accel.set_spi_3wire(true).unwrap();
        accel.set_left_justify(true).unwrap();
        accel.set_interrupt_polarity(InterruptPolarity::ActiveHigh).unwrap();
        assert_eq!(accel.bus().register(registers::DATA_FORMAT), 0x4D);
        assert_eq!(accel.range().unwrap(), Range::G4);
    }

    #[test]
    fn test_bandwidth_code_range_enforced() {
        let mut accel = driver();
        for code in 0x0..0x6 {
            assert_eq!(
                accel.set_bandwidth_code(code),
                Err(AccelError::InvalidArgument)
            );
        }
        assert_eq!(
            accel.set_bandwidth_code(0x10),
            Err(AccelError::InvalidArgument)
        );
        assert!(accel.bus().transactions().is_empty());

        for code in 0x6..=0xF {
            accel.set_bandwidth_code(code).unwrap();
            assert_eq!(accel.bandwidth_code().unwrap(), code);
        }
    }

    #[test]
    fn test_data_rate_preserves_low_power() {
        let mut accel = Adxl345Driver::new(mock_device().with_register(registers::BW_RATE, 0x1A));
        accel.set_data_rate(DataRate::Hz3_13).unwrap();
        assert_eq!(accel.bus().register(registers::BW_RATE), 0x15);
        assert!(accel.low_power().unwrap());
        assert_eq!(accel.data_rate().unwrap(), DataRate::Hz3_13);

        accel.set_low_power(false).unwrap();
        assert_eq!(accel.bus().register(registers::BW_RATE), 0x05);
    }

    #[test]
    fn test_rate_hz_round_trip() {
        let mut accel = driver();
        assert!((accel.rate_hz().unwrap() - 100.0).abs() < 1e-4);

        accel.set_rate_hz(400.0).unwrap();
        assert_eq!(accel.bandwidth_code().unwrap(), 0x0C);
        assert!((accel.rate_hz().unwrap() - 400.0).abs() < 1e-3);

        assert_eq!(accel.set_rate_hz(-1.0), Err(AccelError::InvalidArgument));
    }

    #[test]
    fn test_tap_threshold_scaled() {
        let mut accel = driver();
        accel.set_tap_threshold(2.0).unwrap();
        assert_eq!(accel.bus().register(registers::THRESH_TAP), 32);
        assert_eq!(accel.tap_threshold_raw().unwrap(), 32);
        assert!((accel.tap_threshold().unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_rejects_before_bus_traffic() {
        let mut accel = driver();
        assert_eq!(
            accel.set_activity_threshold(20.0),
            Err(AccelError::InvalidArgument)
        );
        assert_eq!(
            accel.set_free_fall_threshold(-1.0),
            Err(AccelError::InvalidArgument)
        );
        assert!(accel.bus().transactions().is_empty());
    }

    #[test]
    fn test_other_thresholds() {
        let mut accel = driver();
        accel.set_activity_threshold(2.0).unwrap();
        accel.set_inactivity_threshold(0.1875).unwrap();
        accel.set_free_fall_threshold_raw(7).unwrap();

        assert_eq!(accel.activity_threshold_raw().unwrap(), 32);
        assert_eq!(accel.inactivity_threshold_raw().unwrap(), 3);
        assert!((accel.free_fall_threshold().unwrap() - 0.4375).abs() < 1e-6);
        assert_eq!(accel.bus().register(registers::THRESH_FF), 7);
    }

    #[test]
    fn test_timing_registers() {
        let mut accel = driver();
        accel.set_tap_duration(Duration::from_millis(10)).unwrap();
        accel.set_double_tap_latency(Duration::from_millis(100)).unwrap();
        accel.set_double_tap_window(Duration::from_millis(250)).unwrap();
        accel.set_time_inactivity(Duration::from_secs(5)).unwrap();
        accel.set_free_fall_duration(Duration::from_millis(350)).unwrap();

        assert_eq!(accel.bus().register(registers::DUR), 16);
        assert_eq!(accel.bus().register(registers::LATENT), 80);
        assert_eq!(accel.bus().register(registers::WINDOW), 200);
        assert_eq!(accel.bus().register(registers::TIME_INACT), 5);
        assert_eq!(accel.bus().register(registers::TIME_FF), 70);

        assert_eq!(accel.tap_duration().unwrap(), Duration::from_millis(10));
        assert_eq!(accel.double_tap_latency().unwrap(), Duration::from_millis(100));
        assert_eq!(accel.double_tap_window().unwrap(), Duration::from_millis(250));
        assert_eq!(accel.time_inactivity().unwrap(), Duration::from_secs(5));
        assert_eq!(accel.free_fall_duration().unwrap(), Duration::from_millis(350));
    }

    #[test]
    fn test_timing_raw_accessors() {
        let mut accel = driver();
        accel.set_tap_duration_raw(0xFF).unwrap();
        accel.set_double_tap_latency_raw(1).unwrap();
        accel.set_double_tap_window_raw(2).unwrap();
        accel.set_time_inactivity_raw(3).unwrap();
        accel.set_free_fall_duration_raw(4).unwrap();

        assert_eq!(accel.tap_duration_raw().unwrap(), 0xFF);
        assert_eq!(accel.double_tap_latency_raw().unwrap(), 1);
        assert_eq!(accel.double_tap_window_raw().unwrap(), 2);
        assert_eq!(accel.time_inactivity_raw().unwrap(), 3);
        assert_eq!(accel.free_fall_duration_raw().unwrap(), 4);
        assert_eq!(
            accel.tap_duration().unwrap(),
            Duration::from_micros(255 * 625)
        );
    }

    #[test]
    fn test_timing_rejects_overflow() {
        let mut accel = driver();
        assert_eq!(
            accel.set_free_fall_duration(Duration::from_secs(2)),
            Err(AccelError::InvalidArgument)
        );
        assert!(accel.bus().transactions().is_empty());
    }

    #[test]
    fn test_axis_offsets_round_trip() {
        let mut accel = driver();
        accel.set_axis_offsets([-2, 0, 127]).unwrap();
        assert_eq!(accel.bus().register(registers::OFSX), 0xFE);
        assert_eq!(accel.bus().register(registers::OFSZ), 0x7F);
        assert_eq!(accel.axis_offsets().unwrap(), [-2, 0, 127]);
    }

    #[test]
    fn test_activity_axes_preserve_other_bits() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::ACT_INACT_CTL, 0x88));

        accel.set_activity_axis(Axis::Y, true).unwrap();
        accel.set_inactivity_axis(Axis::Z, true).unwrap();
        assert_eq!(accel.bus().register(registers::ACT_INACT_CTL), 0xA9);
        assert!(accel.activity_axis_enabled(Axis::Y).unwrap());
        assert!(!accel.activity_axis_enabled(Axis::X).unwrap());
        assert!(accel.inactivity_axis_enabled(Axis::Z).unwrap());
        assert!(accel.activity_ac_coupled().unwrap());
        assert!(accel.inactivity_ac_coupled().unwrap());

        accel.set_activity_xyz(true).unwrap();
        accel.set_inactivity_xyz(true).unwrap();
        assert_eq!(accel.bus().register(registers::ACT_INACT_CTL), 0xFF);

        accel.set_activity_ac_coupled(false).unwrap();
        accel.set_inactivity_ac_coupled(false).unwrap();
        accel.set_activity_xyz(false).unwrap();
        assert_eq!(accel.bus().register(registers::ACT_INACT_CTL), 0x07);
    }

    #[test]
    fn test_tap_axes() {
        let mut accel = driver();
        accel.set_tap_axis(Axis::X, true).unwrap();
        accel.set_tap_suppress(true).unwrap();
        assert_eq!(accel.bus().register(registers::TAP_AXES), 0x0C);
        assert!(accel.tap_axis_enabled(Axis::X).unwrap());
        assert!(!accel.tap_axis_enabled(Axis::Z).unwrap());
        assert!(accel.tap_suppress().unwrap());

        accel.set_tap_xyz(true).unwrap();
        assert_eq!(accel.bus().register(registers::TAP_AXES), 0x0F);
        accel.set_tap_xyz(false).unwrap();
        assert_eq!(accel.bus().register(registers::TAP_AXES), 0x08);
    }

    #[test]
    fn test_interrupt_enable_and_mapping() {
        let mut accel = driver();
        accel.set_interrupt_enabled(Interrupt::DoubleTap, true).unwrap();
        accel.set_interrupt_enabled(Interrupt::FreeFall, true).unwrap();
        assert_eq!(accel.bus().register(registers::INT_ENABLE), 0x24);
        assert!(accel.interrupt_enabled(Interrupt::DoubleTap).unwrap());
        assert!(!accel.interrupt_enabled(Interrupt::SingleTap).unwrap());

        accel
            .set_interrupt_mapping(Interrupt::DataReady, InterruptPin::Int2)
            .unwrap();
        assert_eq!(accel.bus().register(registers::INT_MAP), 0x80);
        assert_eq!(
            accel.interrupt_mapping(Interrupt::DataReady).unwrap(),
            InterruptPin::Int2
        );
        assert_eq!(
            accel.interrupt_mapping(Interrupt::Watermark).unwrap(),
            InterruptPin::Int1
        );
    }

    #[test]
    fn test_use_interrupt() {
        let mut accel = driver();
        accel.use_interrupt(InterruptPin::Int2).unwrap();
        assert_eq!(accel.bus().register(registers::INT_MAP), 0xFF);
        assert_eq!(accel.bus().register(registers::INT_ENABLE), 0xFF);

        accel.use_interrupt(InterruptPin::Int1).unwrap();
        assert_eq!(accel.bus().register(registers::INT_MAP), 0x00);
    }

    #[test]
    fn test_interrupt_source() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::INT_SOURCE, 0x82));
        let source = accel.interrupt_source().unwrap();
        assert!(source.triggered(Interrupt::DataReady));
        assert!(source.triggered(Interrupt::Watermark));
        assert!(!source.triggered(Interrupt::Activity));
    }

    #[test]
    fn test_fifo_control() {
        let mut accel = driver();
        accel.set_fifo_mode(FifoMode::Stream).unwrap();
        accel.set_fifo_samples(16).unwrap();
        assert_eq!(accel.bus().register(registers::FIFO_CTL), 0x90);
        assert_eq!(accel.fifo_mode().unwrap(), FifoMode::Stream);
        assert_eq!(accel.fifo_samples().unwrap(), 16);

        assert_eq!(accel.set_fifo_samples(32), Err(AccelError::InvalidArgument));
    }

    #[test]
    fn test_fifo_entries_masks_trigger_bit() {
        let mut accel =
            Adxl345Driver::new(mock_device().with_register(registers::FIFO_STATUS, 0x80 | 12));
        assert_eq!(accel.fifo_entries().unwrap(), 12);
    }

    #[test]
    fn test_read_raw_single_transaction() {
        let mut bus = mock_device();
        for (i, byte) in [0x10, 0x00, 0xF0, 0xFF, 0x00, 0x80].into_iter().enumerate() {
            bus.set_register(registers::DATAX0 + i as u8, byte);
        }
        let mut accel = Adxl345Driver::new(bus);

        let sample = accel.read_raw().unwrap();
        assert_eq!(sample, RawSample::new(16, -16, -32768));
        assert_eq!(
            accel.bus().transactions(),
            &[
                I2cTransaction::Write {
                    addr: 0x53,
                    data: vec![registers::DATAX0]
                },
                I2cTransaction::Read { addr: 0x53, len: 6 },
            ]
        );
    }

    #[test]
    fn test_read_scaled_and_normalized() {
        let mut bus = mock_device();
        // X = 256, Y = -256, Z = 0
        bus.set_register(registers::DATAX1, 0x01);
        bus.set_register(registers::DATAY0, 0x00);
        bus.set_register(registers::DATAY1, 0xFF);
        let mut accel = Adxl345Driver::new(bus);

        let g = accel.read_scaled().unwrap();
        assert!((g.x - 0.9984).abs() < 1e-6);
        assert!((g.y + 0.9984).abs() < 1e-6);
        assert_eq!(g.z, 0.0);

        accel.set_axis_gains(Vector3::new(0.004, 0.004, 0.004));
        let m_s2 = accel.read_normalized().unwrap();
        assert!((m_s2.x - 1.024 * GRAVITY).abs() < 1e-4);
        assert!((m_s2.y + 1.024 * GRAVITY).abs() < 1e-4);
    }

    #[test]
    fn test_low_pass_filter_state_owned_by_driver() {
        let mut accel = driver();
        let sample = Vector3::new(10.0, 10.0, 10.0);

        let first = accel.low_pass_filter(sample, 0.5).unwrap();
        assert_eq!(first, Vector3::new(5.0, 5.0, 5.0));
        let second = accel.low_pass_filter(sample, 0.5).unwrap();
        assert_eq!(second, Vector3::new(7.5, 7.5, 7.5));
        assert_eq!(accel.filtered(), second);

        accel.reset_filter();
        assert_eq!(accel.filtered(), Vector3::zeros());
        assert!(accel.bus().transactions().is_empty());
    }

    #[test]
    fn test_read_activities_two_reads() {
        let mut accel = Adxl345Driver::new(
            mock_device()
                .with_register(registers::INT_SOURCE, 0b0001_0100)
                .with_register(registers::ACT_TAP_STATUS, 0b0010_0000),
        );
        let activities = accel.read_activities().unwrap();
        assert!(activities.is_activity);
        assert!(activities.is_free_fall);
        assert!(activities.is_activity_on_y);
        assert!(!activities.is_tap);
        assert!(!activities.is_data_ready);
        assert_eq!(accel.bus().transactions().len(), 4);
    }

    #[test]
    fn test_apply_config_preserves_unowned_bits() {
        let mut accel = Adxl345Driver::new(
            mock_device()
                .with_register(registers::DATA_FORMAT, 0xC4)
                .with_register(registers::BW_RATE, 0x0A),
        );
        let config = Adxl345Config {
            range: Range::G8,
            data_rate: DataRate::Hz800,
            full_resolution: true,
            low_power: true,
            interrupt_polarity: InterruptPolarity::ActiveLow,
        };
        accel.apply_config(&config).unwrap();
        assert_eq!(accel.bus().register(registers::DATA_FORMAT), 0xEE);
        assert_eq!(accel.bus().register(registers::BW_RATE), 0x1D);
    }

    #[test]
    fn test_begin_with_config() {
        let mut accel = driver();
        accel.begin_with_config(&Adxl345Config::default()).unwrap();
        assert_eq!(accel.range().unwrap(), Range::G2);
        assert!(accel.full_resolution().unwrap());
        assert_eq!(accel.data_rate().unwrap(), DataRate::Hz100);
        assert!(accel.is_measuring().unwrap());
    }

    #[test]
    fn test_clear_settings() {
        let mut bus = mock_device()
            .with_register(registers::DATA_FORMAT, 0x0B)
            .with_register(registers::ACT_INACT_CTL, 0xFF)
            .with_register(registers::TAP_AXES, 0x0F)
            .with_register(registers::INT_ENABLE, 0xFF)
            .with_register(registers::INT_MAP, 0x12);
        for reg in registers::THRESH_TAP..=registers::TIME_FF {
            if reg != registers::ACT_INACT_CTL {
                bus.set_register(reg, 0x55);
            }
        }
        let mut accel = Adxl345Driver::new(bus);
        accel.clear_settings().unwrap();

        let bus = accel.release();
        assert_eq!(bus.register(registers::DATA_FORMAT), 0x08);
        assert_eq!(bus.register(registers::BW_RATE), 0x0A);
        assert_eq!(bus.register(registers::THRESH_TAP), 0);
        assert_eq!(bus.register(registers::TIME_FF), 0);
        assert_eq!(bus.register(registers::ACT_INACT_CTL), 0x88);
        assert_eq!(bus.register(registers::TAP_AXES), 0x08);
        assert_eq!(bus.register(registers::INT_ENABLE), 0);
        assert_eq!(bus.register(registers::INT_MAP), 0);
        // Offsets are calibration, not detection settings
        assert_eq!(bus.register(registers::OFSX), 0x55);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut accel = driver();
        accel
            .bus_mut()
            .inject_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));

        assert_eq!(accel.read_raw(), Err(AccelError::I2c(I2cError::Nack)));
        assert_eq!(accel.begin(), Err(AccelError::I2c(I2cError::Nack)));
        assert_eq!(
            accel.set_range(Range::G4),
            Err(AccelError::I2c(I2cError::Nack))
        );

        accel.bus_mut().inject_error(ErrorKind::ArbitrationLoss);
        assert_eq!(
            accel.read_activities(),
            Err(AccelError::I2c(I2cError::ArbitrationLost))
        );
    }

    #[test]
    fn test_accel_sensor_trait() {
        fn read_via_trait<A: AccelSensor>(sensor: &mut A) -> Result<Vector3<f32>, AccelError> {
            sensor.read_m_s2()
        }

        let mut bus = mock_device();
        // Z = 250 counts
        bus.set_register(registers::DATAZ0, 0xFA);
        let mut accel = Adxl345Driver::new(bus);
        accel.set_axis_gains(Vector3::repeat(0.004));

        let m_s2 = read_via_trait(&mut accel).unwrap();
        assert!((m_s2.z - GRAVITY).abs() < 1e-4);
        assert_eq!(AccelSensor::read_raw(&mut accel).unwrap().z, 250);
    }
}
