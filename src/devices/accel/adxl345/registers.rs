//! ADXL345 Register Definitions
//!
//! Based on the ADXL345 datasheet (Rev. G), register map 0x00-0x39.

#![allow(dead_code)]

// ============================================================================
// I2C Address
// ============================================================================

/// ADXL345 I2C address with ALT ADDRESS pin low
pub const ADXL345_ADDR: u8 = 0x53;

// ============================================================================
// Registers
// ============================================================================

/// Device ID (should read 0xE5)
pub const DEVID: u8 = 0x00;

/// Tap threshold (62.5 mg/LSB)
pub const THRESH_TAP: u8 = 0x1D;

/// User offset adjustments (two's complement, 15.6 mg/LSB)
pub const OFSX: u8 = 0x1E;
pub const OFSY: u8 = 0x1F;
pub const OFSZ: u8 = 0x20;

/// Tap duration (625 µs/LSB)
pub const DUR: u8 = 0x21;

/// Double-tap latency (1.25 ms/LSB)
pub const LATENT: u8 = 0x22;

/// Double-tap window (1.25 ms/LSB)
pub const WINDOW: u8 = 0x23;

/// Activity threshold (62.5 mg/LSB)
pub const THRESH_ACT: u8 = 0x24;

/// Inactivity threshold (62.5 mg/LSB)
pub const THRESH_INACT: u8 = 0x25;

/// Inactivity time (1 s/LSB)
pub const TIME_INACT: u8 = 0x26;

/// Axis enable control for activity and inactivity detection
pub const ACT_INACT_CTL: u8 = 0x27;

/// Free-fall threshold (62.5 mg/LSB)
pub const THRESH_FF: u8 = 0x28;

/// Free-fall time (5 ms/LSB)
pub const TIME_FF: u8 = 0x29;

/// Axis control for single/double tap
pub const TAP_AXES: u8 = 0x2A;

/// Source of single/double tap and activity (read-only)
pub const ACT_TAP_STATUS: u8 = 0x2B;

/// Data rate and power mode control
pub const BW_RATE: u8 = 0x2C;

/// Power-saving features control
pub const POWER_CTL: u8 = 0x2D;

/// Interrupt enable control
pub const INT_ENABLE: u8 = 0x2E;

/// Interrupt mapping control (bit clear = INT1, bit set = INT2)
pub const INT_MAP: u8 = 0x2F;

/// Source of interrupts (read-only)
pub const INT_SOURCE: u8 = 0x30;

/// Data format control
pub const DATA_FORMAT: u8 = 0x31;

/// Acceleration data (low byte first, two's complement)
pub const DATAX0: u8 = 0x32;
pub const DATAX1: u8 = 0x33;
pub const DATAY0: u8 = 0x34;
pub const DATAY1: u8 = 0x35;
pub const DATAZ0: u8 = 0x36;
pub const DATAZ1: u8 = 0x37;

/// FIFO control
pub const FIFO_CTL: u8 = 0x38;

/// FIFO status (read-only)
pub const FIFO_STATUS: u8 = 0x39;

/// Number of data bytes in one X/Y/Z sample
pub const DATA_LEN: usize = 6;

// ============================================================================
// Register Values
// ============================================================================

/// DEVID expected value
pub const ADXL345_DEVICE_ID: u8 = 0xE5;

/// POWER_CTL bits
pub const POWER_CTL_LINK: u8 = 0x20;
pub const POWER_CTL_AUTO_SLEEP: u8 = 0x10;
pub const POWER_CTL_MEASURE: u8 = 0x08;
pub const POWER_CTL_SLEEP: u8 = 0x04;

/// POWER_CTL bit positions
pub const POWER_CTL_MEASURE_BIT: u8 = 3;

/// DATA_FORMAT bit positions
pub const DATA_FORMAT_SELF_TEST_BIT: u8 = 7;
pub const DATA_FORMAT_SPI_BIT: u8 = 6;
pub const DATA_FORMAT_INT_INVERT_BIT: u8 = 5;
pub const DATA_FORMAT_FULL_RES_BIT: u8 = 3;
pub const DATA_FORMAT_JUSTIFY_BIT: u8 = 2;

/// BW_RATE bit positions
pub const BW_RATE_LOW_POWER_BIT: u8 = 4;

/// ACT_INACT_CTL bit positions (axis bits are offset by 2 - axis index)
pub const ACT_INACT_CTL_ACT_AC_BIT: u8 = 7;
pub const ACT_INACT_CTL_ACT_X_BIT: u8 = 6;
pub const ACT_INACT_CTL_INACT_AC_BIT: u8 = 3;
pub const ACT_INACT_CTL_INACT_X_BIT: u8 = 2;

/// TAP_AXES bit positions
pub const TAP_AXES_SUPPRESS_BIT: u8 = 3;
pub const TAP_AXES_X_BIT: u8 = 2;

/// Bandwidth codes accepted by the raw bandwidth setter (6.25 Hz - 3200 Hz)
pub const BW_CODE_MIN: u8 = 0x6;
pub const BW_CODE_MAX: u8 = 0xF;

/// Datasheet reset value of BW_RATE (100 Hz)
pub const BW_RATE_RESET: u8 = 0x0A;

// ============================================================================
// Bit Fields
// ============================================================================

/// A contiguous group of bits inside one register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Position of the least significant bit
    pub shift: u8,
    /// Number of bits
    pub width: u8,
}

impl BitField {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Mask of the field's bits in register position
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Largest value the field can hold
    pub const fn max_value(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Extract the field from a register value
    pub const fn extract(self, reg: u8) -> u8 {
        (reg & self.mask()) >> self.shift
    }

    /// Replace the field in `reg` with `value`, leaving other bits untouched
    pub const fn insert(self, reg: u8, value: u8) -> u8 {
        (reg & !self.mask()) | ((value << self.shift) & self.mask())
    }
}

/// DATA_FORMAT[1:0]: g range
pub const DATA_FORMAT_RANGE: BitField = BitField::new(0, 2);

/// BW_RATE[3:0]: output data rate code
pub const BW_RATE_RATE: BitField = BitField::new(0, 4);

/// ACT_INACT_CTL[6:4]: activity X/Y/Z enable
pub const ACT_INACT_CTL_ACT_AXES: BitField = BitField::new(4, 3);

/// ACT_INACT_CTL[2:0]: inactivity X/Y/Z enable
pub const ACT_INACT_CTL_INACT_AXES: BitField = BitField::new(0, 3);

/// TAP_AXES[2:0]: tap X/Y/Z enable
pub const TAP_AXES_AXES: BitField = BitField::new(0, 3);

/// FIFO_CTL[7:6]: FIFO mode
pub const FIFO_CTL_MODE: BitField = BitField::new(6, 2);

/// FIFO_CTL[4:0]: watermark / trigger sample count
pub const FIFO_CTL_SAMPLES: BitField = BitField::new(0, 5);

/// FIFO_STATUS[5:0]: entries currently stored
pub const FIFO_STATUS_ENTRIES: BitField = BitField::new(0, 6);

// ============================================================================
// Scaling Constants
// ============================================================================

/// Threshold registers (THRESH_TAP/ACT/INACT/FF): g per LSB
pub const THRESHOLD_G_PER_LSB: f32 = 0.0625;

/// Offset registers (OFSX/Y/Z): g per LSB
pub const OFFSET_G_PER_LSB: f32 = 0.0156;

/// Tap duration (DUR): µs per LSB
pub const TAP_DURATION_US_PER_LSB: u64 = 625;

/// Double-tap latency and window (LATENT, WINDOW): µs per LSB
pub const TAP_LATENCY_US_PER_LSB: u64 = 1_250;

/// Inactivity time (TIME_INACT): µs per LSB
pub const TIME_INACT_US_PER_LSB: u64 = 1_000_000;

/// Free-fall time (TIME_FF): µs per LSB
pub const TIME_FF_US_PER_LSB: u64 = 5_000;

/// Output data rate of bandwidth code 6 (Hz)
pub const BASE_RATE_HZ: f32 = 6.25;

/// Bandwidth code that produces `BASE_RATE_HZ`
pub const BASE_RATE_CODE: u8 = 6;

/// Full-resolution sensitivity: g per LSB
pub const FULL_RES_G_PER_LSB: f32 = 0.0039;

/// Settling delay after each POWER_CTL write in `power_on_with_delay` (µs)
pub const POWER_CTL_SETTLE_US: u32 = 2_000;
