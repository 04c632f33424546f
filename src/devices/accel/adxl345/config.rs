//! ADXL345 Configuration
//!
//! Typed values for the device's configuration fields, plus the
//! `Adxl345Config` struct applied during initialization.

use super::registers;
use super::units;

/// Measurement range (DATA_FORMAT[1:0])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// ±2 g (default)
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl Range {
    /// Get the 2-bit register value for this range
    pub fn register_value(self) -> u8 {
        match self {
            Range::G2 => 0b00,
            Range::G4 => 0b01,
            Range::G8 => 0b10,
            Range::G16 => 0b11,
        }
    }

    /// Decode the 2-bit range field
    pub fn from_register(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Range::G2,
            0b01 => Range::G4,
            0b10 => Range::G8,
            _ => Range::G16,
        }
    }

    /// Range from its full-scale value in g
    ///
    /// Anything other than 2, 4, 8 or 16 falls back to ±2 g.
    pub fn from_g(g: u8) -> Self {
        match g {
            4 => Range::G4,
            8 => Range::G8,
            16 => Range::G16,
            _ => Range::G2,
        }
    }

    /// Full-scale value in g
    pub fn g(self) -> u8 {
        match self {
            Range::G2 => 2,
            Range::G4 => 4,
            Range::G8 => 8,
            Range::G16 => 16,
        }
    }
}

/// Output data rate (BW_RATE[3:0])
///
/// Each step doubles the rate: `rate = 2^(code - 6) * 6.25 Hz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataRate {
    Hz0_10 = 0x0,
    Hz0_20 = 0x1,
    Hz0_39 = 0x2,
    Hz0_78 = 0x3,
    Hz1_56 = 0x4,
    Hz3_13 = 0x5,
    Hz6_25 = 0x6,
    Hz12_5 = 0x7,
    Hz25 = 0x8,
    Hz50 = 0x9,
    /// 100 Hz (device reset value)
    #[default]
    Hz100 = 0xA,
    Hz200 = 0xB,
    Hz400 = 0xC,
    Hz800 = 0xD,
    Hz1600 = 0xE,
    Hz3200 = 0xF,
}

impl DataRate {
    /// All rates in code order
    pub const ALL: [DataRate; 16] = [
        DataRate::Hz0_10,
        DataRate::Hz0_20,
        DataRate::Hz0_39,
        DataRate::Hz0_78,
        DataRate::Hz1_56,
        DataRate::Hz3_13,
        DataRate::Hz6_25,
        DataRate::Hz12_5,
        DataRate::Hz25,
        DataRate::Hz50,
        DataRate::Hz100,
        DataRate::Hz200,
        DataRate::Hz400,
        DataRate::Hz800,
        DataRate::Hz1600,
        DataRate::Hz3200,
    ];

    /// Get the 4-bit bandwidth code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a bandwidth code (upper bits ignored)
    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0x0F) as usize]
    }

    /// Output data rate in Hz
    pub fn hz(self) -> f32 {
        units::code_to_rate(self.code())
    }
}

/// Interrupt output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// INT1 (INT_MAP bit clear)
    #[default]
    Int1,
    /// INT2 (INT_MAP bit set)
    Int2,
}

/// Interrupt pin polarity (DATA_FORMAT INT_INVERT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPolarity {
    /// INT_INVERT = 0
    #[default]
    ActiveHigh,
    /// INT_INVERT = 1
    ActiveLow,
}

/// Interrupt kinds, shared by INT_ENABLE, INT_MAP and INT_SOURCE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interrupt {
    DataReady,
    SingleTap,
    DoubleTap,
    Activity,
    Inactivity,
    FreeFall,
    Watermark,
    Overrun,
}

impl Interrupt {
    /// All interrupt kinds, most significant bit first
    pub const ALL: [Interrupt; 8] = [
        Interrupt::DataReady,
        Interrupt::SingleTap,
        Interrupt::DoubleTap,
        Interrupt::Activity,
        Interrupt::Inactivity,
        Interrupt::FreeFall,
        Interrupt::Watermark,
        Interrupt::Overrun,
    ];

    /// Bit position in the interrupt registers
    pub fn bit(self) -> u8 {
        match self {
            Interrupt::DataReady => 7,
            Interrupt::SingleTap => 6,
            Interrupt::DoubleTap => 5,
            Interrupt::Activity => 4,
            Interrupt::Inactivity => 3,
            Interrupt::FreeFall => 2,
            Interrupt::Watermark => 1,
            Interrupt::Overrun => 0,
        }
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Offset below the X bit of an X/Y/Z group (X=0, Y=1, Z=2)
    pub fn index(self) -> u8 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Bit position of this axis in a group whose X bit is `x_bit`
    pub fn bit_in_group(self, x_bit: u8) -> u8 {
        x_bit - self.index()
    }
}

/// FIFO operating mode (FIFO_CTL[7:6])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO bypassed (reset value)
    #[default]
    Bypass,
    /// Collect up to 32 samples, then stop
    Fifo,
    /// Hold the latest 32 samples, oldest overwritten
    Stream,
    /// Hold samples preceding a trigger event
    Trigger,
}

impl FifoMode {
    /// Get the 2-bit register value
    pub fn register_value(self) -> u8 {
        match self {
            FifoMode::Bypass => 0b00,
            FifoMode::Fifo => 0b01,
            FifoMode::Stream => 0b10,
            FifoMode::Trigger => 0b11,
        }
    }

    /// Decode the 2-bit mode field
    pub fn from_register(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => FifoMode::Bypass,
            0b01 => FifoMode::Fifo,
            0b10 => FifoMode::Stream,
            _ => FifoMode::Trigger,
        }
    }
}

/// ADXL345 driver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adxl345Config {
    /// Measurement range
    pub range: Range,

    /// Output data rate
    pub data_rate: DataRate,

    /// Full-resolution mode (constant 3.9 mg/LSB across ranges)
    pub full_resolution: bool,

    /// Reduced-power operation (higher noise)
    pub low_power: bool,

    /// Interrupt pin polarity
    pub interrupt_polarity: InterruptPolarity,
}

impl Default for Adxl345Config {
    fn default() -> Self {
        Self {
            range: Range::G2,
            data_rate: DataRate::Hz100,
            full_resolution: true,
            low_power: false,
            interrupt_polarity: InterruptPolarity::ActiveHigh,
        }
    }
}

impl Adxl345Config {
    /// DATA_FORMAT value this configuration implies for the fields it owns
    pub fn data_format_bits(&self) -> u8 {
        let mut value = registers::DATA_FORMAT_RANGE.insert(0, self.range.register_value());
        if self.full_resolution {
            value |= 1 << registers::DATA_FORMAT_FULL_RES_BIT;
        }
        if self.interrupt_polarity == InterruptPolarity::ActiveLow {
            value |= 1 << registers::DATA_FORMAT_INT_INVERT_BIT;
        }
        value
    }

    /// BW_RATE value this configuration implies
    pub fn bw_rate_bits(&self) -> u8 {
        let mut value = registers::BW_RATE_RATE.insert(0, self.data_rate.code());
        if self.low_power {
            value |= 1 << registers::BW_RATE_LOW_POWER_BIT;
        }
        value
    }
}
