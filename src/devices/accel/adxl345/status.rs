//! ADXL345 status decoding
//!
//! INT_SOURCE and ACT_TAP_STATUS are read-only snapshots of the motion
//! detection engine. They are exposed both as raw flag sets and as the
//! decoded `Activities` struct.

use super::config::Interrupt;
use bitflags::bitflags;

bitflags! {
    /// INT_SOURCE register flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InterruptSource: u8 {
        const DATA_READY = 1 << 7;
        const SINGLE_TAP = 1 << 6;
        const DOUBLE_TAP = 1 << 5;
        const ACTIVITY = 1 << 4;
        const INACTIVITY = 1 << 3;
        const FREE_FALL = 1 << 2;
        const WATERMARK = 1 << 1;
        const OVERRUN = 1 << 0;
    }
}

bitflags! {
    /// ACT_TAP_STATUS register flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ActTapStatus: u8 {
        const ACT_X = 1 << 6;
        const ACT_Y = 1 << 5;
        const ACT_Z = 1 << 4;
        const ASLEEP = 1 << 3;
        const TAP_X = 1 << 2;
        const TAP_Y = 1 << 1;
        const TAP_Z = 1 << 0;
    }
}

impl InterruptSource {
    /// Flag corresponding to one interrupt kind
    pub fn from_interrupt(interrupt: Interrupt) -> Self {
        Self::from_bits_retain(1 << interrupt.bit())
    }

    /// Whether `interrupt` is flagged in this snapshot
    pub fn triggered(self, interrupt: Interrupt) -> bool {
        self.contains(Self::from_interrupt(interrupt))
    }
}

/// Decoded motion-event snapshot
///
/// Represents the instant the registers were read, not a held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Activities {
    pub is_overrun: bool,
    pub is_watermark: bool,
    pub is_free_fall: bool,
    pub is_inactivity: bool,
    pub is_activity: bool,
    pub is_double_tap: bool,
    pub is_tap: bool,
    pub is_data_ready: bool,

    pub is_activity_on_x: bool,
    pub is_activity_on_y: bool,
    pub is_activity_on_z: bool,
    pub is_asleep: bool,
    pub is_tap_on_x: bool,
    pub is_tap_on_y: bool,
    pub is_tap_on_z: bool,
}

impl Activities {
    /// Decode from raw INT_SOURCE and ACT_TAP_STATUS bytes
    pub fn from_registers(int_source: u8, act_tap_status: u8) -> Self {
        Self::decode(
            InterruptSource::from_bits_retain(int_source),
            ActTapStatus::from_bits_retain(act_tap_status),
        )
    }

    /// Decode from flag sets
    pub fn decode(source: InterruptSource, status: ActTapStatus) -> Self {
        Self {
            is_overrun: source.contains(InterruptSource::OVERRUN),
            is_watermark: source.contains(InterruptSource::WATERMARK),
            is_free_fall: source.contains(InterruptSource::FREE_FALL),
            is_inactivity: source.contains(InterruptSource::INACTIVITY),
            is_activity: source.contains(InterruptSource::ACTIVITY),
            is_double_tap: source.contains(InterruptSource::DOUBLE_TAP),
            is_tap: source.contains(InterruptSource::SINGLE_TAP),
            is_data_ready: source.contains(InterruptSource::DATA_READY),

            is_activity_on_x: status.contains(ActTapStatus::ACT_X),
            is_activity_on_y: status.contains(ActTapStatus::ACT_Y),
            is_activity_on_z: status.contains(ActTapStatus::ACT_Z),
            is_asleep: status.contains(ActTapStatus::ASLEEP),
            is_tap_on_x: status.contains(ActTapStatus::TAP_X),
            is_tap_on_y: status.contains(ActTapStatus::TAP_Y),
            is_tap_on_z: status.contains(ActTapStatus::TAP_Z),
        }
    }
}
