//! Register map definitions for the KX134 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    DataReadyEngine, FastStart, IirBypass, LowPassRollOff, OutputDataRate, PerformanceMode, Range,
    TapEngine, TiltEngine,
};

/// Register address of `MAN_ID`.
pub const REG_MAN_ID: u8 = 0x00;
/// Register address of `PART_ID`.
pub const REG_PART_ID: u8 = 0x01;
/// Register address of `XOUT_L`.
pub const REG_XOUT_L: u8 = 0x08;
/// Register address of `XOUT_H`.
pub const REG_XOUT_H: u8 = 0x09;
/// Register address of `YOUT_L`.
pub const REG_YOUT_L: u8 = 0x0A;
/// Register address of `YOUT_H`.
pub const REG_YOUT_H: u8 = 0x0B;
/// Register address of `ZOUT_L`.
pub const REG_ZOUT_L: u8 = 0x0C;
/// Register address of `ZOUT_H`.
pub const REG_ZOUT_H: u8 = 0x0D;
/// Register address of `COTR`.
pub const REG_COTR: u8 = 0x12;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x13;
/// Register address of `INS2`.
pub const REG_INS2: u8 = 0x17;
/// Register address of `CNTL1`.
pub const REG_CNTL1: u8 = 0x1B;
/// Register address of `CNTL2`.
pub const REG_CNTL2: u8 = 0x1C;
/// Register address of `CNTL3`.
pub const REG_CNTL3: u8 = 0x1D;
/// Register address of `CNTL4`.
pub const REG_CNTL4: u8 = 0x1E;
/// Register address of `CNTL5`.
pub const REG_CNTL5: u8 = 0x1F;
/// Register address of `CNTL6`.
pub const REG_CNTL6: u8 = 0x20;
/// Register address of `ODCNTL`.
pub const REG_ODCNTL: u8 = 0x21;
/// Undocumented internal register written during the reset sequence.
pub const REG_INTERNAL_0X7F: u8 = 0x7F;

/// Expected `WHO_AM_I` identity byte.
pub const EXPECTED_WHO_AM_I: u8 = 0x46;
/// Expected `COTR` command-test response byte.
pub const EXPECTED_COTR: u8 = 0x55;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `CNTL1` register (address `0x1B`).
///
/// The range, engine, and performance fields latch only while `operating`
/// (PC1) is cleared; setting PC1 re-locks them and starts sampling.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cntl1 {
    // Tilt position engine enable (bit 0).
    pub tilt_engine: TiltEngine,
    #[skip]
    __: B1,
    // Tap/double-tap engine enable (bit 2).
    pub tap_engine: TapEngine,
    // Full-scale range selection (bits 4:3).
    pub range: Range,
    // Data-ready engine enable (bit 5).
    pub data_ready_engine: DataReadyEngine,
    // Performance mode selection (bit 6).
    pub performance: PerformanceMode,
    // Operating mode, PC1 (bit 7).
    pub operating: bool,
}

impl From<u8> for Cntl1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Cntl1> for u8 {
    fn from(value: Cntl1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CNTL2` register (address `0x1C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cntl2 {
    // Face-up tilt state mask (bit 0).
    pub tilt_face_up: bool,
    // Face-down tilt state mask (bit 1).
    pub tilt_face_down: bool,
    // Up tilt state mask (bit 2).
    pub tilt_up: bool,
    // Down tilt state mask (bit 3).
    pub tilt_down: bool,
    // Right tilt state mask (bit 4).
    pub tilt_right: bool,
    // Left tilt state mask (bit 5).
    pub tilt_left: bool,
    // Command test control (bit 6).
    pub command_test: bool,
    // Software reset trigger (bit 7).
    pub software_reset: bool,
}

impl From<u8> for Cntl2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Cntl2> for u8 {
    fn from(value: Cntl2) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ODCNTL` register (address `0x21`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Odcntl {
    // Output data rate selection (bits 3:0).
    pub odr: OutputDataRate,
    #[skip]
    __: B1,
    // Fast start-up enable (bit 5).
    pub fast_start: FastStart,
    // Low-pass filter roll-off selection (bit 6).
    pub roll_off: LowPassRollOff,
    // IIR filter bypass (bit 7).
    pub iir_bypass: IirBypass,
}

impl From<u8> for Odcntl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Odcntl> for u8 {
    fn from(value: Odcntl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `INS2` interrupt status register (address `0x17`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ins2 {
    // Tilt position change detected (bit 0).
    pub tilt_position: bool,
    #[skip]
    __: B1,
    // Tap/double-tap status (bits 3:2).
    pub tap_status: B2,
    // Fresh sample available (bit 4).
    pub data_ready: bool,
    // Buffer watermark reached (bit 5).
    pub watermark: bool,
    // Buffer full (bit 6).
    pub buffer_full: bool,
    // Free-fall detected (bit 7).
    pub free_fall: bool,
}

impl From<u8> for Ins2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ins2> for u8 {
    fn from(value: Ins2) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Cntl1 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CNTL1;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Cntl2 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CNTL2;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x3F);
}

impl Register for Odcntl {
    type Raw = u8;
    const ADDRESS: u8 = REG_ODCNTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x06);
}

impl Register for Ins2 {
    type Raw = u8;
    const ADDRESS: u8 = REG_INS2;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that Cntl1 bitfields match the datasheet layout.
    #[test]
    fn cntl1_layout_matches_datasheet() {
        let cntl1 = Cntl1::from(0b1110_0000);
        assert!(cntl1.operating());
        assert_eq!(cntl1.performance(), PerformanceMode::HighPerformance);
        assert_eq!(cntl1.data_ready_engine(), DataReadyEngine::Enabled);
        assert_eq!(cntl1.range(), Range::G8);
        assert_eq!(cntl1.tap_engine(), TapEngine::Disabled);
        assert_eq!(cntl1.tilt_engine(), TiltEngine::Disabled);
    }

    /// Ensures every range encodes and decodes through CNTL1 unchanged.
    #[test]
    fn range_roundtrips_through_cntl1() {
        for range in [Range::G8, Range::G16, Range::G32, Range::G64] {
            let encoded = u8::from(Cntl1::new().with_range(range));
            assert_eq!(Cntl1::from(encoded).range(), range);
        }
    }

    #[test]
    fn cntl1_range_bits_sit_at_gsel_positions() {
        let encoded = u8::from(Cntl1::new().with_range(Range::G64));
        assert_eq!(encoded, 0b0001_1000);
    }

    #[test]
    fn cntl2_software_reset_is_the_high_bit() {
        assert_eq!(u8::from(Cntl2::new()), 0x00);
        assert_eq!(u8::from(Cntl2::new().with_software_reset(true)), 0x80);
    }

    #[test]
    fn odcntl_reset_value_decodes_to_50hz() {
        let odcntl = Odcntl::from(0x06);
        assert_eq!(odcntl.odr(), OutputDataRate::Od50Hz);
        assert_eq!(odcntl.fast_start(), FastStart::Disabled);
        assert_eq!(odcntl.iir_bypass(), IirBypass::Applied);
    }

    #[test]
    fn ins2_data_ready_is_bit_four() {
        assert!(Ins2::from(0x10).data_ready());
        assert!(!Ins2::from(0xEF).data_ready());
    }
}
