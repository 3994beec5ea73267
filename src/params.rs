//! Strongly typed parameter enumerations for the KX134 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use kx134::params::{OutputDataRate, PerformanceMode, Range};
//!
//! let range = Range::G16;
//! let odr = OutputDataRate::Od100Hz;
//! let mode = PerformanceMode::HighPerformance;
//! let _ = (range, odr, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Available full-scale acceleration range selections (`CNTL1.GSEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±8 g full-scale range.
    G8 = 0b00,
    /// ±16 g full-scale range.
    G16 = 0b01,
    /// ±32 g full-scale range.
    G32 = 0b10,
    /// ±64 g full-scale range.
    G64 = 0b11,
}

impl Range {
    /// Returns the scale factor applied to raw samples, in g per LSB.
    pub const fn g_per_lsb(self) -> f32 {
        match self {
            Self::G8 => 0.00024,
            Self::G16 => 0.00049,
            Self::G32 => 0.00098,
            Self::G64 => 0.00195,
        }
    }

    /// Returns the maximum absolute acceleration representable at this range.
    pub const fn max_g(self) -> u8 {
        match self {
            Self::G8 => 8,
            Self::G16 => 16,
            Self::G32 => 32,
            Self::G64 => 64,
        }
    }
}

/// Available output data rate (ODR) selections (`ODCNTL.OSA`).
///
/// Each code selects a rate of 25/32 × 2^code Hz. The top four codes are
/// only usable while the device runs in high-performance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 0.781 Hz output data rate.
    Od0_781Hz = 0b0000,
    /// 1.563 Hz output data rate.
    Od1_563Hz = 0b0001,
    /// 3.125 Hz output data rate.
    Od3_125Hz = 0b0010,
    /// 6.25 Hz output data rate.
    Od6_25Hz = 0b0011,
    /// 12.5 Hz output data rate.
    Od12_5Hz = 0b0100,
    /// 25 Hz output data rate.
    Od25Hz = 0b0101,
    /// 50 Hz output data rate.
    Od50Hz = 0b0110,
    /// 100 Hz output data rate.
    Od100Hz = 0b0111,
    /// 200 Hz output data rate.
    Od200Hz = 0b1000,
    /// 400 Hz output data rate.
    Od400Hz = 0b1001,
    /// 800 Hz output data rate.
    Od800Hz = 0b1010,
    /// 1600 Hz output data rate.
    Od1600Hz = 0b1011,
    /// 3200 Hz output data rate (high-performance mode only).
    Od3200Hz = 0b1100,
    /// 6400 Hz output data rate (high-performance mode only).
    Od6400Hz = 0b1101,
    /// 12800 Hz output data rate (high-performance mode only).
    Od12800Hz = 0b1110,
    /// 25600 Hz output data rate (high-performance mode only).
    Od25600Hz = 0b1111,
}

impl OutputDataRate {
    /// Returns the ODR in hertz.
    pub const fn hz(self) -> f32 {
        match self {
            Self::Od0_781Hz => 0.78125,
            Self::Od1_563Hz => 1.5625,
            Self::Od3_125Hz => 3.125,
            Self::Od6_25Hz => 6.25,
            Self::Od12_5Hz => 12.5,
            Self::Od25Hz => 25.0,
            Self::Od50Hz => 50.0,
            Self::Od100Hz => 100.0,
            Self::Od200Hz => 200.0,
            Self::Od400Hz => 400.0,
            Self::Od800Hz => 800.0,
            Self::Od1600Hz => 1_600.0,
            Self::Od3200Hz => 3_200.0,
            Self::Od6400Hz => 6_400.0,
            Self::Od12800Hz => 12_800.0,
            Self::Od25600Hz => 25_600.0,
        }
    }

    /// Selects the slowest rate at or above the requested frequency.
    ///
    /// Code `c` samples at 25/32 × 2^c Hz, so the smallest code with
    /// 25 × 2^c ≥ 32 × hz is chosen. Returns `None` when the request is
    /// zero or exceeds the fastest supported rate.
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz == 0 {
            return None;
        }

        let target = 32 * hz as u64;
        let mut code = 0u8;
        while code <= 0b1111 {
            if (25u64 << code) >= target {
                return Self::from_code(code);
            }
            code += 1;
        }

        None
    }

    /// Maps a raw 4-bit register code to its rate selection.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b0000 => Some(Self::Od0_781Hz),
            0b0001 => Some(Self::Od1_563Hz),
            0b0010 => Some(Self::Od3_125Hz),
            0b0011 => Some(Self::Od6_25Hz),
            0b0100 => Some(Self::Od12_5Hz),
            0b0101 => Some(Self::Od25Hz),
            0b0110 => Some(Self::Od50Hz),
            0b0111 => Some(Self::Od100Hz),
            0b1000 => Some(Self::Od200Hz),
            0b1001 => Some(Self::Od400Hz),
            0b1010 => Some(Self::Od800Hz),
            0b1011 => Some(Self::Od1600Hz),
            0b1100 => Some(Self::Od3200Hz),
            0b1101 => Some(Self::Od6400Hz),
            0b1110 => Some(Self::Od12800Hz),
            0b1111 => Some(Self::Od25600Hz),
            _ => None,
        }
    }

    /// Returns `true` for rates that require high-performance mode.
    pub const fn requires_high_performance(self) -> bool {
        (self as u8) >= (Self::Od3200Hz as u8)
    }
}

/// Performance mode selection bit (`CNTL1.RES`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum PerformanceMode {
    /// Low-power (reduced resolution) operation.
    LowPower = 0,
    /// High-performance (full resolution) operation.
    HighPerformance = 1,
}

/// Data-ready engine enable bit (`CNTL1.DRDYE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum DataReadyEngine {
    /// Data-ready reporting disabled.
    Disabled = 0,
    /// Data-ready reporting enabled.
    Enabled = 1,
}

/// Tap/double-tap engine enable bit (`CNTL1.TDTE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum TapEngine {
    /// Tap detection disabled.
    Disabled = 0,
    /// Tap detection enabled.
    Enabled = 1,
}

/// Tilt position engine enable bit (`CNTL1.TPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum TiltEngine {
    /// Tilt position detection disabled.
    Disabled = 0,
    /// Tilt position detection enabled.
    Enabled = 1,
}

/// IIR filter bypass bit (`ODCNTL.IIR_BYPASS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum IirBypass {
    /// IIR filter applied to the output path.
    Applied = 0,
    /// IIR filter bypassed.
    Bypassed = 1,
}

/// Low-pass filter roll-off selection bit (`ODCNTL.LPRO`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum LowPassRollOff {
    /// Filter corner at ODR/9.
    OdrDiv9 = 0,
    /// Filter corner at ODR/2.
    OdrDiv2 = 1,
}

/// Fast-start enable bit (`ODCNTL.FSTUP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum FastStart {
    /// Normal start-up timing.
    Disabled = 0,
    /// Fast start-up from standby.
    Enabled = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factors_match_datasheet() {
        let cases = [
            (Range::G64, 1.95f32),
            (Range::G32, 0.98),
            (Range::G16, 0.49),
            (Range::G8, 0.24),
        ];

        for (range, expected) in cases {
            let converted = 1000.0 * range.g_per_lsb();
            assert!(
                (converted - expected).abs() < 1e-4,
                "range {:?} converted 1000 LSB to {}",
                range,
                converted
            );
        }
    }

    #[test]
    fn from_hz_selects_documented_codes() {
        assert_eq!(OutputDataRate::from_hz(50), Some(OutputDataRate::Od50Hz));
        assert_eq!(OutputDataRate::from_hz(100), Some(OutputDataRate::Od100Hz));
        assert_eq!(OutputDataRate::from_hz(3200), Some(OutputDataRate::Od3200Hz));
        assert_eq!(
            OutputDataRate::from_hz(25600),
            Some(OutputDataRate::Od25600Hz)
        );
    }

    #[test]
    fn from_hz_rounds_up_to_next_supported_rate() {
        assert_eq!(OutputDataRate::from_hz(1), Some(OutputDataRate::Od1_563Hz));
        assert_eq!(OutputDataRate::from_hz(12), Some(OutputDataRate::Od12_5Hz));
        assert_eq!(OutputDataRate::from_hz(60), Some(OutputDataRate::Od100Hz));
    }

    #[test]
    fn from_hz_rejects_unrepresentable_requests() {
        assert_eq!(OutputDataRate::from_hz(0), None);
        assert_eq!(OutputDataRate::from_hz(25601), None);
    }

    #[test]
    fn from_code_covers_the_four_bit_space() {
        for code in 0..16u8 {
            let odr = OutputDataRate::from_code(code).unwrap();
            assert_eq!(odr as u8, code);
        }
        assert_eq!(OutputDataRate::from_code(16), None);
    }

    #[test]
    fn high_performance_requirement_starts_at_3200hz() {
        assert!(!OutputDataRate::Od1600Hz.requires_high_performance());
        assert!(OutputDataRate::Od3200Hz.requires_high_performance());
        assert!(OutputDataRate::Od25600Hz.requires_high_performance());
    }
}
