//! Configuration primitives for the KX134 driver.

use crate::params::{
    DataReadyEngine,
    FastStart,
    IirBypass,
    LowPassRollOff,
    OutputDataRate,
    PerformanceMode,
    Range,
    TapEngine,
    TiltEngine,
};

/// User-facing configuration for the KX134 sensor.
///
/// The driver mirrors this struct into `CNTL1` and `ODCNTL`; fields only
/// reach the hardware through the unlock/mutate/lock write protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Performance mode selection.
    pub performance: PerformanceMode,
    /// Data-ready engine enable.
    pub data_ready_engine: DataReadyEngine,
    /// Full-scale range selection.
    pub range: Range,
    /// Tap/double-tap engine enable.
    pub tap_engine: TapEngine,
    /// Tilt position engine enable.
    pub tilt_engine: TiltEngine,
    /// IIR filter bypass selection.
    pub iir_bypass: IirBypass,
    /// Low-pass filter roll-off selection.
    pub roll_off: LowPassRollOff,
    /// Fast start-up enable.
    pub fast_start: FastStart,
    /// Output data rate selection.
    pub odr: OutputDataRate,
    /// Per-axis calibration offsets added to decoded samples (LSB).
    pub offsets: [i16; 3],
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.odr.requires_high_performance() && self.performance == PerformanceMode::LowPower {
            return Err(ConfigError::RateNeedsHighPerformance);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the performance mode.
    pub fn performance(mut self, performance: PerformanceMode) -> Self {
        self.config.performance = performance;
        self
    }

    /// Overrides the data-ready engine enable.
    pub fn data_ready_engine(mut self, data_ready_engine: DataReadyEngine) -> Self {
        self.config.data_ready_engine = data_ready_engine;
        self
    }

    /// Overrides the full-scale range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Overrides the tap engine enable.
    pub fn tap_engine(mut self, tap_engine: TapEngine) -> Self {
        self.config.tap_engine = tap_engine;
        self
    }

    /// Overrides the tilt engine enable.
    pub fn tilt_engine(mut self, tilt_engine: TiltEngine) -> Self {
        self.config.tilt_engine = tilt_engine;
        self
    }

    /// Overrides the IIR filter bypass selection.
    pub fn iir_bypass(mut self, iir_bypass: IirBypass) -> Self {
        self.config.iir_bypass = iir_bypass;
        self
    }

    /// Overrides the low-pass roll-off selection.
    pub fn roll_off(mut self, roll_off: LowPassRollOff) -> Self {
        self.config.roll_off = roll_off;
        self
    }

    /// Overrides the fast start-up selection.
    pub fn fast_start(mut self, fast_start: FastStart) -> Self {
        self.config.fast_start = fast_start;
        self
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Sets the per-axis calibration offsets.
    pub fn offsets(mut self, offsets: [i16; 3]) -> Self {
        self.config.offsets = offsets;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            performance: PerformanceMode::HighPerformance,
            data_ready_engine: DataReadyEngine::Enabled,
            range: Range::G8,
            tap_engine: TapEngine::Disabled,
            tilt_engine: TiltEngine::Disabled,
            iir_bypass: IirBypass::Applied,
            roll_off: LowPassRollOff::OdrDiv9,
            fast_start: FastStart::Enabled,
            odr: OutputDataRate::Od50Hz,
            offsets: [0; 3],
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The selected output data rate requires high-performance mode.
    RateNeedsHighPerformance,
}
