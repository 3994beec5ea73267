//! High-level KX134 device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::i2c::{I2cInterface, SlaveAddr};
use crate::interface::spi::SpiInterface;
use crate::interface::Kx134Interface;
use crate::log::debug;
use crate::params::{OutputDataRate, Range};
use crate::registers::{
    Cntl1,
    Cntl2,
    Ins2,
    Odcntl,
    EXPECTED_COTR,
    EXPECTED_WHO_AM_I,
    REG_CNTL1,
    REG_CNTL2,
    REG_COTR,
    REG_INS2,
    REG_INTERNAL_0X7F,
    REG_MAN_ID,
    REG_ODCNTL,
    REG_WHO_AM_I,
    REG_XOUT_L,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// KX134 datasheet software reset settling time (milliseconds).
const SOFTWARE_RESET_DELAY_MS: u32 = 2;
// Number of consecutive bytes spanning X, Y, Z axis samples.
const RAW_AXIS_BYTES: usize = 6;

/// High-level synchronous driver for the KX134 accelerometer.
pub struct Kx134<IFACE> {
    interface: IFACE,
    config: Config,
}

/// Decoded view of the `INS2` interrupt status register with explicit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// INS2[7] FFS.
    pub free_fall: bool,
    /// INS2[6] BFI.
    pub buffer_full: bool,
    /// INS2[5] WMI.
    pub watermark: bool,
    /// INS2[4] DRDY.
    pub data_ready: bool,
    /// INS2[3:2] TDTS.
    pub tap_status: u8,
    /// INS2[0] TPS.
    pub tilt_position: bool,
}

impl StatusSnapshot {
    /// Builds a snapshot from the raw INS2 bitfield.
    pub fn from_register(ins2: Ins2) -> Self {
        Self {
            free_fall: ins2.free_fall(),
            buffer_full: ins2.buffer_full(),
            watermark: ins2.watermark(),
            data_ready: ins2.data_ready(),
            tap_status: ins2.tap_status(),
            tilt_position: ins2.tilt_position(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusSnapshot {{\n    FFS: {},\n    BFI: {},\n    WMI: {},\n    DRDY: {},\n    TDTS: {},\n    TPS: {}\n}}",
            self.free_fall,
            self.buffer_full,
            self.watermark,
            self.data_ready,
            self.tap_status,
            self.tilt_position
        );
    }
}

impl<IFACE> Kx134<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }
}

impl<SPI> Kx134<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<I2C> Kx134<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: SlaveAddr, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Kx134<IFACE>
where
    IFACE: Kx134Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Global Configuration =========================
    // ==================================================================
    /// Initializes the sensor using the current configuration.
    ///
    /// Resets the device, verifies its identity, and programs the
    /// configured range and output data rate, leaving the sensor sampling.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        self.reset(delay)?;
        let config = self.config;
        self.configure(config)?;
        Ok(())
    }

    /// Applies a new configuration to the device.
    ///
    /// All register fields are written inside one unlock/lock cycle; the
    /// final lock write re-asserts PC1 and re-arms sampling.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidConfig)?;

        self.config = config;
        self.enable_register_writing()?;
        self.interface
            .write_register(REG_ODCNTL, u8::from(self.render_odcntl()))
            .map_err(Error::from)?;
        self.disable_register_writing()?;
        Ok(())
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the active configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Issues the soft reset sequence and verifies the device identity.
    ///
    /// Always performs the three documented writes (internal `0x7F`,
    /// `CNTL2` cleared, `CNTL2` with SRST set) before the existence check.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.interface
            .write_register(REG_INTERNAL_0X7F, 0x00)
            .map_err(Error::from)?;
        self.interface
            .write_register(REG_CNTL2, u8::from(Cntl2::new()))
            .map_err(Error::from)?;
        self.interface
            .write_register(REG_CNTL2, u8::from(Cntl2::new().with_software_reset(true)))
            .map_err(Error::from)?;

        delay.delay_ms(SOFTWARE_RESET_DELAY_MS);

        if !self.check_existence()? {
            return Err(Error::DeviceIdMismatch);
        }

        Ok(())
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the manufacturer and part identification registers.
    pub fn device_id(&mut self) -> Result<[u8; 2], CommE> {
        let mut ids = [0u8; 2];
        self.interface
            .read_many(REG_MAN_ID, &mut ids)
            .map_err(Error::from)?;
        Ok(ids)
    }

    /// Verifies the identity registers against the expected KX134 constants.
    ///
    /// A mismatch is a soft failure: the caller may retry [`reset`](Self::reset).
    /// Only bus-level failures surface as errors.
    pub fn check_existence(&mut self) -> Result<bool, CommE> {
        let whoami = self
            .interface
            .read_register(REG_WHO_AM_I)
            .map_err(Error::from)?;
        if whoami != EXPECTED_WHO_AM_I {
            debug!("WHO_AM_I returned {=u8:#x}", whoami);
            return Ok(false);
        }

        let cotr = self
            .interface
            .read_register(REG_COTR)
            .map_err(Error::from)?;
        if cotr != EXPECTED_COTR {
            debug!("COTR returned {=u8:#x}", cotr);
            return Ok(false);
        }

        Ok(true)
    }

    /// Returns a decoded snapshot of the `INS2` interrupt status register.
    pub fn read_status(&mut self) -> Result<StatusSnapshot, CommE> {
        let raw = self
            .interface
            .read_register(REG_INS2)
            .map_err(Error::from)?;

        Ok(StatusSnapshot::from_register(Ins2::from(raw)))
    }

    /// Returns `true` when a fresh sample is waiting in the output registers.
    pub fn data_ready(&mut self) -> Result<bool, CommE> {
        let raw = self
            .interface
            .read_register(REG_INS2)
            .map_err(Error::from)?;

        Ok(Ins2::from(raw).data_ready())
    }

    // ==================================================================
    // == Measurement Configuration =====================================
    // ==================================================================
    /// Unlocks the control registers by clearing `CNTL1.PC1`.
    ///
    /// Range and rate fields only latch while the device is unlocked;
    /// sampling is suspended until the matching lock call.
    pub fn enable_register_writing(&mut self) -> Result<(), CommE> {
        let cntl1 = self.render_cntl1(false);
        self.interface
            .write_register(REG_CNTL1, u8::from(cntl1))
            .map_err(Error::from)
    }

    /// Re-locks the control registers and re-arms sampling via `CNTL1.PC1`.
    pub fn disable_register_writing(&mut self) -> Result<(), CommE> {
        let cntl1 = self.render_cntl1(true);
        self.interface
            .write_register(REG_CNTL1, u8::from(cntl1))
            .map_err(Error::from)
    }

    /// Selects a new full-scale range.
    pub fn set_range(&mut self, range: Range) -> Result<(), CommE> {
        debug!("setting range to {=u8:#x}", range as u8);

        self.enable_register_writing()?;
        self.config.range = range;
        self.disable_register_writing()
    }

    /// Selects the slowest output data rate at or above the requested frequency.
    pub fn set_output_data_rate_hz(&mut self, hz: u32) -> Result<(), CommE> {
        let odr = OutputDataRate::from_hz(hz).ok_or(Error::UnsupportedRate)?;
        debug!("mapped {=u32} Hz to rate code {=u8:#x}", hz, odr as u8);

        self.set_output_data_rate(odr)
    }

    /// Selects an output data rate from its raw 4-bit register code.
    pub fn set_output_data_rate_code(&mut self, code: u8) -> Result<(), CommE> {
        let odr = OutputDataRate::from_code(code).ok_or(Error::UnsupportedRate)?;
        self.set_output_data_rate(odr)
    }

    /// Programs a new output data rate.
    ///
    /// Rates of 3200 Hz and above are rejected unless the configuration
    /// selects high-performance mode.
    pub fn set_output_data_rate(&mut self, odr: OutputDataRate) -> Result<(), CommE> {
        let mut candidate = self.config;
        candidate.odr = odr;
        candidate.validate().map_err(|_| Error::InvalidConfig)?;

        self.enable_register_writing()?;
        self.config.odr = odr;
        self.interface
            .write_register(REG_ODCNTL, u8::from(self.render_odcntl()))
            .map_err(Error::from)?;
        self.disable_register_writing()
    }

    /// Stores per-axis calibration offsets applied to decoded samples.
    pub fn set_offsets(&mut self, offsets: [i16; 3]) {
        self.config.offsets = offsets;
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    #[inline]
    fn unpack_axis(lsb: u8, msb: u8) -> i16 {
        // Sample registers hold 16-bit little-endian two's complement data.
        i16::from_le_bytes([lsb, msb])
    }

    /// Reads a raw acceleration triplet with calibration offsets applied.
    ///
    /// All six axis bytes are fetched in one burst transaction; the chip
    /// documents this access pattern and per-register reads produce
    /// noticeably noisier samples.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        let mut raw = [0u8; RAW_AXIS_BYTES];
        self.interface
            .read_many(REG_XOUT_L, &mut raw)
            .map_err(Error::from)?;

        let x = Self::unpack_axis(raw[0], raw[1]).wrapping_add(self.config.offsets[0]);
        let y = Self::unpack_axis(raw[2], raw[3]).wrapping_add(self.config.offsets[1]);
        let z = Self::unpack_axis(raw[4], raw[5]).wrapping_add(self.config.offsets[2]);

        Ok([x, y, z])
    }

    /// Reads an acceleration triplet scaled to g.
    pub fn read_xyz_g(&mut self) -> Result<[f32; 3], CommE> {
        let raw = self.read_xyz_raw()?;
        Ok([
            self.raw_to_g(raw[0]),
            self.raw_to_g(raw[1]),
            self.raw_to_g(raw[2]),
        ])
    }

    /// Converts a raw sample to g using the configured range.
    pub fn raw_to_g(&self, lsb: i16) -> f32 {
        lsb as f32 * self.config.range.g_per_lsb()
    }

    // ==================================================================
    // == Internal Register Rendering ===================================
    // ==================================================================
    fn render_cntl1(&self, operating: bool) -> Cntl1 {
        Cntl1::new()
            .with_tilt_engine(self.config.tilt_engine)
            .with_tap_engine(self.config.tap_engine)
            .with_range(self.config.range)
            .with_data_ready_engine(self.config.data_ready_engine)
            .with_performance(self.config.performance)
            .with_operating(operating)
    }

    fn render_odcntl(&self) -> Odcntl {
        Odcntl::new()
            .with_odr(self.config.odr)
            .with_fast_start(self.config.fast_start)
            .with_roll_off(self.config.roll_off)
            .with_iir_bypass(self.config.iir_bypass)
    }
}
