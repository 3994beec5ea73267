//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Kx134Interface;

// Largest register payload carried in a single addressed write frame.
const MAX_WRITE_FRAME: usize = 16;

/// Selectable I2C slave addresses, determined by the ADDR pin level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlaveAddr {
    /// ADDR pin tied to ground (address `0x1E`).
    Low = 0x1E,
    /// ADDR pin tied to the supply rail (address `0x1F`).
    High = 0x1F,
}

/// I2C-based interface implementation for the KX134 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus abstraction.
    pub const fn new(i2c: I2C, address: SlaveAddr) -> Self {
        Self {
            i2c,
            address: address as u8,
        }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Kx134Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        // Address write followed by a repeated-start read.
        self.i2c.write_read(self.address, &[register], buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        // Oversized payloads continue at the auto-incremented register address.
        let mut frame = [0u8; MAX_WRITE_FRAME + 1];
        for (index, chunk) in data.chunks(MAX_WRITE_FRAME).enumerate() {
            frame[0] = register.wrapping_add((index * MAX_WRITE_FRAME) as u8);
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &frame[..=chunk.len()])?;
        }

        Ok(())
    }
}
