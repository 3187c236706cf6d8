//! SMBus-style register access on top of an `embedded-hal` I2C bus.
//!
//! The sensor protocols are described in terms of the Linux SMBus helpers
//! (`i2c_smbus_read_byte_data` and friends). [`Transport`] names those
//! primitives, and [`Bus`] maps each of them onto plain I2C frames for a
//! single bound device address.

use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::error::Error;

/// Longest payload accepted by an SMBus block write.
pub const SMBUS_BLOCK_MAX: usize = 32;

/// Register and command primitives used by the sensor drivers.
///
/// All operations address the device the transport was bound to.
pub trait Transport {
    type Error: embedded_hal::i2c::Error;

    /// Read one byte without selecting a register first.
    ///
    /// Used to poll status bytes of devices that return their status on any
    /// plain read.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read one byte from `register`.
    fn read_byte_data(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Read a 16-bit word from `register`. The first byte on the wire is the
    /// low byte of the result, as with SMBus word reads.
    fn read_word_data(&mut self, register: u8) -> Result<u16, Self::Error>;

    /// Read exactly `N` bytes starting at `register`.
    fn read_block_data<const N: usize>(&mut self, register: u8) -> Result<[u8; N], Self::Error>;

    /// Write a single command byte.
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Write `value` to `register`.
    fn write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Write `data` after the `register` byte in one transfer.
    fn write_block_data<const N: usize>(
        &mut self,
        register: u8,
        data: [u8; N],
    ) -> Result<(), Self::Error>;
}

impl<T: Transport> Transport for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        T::read_byte(self)
    }

    fn read_byte_data(&mut self, register: u8) -> Result<u8, Self::Error> {
        T::read_byte_data(self, register)
    }

    fn read_word_data(&mut self, register: u8) -> Result<u16, Self::Error> {
        T::read_word_data(self, register)
    }

    fn read_block_data<const N: usize>(&mut self, register: u8) -> Result<[u8; N], Self::Error> {
        T::read_block_data(self, register)
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        T::write_byte(self, value)
    }

    fn write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        T::write_byte_data(self, register, value)
    }

    fn write_block_data<const N: usize>(
        &mut self,
        register: u8,
        data: [u8; N],
    ) -> Result<(), Self::Error> {
        T::write_block_data(self, register, data)
    }
}

/// An I2C bus bound to one 7-bit device address.
pub struct Bus<I: I2c> {
    i2c: I,
    address: SevenBitAddress,
}

impl<I: I2c> Bus<I> {
    /// Bind `i2c` to `address`.
    ///
    /// Fails with [`Error::BusSetup`] if `address` does not fit in 7 bits.
    pub fn bind(i2c: I, address: SevenBitAddress) -> Result<Self, Error<I::Error>> {
        if address > 0x7F {
            return Err(Error::BusSetup(address));
        }
        log::debug!("bound bus to address 0x{address:02x}");
        Ok(Self { i2c, address })
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn destroy(self) -> I {
        self.i2c
    }
}

impl<I: I2c> Transport for Bus<I> {
    type Error = I::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c.read(self.address, &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_byte_data(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_word_data(&mut self, register: u8) -> Result<u16, Self::Error> {
        let mut buffer = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    fn read_block_data<const N: usize>(&mut self, register: u8) -> Result<[u8; N], Self::Error> {
        let mut buffer = [0u8; N];
        self.i2c.write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer)
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[value])
    }

    fn write_byte_data(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn write_block_data<const N: usize>(
        &mut self,
        register: u8,
        data: [u8; N],
    ) -> Result<(), Self::Error> {
        const { assert!(N <= SMBUS_BLOCK_MAX) };

        let mut frame = [0u8; SMBUS_BLOCK_MAX + 1];
        frame[0] = register;
        frame[1..=N].copy_from_slice(&data);
        self.i2c.write(self.address, &frame[..=N])
    }
}

#[cfg(test)]
mod test {
    use super::{Bus, Transport};
    use crate::error::Error;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDRESS: u8 = 0x4F;

    #[test]
    fn rejects_ten_bit_address() {
        let mut i2c = I2cMock::new(&[]);
        let result = Bus::bind(i2c.clone(), 0x80);
        assert!(matches!(result, Err(Error::BusSetup(0x80))));
        i2c.done();
    }

    #[test]
    fn word_reads_are_little_endian() {
        let expectations = [I2cTransaction::write_read(
            ADDRESS,
            vec![0x00],
            vec![0x19, 0x80],
        )];
        let mut bus = Bus::bind(I2cMock::new(&expectations), ADDRESS).unwrap();
        assert_eq!(bus.read_word_data(0x00).unwrap(), 0x8019);
        bus.destroy().done();
    }

    #[test]
    fn block_write_prefixes_register() {
        let expectations = [I2cTransaction::write(ADDRESS, vec![0xE1, 0x08, 0x00])];
        let mut bus = Bus::bind(I2cMock::new(&expectations), ADDRESS).unwrap();
        bus.write_block_data(0xE1, [0x08, 0x00]).unwrap();
        bus.destroy().done();
    }

    #[test]
    fn status_read_has_no_register() {
        let expectations = [
            I2cTransaction::read(ADDRESS, vec![0x18]),
            I2cTransaction::read(ADDRESS, vec![0x00]).with_error(ErrorKind::Other),
        ];
        let mut bus = Bus::bind(I2cMock::new(&expectations), ADDRESS).unwrap();
        assert_eq!(bus.read_byte().unwrap(), 0x18);
        assert_eq!(bus.read_byte(), Err(ErrorKind::Other));
        bus.destroy().done();
    }

    #[test]
    fn borrowed_transport_forwards() {
        let expectations = [
            I2cTransaction::write_read(ADDRESS, vec![0x01], vec![0x60]),
            I2cTransaction::write(ADDRESS, vec![0x01, 0x60]),
        ];
        fn rewrite_config<T: Transport>(mut transport: T) -> Result<u8, T::Error> {
            let config = transport.read_byte_data(0x01)?;
            transport.write_byte_data(0x01, config)?;
            Ok(config)
        }

        let mut bus = Bus::bind(I2cMock::new(&expectations), ADDRESS).unwrap();
        assert_eq!(rewrite_config(&mut bus), Ok(0x60));
        bus.destroy().done();
    }
}
