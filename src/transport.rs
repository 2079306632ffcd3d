use crate::hw_def::I2C_ADDRESS;
use crate::types::Error;

use embedded_hal_async::i2c::I2c;

/// Single-byte register access to the device at its fixed bus address
#[derive(Debug)]
pub(crate) struct Transport<I2C> {
    pub(crate) i2c: I2C,
}

impl<I2C, E> Transport<I2C>
where
    I2C: I2c<Error = E>,
{
    pub(crate) fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub(crate) async fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut read_buf = [0u8; 1];
        self.i2c.write_read(I2C_ADDRESS, &[register], &mut read_buf).await?;
        trace!("si7005::read_register(): reg={:#x} val={:#x}", register, read_buf[0]);
        Ok(read_buf[0])
    }

    pub(crate) async fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        trace!("si7005::write_register(): reg={:#x} val={:#x}", register, value);
        self.i2c.write(I2C_ADDRESS, &[register, value]).await?;
        Ok(())
    }
}
