//! Blocking driver, for callers that dedicate a thread or worker to the sensor.
//!
//! The protocol is the same as the async driver's; every delay and status poll blocks the caller.

use crate::calibration::assemble;
use crate::hw_def::*;
use crate::select::Selected;
use crate::types::*;

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::I2c};

/// Si7005 device driver (blocking)
#[derive(Debug)]
pub struct Si7005<I2C, CS, Delay> {
    i2c: I2C,
    cs: CS,
    delay: Delay,
    session: Session,
}

fn read_register<I2C: I2c>(i2c: &mut I2C, register: u8) -> Result<u8, Error<I2C::Error>> {
    let mut read_buf = [0u8; 1];
    i2c.write_read(I2C_ADDRESS, &[register], &mut read_buf)?;
    trace!("si7005::read_register(): reg={:#x} val={:#x}", register, read_buf[0]);
    Ok(read_buf[0])
}

fn write_register<I2C: I2c>(i2c: &mut I2C, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
    trace!("si7005::write_register(): reg={:#x} val={:#x}", register, value);
    i2c.write(I2C_ADDRESS, &[register, value])?;
    Ok(())
}

impl<I2C, CS, Delay, E> Si7005<I2C, CS, Delay>
where
    I2C: I2c<Error = E>,
    CS: OutputPin,
    Delay: DelayNs,
{
    /// Create a new Si7005 driver instance; no bus traffic happens until `initialize()`
    pub fn new(i2c: I2C, cs: CS, delay: Delay) -> Self {
        Self {
            i2c,
            cs,
            delay,
            session: Session::new(),
        }
    }

    /// Give back the bus, the chip-select pin and the delay provider
    pub fn release(self) -> (I2C, CS, Delay) {
        (self.i2c, self.cs, self.delay)
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.session.state
    }

    /// Persistent config bits applied to every conversion
    pub fn config(&self) -> Config {
        self.session.config
    }

    /// Heater is enabled
    pub fn heater(&self) -> bool {
        self.session.config.heater()
    }

    /// Fast mode is enabled
    pub fn fast_measure(&self) -> bool {
        self.session.config.fast_measure()
    }

    /// Most recent temperature reading in degrees centigrade
    pub fn last_temperature(&self) -> Option<f32> {
        self.session.last_centigrade
    }

    /// Enable or disable the on-chip heater for subsequent conversions
    pub fn set_heater(&mut self, enabled: bool) {
        self.session.config.set_heater(enabled);
    }

    /// Enable or disable fast mode for subsequent conversions
    pub fn set_fast_measure(&mut self, enabled: bool) {
        self.session.config.set_fast_measure(enabled);
    }

    /// Wake the device and check its ID register
    pub fn initialize(&mut self) -> Result<(), Error<E>> {
        self.session.begin_identify::<E>()?;
        let id = self.identify();
        let result = self.session.finish_identify(id);
        match &result {
            Ok(()) => debug!("si7005::initialize(): ready"),
            Err(e) => warn!("si7005::initialize(): faulted: {}", e.kind()),
        }
        result
    }

    fn identify(&mut self) -> Result<u8, Error<E>> {
        let selected = Selected::enable::<E>(&mut self.cs)?;
        self.delay.delay_ms(WAKE_UP_TIME_MS);
        let id = read_register(&mut self.i2c, REG_ID)?;
        selected.release::<E>()?;
        Ok(id)
    }

    /// Run one conversion and return the raw 16-bit data register contents
    pub fn read_raw(&mut self, measurement: Measurement) -> Result<u16, Error<E>> {
        self.session.ensure_ready::<E>()?;
        let command = self.session.config.start_command(measurement);

        let selected = Selected::enable::<E>(&mut self.cs)?;
        self.delay.delay_ms(WAKE_UP_TIME_MS);
        write_register(&mut self.i2c, REG_CONFIG, command)?;

        let mut waited_ms = 0;
        while read_register(&mut self.i2c, REG_STATUS)? & STATUS_NOT_READY != 0 {
            if waited_ms >= CONVERSION_TIMEOUT_MS {
                warn!("si7005::read_raw(): no result after {} ms", waited_ms);
                return Err(Error::ConversionTimeout);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
            waited_ms += POLL_INTERVAL_MS;
        }
        trace!("si7005::read_raw(): conversion done after {} ms", waited_ms);

        write_register(&mut self.i2c, REG_DATA, 0)?;
        let high = read_register(&mut self.i2c, REG_DATA_HIGH)?;
        let low = read_register(&mut self.i2c, REG_DATA_LOW)?;
        selected.release::<E>()?;
        Ok(assemble(high, low))
    }

    /// Measure the temperature
    pub fn read_temperature(&mut self, unit: TemperatureUnit) -> Result<f32, Error<E>> {
        let raw = self.read_raw(Measurement::Temperature)?;
        Ok(self.session.temperature(raw, unit))
    }

    /// Measure the relative humidity in percent, compensated with the last temperature reading
    pub fn read_humidity(&mut self) -> Result<f32, Error<E>> {
        self.session.ensure_ready::<E>()?;
        self.session.ensure_temperature_reference::<E>()?;
        let raw = self.read_raw(Measurement::Humidity)?;
        self.session.humidity(raw)
    }

    /// Measure the temperature, then the relative humidity compensated with it
    pub fn read_climate(&mut self, unit: TemperatureUnit) -> Result<Climate, Error<E>> {
        let temperature = self.read_temperature(unit)?;
        let humidity_percent = self.read_humidity()?;
        Ok(Climate {
            temperature,
            unit,
            humidity_percent,
        })
    }
}
