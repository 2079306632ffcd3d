use crate::calibration::assemble;
use crate::hw_def::*;
use crate::select::Selected;
use crate::transport::Transport;
use crate::types::*;

use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

impl<I2C, CS, Delay, E> Si7005<I2C, CS, Delay>
where
    I2C: I2c<Error = E>,
    CS: OutputPin,
    Delay: DelayNs,
{
    /// Create a new Si7005 driver instance.
    ///
    /// No bus traffic happens until [`initialize`](Self::initialize) is called.
    pub fn new(i2c: I2C, cs: CS, delay: Delay) -> Self {
        Self {
            bus: Transport::new(i2c),
            cs,
            delay,
            session: Session::new(),
        }
    }

    /// Give back the bus, the chip-select pin and the delay provider
    pub fn release(self) -> (I2C, CS, Delay) {
        (self.bus.i2c, self.cs, self.delay)
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

    /// Enable or disable the on-chip heater for subsequent conversions.
    ///
    /// The heater drives condensation off the sensor, which makes humidity readings in high
    /// humidity more accurate, but it raises the temperature reading.
    pub fn set_heater(&mut self, enabled: bool) {
        self.session.config.set_heater(enabled);
    }

    /// Trade resolution for conversion time (18 ms instead of 35 ms) on subsequent conversions
    pub fn set_fast_measure(&mut self, enabled: bool) {
        self.session.config.set_fast_measure(enabled);
    }

    /// Wake the device and check its ID register.
    ///
    /// On success the driver is `Ready`.  Any failure leaves it `Faulted` for good.
    pub async fn initialize(&mut self) -> Result<(), Error<E>> {
        self.session.begin_identify::<E>()?;
        let id = self.identify().await;
        let result = self.session.finish_identify(id);
        match &result {
            Ok(()) => debug!("si7005::initialize(): ready"),
            Err(e) => warn!("si7005::initialize(): faulted: {}", e.kind()),
        }
        result
    }

    async fn identify(&mut self) -> Result<u8, Error<E>> {
        let selected = Selected::enable::<E>(&mut self.cs)?;
        self.delay.delay_ms(WAKE_UP_TIME_MS).await;
        let id = self.bus.read_register(REG_ID).await?;
        selected.release::<E>()?;
        Ok(id)
    }

    /// Run one conversion and return the raw 16-bit data register contents
    pub async fn read_raw(&mut self, measurement: Measurement) -> Result<u16, Error<E>> {
        self.session.ensure_ready::<E>()?;
        let command = self.session.config.start_command(measurement);

        let selected = Selected::enable::<E>(&mut self.cs)?;
        self.delay.delay_ms(WAKE_UP_TIME_MS).await;
        self.bus.write_register(REG_CONFIG, command).await?;

        let mut waited_ms = 0;
        while self.bus.read_register(REG_STATUS).await? & STATUS_NOT_READY != 0 {
            if waited_ms >= CONVERSION_TIMEOUT_MS {
                warn!("si7005::read_raw(): no result after {} ms", waited_ms);
                return Err(Error::ConversionTimeout);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS).await;
            waited_ms += POLL_INTERVAL_MS;
        }
        trace!("si7005::read_raw(): conversion done after {} ms", waited_ms);

        self.bus.write_register(REG_DATA, 0).await?;
        let high = self.bus.read_register(REG_DATA_HIGH).await?;
        let low = self.bus.read_register(REG_DATA_LOW).await?;
        selected.release::<E>()?;
        Ok(assemble(high, low))
    }

    /// Measure the temperature
    pub async fn read_temperature(&mut self, unit: TemperatureUnit) -> Result<f32, Error<E>> {
        let raw = self.read_raw(Measurement::Temperature).await?;
        Ok(self.session.temperature(raw, unit))
    }

    /// Measure the relative humidity in percent, compensated with the last temperature reading
    pub async fn read_humidity(&mut self) -> Result<f32, Error<E>> {
        self.session.ensure_ready::<E>()?;
        self.session.ensure_temperature_reference::<E>()?;
        let raw = self.read_raw(Measurement::Humidity).await?;
        self.session.humidity(raw)
    }

    /// Measure the temperature, then the relative humidity compensated with it
    pub async fn read_climate(&mut self, unit: TemperatureUnit) -> Result<Climate, Error<E>> {
        let temperature = self.read_temperature(unit).await?;
        let humidity_percent = self.read_humidity().await?;
        Ok(Climate {
            temperature,
            unit,
            humidity_percent,
        })
    }
}
