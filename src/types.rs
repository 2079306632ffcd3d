use crate::calibration::*;
use crate::hw_def::*;

use core::fmt;

#[cfg(feature="defmt")]
use defmt::Format;

/// Si7005 device driver
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct Si7005<I2C, CS, Delay> {
    pub(crate) bus: crate::transport::Transport<I2C>,
    pub(crate) cs: CS,
    pub(crate) delay: Delay,
    pub(crate) session: Session,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug)]
pub enum Error<E> {
    /// I²C communication error
    I2c(E),
    /// The chip-select output could not be driven
    ChipSelect,
    /// The ID register did not identify an Si7005; carries the unmasked register value
    IdMismatch(u8),
    /// The device never reported the end of a conversion
    ConversionTimeout,
    /// The driver is not in the `Ready` state
    NotReady(State),
    /// Relative humidity was requested before any temperature was read
    NoTemperatureReference,
}
impl<E> Error<E> {
    /// The kind of the error, without the bus error payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::I2c(_) => ErrorKind::I2c,
            Self::ChipSelect => ErrorKind::ChipSelect,
            Self::IdMismatch(id) => ErrorKind::IdMismatch(*id),
            Self::ConversionTimeout => ErrorKind::ConversionTimeout,
            Self::NotReady(state) => ErrorKind::NotReady(*state),
            Self::NoTemperatureReference => ErrorKind::NoTemperatureReference,
        }
    }
}
impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}

/// Bus-independent description of an [`Error`]
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// I²C communication error
    I2c,
    /// The chip-select output could not be driven
    ChipSelect,
    /// Unexpected ID register value
    IdMismatch(u8),
    /// The device never reported the end of a conversion
    ConversionTimeout,
    /// The driver is not in the `Ready` state
    NotReady(State),
    /// Relative humidity was requested before any temperature was read
    NoTemperatureReference,
}
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::I2c => write!(f, "I2C bus error"),
            ErrorKind::ChipSelect => write!(f, "chip-select pin error"),
            ErrorKind::IdMismatch(id) => write!(f, "cannot connect to climate sensor, got id 0x{id:02X}"),
            ErrorKind::ConversionTimeout => write!(f, "conversion did not complete"),
            ErrorKind::NotReady(state) => write!(f, "sensor not ready ({state:?})"),
            ErrorKind::NoTemperatureReference => write!(f, "humidity needs a prior temperature reading"),
        }
    }
}

/// Lifecycle of a driver instance
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Created, `initialize()` not called yet
    Uninitialized,
    /// Reading the ID register
    Identifying,
    /// Identified; measurements may be taken
    Ready,
    /// Identification failed; the driver must be rebuilt
    Faulted,
}

/// Unit of a temperature reading
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TemperatureUnit {
    /// degrees centigrade
    #[default]
    Centigrade,
    /// degrees fahrenheit
    Fahrenheit,
}
impl TemperatureUnit {
    /// Express a centigrade value in this unit
    pub fn from_centigrade(self, centigrade: f32) -> f32 {
        match self {
            Self::Centigrade => centigrade,
            Self::Fahrenheit => centigrade_to_fahrenheit(centigrade),
        }
    }
}

/// Which quantity a conversion measures
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Measurement {
    /// relative humidity
    Humidity,
    /// temperature
    Temperature,
}
impl Measurement {
    /// Config register selector bits for this measurement
    pub fn selector(self) -> u8 {
        match self {
            Self::Humidity => CONFIG_HUMIDITY,
            Self::Temperature => CONFIG_TEMPERATURE,
        }
    }
}

/// Persistent bits of the config register (heater and fast mode).
///
/// The start and measurement selector bits are never stored here; they are OR-ed in only for the
/// config write that starts a conversion.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Config(u8);
impl Config {
    /// Raw config bits
    pub fn bits(&self) -> u8 {
        self.0
    }
    /// Heater is enabled
    pub fn heater(&self) -> bool {
        self.0 & CONFIG_HEAT != 0
    }
    /// Fast mode is enabled
    pub fn fast_measure(&self) -> bool {
        self.0 & CONFIG_FAST != 0
    }
    /// Enable or disable the heater
    pub fn set_heater(&mut self, enabled: bool) {
        self.assign(CONFIG_HEAT, enabled);
    }
    /// Enable or disable fast mode
    pub fn set_fast_measure(&mut self, enabled: bool) {
        self.assign(CONFIG_FAST, enabled);
    }
    /// Config register value which starts a conversion of `measurement`
    pub fn start_command(&self, measurement: Measurement) -> u8 {
        CONFIG_START | measurement.selector() | self.0
    }

    fn assign(&mut self, mask: u8, enabled: bool) {
        if enabled {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }
}

/// Temperature and relative humidity from back-to-back conversions
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    /// temperature in `unit`
    pub temperature: f32,
    /// unit of `temperature`
    pub unit: TemperatureUnit,
    /// relative humidity in percent
    pub humidity_percent: f32,
}

/// Driver bookkeeping shared by the async and blocking drivers: lifecycle, persistent config and
/// the temperature used to compensate humidity readings.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug)]
pub(crate) struct Session {
    pub(crate) state: State,
    pub(crate) config: Config,
    pub(crate) last_centigrade: Option<f32>,
}
impl Session {
    pub(crate) const fn new() -> Self {
        Self {
            state: State::Uninitialized,
            config: Config(0),
            last_centigrade: None,
        }
    }

    pub(crate) fn begin_identify<E>(&mut self) -> Result<(), Error<E>> {
        if self.state == State::Faulted {
            return Err(Error::NotReady(self.state));
        }
        self.state = State::Identifying;
        Ok(())
    }

    /// Settle the identification attempt; any failure faults the session
    pub(crate) fn finish_identify<E>(&mut self, id: Result<u8, Error<E>>) -> Result<(), Error<E>> {
        let result = id.and_then(|id| {
            if id & ID_MASK == ID_SI7005 {
                Ok(())
            } else {
                Err(Error::IdMismatch(id))
            }
        });
        self.state = match result {
            Ok(()) => State::Ready,
            Err(_) => State::Faulted,
        };
        result
    }

    pub(crate) fn ensure_ready<E>(&self) -> Result<(), Error<E>> {
        match self.state {
            State::Ready => Ok(()),
            state => Err(Error::NotReady(state)),
        }
    }

    pub(crate) fn ensure_temperature_reference<E>(&self) -> Result<f32, Error<E>> {
        self.last_centigrade.ok_or(Error::NoTemperatureReference)
    }

    /// Convert a raw temperature and remember it for humidity compensation
    pub(crate) fn temperature(&mut self, raw: u16, unit: TemperatureUnit) -> f32 {
        let centigrade = raw_temp_to_centigrade(raw);
        self.last_centigrade = Some(centigrade);
        unit.from_centigrade(centigrade)
    }

    pub(crate) fn humidity<E>(&self, raw: u16) -> Result<f32, Error<E>> {
        let centigrade = self.ensure_temperature_reference::<E>()?;
        Ok(raw_rel_humid_to_percent(raw, centigrade))
    }
}
