//! A driver handle that can be used from several tasks at once, plus an optional event channel.
//!
//! Every operation takes the handle's mutex for its whole bus sequence, so two tasks can never
//! interleave their chip-select / configure / poll / read steps on the same sensor.  Results are
//! returned to the caller and, if an [`EventChannel`] is attached, also published to every
//! subscriber.

use crate::types::*;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_sync::pubsub::PubSubChannel;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, i2c::I2c};

/// Events kept for each subscriber before the oldest is dropped
pub const EVENT_QUEUE_DEPTH: usize = 8;
/// Maximum number of concurrent subscribers
pub const MAX_EVENT_LISTENERS: usize = 4;

/// Channel on which a [`SharedSi7005`] publishes [`Event`]s
pub type EventChannel<M> = PubSubChannel<M, Event, EVENT_QUEUE_DEPTH, MAX_EVENT_LISTENERS, 1>;

/// Notification published after each operation of a [`SharedSi7005`]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// `initialize()` identified the device
    Ready,
    /// `initialize()` failed; the driver is unusable
    Faulted(ErrorKind),
    /// a temperature reading completed
    Temperature {
        /// reading in `unit`
        value: f32,
        /// unit of `value`
        unit: TemperatureUnit,
    },
    /// a relative humidity reading (percent) completed
    Humidity(f32),
    /// a measurement failed
    Failed(ErrorKind),
}

/// Si7005 driver behind a mutex
pub struct SharedSi7005<'a, M: RawMutex, I2C, CS, Delay> {
    driver: Mutex<M, Si7005<I2C, CS, Delay>>,
    events: Option<&'a EventChannel<M>>,
}

impl<'a, M, I2C, CS, Delay, E> SharedSi7005<'a, M, I2C, CS, Delay>
where
    M: RawMutex,
    I2C: I2c<Error = E>,
    CS: OutputPin,
    Delay: DelayNs,
{
    /// Wrap a driver without publishing events
    pub fn new(driver: Si7005<I2C, CS, Delay>) -> Self {
        Self {
            driver: Mutex::new(driver),
            events: None,
        }
    }

    /// Wrap a driver and publish the outcome of every operation on `events`
    pub fn with_events(driver: Si7005<I2C, CS, Delay>, events: &'a EventChannel<M>) -> Self {
        Self {
            driver: Mutex::new(driver),
            events: Some(events),
        }
    }

    /// Unwrap the driver
    pub fn into_inner(self) -> Si7005<I2C, CS, Delay> {
        self.driver.into_inner()
    }

    /// Exclusive access for a sequence of operations that must not be interleaved with others.
    ///
    /// Operations run through the guard do not publish events.
    pub async fn lock(&self) -> MutexGuard<'_, M, Si7005<I2C, CS, Delay>> {
        self.driver.lock().await
    }

    /// Current lifecycle state
    pub async fn state(&self) -> State {
        self.driver.lock().await.state()
    }

    /// See [`Si7005::initialize`]; publishes [`Event::Ready`] or [`Event::Faulted`]
    pub async fn initialize(&self) -> Result<(), Error<E>> {
        let result = self.driver.lock().await.initialize().await;
        self.publish(match &result {
            Ok(()) => Event::Ready,
            Err(e) => Event::Faulted(e.kind()),
        });
        result
    }

    /// See [`Si7005::read_temperature`]; publishes [`Event::Temperature`] or [`Event::Failed`]
    pub async fn read_temperature(&self, unit: TemperatureUnit) -> Result<f32, Error<E>> {
        let result = self.driver.lock().await.read_temperature(unit).await;
        self.publish(match &result {
            Ok(value) => Event::Temperature { value: *value, unit },
            Err(e) => Event::Failed(e.kind()),
        });
        result
    }

    /// See [`Si7005::read_humidity`]; publishes [`Event::Humidity`] or [`Event::Failed`]
    pub async fn read_humidity(&self) -> Result<f32, Error<E>> {
        let result = self.driver.lock().await.read_humidity().await;
        self.publish(match &result {
            Ok(value) => Event::Humidity(*value),
            Err(e) => Event::Failed(e.kind()),
        });
        result
    }

    /// See [`Si7005::read_climate`]; publishes [`Event::Temperature`] as soon as the temperature is
    /// in, then [`Event::Humidity`]. The first failing reading publishes [`Event::Failed`].
    pub async fn read_climate(&self, unit: TemperatureUnit) -> Result<Climate, Error<E>> {
        let mut driver = self.driver.lock().await;
        let temperature = match driver.read_temperature(unit).await {
            Ok(value) => {
                self.publish(Event::Temperature { value, unit });
                value
            }
            Err(e) => {
                self.publish(Event::Failed(e.kind()));
                return Err(e);
            }
        };
        let humidity_percent = match driver.read_humidity().await {
            Ok(value) => {
                self.publish(Event::Humidity(value));
                value
            }
            Err(e) => {
                self.publish(Event::Failed(e.kind()));
                return Err(e);
            }
        };
        Ok(Climate {
            temperature,
            unit,
            humidity_percent,
        })
    }

    /// See [`Si7005::set_heater`]
    pub async fn set_heater(&self, enabled: bool) {
        self.driver.lock().await.set_heater(enabled);
    }

    /// See [`Si7005::set_fast_measure`]
    pub async fn set_fast_measure(&self, enabled: bool) {
        self.driver.lock().await.set_fast_measure(enabled);
    }

    fn publish(&self, event: Event) {
        if let Some(events) = self.events {
            events.immediate_publisher().publish_immediate(event);
        }
    }
}
