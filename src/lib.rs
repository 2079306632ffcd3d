//! This is a platform-agnostic Rust driver for the Si7005 digital relative humidity and
//! temperature sensor using the [`embedded-hal`] or [`embedded-hal-async`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//! [`embedded-hal-async`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal-async
//!
//! This driver allows you to:
//! - Wake the device and verify its identification register.
//! - Read the temperature in degrees centigrade or fahrenheit.
//! - Read the linearized, temperature-compensated relative humidity.
//! - Read raw conversion results.
//! - Enable/disable the heater.
//! - Enable/disable fast (lower resolution) conversions.
//! - Share one sensor between several async tasks, with an optional event channel.
//! - blocking API support.
//! - async API support.
//!
//! ## Features
//!
//! - `async`: Enables async API.
//! - `blocking`: Enables blocking API.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## The device
//!
//! The Si7005 sits at the fixed I²C address `0x40` and is powered up through an active-low
//! chip-select (CS) pin.  While CS is high the device ignores the bus, so several Si7005 can share
//! one bus as long as only one of them is selected at a time.  The driver pulls CS low for every
//! bus sequence and releases it afterwards; keeping the other sensors deselected is up to the
//! application.
//!
//! A conversion is started by writing the config register, then the status register is polled
//! until the conversion is done (35 ms in normal mode, 18 ms in fast mode) and the 16-bit result is
//! read.  Relative humidity is compensated with the most recent temperature reading, so at least
//! one temperature must be read before humidity; [`Si7005::read_climate`] does both in order.
//!
//! Datasheet: [Si7005](https://www.silabs.com/documents/public/data-sheets/Si7005.pdf)
//!
//! ## Async Example:
//!
//! ```ignore
//! use si7005::{Si7005, TemperatureUnit};
//!
//! // Platform-specific
//! let i2c = /* embedded_hal_async::i2c::I2c instance */;
//! let cs = /* embedded_hal::digital::OutputPin instance */;
//! let delay = /* embedded_hal_async::delay::DelayNs instance */;
//!
//! let mut si7005 = Si7005::new(i2c, cs, delay);
//! si7005.initialize().await.unwrap();
//!
//! let climate = si7005.read_climate(TemperatureUnit::Centigrade).await.unwrap();
//! println!("{:0.1} °C, {:0.1} %RH", climate.temperature, climate.humidity_percent);
//!
//! // Dry the sensor off, then go back to normal
//! si7005.set_heater(true);
//! println!("{:0.1} %RH", si7005.read_humidity().await.unwrap());
//! si7005.set_heater(false);
//! ```
//!
//! ## Blocking Example:
//!
//! ```ignore
//! use si7005::{blocking::Si7005, TemperatureUnit};
//!
//! // Platform-specific
//! let i2c = /* embedded_hal::i2c::I2c instance */;
//! let cs = /* embedded_hal::digital::OutputPin instance */;
//! let delay = /* embedded_hal::delay::DelayNs instance */;
//!
//! let mut si7005 = Si7005::new(i2c, cs, delay);
//! si7005.initialize().unwrap();
//!
//! si7005.set_fast_measure(true);
//! loop {
//!     let fahrenheit = si7005.read_temperature(TemperatureUnit::Fahrenheit).unwrap();
//!     let humidity = si7005.read_humidity().unwrap();
//!     println!("{:0.1} °F, {:0.1} %RH", fahrenheit, humidity);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("At least one of \"async\" and \"blocking\" features must be enabled");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

mod fmt;

pub mod calibration;
mod hw_def;
mod select;
mod types;

#[cfg(feature = "blocking")]
pub mod blocking;
#[cfg(feature = "async")]
mod device_impl;
#[cfg(feature = "async")]
pub mod shared;
#[cfg(feature = "async")]
mod transport;

pub use crate::{hw_def::*, types::*};
