//! Register map and timing of the Si7005, as given by the datasheet.
//!
//! Datasheet: [Si7005](https://www.silabs.com/documents/public/data-sheets/Si7005.pdf)

/// Fixed 7-bit I²C address of the Si7005
pub const I2C_ADDRESS: u8 = 0x40;

/// Status register
pub const REG_STATUS: u8 = 0x00;
/// Data register; writing it latches the last conversion result
pub const REG_DATA: u8 = 0x01;
/// High byte of the last conversion result
pub const REG_DATA_HIGH: u8 = 0x01;
/// Low byte of the last conversion result
pub const REG_DATA_LOW: u8 = 0x02;
/// Configuration register
pub const REG_CONFIG: u8 = 0x03;
/// Identification register
pub const REG_ID: u8 = 0x11;

/// Status register: a conversion is still in progress
pub const STATUS_NOT_READY: u8 = 0x01;

/// Config register: start a conversion
pub const CONFIG_START: u8 = 0x01;
/// Config register: enable the on-chip heater
pub const CONFIG_HEAT: u8 = 0x02;
/// Config register: measure relative humidity
pub const CONFIG_HUMIDITY: u8 = 0x00;
/// Config register: measure temperature
pub const CONFIG_TEMPERATURE: u8 = 0x10;
/// Config register: fast (lower resolution) conversions
pub const CONFIG_FAST: u8 = 0x20;
/// Config bits which survive from one conversion to the next
pub const CONFIG_PERSISTENT_MASK: u8 = CONFIG_HEAT | CONFIG_FAST;

/// ID register: the upper nibble identifies the part, the lower nibble is a sample-rate field
pub const ID_MASK: u8 = 0xF0;
/// ID register: expected upper nibble for the Si7005
pub const ID_SI7005: u8 = 0x50;

/// Raw temperature: number of unused low bits
pub const TEMPERATURE_SHIFT: u8 = 2;
/// Raw temperature: counts per degree centigrade
pub const TEMPERATURE_SLOPE: f32 = 32.0;
/// Raw temperature: offset in degrees centigrade
pub const TEMPERATURE_OFFSET: f32 = 50.0;

/// Raw humidity: number of unused low bits
pub const HUMIDITY_SHIFT: u8 = 4;
/// Raw humidity: counts per percent
pub const HUMIDITY_SLOPE: f32 = 16.0;
/// Raw humidity: offset in percent
pub const HUMIDITY_OFFSET: f32 = 24.0;

/// Humidity linearization, constant term (datasheet section 5.1.1)
pub const LINEARIZATION_A0: f32 = -4.7844;
/// Humidity linearization, first-order coefficient
pub const LINEARIZATION_A1: f32 = 0.4008;
/// Humidity linearization, second-order coefficient
pub const LINEARIZATION_A2: f32 = -0.00393;

/// Humidity temperature compensation, constant term (datasheet section 5.1.2)
pub const COMPENSATION_Q0: f32 = 0.1973;
/// Humidity temperature compensation, first-order coefficient
pub const COMPENSATION_Q1: f32 = 0.00237;
/// Temperature at which the humidity transfer curve needs no compensation
pub const COMPENSATION_REFERENCE_CENTIGRADE: f32 = 30.0;

/// Time from chip-select assertion until the device answers on the bus
pub const WAKE_UP_TIME_MS: u32 = 15;
/// Worst-case conversion time in normal mode
pub const CONVERSION_TIME_NORMAL_MS: u32 = 35;
/// Worst-case conversion time in fast mode
pub const CONVERSION_TIME_FAST_MS: u32 = 18;
/// Pause between two reads of the status register
pub const POLL_INTERVAL_MS: u32 = 1;
/// Give up on a conversion after ten times the worst-case conversion time
pub const CONVERSION_TIMEOUT_MS: u32 = 10 * CONVERSION_TIME_NORMAL_MS;
