//! Conversion of raw data register contents into physical units.

use crate::hw_def::*;

/// Combine the two data register bytes into the raw 16-bit conversion result
pub fn assemble(high: u8, low: u8) -> u16 {
    (high as u16) << 8 | low as u16
}

/// Convert a raw temperature conversion result to degrees centigrade
pub fn raw_temp_to_centigrade(raw: u16) -> f32 {
    let counts = raw >> TEMPERATURE_SHIFT;
    counts as f32 / TEMPERATURE_SLOPE - TEMPERATURE_OFFSET
}

/// Convert degrees centigrade to degrees fahrenheit
pub fn centigrade_to_fahrenheit(centigrade: f32) -> f32 {
    centigrade * (9.0 / 5.0) + 32.0
}

/// Convert a raw humidity conversion result to relative humidity in percent.
///
/// The raw transfer curve is linearized with the datasheet's second-order polynomial and then
/// compensated for the temperature the sample was taken at.  The result is clamped to the
/// physically meaningful 0-100 %RH window; inside that window it is the unmodified datasheet
/// formula.
pub fn raw_rel_humid_to_percent(raw: u16, centigrade: f32) -> f32 {
    let counts = raw >> HUMIDITY_SHIFT;
    let curve = counts as f32 / HUMIDITY_SLOPE - HUMIDITY_OFFSET;
    let linear = curve - (curve * curve * LINEARIZATION_A2 + curve * LINEARIZATION_A1 + LINEARIZATION_A0);
    let compensated = linear
        + (centigrade - COMPENSATION_REFERENCE_CENTIGRADE) * (linear * COMPENSATION_Q1 + COMPENSATION_Q0);
    compensated.clamp(0.0, 100.0)
}
