use crate::types::Error;

use embedded_hal::digital::OutputPin;

/// Chip-select held at the enable level for as long as this guard lives.
///
/// Dropping the guard, including when a measurement future is cancelled mid-sequence, drives the
/// line back to the disable level.
pub(crate) struct Selected<'a, CS: OutputPin> {
    cs: Option<&'a mut CS>,
}

impl<'a, CS: OutputPin> Selected<'a, CS> {
    pub(crate) fn enable<E>(cs: &'a mut CS) -> Result<Self, Error<E>> {
        if cs.set_low().is_err() {
            warn!("si7005: failed to assert chip-select");
            return Err(Error::ChipSelect);
        }
        Ok(Self { cs: Some(cs) })
    }

    /// Disable the chip and report whether the pin accepted it
    pub(crate) fn release<E>(mut self) -> Result<(), Error<E>> {
        match self.cs.take() {
            Some(cs) => cs.set_high().map_err(|_| Error::ChipSelect),
            None => Ok(()),
        }
    }
}

impl<CS: OutputPin> Drop for Selected<'_, CS> {
    fn drop(&mut self) {
        if let Some(cs) = self.cs.take() {
            if cs.set_high().is_err() {
                warn!("si7005: failed to release chip-select");
            }
        }
    }
}
