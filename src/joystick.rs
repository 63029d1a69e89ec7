//! # Joystick Module
//!
//! Two-axis analog joystick read through the RP2040's 12-bit ADC.
//! Readings are raw: no smoothing, no calibration.

use embedded_hal::adc::{Channel, OneShot};

use crate::config::adc;

/// One raw reading of both axes, each within `0..=4095`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub x: u16,
    pub y: u16,
}

impl Sample {
    /// Builds a sample, clamping both axes into the 12-bit ADC range
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x: x.min(adc::MAX_VALUE),
            y: y.min(adc::MAX_VALUE),
        }
    }
}

/// Joystick wired to two channels of the same ADC
pub struct Joystick<A, X, Y> {
    adc: A,
    x_pin: X,
    y_pin: Y,
}

impl<A, X, Y> Joystick<A, X, Y>
where
    A: OneShot<A, u16, X> + OneShot<A, u16, Y>,
    X: Channel<A>,
    Y: Channel<A>,
{
    pub fn new(adc: A, x_pin: X, y_pin: Y) -> Self {
        Self { adc, x_pin, y_pin }
    }

    /// Reads the X channel, then the Y channel.
    /// A failed conversion reads as 0.
    pub fn sample(&mut self) -> Sample {
        let x = nb::block!(OneShot::<A, u16, X>::read(&mut self.adc, &mut self.x_pin))
            .unwrap_or(0);
        let y = nb::block!(OneShot::<A, u16, Y>::read(&mut self.adc, &mut self.y_pin))
            .unwrap_or(0);

        Sample::new(x, y)
    }

    #[cfg(test)]
    fn release(self) -> (A, X, Y) {
        (self.adc, self.x_pin, self.y_pin)
    }
}
