//! # LED Brightness Module
//!
//! Maps joystick deflection onto the blue (Y axis) and red (X axis) PWM
//! channels. Each axis follows a V-shaped curve: dark at the center
//! reading, full brightness at either end of travel.
//!
//! ```text
//! duty
//! 255 |\                 /
//!     | \               /
//!     |  \             /
//!   0 +---\-----------/---
//!     0        2048       4095
//! ```

use embedded_hal::PwmPin;

use crate::config::{adc, pwm};
use crate::joystick::Sample;
use crate::mapping::map_value;

/// Duty cycles for the two PWM LEDs, `0..=255`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedDuty {
    pub blue: u8,
    pub red: u8,
}

impl LedDuty {
    pub const OFF: LedDuty = LedDuty { blue: 0, red: 0 };
}

/// Brightness for a single axis reading.
/// Exactly `CENTER_VALUE` is the dead zone and yields 0.
pub fn axis_brightness(value: u16) -> u8 {
    if value < adc::CENTER_VALUE {
        map_value(value, 0, adc::CENTER_VALUE, pwm::LED_WRAP, 0)
    } else if value > adc::CENTER_VALUE {
        map_value(value, adc::CENTER_VALUE, adc::MAX_VALUE, 0, pwm::LED_WRAP)
    } else {
        0
    }
}

/// Y drives blue, X drives red. Both are forced off while PWM is disabled.
pub fn drive(sample: Sample, enabled: bool) -> LedDuty {
    if !enabled {
        return LedDuty::OFF;
    }

    LedDuty {
        blue: axis_brightness(sample.y),
        red: axis_brightness(sample.x),
    }
}

/// The two PWM channels feeding the blue and red LEDs
pub struct PwmLeds<B, R> {
    blue: B,
    red: R,
}

impl<B, R> PwmLeds<B, R>
where
    B: PwmPin<Duty = u16>,
    R: PwmPin<Duty = u16>,
{
    /// Takes both channels, enables them and starts dark
    pub fn new(mut blue: B, mut red: R) -> Self {
        blue.set_duty(0);
        red.set_duty(0);
        blue.enable();
        red.enable();
        Self { blue, red }
    }

    pub fn apply(&mut self, duty: LedDuty) {
        self.blue.set_duty(u16::from(duty.blue));
        self.red.set_duty(u16::from(duty.red));
    }
}
