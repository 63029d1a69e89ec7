//! # Board Configuration
//!
//! Compile-time constants for the joystick/OLED board, grouped by
//! functional area. Pin numbers are GPIO numbers on the RP2040.

/// GPIO assignments
pub mod pins {
    /// Joystick X axis, read on ADC input 1
    pub const JOYSTICK_X: u8 = 27;

    /// Joystick Y axis, read on ADC input 0
    pub const JOYSTICK_Y: u8 = 26;

    /// Joystick push button (active-low)
    pub const BUTTON_JOYSTICK: u8 = 22;

    /// Button A (active-low)
    pub const BUTTON_A: u8 = 5;

    pub const LED_GREEN: u8 = 11;
    /// PWM slice 6, channel A
    pub const LED_BLUE: u8 = 12;
    /// PWM slice 6, channel B
    pub const LED_RED: u8 = 13;

    pub const I2C_SDA: u8 = 14;
    pub const I2C_SCL: u8 = 15;
}

/// ADC (Analog-to-Digital Converter) Constants
pub mod adc {
    /// Maximum ADC value for 12-bit resolution (2^12 - 1)
    pub const MAX_VALUE: u16 = 4095;

    /// Split point of the LED brightness curve
    pub const CENTER_VALUE: u16 = 2048;
}

/// PWM (Pulse Width Modulation) Constants
pub mod pwm {
    /// Counter top, gives 8-bit duty resolution
    pub const LED_WRAP: u8 = 255;

    /// Integer clock divider for the LED slice
    pub const CLOCK_DIVIDER: u8 = 1;
}

/// SSD1306 OLED Constants
pub mod display {
    pub const WIDTH: u8 = 128;
    pub const HEIGHT: u8 = 64;

    /// Side length of the square that follows the joystick
    pub const SQUARE_SIZE: u8 = 8;

    /// 7-bit I2C address of the SSD1306
    pub const I2C_ADDRESS: u8 = 0x3C;

    /// Fast-mode I2C (400kHz)
    pub const I2C_FREQUENCY_HZ: u32 = 400_000;
}

/// Timing Constants
pub mod timing {
    /// Minimum time between two accepted button presses, in microseconds
    pub const DEBOUNCE_US: u64 = 200_000;

    /// Main loop period
    pub const LOOP_PERIOD_MS: u32 = 100;

    /// Pause after each peripheral is brought up
    pub const INIT_SETTLE_MS: u32 = 500;
}
