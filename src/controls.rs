//! # Button Controls Module
//!
//! State changed from the GPIO interrupt: the joystick button toggles the
//! green LED and advances the border style, button A toggles the PWM LEDs.
//!
//! Both buttons share one debounce window. A press on either button blocks
//! presses on both for [`DEBOUNCE_US`](crate::config::timing::DEBOUNCE_US)
//! after it. Rejected presses do not move the window.

use crate::config::timing;
use crate::display::BorderStyle;

/// Falling edge on one of the two buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    JoystickButton,
    ActionButton,
}

/// Output the interrupt handler has to carry out after an accepted press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Drive the green LED pin to this level
    GreenLed(bool),
    /// PWM LEDs were switched on or off, picked up by the main loop
    PwmEnabled(bool),
}

/// What the main loop needs each iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mode {
    pub border: BorderStyle,
    pub pwm_enabled: bool,
}

pub struct ModeController {
    green_led: bool,
    border: BorderStyle,
    pwm_enabled: bool,
    last_accepted_us: u64,
}

impl ModeController {
    pub const fn new() -> Self {
        Self {
            green_led: false,
            border: BorderStyle::Solid,
            pwm_enabled: false,
            last_accepted_us: 0,
        }
    }

    /// Applies a button press seen at `now_us` (µs since boot).
    /// Returns `None` if the press falls inside the debounce window.
    pub fn handle(&mut self, event: ButtonEvent, now_us: u64) -> Option<Effect> {
        if now_us.saturating_sub(self.last_accepted_us) < timing::DEBOUNCE_US {
            return None;
        }
        self.last_accepted_us = now_us;

        match event {
            ButtonEvent::JoystickButton => {
                self.green_led = !self.green_led;
                self.border = self.border.next();
                Some(Effect::GreenLed(self.green_led))
            }
            ButtonEvent::ActionButton => {
                self.pwm_enabled = !self.pwm_enabled;
                Some(Effect::PwmEnabled(self.pwm_enabled))
            }
        }
    }

    pub fn mode(&self) -> Mode {
        Mode {
            border: self.border,
            pwm_enabled: self.pwm_enabled,
        }
    }

    #[cfg(test)]
    fn green_led(&self) -> bool {
        self.green_led
    }

    #[cfg(test)]
    fn last_accepted_us(&self) -> u64 {
        self.last_accepted_us
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ButtonEvent::*;

    const SECOND: u64 = 1_000_000;

    #[test]
    fn starts_solid_dark_and_disabled() {
        let controller = ModeController::new();
        assert_eq!(
            controller.mode(),
            Mode {
                border: BorderStyle::Solid,
                pwm_enabled: false
            }
        );
        assert!(!controller.green_led());
    }

    #[test]
    fn joystick_button_cycles_border_and_toggles_led() {
        let mut controller = ModeController::new();
        let mut borders = Vec::new();
        let mut leds = Vec::new();

        for press in 1..=4 {
            let effect = controller.handle(JoystickButton, press * SECOND);
            leds.push(effect);
            borders.push(controller.mode().border.index());
        }

        assert_eq!(borders, [1, 2, 0, 1]);
        assert_eq!(
            leds,
            [
                Some(Effect::GreenLed(true)),
                Some(Effect::GreenLed(false)),
                Some(Effect::GreenLed(true)),
                Some(Effect::GreenLed(false)),
            ]
        );
    }

    #[test]
    fn press_inside_window_is_ignored() {
        let mut controller = ModeController::new();
        assert!(controller.handle(JoystickButton, SECOND).is_some());

        assert_eq!(controller.handle(JoystickButton, SECOND + 199_999), None);
        assert_eq!(controller.mode().border, BorderStyle::Dashed);
        assert!(controller.green_led());
        assert_eq!(controller.last_accepted_us(), SECOND);
    }

    #[test]
    fn presses_a_full_window_apart_both_count() {
        let mut controller = ModeController::new();
        assert!(controller.handle(JoystickButton, SECOND).is_some());
        assert!(controller.handle(JoystickButton, SECOND + 200_000).is_some());

        assert_eq!(controller.mode().border, BorderStyle::Dotted);
        assert_eq!(controller.last_accepted_us(), SECOND + 200_000);
    }

    #[test]
    fn rejected_presses_do_not_extend_window() {
        let mut controller = ModeController::new();
        controller.handle(JoystickButton, SECOND);
        assert_eq!(controller.handle(JoystickButton, SECOND + 150_000), None);

        // 200ms after the accepted press, only 50ms after the rejected one
        assert!(controller.handle(JoystickButton, SECOND + 200_000).is_some());
    }

    #[test]
    fn window_is_shared_between_buttons() {
        let mut controller = ModeController::new();
        controller.handle(JoystickButton, SECOND);

        assert_eq!(controller.handle(ActionButton, SECOND + 100_000), None);
        assert!(!controller.mode().pwm_enabled);

        controller.handle(ActionButton, SECOND + 300_000);
        assert_eq!(controller.handle(JoystickButton, SECOND + 350_000), None);
        assert_eq!(controller.mode().border, BorderStyle::Dashed);
    }

    #[test]
    fn action_button_toggles_pwm_once_per_press() {
        let mut controller = ModeController::new();

        assert_eq!(
            controller.handle(ActionButton, SECOND),
            Some(Effect::PwmEnabled(true))
        );
        assert!(controller.mode().pwm_enabled);
        assert_eq!(
            controller.handle(ActionButton, 2 * SECOND),
            Some(Effect::PwmEnabled(false))
        );
        assert!(!controller.mode().pwm_enabled);

        // border and LED are untouched by button A
        assert_eq!(controller.mode().border, BorderStyle::Solid);
        assert!(!controller.green_led());
    }

    #[test]
    fn press_right_after_boot_is_debounced() {
        let mut controller = ModeController::new();
        assert_eq!(controller.handle(ActionButton, 150_000), None);
        assert!(controller.handle(ActionButton, 200_000).is_some());
    }
}
