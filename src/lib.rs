//! Joystick-driven LEDs and OLED square for the Raspberry Pi Pico.
//!
//! Everything here is hardware independent and runs under `cargo test` on
//! the host; `main.rs` wires it to the RP2040 peripherals.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controls;
pub mod diagnostics;
pub mod display;
pub mod joystick;
pub mod leds;
pub mod mapping;

#[cfg(test)]
mod test_canvas;
