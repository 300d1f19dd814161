//! Peripheral drivers, hardware initialisation, and bus helpers.

pub mod button;
pub mod buzzer;
pub mod hw_init;
pub mod hw_timer;
pub mod keypad;
pub mod lcd;
pub mod status_led;
