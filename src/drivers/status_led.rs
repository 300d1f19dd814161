//! RGB indicator LED driver.
//!
//! Three LEDC PWM channels (CH0-2) drive a common-cathode RGB LED.  This is
//! where logical [`Indicator`]s become channel levels.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::Indicator;
use crate::drivers::hw_init;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_DISARMED: Rgb = (0, 255, 0);
pub const COLOUR_ARMED: Rgb = (255, 0, 0);
pub const COLOUR_ALERT_HIGH: Rgb = (255, 255, 255);
pub const COLOUR_ALERT_LOW: Rgb = (0, 0, 255);

/// Channel levels for a logical indicator.
pub const fn indicator_rgb(indicator: Indicator) -> Rgb {
    match indicator {
        Indicator::SafeDisarmed => COLOUR_DISARMED,
        Indicator::SafeArmed => COLOUR_ARMED,
        Indicator::AlertHigh => COLOUR_ALERT_HIGH,
        Indicator::AlertLow => COLOUR_ALERT_LOW,
    }
}

pub struct StatusLed {
    current: Rgb,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub fn new() -> Self {
        Self { current: (0, 0, 0) }
    }

    pub fn show(&mut self, indicator: Indicator) {
        let (r, g, b) = indicator_rgb(indicator);
        self.set_colour(r, g, b);
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) {
        if self.current == (r, g, b) {
            return;
        }
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, r);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, g);
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, b);
        self.current = (r, g, b);
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}
