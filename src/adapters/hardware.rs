//! Hardware adapters — bridge the board's drivers to the domain port traits.
//!
//! The controller takes each port as its own value, so the hardware is
//! split the same way: the motion sensor hub, the keypad, the LCD, and an
//! [`AlertOutputs`] pair (RGB LED + buzzer).  This is the only module in
//! the system that connects ports to actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.
//!
//! Driver errors stop here: they are logged and the domain sees a safe
//! value instead.

use log::warn;

use crate::app::ports::{ActuatorPort, DisplayPort, Indicator, InputPort, Row, SensorPort};
use crate::drivers::buzzer::{self, Buzzer};
use crate::drivers::keypad::Keypad;
use crate::drivers::lcd::Lcd;
use crate::drivers::status_led::StatusLed;
use crate::sensors::MotionSensors;

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for MotionSensors {
    fn poll_motion(&mut self) -> bool {
        self.motion()
    }

    fn measure_distance_cm(&mut self) -> i32 {
        self.distance_cm()
    }

    fn poll_button_edge(&mut self) -> bool {
        self.button_edge()
    }

    fn discard_button_edge(&mut self) {
        self.button.discard_pending();
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for Keypad {
    fn poll_key(&mut self) -> Option<char> {
        Keypad::poll_key(self)
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for Lcd {
    fn write_line(&mut self, row: Row, text: &str) {
        if let Err(e) = Lcd::write_line(self, row as u8, text) {
            warn!("lcd: {} writing {:?}", e, text);
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

/// RGB indicator and buzzer, driven together by the alert cycle.
pub struct AlertOutputs {
    led: StatusLed,
    buzzer: Buzzer,
}

impl Default for AlertOutputs {
    fn default() -> Self {
        Self::new(StatusLed::new(), Buzzer::new())
    }
}

impl AlertOutputs {
    pub fn new(led: StatusLed, buzzer: Buzzer) -> Self {
        Self { led, buzzer }
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }
}

impl ActuatorPort for AlertOutputs {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.led.show(indicator);
    }

    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        buzzer::tone_or_warn(&mut self.buzzer, frequency_hz, duration_ms);
    }

    fn silence(&mut self) {
        self.buzzer.silence();
    }
}
