//! Passive piezo buzzer driver.
//!
//! The tone pitch is the LEDC buzzer timer frequency; sound is a 50 % duty
//! square wave on LEDC channel 3.  Timed tones arm the one-shot timer in
//! [`hw_timer`](super::hw_timer) so they stop without the caller waiting.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: retunes LEDC and arms the esp_timer.
//! On host/test: tracks state and the stop deadline in-memory only.

use log::warn;

use crate::drivers::{hw_init, hw_timer};
use crate::error::{ActuatorError, Error};

/// 50 % of 8-bit duty.
const SQUARE_WAVE_DUTY: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    /// Sounding until `until_us` (uptime, µs).
    Sounding { frequency_hz: u32, until_us: u64 },
}

pub struct Buzzer {
    state: BuzzerState,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
        }
    }

    /// Sound `frequency_hz` for `duration_ms`, returning immediately.
    ///
    /// A zero frequency or duration is a no-op that also ends any running
    /// tone.
    pub fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Error> {
        if frequency_hz == 0 || duration_ms == 0 {
            self.silence();
            return Ok(());
        }

        if !hw_init::ledc_set_freq(hw_init::LEDC_TIMER_BUZZER, frequency_hz) {
            self.silence();
            return Err(ActuatorError::ToneFrequencyRejected.into());
        }
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, SQUARE_WAVE_DUTY);

        if let Err(e) = hw_timer::arm_tone_stop(duration_ms) {
            // Better silent than stuck on.
            self.silence();
            return Err(e.into());
        }

        let now = hw_init::uptime_us();
        self.state = BuzzerState::Sounding {
            frequency_hz,
            until_us: now + u64::from(duration_ms) * 1_000,
        };
        Ok(())
    }

    pub fn silence(&mut self) {
        hw_timer::cancel_tone_stop();
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, 0);
        self.state = BuzzerState::Silent;
    }

    /// Current state, with an expired timed tone reported as silent.
    pub fn state(&self) -> BuzzerState {
        match self.state {
            BuzzerState::Sounding { until_us, .. } if hw_init::uptime_us() >= until_us => {
                BuzzerState::Silent
            }
            s => s,
        }
    }

    pub fn is_sounding(&self) -> bool {
        matches!(self.state(), BuzzerState::Sounding { .. })
    }
}

/// Log-and-continue wrapper for callers on the poll path.
pub fn tone_or_warn(buzzer: &mut Buzzer, frequency_hz: u32, duration_ms: u32) {
    if let Err(e) = buzzer.tone(frequency_hz, duration_ms) {
        warn!("buzzer: {} ({} Hz, {} ms)", e, frequency_hz, duration_ms);
    }
}
