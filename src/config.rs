//! System configuration parameters
//!
//! Every timing and range constant the alarm uses, gathered in one place.
//! The values are compiled in; there is no runtime override and nothing is
//! persisted.

use serde::{Deserialize, Serialize};

/// Number of keypresses that make up one access attempt.
pub const PASSWORD_LEN: usize = 4;

/// The access code.  Fixed at build time.
pub const SECRET: &str = "1234";

/// Upper bound of the ultrasonic detection range (cm).  Readings are
/// clamped to `0..=MAX_DISTANCE_CM`.
pub const MAX_DISTANCE_CM: u16 = 300;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    // --- Keypad / display pacing ---
    /// Hold after echoing a keypress so the entry is readable (ms)
    pub key_echo_ms: u32,
    /// How long "Access granted" / "Access denied" stays on screen (ms)
    pub message_hold_ms: u32,

    // --- Input sampling ---
    /// Pause after sampling the display-toggle button (ms)
    pub button_debounce_ms: u32,
    /// Pause after sampling the PIR output (ms)
    pub motion_settle_ms: u32,
    /// Pause at the end of every poll pass (ms)
    pub loop_pause_ms: u32,

    // --- Alert cadence ---
    /// Buzzer frequency during an alert cycle (Hz)
    pub alert_tone_hz: u32,
    /// Alert phase length per centimetre of measured distance (ms)
    pub alert_ms_per_cm: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            // Keypad / display
            key_echo_ms: 750,
            message_hold_ms: 1000,

            // Input sampling
            button_debounce_ms: 50,
            motion_settle_ms: 10,
            loop_pause_ms: 50,

            // Alert cadence
            alert_tone_hz: 850,
            alert_ms_per_cm: 100,
        }
    }
}
