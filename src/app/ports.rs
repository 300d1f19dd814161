//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmController (domain)
//! ```
//!
//! Driven adapters (keypad, PIR + ultrasonic, buzzer + RGB LED, LCD, event
//! sinks) implement these traits.  The
//! [`AlarmController`](super::service::AlarmController) receives them at
//! construction, so the domain core never touches hardware directly and
//! tests can substitute deterministic fakes.
//!
//! Timed waits are not a port of their own: the controller takes any
//! [`embedded_hal::delay::DelayNs`] implementation alongside these.

/// Width of one display row in characters.
pub const DISPLAY_COLS: usize = 16;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the motion sensors and the display-toggle button.
pub trait SensorPort {
    /// Current PIR output.  `true` = motion present.
    fn poll_motion(&mut self) -> bool;

    /// Measure the distance to the moving object in centimetres.
    ///
    /// Raw value: may be negative or beyond the detection range.  The
    /// domain clamps it.
    fn measure_distance_cm(&mut self) -> i32;

    /// `true` exactly once per physical press of the toggle button.
    fn poll_button_edge(&mut self) -> bool;

    /// Drop any press latched since the last poll without acting on it.
    /// Called on passes that do not read the button, so a press made while
    /// armed or typing never surfaces later.
    fn discard_button_edge(&mut self) {
        let _ = self.poll_button_edge();
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Logical indicator colours.  The hardware layer decides how each maps
/// onto LED channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Disarmed and quiet.
    SafeDisarmed,
    /// Armed, no motion.
    SafeArmed,
    /// First phase of an alert cycle.
    AlertHigh,
    /// Second phase of an alert cycle.
    AlertLow,
}

/// Write-side port for the RGB indicator and the buzzer.
pub trait ActuatorPort {
    /// Show `indicator` until told otherwise.
    fn set_indicator(&mut self, indicator: Indicator);

    /// Start a tone that stops by itself after `duration_ms`.  Does not
    /// block.  A zero duration produces no sound.
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32);

    /// Stop any tone immediately.
    fn silence(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: keypad → domain)
// ───────────────────────────────────────────────────────────────

/// Keypad access.
pub trait InputPort {
    /// The single key pressed since the previous poll, if any.
    fn poll_key(&mut self) -> Option<char>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// One of the two display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Row {
    Top = 0,
    Bottom = 1,
}

/// Two-line character display.
pub trait DisplayPort {
    /// Replace the whole of `row` with `text`.
    ///
    /// Implementations pad short text with blanks and cut anything past
    /// [`DISPLAY_COLS`].
    fn write_line(&mut self, row: Row, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
