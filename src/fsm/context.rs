//! Alarm state owned by the controller and threaded through every poll.
//!
//! `AlarmContext` replaces what would otherwise be loose process-wide
//! variables: current mode, the Disarmed screen selection, and the last
//! detection distance.  Only the controller holds a `&mut` to it.

use crate::config::MAX_DISTANCE_CM;

use super::{DisplayMode, Mode};

/// A distance in centimetres, always within `0..=MAX_DISTANCE_CM`.
pub type DistanceCm = u16;

/// Clamp a raw sensor value into the detection range.
pub fn clamp_distance(raw_cm: i32) -> DistanceCm {
    raw_cm.clamp(0, i32::from(MAX_DISTANCE_CM)) as DistanceCm
}

/// The shared context read and written by the controller each poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmContext {
    /// Current operating mode.
    pub mode: Mode,
    /// Disarmed screen selection.
    pub display_mode: DisplayMode,
    /// Distance of the most recent detection.  `None` until motion has been
    /// measured at least once; a real 0 cm reading is `Some(0)`.
    pub last_detection: Option<DistanceCm>,
    /// Polls completed since the current mode was entered.
    pub polls_in_mode: u64,
    /// Polls completed since boot.
    pub total_polls: u64,
}

impl Default for AlarmContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmContext {
    pub fn new() -> Self {
        Self {
            mode: Mode::Disarmed,
            display_mode: DisplayMode::Status,
            last_detection: None,
            polls_in_mode: 0,
            total_polls: 0,
        }
    }

    /// Clamp `raw_cm`, store it as the last detection, and return it.
    pub fn record_detection(&mut self, raw_cm: i32) -> DistanceCm {
        let cm = clamp_distance(raw_cm);
        self.last_detection = Some(cm);
        cm
    }

    /// Invert the Disarmed screen selection and return the new value.
    pub fn toggle_display(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        self.display_mode
    }
}
