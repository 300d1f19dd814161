//! Outbound application events.
//!
//! The [`AlarmController`](super::service::AlarmController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them.
//!
//! Events never carry typed keys or the secret.

use crate::fsm::context::DistanceCm;
use crate::fsm::{DisplayMode, Mode};

use super::alert::AlertCadence;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries initial mode).
    Started(Mode),

    /// An accepted code flipped the mode.
    ModeChanged { from: Mode, to: Mode },

    /// A complete attempt matched the secret.
    AccessGranted,

    /// A complete attempt did not match.
    AccessDenied,

    /// Motion was seen while armed and an alert cycle ran.
    MotionDetected {
        distance_cm: DistanceCm,
        cadence: AlertCadence,
    },

    /// The Disarmed screen selection changed.
    DisplayToggled(DisplayMode),
}
