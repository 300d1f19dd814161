//! Two-state alarm mode machine.
//!
//! ```text
//!            [code accepted]
//!   DISARMED ───────────────▶ ARMED
//!      ▲                        │
//!      └────────────────────────┘
//!            [code accepted]
//! ```
//!
//! The only edge in either direction is an accepted access code.  Rejected,
//! partial and absent input all leave the mode where it is.  The per-poll
//! behaviour of each mode lives in
//! [`AlarmController`](crate::app::service::AlarmController); this module
//! owns the identities and the transition bookkeeping.

pub mod context;

use context::AlarmContext;
use log::info;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Operating mode of the alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mode {
    /// Monitoring off; the display shows status or the last detection.
    #[default]
    Disarmed = 0,
    /// Motion monitoring and alerting enabled.
    Armed = 1,
}

impl Mode {
    /// The opposite mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Disarmed => Self::Armed,
            Self::Armed => Self::Disarmed,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::Armed => "Armed",
        }
    }
}

// ---------------------------------------------------------------------------
// Disarmed-screen selection
// ---------------------------------------------------------------------------

/// Which screen the Disarmed mode renders.  Flipped by the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// "System: Disarmed"
    #[default]
    Status,
    /// "Last Detection:" followed by the stored distance.
    LastDetection,
}

impl DisplayMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Status => Self::LastDetection,
            Self::LastDetection => Self::Status,
        }
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Flip the mode held in `ctx` and reset its per-mode poll counter.
///
/// Returns `(from, to)`.
pub fn toggle_mode(ctx: &mut AlarmContext) -> (Mode, Mode) {
    let from = ctx.mode;
    let to = from.toggled();
    info!("FSM transition: {} -> {}", from.name(), to.name());
    ctx.mode = to;
    ctx.polls_in_mode = 0;
    (from, to)
}
