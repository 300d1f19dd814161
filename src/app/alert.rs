//! Distance-scaled alert cycle.
//!
//! One cycle is two phases.  Each phase starts a tone for half the phase
//! length, switches the indicator, then holds for the full phase:
//!
//! ```text
//!  |<------ cycle_ms ------>|<------ cycle_ms ------>|
//!  |~~ tone ~~|             |~~ tone ~~|             |
//!  [ AlertHigh (white)     ][ AlertLow (blue)        ]
//! ```
//!
//! `cycle_ms` grows linearly with distance, so a closer intruder makes the
//! alarm alternate faster.  The holds block the caller; nothing else runs
//! until the cycle completes.

use embedded_hal::delay::DelayNs;

use crate::config::AlarmConfig;
use crate::fsm::context::DistanceCm;

use super::ports::{ActuatorPort, Indicator};

/// Timing of one alert cycle, derived from a clamped distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertCadence {
    /// Hold time of each of the two phases (ms).
    pub cycle_ms: u32,
    /// Tone length at the start of each phase (ms).
    pub tone_ms: u32,
}

impl AlertCadence {
    pub fn from_distance(distance_cm: DistanceCm, ms_per_cm: u32) -> Self {
        let cycle_ms = u32::from(distance_cm).saturating_mul(ms_per_cm);
        Self {
            cycle_ms,
            tone_ms: cycle_ms / 2,
        }
    }
}

/// The two phases in the order they run.
const PHASES: [Indicator; 2] = [Indicator::AlertHigh, Indicator::AlertLow];

pub struct AlertModulator {
    tone_hz: u32,
    ms_per_cm: u32,
}

impl AlertModulator {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            tone_hz: config.alert_tone_hz,
            ms_per_cm: config.alert_ms_per_cm,
        }
    }

    /// Cadence a cycle at `distance_cm` would use.
    pub fn cadence(&self, distance_cm: DistanceCm) -> AlertCadence {
        AlertCadence::from_distance(distance_cm, self.ms_per_cm)
    }

    /// Drive one full two-phase alert cycle.  Blocks for `2 * cycle_ms`.
    ///
    /// `distance_cm == 0` gives a zero-length cycle: both phases still set
    /// their colour, but no tone sounds and nothing is held.
    pub fn run_cycle(
        &self,
        distance_cm: DistanceCm,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> AlertCadence {
        let cadence = self.cadence(distance_cm);
        for indicator in PHASES {
            hw.tone(self.tone_hz, cadence.tone_ms);
            hw.set_indicator(indicator);
            delay.delay_ms(cadence.cycle_ms);
        }
        cadence
    }

    /// Armed with no motion: buzzer off, steady armed colour.
    pub fn idle(&self, hw: &mut impl ActuatorPort) {
        hw.silence();
        hw.set_indicator(Indicator::SafeArmed);
    }
}
