//! Alarm controller — the hexagonal core.
//!
//! [`AlarmController`] owns the alarm state, the credential gate and the
//! alert modulator, plus every port it talks to.  One call to
//! [`poll`](AlarmController::poll) is one pass of the control loop.
//!
//! ```text
//!   InputPort ──▶ ┌─────────────────────────────┐ ──▶ DisplayPort
//!                 │       AlarmController       │
//!  SensorPort ──▶ │ CredentialGate · Alert ·    │ ──▶ ActuatorPort
//!                 │ AlarmContext                │ ──▶ EventSink
//!                 └─────────────────────────────┘
//! ```
//!
//! Every pass reads the keypad before any sensor, and runs at most one alert
//! cycle.  A pass that reaches an alert cycle blocks for the whole cycle.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use heapless::String;
use log::info;

use crate::config::AlarmConfig;
use crate::fsm::context::{AlarmContext, DistanceCm};
use crate::fsm::{self, DisplayMode, Mode};

use super::alert::AlertModulator;
use super::credential::{AttemptOutcome, CredentialGate};
use super::events::AppEvent;
use super::ports::{
    ActuatorPort, DISPLAY_COLS, DisplayPort, EventSink, Indicator, InputPort, Row, SensorPort,
};

// ───────────────────────────────────────────────────────────────
// Port bundle
// ───────────────────────────────────────────────────────────────

/// Everything the controller drives, handed over at construction.
pub struct Ports<K, S, A, D, W> {
    pub keypad: K,
    pub sensors: S,
    pub actuators: A,
    pub display: D,
    pub delay: W,
}

// ───────────────────────────────────────────────────────────────
// AlarmController
// ───────────────────────────────────────────────────────────────

pub struct AlarmController<K, S, A, D, W> {
    ctx: AlarmContext,
    gate: CredentialGate,
    alert: AlertModulator,
    config: AlarmConfig,
    ports: Ports<K, S, A, D, W>,
}

impl<K, S, A, D, W> AlarmController<K, S, A, D, W>
where
    K: InputPort,
    S: SensorPort,
    A: ActuatorPort,
    D: DisplayPort,
    W: DelayNs,
{
    /// Construct the controller in `Disarmed` with no detection recorded.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: AlarmConfig, ports: Ports<K, S, A, D, W>) -> Self {
        Self {
            ctx: AlarmContext::new(),
            gate: CredentialGate::new(&config),
            alert: AlertModulator::new(&config),
            config,
            ports,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Blank the display and announce the initial mode.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.ports.display.write_line(Row::Top, "");
        self.ports.display.write_line(Row::Bottom, "");
        sink.emit(&AppEvent::Started(self.ctx.mode));
        info!("AlarmController started in {}", self.ctx.mode.name());
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Run one full pass of the control loop for the current mode.
    pub fn poll(&mut self, sink: &mut impl EventSink) {
        self.ctx.total_polls += 1;
        self.ctx.polls_in_mode += 1;

        match self.ctx.mode {
            Mode::Disarmed => self.poll_disarmed(sink),
            Mode::Armed => self.poll_armed(sink),
        }
    }

    fn poll_disarmed(&mut self, sink: &mut impl EventSink) {
        self.ports.actuators.set_indicator(Indicator::SafeDisarmed);

        if self.handle_input(sink) || !self.gate.is_empty() {
            self.ports.sensors.discard_button_edge();
            return;
        }

        if self.ports.sensors.poll_button_edge() {
            let shown = self.ctx.toggle_display();
            sink.emit(&AppEvent::DisplayToggled(shown));
        }
        self.ports.delay.delay_ms(self.config.button_debounce_ms);
        self.ports.delay.delay_ms(self.config.loop_pause_ms);

        self.render_disarmed();
    }

    fn poll_armed(&mut self, sink: &mut impl EventSink) {
        self.ports.actuators.set_indicator(Indicator::SafeArmed);

        let flipped = self.handle_input(sink);
        // The button only means something on the Disarmed screen.
        self.ports.sensors.discard_button_edge();
        if flipped || !self.gate.is_empty() {
            return;
        }

        self.ports.display.write_line(Row::Top, "System: Armed");
        self.ports.display.write_line(Row::Bottom, "");

        let motion = self.ports.sensors.poll_motion();
        self.ports.delay.delay_ms(self.config.motion_settle_ms);
        self.ports.delay.delay_ms(self.config.loop_pause_ms);

        if motion {
            let raw = self.ports.sensors.measure_distance_cm();
            let distance_cm = self.ctx.record_detection(raw);
            let cadence = self.alert.run_cycle(
                distance_cm,
                &mut self.ports.actuators,
                &mut self.ports.delay,
            );
            sink.emit(&AppEvent::MotionDetected {
                distance_cm,
                cadence,
            });
        } else {
            self.alert.idle(&mut self.ports.actuators);
        }
    }

    /// Poll the keypad and resolve the gate's answer.
    ///
    /// Returns `true` when the mode flipped; the pass ends there and the
    /// new mode is rendered on the next poll.
    fn handle_input(&mut self, sink: &mut impl EventSink) -> bool {
        let key = self.ports.keypad.poll_key();
        match self
            .gate
            .submit(key, &mut self.ports.display, &mut self.ports.delay)
        {
            AttemptOutcome::Accepted => {
                sink.emit(&AppEvent::AccessGranted);
                let (from, to) = fsm::toggle_mode(&mut self.ctx);
                sink.emit(&AppEvent::ModeChanged { from, to });
                true
            }
            AttemptOutcome::Rejected => {
                sink.emit(&AppEvent::AccessDenied);
                false
            }
            AttemptOutcome::Pending | AttemptOutcome::NoInput => false,
        }
    }

    fn render_disarmed(&mut self) {
        match self.ctx.display_mode {
            DisplayMode::LastDetection => {
                let reading = detection_text(self.ctx.last_detection);
                self.ports.display.write_line(Row::Top, "Last Detection:");
                self.ports.display.write_line(Row::Bottom, &reading);
            }
            DisplayMode::Status => {
                self.ports.display.write_line(Row::Top, "System: Disarmed");
                self.ports.display.write_line(Row::Bottom, "");
            }
        }
    }

    // ── External control ──────────────────────────────────────

    /// Throw away a half-typed code.
    pub fn reset_attempt(&mut self) {
        self.gate.reset();
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.ctx.mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.ctx.display_mode
    }

    /// Distance of the most recent detection, `None` if there has been none.
    pub fn last_detection(&self) -> Option<DistanceCm> {
        self.ctx.last_detection
    }

    /// `true` while some but not all code keys have been entered.
    pub fn attempt_in_progress(&self) -> bool {
        !self.gate.is_empty()
    }

    /// Keys entered so far in the current attempt.
    pub fn attempt_len(&self) -> usize {
        self.gate.len()
    }

    /// Full alarm state snapshot.
    pub fn context(&self) -> &AlarmContext {
        &self.ctx
    }

    pub fn config(&self) -> &AlarmConfig {
        &self.config
    }

    pub fn ports(&self) -> &Ports<K, S, A, D, W> {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut Ports<K, S, A, D, W> {
        &mut self.ports
    }
}

/// Bottom row of the last-detection screen.
fn detection_text(reading: Option<DistanceCm>) -> String<DISPLAY_COLS> {
    let mut text = String::new();
    match reading {
        // "300 cm" is 6 characters; cannot overflow 16.
        Some(cm) => {
            let _ = write!(text, "{cm} cm");
        }
        None => {
            let _ = text.push_str("N/A");
        }
    }
    text
}
