//! Mock board for integration tests.
//!
//! Every port shares one [`Timeline`], so tests can assert on the order of
//! calls across ports (keypad before sensors, tone before indicator) as well
//! as on the full command history, without touching GPIO or PWM.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use keyguard::app::events::AppEvent;
use keyguard::app::ports::{
    ActuatorPort, DisplayPort, EventSink, Indicator, InputPort, Row, SensorPort,
};
use keyguard::app::service::{AlarmController, Ports};
use keyguard::config::AlarmConfig;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PollKey,
    PollMotion,
    MeasureDistance,
    PollButton,
    DiscardButton,
    SetIndicator(Indicator),
    Tone { hz: u32, ms: u32 },
    Silence,
    WriteLine { row: Row, text: String },
    Delay(u32),
}

#[derive(Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Call>>>);

#[allow(dead_code)]
impl Timeline {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }

    pub fn tones(&self) -> Vec<(u32, u32)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Tone { hz, ms } => Some((*hz, *ms)),
                _ => None,
            })
            .collect()
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::SetIndicator(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn last_indicator(&self) -> Option<Indicator> {
        self.indicators().last().copied()
    }
}

// ── MockKeypad ────────────────────────────────────────────────

pub struct MockKeypad {
    timeline: Timeline,
    pub script: VecDeque<char>,
}

#[allow(dead_code)]
impl MockKeypad {
    /// Queue keys, one delivered per poll.
    pub fn type_keys(&mut self, keys: &str) {
        self.script.extend(keys.chars());
    }
}

impl InputPort for MockKeypad {
    fn poll_key(&mut self) -> Option<char> {
        self.timeline.push(Call::PollKey);
        self.script.pop_front()
    }
}

// ── MockSensors ───────────────────────────────────────────────

pub struct MockSensors {
    timeline: Timeline,
    /// Level reported by every motion poll.
    pub motion: bool,
    /// Raw value reported by every distance measurement.
    pub raw_distance_cm: i32,
    /// Pending button presses, one reported per poll.
    pub presses: u32,
}

#[allow(dead_code)]
impl MockSensors {
    pub fn press_button(&mut self) {
        self.presses += 1;
    }
}

impl SensorPort for MockSensors {
    fn poll_motion(&mut self) -> bool {
        self.timeline.push(Call::PollMotion);
        self.motion
    }

    fn measure_distance_cm(&mut self) -> i32 {
        self.timeline.push(Call::MeasureDistance);
        self.raw_distance_cm
    }

    fn poll_button_edge(&mut self) -> bool {
        self.timeline.push(Call::PollButton);
        if self.presses > 0 {
            self.presses -= 1;
            true
        } else {
            false
        }
    }

    fn discard_button_edge(&mut self) {
        self.timeline.push(Call::DiscardButton);
        self.presses = 0;
    }
}

// ── MockActuators ─────────────────────────────────────────────

pub struct MockActuators {
    timeline: Timeline,
}

impl ActuatorPort for MockActuators {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.timeline.push(Call::SetIndicator(indicator));
    }

    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        self.timeline.push(Call::Tone {
            hz: frequency_hz,
            ms: duration_ms,
        });
    }

    fn silence(&mut self) {
        self.timeline.push(Call::Silence);
    }
}

// ── MockDisplay ───────────────────────────────────────────────

pub struct MockDisplay {
    timeline: Timeline,
    pub rows: [String; 2],
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn top(&self) -> &str {
        &self.rows[0]
    }

    pub fn bottom(&self) -> &str {
        &self.rows[1]
    }
}

impl DisplayPort for MockDisplay {
    fn write_line(&mut self, row: Row, text: &str) {
        assert!(text.chars().count() <= 16, "row text too long: {text:?}");
        self.rows[row as usize] = text.to_owned();
        self.timeline.push(Call::WriteLine {
            row,
            text: text.to_owned(),
        });
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records requested holds instead of sleeping.
pub struct MockDelay {
    timeline: Timeline,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.push(Call::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(Call::Delay(ms));
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that records every emitted event.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.iter().any(|e| e == event)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Board assembly ────────────────────────────────────────────

pub type MockController =
    AlarmController<MockKeypad, MockSensors, MockActuators, MockDisplay, MockDelay>;

/// Fresh controller on a quiet mock board, already started.
pub fn make_controller() -> (MockController, Timeline, LogSink) {
    let timeline = Timeline::default();
    let ports = Ports {
        keypad: MockKeypad {
            timeline: timeline.clone(),
            script: VecDeque::new(),
        },
        sensors: MockSensors {
            timeline: timeline.clone(),
            motion: false,
            raw_distance_cm: 0,
            presses: 0,
        },
        actuators: MockActuators {
            timeline: timeline.clone(),
        },
        display: MockDisplay {
            timeline: timeline.clone(),
            rows: [String::new(), String::new()],
        },
        delay: MockDelay {
            timeline: timeline.clone(),
        },
    };
    let mut controller = AlarmController::new(AlarmConfig::default(), ports);
    let mut sink = LogSink::new();
    controller.start(&mut sink);
    (controller, timeline, sink)
}

/// Feed `code` one key per poll.
#[allow(dead_code)]
pub fn enter_code(controller: &mut MockController, sink: &mut LogSink, code: &str) {
    controller.ports_mut().keypad.type_keys(code);
    for _ in code.chars() {
        controller.poll(sink);
    }
}
