//! Fuzz target: `AlarmController::poll` under arbitrary input streams
//!
//! Each input byte is one poll: the low bits pick a key (or none), the high
//! bits toggle motion and the button, and the next byte (when motion is on)
//! supplies a signed raw distance.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The mode only changes on a pass that emitted `ModeChanged`
//! - Stored detections stay within `0..=MAX_DISTANCE_CM`
//! - Display rows never exceed 16 characters
//!
//! cargo fuzz run fuzz_keypad_sequence

#![no_main]

use embedded_hal::delay::DelayNs;
use keyguard::app::events::AppEvent;
use keyguard::app::ports::{
    ActuatorPort, DisplayPort, EventSink, Indicator, InputPort, Row, SensorPort,
};
use keyguard::app::service::{AlarmController, Ports};
use keyguard::config::{AlarmConfig, MAX_DISTANCE_CM};
use keyguard::drivers::keypad::KEYMAP;
use libfuzzer_sys::fuzz_target;

struct Keys(Option<char>);

impl InputPort for Keys {
    fn poll_key(&mut self) -> Option<char> {
        self.0.take()
    }
}

struct Field {
    motion: bool,
    raw_cm: i32,
    press: bool,
}

impl SensorPort for Field {
    fn poll_motion(&mut self) -> bool {
        self.motion
    }
    fn measure_distance_cm(&mut self) -> i32 {
        self.raw_cm
    }
    fn poll_button_edge(&mut self) -> bool {
        core::mem::take(&mut self.press)
    }
}

struct Outputs;

impl ActuatorPort for Outputs {
    fn set_indicator(&mut self, _indicator: Indicator) {}
    fn tone(&mut self, _frequency_hz: u32, _duration_ms: u32) {}
    fn silence(&mut self) {}
}

struct Screen;

impl DisplayPort for Screen {
    fn write_line(&mut self, _row: Row, text: &str) {
        assert!(text.chars().count() <= 16, "row overflow: {text:?}");
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct Flips(bool);

impl EventSink for Flips {
    fn emit(&mut self, event: &AppEvent) {
        if matches!(event, AppEvent::ModeChanged { .. }) {
            self.0 = true;
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let ports = Ports {
        keypad: Keys(None),
        sensors: Field {
            motion: false,
            raw_cm: 0,
            press: false,
        },
        actuators: Outputs,
        display: Screen,
        delay: NoDelay,
    };
    let mut c = AlarmController::new(AlarmConfig::default(), ports);
    let mut sink = Flips(false);
    c.start(&mut sink);

    let keys: Vec<char> = KEYMAP.iter().flatten().copied().collect();
    let mut bytes = data.iter().copied();

    while let Some(b) = bytes.next() {
        let slot = usize::from(b & 0x1F);
        c.ports_mut().keypad.0 = keys.get(slot).copied();
        c.ports_mut().sensors.motion = b & 0x40 != 0;
        c.ports_mut().sensors.press = b & 0x80 != 0;
        if c.ports().sensors.motion {
            let raw = bytes.next().unwrap_or(0) as i8;
            c.ports_mut().sensors.raw_cm = i32::from(raw) * 4;
        }

        let before = c.mode();
        sink.0 = false;
        c.poll(&mut sink);

        assert_eq!(c.mode() != before, sink.0, "mode changed without an event");
        if let Some(cm) = c.last_detection() {
            assert!(cm <= MAX_DISTANCE_CM);
        }
    }
});
