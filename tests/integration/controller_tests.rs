//! Integration tests for the AlarmController → gate / alert → ports pipeline.
//!
//! These run on the host (x86_64) and drive full poll passes against the
//! mock board, asserting on what reaches the display, the indicator, the
//! buzzer, and the delay.

use keyguard::app::alert::AlertCadence;
use keyguard::app::events::AppEvent;
use keyguard::app::ports::{Indicator, Row};
use keyguard::fsm::{DisplayMode, Mode};

use crate::mock_hw::{Call, LogSink, MockController, Timeline, enter_code, make_controller};

fn armed() -> (MockController, Timeline, LogSink) {
    let (mut c, tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "1234");
    assert_eq!(c.mode(), Mode::Armed);
    tl.clear();
    sink.events.clear();
    (c, tl, sink)
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boots_disarmed_and_announces_it() {
    let (c, tl, sink) = make_controller();
    assert_eq!(c.mode(), Mode::Disarmed);
    assert_eq!(c.display_mode(), DisplayMode::Status);
    assert_eq!(c.last_detection(), None);
    assert_eq!(sink.events, vec![AppEvent::Started(Mode::Disarmed)]);
    assert_eq!(
        tl.calls(),
        vec![
            Call::WriteLine { row: Row::Top, text: String::new() },
            Call::WriteLine { row: Row::Bottom, text: String::new() },
        ]
    );
}

#[test]
fn disarmed_pass_shows_status_screen() {
    let (mut c, tl, mut sink) = make_controller();
    tl.clear();
    c.poll(&mut sink);

    assert_eq!(tl.last_indicator(), Some(Indicator::SafeDisarmed));
    assert_eq!(c.ports().display.top(), "System: Disarmed");
    assert_eq!(c.ports().display.bottom(), "");
    // Debounce then loop pause.
    assert_eq!(tl.delays(), vec![50, 50]);
}

#[test]
fn toggled_screen_without_detection_shows_placeholder() {
    let (mut c, _tl, mut sink) = make_controller();
    c.ports_mut().sensors.press_button();
    c.poll(&mut sink);

    assert_eq!(c.display_mode(), DisplayMode::LastDetection);
    assert_eq!(c.ports().display.top(), "Last Detection:");
    assert_eq!(c.ports().display.bottom(), "N/A");
    assert!(sink.contains(&AppEvent::DisplayToggled(DisplayMode::LastDetection)));
}

#[test]
fn second_press_toggles_back() {
    let (mut c, _tl, mut sink) = make_controller();
    c.ports_mut().sensors.press_button();
    c.poll(&mut sink);
    c.ports_mut().sensors.press_button();
    c.poll(&mut sink);

    assert_eq!(c.display_mode(), DisplayMode::Status);
    assert_eq!(c.ports().display.top(), "System: Disarmed");
}

// ── Credential entry ──────────────────────────────────────────

#[test]
fn correct_code_arms() {
    let (mut c, _tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "1234");

    assert_eq!(c.mode(), Mode::Armed);
    assert!(!c.attempt_in_progress());
    assert!(sink.contains(&AppEvent::AccessGranted));
    assert!(sink.contains(&AppEvent::ModeChanged {
        from: Mode::Disarmed,
        to: Mode::Armed,
    }));
    assert_eq!(c.ports().display.top(), "Access granted");
}

#[test]
fn arming_pass_holds_echo_then_message() {
    let (mut c, tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "123");
    tl.clear();
    c.ports_mut().keypad.type_keys("4");
    c.poll(&mut sink);
    assert_eq!(tl.delays(), vec![750, 1000]);
    // The pass ends on the flip; no sensor is read.
    assert_eq!(tl.count(|c| matches!(c, Call::PollMotion | Call::PollButton)), 0);
}

#[test]
fn next_pass_after_arming_renders_armed() {
    let (mut c, tl, mut sink) = armed();
    c.poll(&mut sink);
    assert_eq!(tl.indicators().first(), Some(&Indicator::SafeArmed));
    assert_eq!(c.ports().display.top(), "System: Armed");
    assert_eq!(c.ports().display.bottom(), "");
}

#[test]
fn partial_code_is_echoed_and_pends() {
    let (mut c, tl, mut sink) = make_controller();
    c.ports_mut().sensors.press_button();
    tl.clear();
    enter_code(&mut c, &mut sink, "123");

    assert_eq!(c.mode(), Mode::Disarmed);
    assert!(c.attempt_in_progress());
    assert_eq!(c.ports().display.top(), "Enter password:");
    assert_eq!(c.ports().display.bottom(), "123");
    // Button is not read while a code is being typed.
    assert_eq!(tl.count(|c| *c == Call::PollButton), 0);
    assert_eq!(c.display_mode(), DisplayMode::Status);
    assert_eq!(tl.delays(), vec![750, 750, 750]);
}

#[test]
fn wrong_code_is_rejected() {
    let (mut c, tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "123");
    tl.clear();
    enter_code(&mut c, &mut sink, "5");

    assert_eq!(c.mode(), Mode::Disarmed);
    assert!(!c.attempt_in_progress());
    assert!(sink.contains(&AppEvent::AccessDenied));
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::ModeChanged { .. })));

    // The message is held, then the same pass carries on and redraws
    // the status screen.
    let line = |row, text: &str| Call::WriteLine { row, text: text.to_owned() };
    let calls = tl.calls();
    let denied = calls
        .iter()
        .position(|c| *c == line(Row::Top, "Access denied"))
        .unwrap();
    assert_eq!(
        calls[denied..denied + 3],
        [
            line(Row::Top, "Access denied"),
            line(Row::Bottom, "Try Again."),
            Call::Delay(1000),
        ]
    );
    let status = calls
        .iter()
        .position(|c| *c == line(Row::Top, "System: Disarmed"))
        .unwrap();
    assert!(status > denied + 2);
    assert_eq!(c.ports().display.top(), "System: Disarmed");
}

#[test]
fn rejection_then_correct_code_still_works() {
    let (mut c, _tl, mut sink) = make_controller();
    for _ in 0..5 {
        enter_code(&mut c, &mut sink, "0000");
    }
    enter_code(&mut c, &mut sink, "1234");
    assert_eq!(c.mode(), Mode::Armed);
}

#[test]
fn wrong_code_while_armed_stays_armed() {
    let (mut c, _tl, mut sink) = armed();
    enter_code(&mut c, &mut sink, "4321");
    assert_eq!(c.mode(), Mode::Armed);
    assert!(sink.contains(&AppEvent::AccessDenied));
}

#[test]
fn correct_code_while_armed_disarms() {
    let (mut c, _tl, mut sink) = armed();
    enter_code(&mut c, &mut sink, "1234");
    assert_eq!(c.mode(), Mode::Disarmed);
    assert!(sink.contains(&AppEvent::ModeChanged {
        from: Mode::Armed,
        to: Mode::Disarmed,
    }));
}

#[test]
fn reset_attempt_discards_partial_code() {
    let (mut c, _tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "12");
    c.reset_attempt();
    assert!(!c.attempt_in_progress());
    enter_code(&mut c, &mut sink, "1234");
    assert_eq!(c.mode(), Mode::Armed);
}

// ── Armed monitoring ──────────────────────────────────────────

#[test]
fn motion_at_fifty_cm_runs_one_cycle() {
    let (mut c, tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = 50;
    c.poll(&mut sink);

    assert_eq!(c.last_detection(), Some(50));
    assert_eq!(tl.tones(), vec![(850, 2500), (850, 2500)]);
    assert_eq!(
        tl.indicators(),
        vec![Indicator::SafeArmed, Indicator::AlertHigh, Indicator::AlertLow]
    );
    // Settle, loop pause, then the two phase holds.
    assert_eq!(tl.delays(), vec![10, 50, 5000, 5000]);
    assert!(sink.contains(&AppEvent::MotionDetected {
        distance_cm: 50,
        cadence: AlertCadence { cycle_ms: 5000, tone_ms: 2500 },
    }));
}

#[test]
fn detection_persists_after_disarming() {
    let (mut c, _tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = 50;
    c.poll(&mut sink);
    c.ports_mut().sensors.motion = false;

    enter_code(&mut c, &mut sink, "1234");
    assert_eq!(c.mode(), Mode::Disarmed);

    c.ports_mut().sensors.press_button();
    c.poll(&mut sink);
    assert_eq!(c.last_detection(), Some(50));
    assert_eq!(c.ports().display.top(), "Last Detection:");
    assert_eq!(c.ports().display.bottom(), "50 cm");
}

#[test]
fn no_motion_idles_quietly() {
    let (mut c, tl, mut sink) = armed();
    c.poll(&mut sink);

    assert!(tl.tones().is_empty());
    assert_eq!(tl.count(|c| *c == Call::Silence), 1);
    assert_eq!(tl.last_indicator(), Some(Indicator::SafeArmed));
    assert_eq!(tl.count(|c| *c == Call::MeasureDistance), 0);
    assert_eq!(c.last_detection(), None);
}

#[test]
fn keypad_is_read_before_sensors() {
    let (mut c, tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = 120;
    c.poll(&mut sink);

    let key = tl.position(|c| *c == Call::PollKey).unwrap();
    let motion = tl.position(|c| *c == Call::PollMotion).unwrap();
    let measure = tl.position(|c| *c == Call::MeasureDistance).unwrap();
    assert!(key < motion && motion < measure);
    assert_eq!(tl.count(|c| *c == Call::PollKey), 1);
    assert_eq!(tl.tones().len(), 2, "exactly one cycle per pass");
}

#[test]
fn button_is_ignored_while_armed() {
    let (mut c, tl, mut sink) = armed();
    c.ports_mut().sensors.press_button();
    c.poll(&mut sink);
    assert_eq!(tl.count(|c| *c == Call::PollButton), 0);
    assert_eq!(tl.count(|c| *c == Call::DiscardButton), 1);
    assert_eq!(c.display_mode(), DisplayMode::Status);

    // The press is gone, not deferred to the first Disarmed pass.
    enter_code(&mut c, &mut sink, "1234");
    c.poll(&mut sink);
    assert_eq!(c.display_mode(), DisplayMode::Status);
    assert_eq!(c.ports().display.top(), "System: Disarmed");
}

#[test]
fn press_during_code_entry_is_dropped() {
    let (mut c, tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "12");
    c.ports_mut().sensors.press_button();
    enter_code(&mut c, &mut sink, "3");
    assert_eq!(c.ports().sensors.presses, 0);
    assert_eq!(tl.count(|c| *c == Call::PollButton), 0);

    enter_code(&mut c, &mut sink, "9");
    c.poll(&mut sink);
    assert_eq!(c.display_mode(), DisplayMode::Status);
}

#[test]
fn typing_while_armed_suspends_monitoring() {
    let (mut c, tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = 80;
    enter_code(&mut c, &mut sink, "12");
    assert_eq!(tl.count(|c| *c == Call::PollMotion), 0);
    assert!(tl.tones().is_empty());
}

// ── Clamping ──────────────────────────────────────────────────

#[test]
fn negative_reading_clamps_to_zero_and_shows_it() {
    let (mut c, tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = -40;
    c.poll(&mut sink);

    assert_eq!(c.last_detection(), Some(0));
    assert_eq!(tl.tones(), vec![(850, 0), (850, 0)]);
    assert_eq!(tl.delays(), vec![10, 50, 0, 0]);

    c.ports_mut().sensors.motion = false;
    enter_code(&mut c, &mut sink, "1234");
    c.ports_mut().sensors.press_button();
    c.poll(&mut sink);
    // A real 0 cm reading is not the placeholder.
    assert_eq!(c.ports().display.bottom(), "0 cm");
}

#[test]
fn far_reading_clamps_to_range() {
    let (mut c, tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = 5_000;
    c.poll(&mut sink);

    assert_eq!(c.last_detection(), Some(300));
    assert_eq!(tl.tones(), vec![(850, 15_000), (850, 15_000)]);
}

#[test]
fn newest_detection_overwrites() {
    let (mut c, _tl, mut sink) = armed();
    c.ports_mut().sensors.motion = true;
    c.ports_mut().sensors.raw_distance_cm = 200;
    c.poll(&mut sink);
    c.ports_mut().sensors.raw_distance_cm = 30;
    c.poll(&mut sink);
    assert_eq!(c.last_detection(), Some(30));
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn quiet_polls_change_nothing() {
    let (mut c, _tl, mut sink) = make_controller();
    c.poll(&mut sink);
    let before = (c.mode(), c.display_mode(), c.attempt_in_progress());
    for _ in 0..25 {
        c.poll(&mut sink);
    }
    assert_eq!((c.mode(), c.display_mode(), c.attempt_in_progress()), before);
    assert_eq!(sink.events, vec![AppEvent::Started(Mode::Disarmed)]);
    assert_eq!(c.context().total_polls, 26);
}

#[test]
fn quiet_polls_keep_a_partial_code() {
    let (mut c, _tl, mut sink) = make_controller();
    enter_code(&mut c, &mut sink, "12");
    for _ in 0..10 {
        c.poll(&mut sink);
    }
    assert!(c.attempt_in_progress());
    assert_eq!(c.attempt_len(), 2);
    assert_eq!(c.mode(), Mode::Disarmed);
    assert_eq!(c.display_mode(), DisplayMode::Status);
    assert_eq!(c.ports().display.bottom(), "12");

    enter_code(&mut c, &mut sink, "34");
    assert_eq!(c.mode(), Mode::Armed);
}

#[test]
fn polls_in_mode_restarts_on_flip() {
    let (mut c, _tl, mut sink) = make_controller();
    for _ in 0..3 {
        c.poll(&mut sink);
    }
    enter_code(&mut c, &mut sink, "1234");
    assert_eq!(c.context().polls_in_mode, 0);
    c.poll(&mut sink);
    assert_eq!(c.context().polls_in_mode, 1);
}
