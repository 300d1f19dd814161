//! KeyGuard Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single blocking poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Keypad        MotionSensors   AlertOutputs    Lcd             │
//! │  (InputPort)   (SensorPort)    (ActuatorPort)  (DisplayPort)   │
//! │  LogEventSink  Esp32Delay                                      │
//! │  (EventSink)   (DelayNs)                                       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AlarmController (pure logic)              │    │
//! │  │  Mode · CredentialGate · AlertModulator                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use keyguard::adapters::hardware::AlertOutputs;
use keyguard::adapters::log_sink::LogEventSink;
use keyguard::adapters::time::Esp32Delay;
use keyguard::app::service::{AlarmController, Ports};
use keyguard::config::AlarmConfig;
use keyguard::drivers::button::ButtonDriver;
use keyguard::drivers::buzzer::Buzzer;
use keyguard::drivers::keypad::Keypad;
use keyguard::drivers::lcd::Lcd;
use keyguard::drivers::status_led::StatusLed;
use keyguard::drivers::{hw_init, hw_timer};
use keyguard::pins;
use keyguard::sensors::MotionSensors;
use keyguard::sensors::pir::PirSensor;
use keyguard::sensors::ultrasonic::UltrasonicSensor;

/// Polls between heartbeat log lines.
const HEARTBEAT_POLLS: u64 = 500;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  KeyGuard v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_timer::init_tone_timer() {
        warn!("tone timer init failed: {}, alarm tones disabled", e);
    }
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {} — display button disabled", e);
    }

    // ── 3. Build drivers and adapters ─────────────────────────
    let config = AlarmConfig::default();

    let mut lcd = Lcd::default();
    lcd.init();

    let sensors = MotionSensors::new(
        PirSensor::new(pins::PIR_GPIO),
        UltrasonicSensor::new(pins::ULTRASONIC_TRIG_GPIO, pins::ULTRASONIC_ECHO_GPIO),
        ButtonDriver::new(),
    );

    let ports = Ports {
        keypad: Keypad::default(),
        sensors,
        actuators: AlertOutputs::new(StatusLed::new(), Buzzer::new()),
        display: lcd,
        delay: Esp32Delay::new(),
    };

    let mut controller = AlarmController::new(config, ports);
    let mut sink = LogEventSink::new();

    // ── 4. Poll loop ──────────────────────────────────────────
    controller.start(&mut sink);
    info!(
        "Entering poll loop (pause={}ms, hold={}ms)",
        controller.config().loop_pause_ms,
        controller.config().message_hold_ms
    );

    loop {
        controller.poll(&mut sink);

        let ctx = controller.context();
        if ctx.total_polls % HEARTBEAT_POLLS == 0 {
            let ports = controller.ports();
            info!(
                "heartbeat: mode={} polls={} events={} keys={} echo_failures={} waited={}s",
                ctx.mode.name(),
                ctx.total_polls,
                sink.emitted(),
                ports.keypad.presses(),
                ports.sensors.echo_failures(),
                ports.delay.slept_us() / 1_000_000
            );
        }
    }
}
