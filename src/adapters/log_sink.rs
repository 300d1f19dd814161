//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE  | {:?} -> {:?}", from, to);
            }
            AppEvent::AccessGranted => {
                info!("AUTH  | access granted");
            }
            AppEvent::AccessDenied => {
                warn!("AUTH  | access denied");
            }
            AppEvent::MotionDetected {
                distance_cm,
                cadence,
            } => {
                warn!(
                    "ALERT | motion at {} cm | cycle={}ms tone={}ms",
                    distance_cm, cadence.cycle_ms, cadence.tone_ms
                );
            }
            AppEvent::DisplayToggled(view) => {
                info!("VIEW  | {:?}", view);
            }
        }
    }
}
