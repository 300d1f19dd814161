//! ISR-latched, debounced display-toggle button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. GPIO fires on falling edge;
//! the ISR records the press timestamp into an atomic, and
//! [`ButtonDriver::poll_edge`] (called from the poll loop) turns that into
//! at most one edge per physical press.
//!
//! Latching in the ISR means a press that lands while the loop is blocked
//! in an alert hold is still reported on the next poll.  Contact bounce
//! shows up as a burst of falling edges a few ms apart; anything within
//! [`DEBOUNCE_MS`] of the last accepted press is dropped.

use core::sync::atomic::{AtomicU32, Ordering};

pub const DEBOUNCE_MS: u32 = 50;

/// Raw ISR timestamp (milliseconds since boot, truncated to u32).
/// Written by the ISR, read by the main loop.  0 = never pressed.
static BUTTON_ISR_TIMESTAMP: AtomicU32 = AtomicU32::new(0);

pub struct ButtonDriver {
    /// Last ISR timestamp the driver has looked at.
    seen_ms: u32,
    /// Timestamp of the last press reported as an edge.
    accepted_ms: Option<u32>,
}

impl Default for ButtonDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonDriver {
    /// The button GPIO itself is wired to the ISR in
    /// [`hw_init::init_isr_service`](super::hw_init::init_isr_service).
    pub fn new() -> Self {
        Self {
            seen_ms: BUTTON_ISR_TIMESTAMP.load(Ordering::Acquire),
            accepted_ms: None,
        }
    }

    /// `true` once for each debounced press since the previous call.
    pub fn poll_edge(&mut self) -> bool {
        let isr_ms = BUTTON_ISR_TIMESTAMP.load(Ordering::Acquire);
        if isr_ms == 0 || isr_ms == self.seen_ms {
            return false;
        }
        self.seen_ms = isr_ms;

        if let Some(prev) = self.accepted_ms {
            if isr_ms.wrapping_sub(prev) < DEBOUNCE_MS {
                return false;
            }
        }
        self.accepted_ms = Some(isr_ms);
        true
    }

    /// Consume a latched press without reporting it.  Bounces of the
    /// dropped press are still filtered afterwards.
    pub fn discard_pending(&mut self) {
        if self.poll_edge() {
            log::debug!("button: press ignored");
        }
    }
}

/// ISR handler — register this on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn button_isr_handler(now_ms: u32) {
    // 0 is the "never pressed" sentinel.
    BUTTON_ISR_TIMESTAMP.store(now_ms.max(1), Ordering::Release);
}
