//! Access-code entry.
//!
//! [`CredentialGate`] collects keypresses into an attempt, echoes the
//! attempt on the display, and once [`PASSWORD_LEN`] keys are in compares
//! them to the secret.  Either way the attempt is cleared before the
//! outcome is returned, so the caller never sees a half-resolved attempt.
//!
//! There is no retry counter and no lockout.

use embedded_hal::delay::DelayNs;
use heapless::{String, Vec};
use log::{debug, info, warn};

use crate::config::{AlarmConfig, PASSWORD_LEN, SECRET};

use super::ports::{DISPLAY_COLS, DisplayPort, Row};

/// Result of feeding one poll's worth of input to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// No key this poll; nothing changed.
    NoInput,
    /// Key stored; more are needed.
    Pending,
    /// Complete attempt matched the secret.
    Accepted,
    /// Complete attempt did not match.
    Rejected,
}

pub struct CredentialGate {
    attempt: Vec<char, PASSWORD_LEN>,
    key_echo_ms: u32,
    message_hold_ms: u32,
}

impl CredentialGate {
    pub fn new(config: &AlarmConfig) -> Self {
        Self {
            attempt: Vec::new(),
            key_echo_ms: config.key_echo_ms,
            message_hold_ms: config.message_hold_ms,
        }
    }

    /// Feed this poll's key (if any) into the attempt.
    ///
    /// Every stored key is echoed on the display and followed by a short
    /// pause.  A completed attempt shows the access message for
    /// `message_hold_ms` before returning.
    pub fn submit(
        &mut self,
        key: Option<char>,
        display: &mut impl DisplayPort,
        delay: &mut impl DelayNs,
    ) -> AttemptOutcome {
        let Some(key) = key else {
            return AttemptOutcome::NoInput;
        };

        // Capacity is PASSWORD_LEN and a full attempt is always resolved
        // below, so there is room for this key.
        let _ = self.attempt.push(key);
        self.render_entry(display);
        delay.delay_ms(self.key_echo_ms);

        if self.attempt.len() < PASSWORD_LEN {
            debug!("keypad: {}/{} keys entered", self.attempt.len(), PASSWORD_LEN);
            return AttemptOutcome::Pending;
        }

        let matched = self.matches_secret();
        self.attempt.clear();

        if matched {
            info!("keypad: access granted");
            display.write_line(Row::Top, "Access granted");
            display.write_line(Row::Bottom, "");
            delay.delay_ms(self.message_hold_ms);
            AttemptOutcome::Accepted
        } else {
            warn!("keypad: access denied");
            display.write_line(Row::Top, "Access denied");
            display.write_line(Row::Bottom, "Try Again.");
            delay.delay_ms(self.message_hold_ms);
            AttemptOutcome::Rejected
        }
    }

    /// Discard any partial attempt.
    pub fn reset(&mut self) {
        self.attempt.clear();
    }

    /// `true` when no attempt is in progress.
    pub fn is_empty(&self) -> bool {
        self.attempt.is_empty()
    }

    /// Number of keys in the current attempt.
    pub fn len(&self) -> usize {
        self.attempt.len()
    }

    fn render_entry(&self, display: &mut impl DisplayPort) {
        let mut entry: String<DISPLAY_COLS> = String::new();
        for &c in &self.attempt {
            if entry.push(c).is_err() {
                break;
            }
        }
        display.write_line(Row::Top, "Enter password:");
        display.write_line(Row::Bottom, &entry);
    }

    /// Compare without an early exit on the first differing key.
    fn matches_secret(&self) -> bool {
        let mut diff = self.attempt.len() ^ SECRET.chars().count();
        for (entered, expected) in self.attempt.iter().zip(SECRET.chars()) {
            diff |= (*entered as usize) ^ (expected as usize);
        }
        diff == 0
    }
}
