//! 4×4 membrane keypad scanner.
//!
//! ## Hardware
//!
//! Rows are outputs resting HIGH; columns are pull-up inputs.  A scan pulls
//! one row LOW at a time and reads the columns: a LOW column means the key
//! at that crossing is down.  Only the first key found is reported.
//!
//! [`Keypad::poll_key`] yields a key once per press: holding a key down
//! across many polls produces a single report, and the key must be released
//! (an empty scan) before it reports again.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: scans the matrix through hw_init GPIO helpers.
//! On host/test: reads the held key from a static `AtomicU32` (0 = none).

use core::sync::atomic::{AtomicU32, Ordering};

use crate::pins;

pub const ROWS: usize = 4;
pub const COLS: usize = 4;

pub const KEYMAP: [[char; COLS]; ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

static SIM_HELD_KEY: AtomicU32 = AtomicU32::new(0);

/// Hold `key` down on the simulated matrix; `None` releases it.
#[cfg(not(target_os = "espidf"))]
pub fn sim_hold_key(key: Option<char>) {
    SIM_HELD_KEY.store(key.map_or(0, u32::from), Ordering::Relaxed);
}

/// Walk the matrix row by row.  `pressed(row, col)` reports whether the
/// crossing reads as closed.
pub fn scan_matrix(mut pressed: impl FnMut(usize, usize) -> bool) -> Option<char> {
    for (r, keys) in KEYMAP.iter().enumerate() {
        for (c, &key) in keys.iter().enumerate() {
            if pressed(r, c) {
                return Some(key);
            }
        }
    }
    None
}

pub struct Keypad {
    row_gpios: [i32; ROWS],
    col_gpios: [i32; COLS],
    /// Key seen on the previous scan.
    held: Option<char>,
    presses: u32,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(pins::KEYPAD_ROW_GPIOS, pins::KEYPAD_COL_GPIOS)
    }
}

impl Keypad {
    pub fn new(row_gpios: [i32; ROWS], col_gpios: [i32; COLS]) -> Self {
        Self {
            row_gpios,
            col_gpios,
            held: None,
            presses: 0,
        }
    }

    /// Newly pressed key, if any.
    pub fn poll_key(&mut self) -> Option<char> {
        let now = self.scan();
        let fresh = match (self.held, now) {
            (None, Some(k)) => Some(k),
            // Rolled straight onto a different key without an empty scan.
            (Some(prev), Some(k)) if prev != k => Some(k),
            _ => None,
        };
        self.held = now;
        if fresh.is_some() {
            self.presses = self.presses.wrapping_add(1);
        }
        fresh
    }

    /// Total key presses reported.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    #[cfg(target_os = "espidf")]
    fn scan(&self) -> Option<char> {
        use crate::drivers::hw_init;
        use esp_idf_hal::delay::Ets;

        let mut driven: Option<usize> = None;
        let key = scan_matrix(|r, c| {
            if driven != Some(r) {
                if let Some(prev) = driven {
                    hw_init::gpio_write(self.row_gpios[prev], true);
                }
                hw_init::gpio_write(self.row_gpios[r], false);
                Ets::delay_us(5);
                driven = Some(r);
            }
            !hw_init::gpio_read(self.col_gpios[c])
        });
        if let Some(r) = driven {
            hw_init::gpio_write(self.row_gpios[r], true);
        }
        key
    }

    #[cfg(not(target_os = "espidf"))]
    fn scan(&self) -> Option<char> {
        let held = char::from_u32(SIM_HELD_KEY.load(Ordering::Relaxed))?;
        scan_matrix(|r, c| KEYMAP[r][c] == held)
    }
}
