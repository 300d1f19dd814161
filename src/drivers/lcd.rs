//! HD44780-compatible 16×2 character LCD in 4-bit mode.
//!
//! ## Hardware
//!
//! RS, EN, and D4–D7 are push-pull outputs; R/W is strapped to ground, so
//! the driver never polls the busy flag and waits out command times
//! instead.  Each byte goes out as two nibbles, high first, latched on the
//! falling edge of EN.
//!
//! The driver keeps a shadow of both rows and skips writes that would not
//! change the glass, which keeps the 50 ms poll loop from flickering the
//! panel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the bus through hw_init GPIO helpers.
//! On host/test: only the shadow rows are updated.

use heapless::String;
use log::info;

use crate::error::{DisplayError, Result};

pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: u8 = 2;

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; LCD_ROWS as usize] = [0x00, 0x40];

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// Bus pin assignment.
#[derive(Debug, Clone, Copy)]
pub struct LcdPins {
    pub rs: i32,
    pub en: i32,
    pub data: [i32; 4],
}

impl Default for LcdPins {
    fn default() -> Self {
        use crate::pins;
        Self {
            rs: pins::LCD_RS_GPIO,
            en: pins::LCD_EN_GPIO,
            data: [
                pins::LCD_D4_GPIO,
                pins::LCD_D5_GPIO,
                pins::LCD_D6_GPIO,
                pins::LCD_D7_GPIO,
            ],
        }
    }
}

/// Fit `text` to one row: non-ASCII becomes `?`, long text is cut,
/// short text is padded with spaces.
pub fn fit_row(text: &str) -> String<LCD_COLS> {
    let mut out = String::new();
    for ch in text.chars().take(LCD_COLS) {
        let ch = if ch.is_ascii() && !ch.is_ascii_control() { ch } else { '?' };
        // Capacity is LCD_COLS and at most LCD_COLS chars are taken.
        let _ = out.push(ch);
    }
    while out.len() < LCD_COLS {
        let _ = out.push(' ');
    }
    out
}

pub struct Lcd {
    _pins: LcdPins,
    shadow: [String<LCD_COLS>; LCD_ROWS as usize],
    bus_writes: u32,
}

impl Default for Lcd {
    fn default() -> Self {
        Self::new(LcdPins::default())
    }
}

impl Lcd {
    pub fn new(pins: LcdPins) -> Self {
        Self {
            _pins: pins,
            shadow: [String::new(), String::new()],
            bus_writes: 0,
        }
    }

    /// Power-on initialisation sequence, then clear.
    pub fn init(&mut self) {
        self.reset_sequence();
        self.command(CMD_FUNCTION_4BIT_2LINE);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_ENTRY_MODE_INC);
        self.clear();
        info!("lcd: {}x{} ready", LCD_COLS, LCD_ROWS);
    }

    pub fn clear(&mut self) {
        self.command(CMD_CLEAR);
        self.wait_us(2_000);
        for row in &mut self.shadow {
            *row = fit_row("");
        }
    }

    /// Replace the whole of `row` with `text`.
    pub fn write_line(&mut self, row: u8, text: &str) -> Result<()> {
        let offset = *ROW_OFFSETS
            .get(usize::from(row))
            .ok_or(DisplayError::RowOutOfRange(row))?;
        let line = fit_row(text);
        let slot = &mut self.shadow[usize::from(row)];
        if *slot == line {
            return Ok(());
        }
        *slot = line.clone();

        self.command(CMD_SET_DDRAM | offset);
        for b in line.bytes() {
            self.data(b);
        }
        self.bus_writes = self.bus_writes.wrapping_add(1);
        Ok(())
    }

    /// What the panel currently shows on `row` (padded).
    pub fn row_text(&self, row: u8) -> Option<&str> {
        self.shadow.get(usize::from(row)).map(String::as_str)
    }

    /// Row rewrites that actually reached the bus.
    pub fn bus_writes(&self) -> u32 {
        self.bus_writes
    }

    fn command(&mut self, byte: u8) {
        self.send(byte, false);
    }

    fn data(&mut self, byte: u8) {
        self.send(byte, true);
    }

    fn send(&mut self, byte: u8, rs: bool) {
        self.set_rs(rs);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        self.wait_us(50);
    }

    // ── Bus ───────────────────────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn reset_sequence(&mut self) {
        use esp_idf_hal::delay::FreeRtos;

        FreeRtos::delay_ms(50);
        self.set_rs(false);
        for wait_us in [4_500, 150, 150] {
            self.write_nibble(0x03);
            self.wait_us(wait_us);
        }
        self.write_nibble(0x02);
        self.wait_us(150);
    }

    #[cfg(not(target_os = "espidf"))]
    fn reset_sequence(&mut self) {}

    #[cfg(target_os = "espidf")]
    fn set_rs(&mut self, high: bool) {
        crate::drivers::hw_init::gpio_write(self._pins.rs, high);
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_rs(&mut self, _high: bool) {}

    #[cfg(target_os = "espidf")]
    fn write_nibble(&mut self, nibble: u8) {
        use crate::drivers::hw_init::gpio_write;

        for (bit, &pin) in self._pins.data.iter().enumerate() {
            gpio_write(pin, nibble & (1 << bit) != 0);
        }
        gpio_write(self._pins.en, true);
        self.wait_us(1);
        gpio_write(self._pins.en, false);
        self.wait_us(1);
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_nibble(&mut self, _nibble: u8) {}

    #[cfg(target_os = "espidf")]
    fn wait_us(&self, us: u32) {
        esp_idf_hal::delay::Ets::delay_us(us);
    }

    #[cfg(not(target_os = "espidf"))]
    fn wait_us(&self, _us: u32) {}
}
