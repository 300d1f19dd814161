//! ESP32 time adapter.
//!
//! Provides the blocking waits the controller holds for (key echo, message
//! hold, alert phases) and counts the time spent in them.
//!
//! - **`target_os = "espidf"`** — sub-millisecond waits spin on the ROM
//!   `ets_delay_us`; millisecond waits yield to FreeRTOS so the idle task
//!   (and its watchdog) keeps running through long alert holds.
//! - **`not(target_os = "espidf")`** — `std::thread::sleep` for host-side
//!   simulation.

use embedded_hal::delay::DelayNs;

/// Blocking delay for the ESP32-S3 platform.
pub struct Esp32Delay {
    /// Total time spent waiting, for diagnostics.
    slept_us: u64,
}

impl Default for Esp32Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Delay {
    pub fn new() -> Self {
        Self { slept_us: 0 }
    }

    /// Microseconds spent inside this delay since construction.
    pub fn slept_us(&self) -> u64 {
        self.slept_us
    }

    #[cfg(target_os = "espidf")]
    fn wait_us(&mut self, us: u32) {
        esp_idf_hal::delay::Ets::delay_us(us);
    }

    #[cfg(not(target_os = "espidf"))]
    fn wait_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
    }

    #[cfg(target_os = "espidf")]
    fn wait_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn wait_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

impl DelayNs for Esp32Delay {
    fn delay_ns(&mut self, ns: u32) {
        let us = ns.div_ceil(1_000);
        self.wait_us(us);
        self.slept_us = self.slept_us.saturating_add(u64::from(us));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_us(us);
        self.slept_us = self.slept_us.saturating_add(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        if ms == 0 {
            return;
        }
        self.wait_ms(ms);
        self.slept_us = self.slept_us.saturating_add(u64::from(ms) * 1_000);
    }
}
