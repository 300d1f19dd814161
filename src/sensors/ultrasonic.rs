//! HC-SR04 ultrasonic range finder.
//!
//! A 10 µs HIGH on TRIG starts a ping; ECHO then stays HIGH for the
//! round-trip flight time.  Distance in centimetres is
//! `echo_us * 0.034 / 2`, computed here in integers as `echo_us * 34 / 2000`.
//!
//! The raw value is returned unclamped; range limiting happens when the
//! reading is recorded as a detection.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs TRIG and times ECHO against the esp_timer clock.
//! On host/test: reads a simulated echo width from a static `AtomicU32`
//! (`u32::MAX` = no echo).

use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Longest wait for ECHO to rise after the trigger pulse.
pub const ECHO_START_TIMEOUT_US: u64 = 5_000;
/// Longest ECHO pulse accepted (~5 m round trip).
pub const ECHO_END_TIMEOUT_US: u64 = 30_000;

const SIM_NO_ECHO: u32 = u32::MAX;

static SIM_ECHO_US: AtomicU32 = AtomicU32::new(SIM_NO_ECHO);

/// Inject an echo width for the next measurements; `None` = no echo.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_us(echo_us: Option<u32>) {
    SIM_ECHO_US.store(echo_us.unwrap_or(SIM_NO_ECHO), Ordering::Relaxed);
}

/// Inject a target distance (converted to the matching echo width).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance_cm(cm: u32) {
    // Round up so converting back lands on `cm` exactly.
    sim_set_echo_us(Some(cm.saturating_mul(2000).div_ceil(34)));
}

/// Round-trip echo width to one-way distance in cm.
pub fn echo_to_cm(echo_us: u64) -> i32 {
    i32::try_from(echo_us * 34 / 2000).unwrap_or(i32::MAX)
}

pub struct UltrasonicSensor {
    _trig_gpio: i32,
    _echo_gpio: i32,
}

impl UltrasonicSensor {
    pub fn new(trig_gpio: i32, echo_gpio: i32) -> Self {
        Self {
            _trig_gpio: trig_gpio,
            _echo_gpio: echo_gpio,
        }
    }

    /// Fire one ping and return the raw distance in cm.
    pub fn measure_cm(&mut self) -> Result<i32, SensorError> {
        self.ping().map(echo_to_cm)
    }

    #[cfg(target_os = "espidf")]
    fn ping(&mut self) -> Result<u64, SensorError> {
        use esp_idf_hal::delay::Ets;

        hw_init::gpio_write(self._trig_gpio, false);
        Ets::delay_us(2);
        hw_init::gpio_write(self._trig_gpio, true);
        Ets::delay_us(10);
        hw_init::gpio_write(self._trig_gpio, false);

        let armed = hw_init::uptime_us();
        while !hw_init::gpio_read(self._echo_gpio) {
            if hw_init::uptime_us() - armed > ECHO_START_TIMEOUT_US {
                return Err(SensorError::EchoStartTimeout);
            }
        }

        let rise = hw_init::uptime_us();
        while hw_init::gpio_read(self._echo_gpio) {
            if hw_init::uptime_us() - rise > ECHO_END_TIMEOUT_US {
                return Err(SensorError::EchoEndTimeout);
            }
        }
        Ok(hw_init::uptime_us() - rise)
    }

    #[cfg(not(target_os = "espidf"))]
    fn ping(&mut self) -> Result<u64, SensorError> {
        match SIM_ECHO_US.load(Ordering::Relaxed) {
            SIM_NO_ECHO => Err(SensorError::EchoStartTimeout),
            us if u64::from(us) > ECHO_END_TIMEOUT_US => Err(SensorError::EchoEndTimeout),
            us => Ok(u64::from(us)),
        }
    }
}
