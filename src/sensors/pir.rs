//! HC-SR501 passive-infrared motion sensor.
//!
//! The module drives its output HIGH while it sees motion (retrigger mode)
//! and LOW otherwise.  No filtering happens here; the module's own hold
//! time already stretches short detections.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the PIR GPIO via hw_init helpers.
//! On host/test: reads a static `AtomicBool` for injection (default: quiet).

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_MOTION: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(present: bool) {
    SIM_MOTION.store(present, Ordering::Relaxed);
}

pub struct PirSensor {
    _gpio: i32,
}

impl PirSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// Current output level; `true` = motion.
    pub fn read(&mut self) -> bool {
        self.read_gpio()
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio(&self) -> bool {
        hw_init::gpio_read(self._gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio(&self) -> bool {
        SIM_MOTION.load(Ordering::Relaxed)
    }
}
