//! Sensor subsystem — individual drivers and the aggregating [`MotionSensors`].
//!
//! The hub owns the PIR detector, the ultrasonic ranger, and the display
//! button, and is what the hardware adapter reads on every poll.

pub mod pir;
pub mod ultrasonic;

use log::warn;

use crate::config::MAX_DISTANCE_CM;
use crate::drivers::button::ButtonDriver;
use pir::PirSensor;
use ultrasonic::UltrasonicSensor;

/// Aggregates the motion-related inputs.
pub struct MotionSensors {
    pub pir: PirSensor,
    pub ranger: UltrasonicSensor,
    pub button: ButtonDriver,
    echo_failures: u32,
}

impl MotionSensors {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(pir: PirSensor, ranger: UltrasonicSensor, button: ButtonDriver) -> Self {
        Self {
            pir,
            ranger,
            button,
            echo_failures: 0,
        }
    }

    pub fn motion(&mut self) -> bool {
        self.pir.read()
    }

    /// Raw distance in cm.
    ///
    /// A ping that never comes back means nothing is in range, so a
    /// timeout reads as the far end of the range rather than an error.
    pub fn distance_cm(&mut self) -> i32 {
        match self.ranger.measure_cm() {
            Ok(cm) => cm,
            Err(e) => {
                self.echo_failures = self.echo_failures.saturating_add(1);
                warn!("ultrasonic: {} (#{}), reporting max range", e, self.echo_failures);
                i32::from(MAX_DISTANCE_CM)
            }
        }
    }

    pub fn button_edge(&mut self) -> bool {
        self.button.poll_edge()
    }

    pub fn echo_failures(&self) -> u32 {
        self.echo_failures
    }
}
