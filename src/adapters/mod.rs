//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                     |
//! |------------|---------------|---------------------------------|
//! | `hardware` | SensorPort    | PIR, HC-SR04, toggle button     |
//! |            | InputPort     | 4×4 keypad matrix               |
//! |            | DisplayPort   | HD44780 16×2 LCD                |
//! |            | ActuatorPort  | RGB LED + buzzer (LEDC PWM)     |
//! | `log_sink` | EventSink     | Serial log output               |
//! | `time`     | DelayNs       | ROM busy-wait / FreeRTOS delay  |

pub mod hardware;
pub mod log_sink;
pub mod time;
