//! GPIO / peripheral pin assignments for the alarm board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Motion sensing
// ---------------------------------------------------------------------------

/// HC-SR04 trigger input (driven by us, 10 µs pulse).
pub const ULTRASONIC_TRIG_GPIO: i32 = 4;
/// HC-SR04 echo output; high for the round-trip time of the burst.
pub const ULTRASONIC_ECHO_GPIO: i32 = 5;
/// HC-SR501 PIR digital output.  HIGH = motion.
pub const PIR_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Display-toggle push-button (active-low, internal pull-up).
pub const BUTTON_GPIO: i32 = 7;

/// 4×4 membrane keypad rows (outputs, idle HIGH, scanned LOW).
pub const KEYPAD_ROW_GPIOS: [i32; 4] = [16, 17, 18, 8];
/// 4×4 membrane keypad columns (inputs, pulled up).
pub const KEYPAD_COL_GPIOS: [i32; 4] = [9, 10, 14, 21];

// ---------------------------------------------------------------------------
// Indicator + buzzer
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

/// Passive piezo buzzer, square wave from LEDC.
pub const BUZZER_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// HD44780 16×2 character LCD (4-bit parallel)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 38;
pub const LCD_EN_GPIO: i32 = 39;
pub const LCD_D4_GPIO: i32 = 40;
pub const LCD_D5_GPIO: i32 = 41;
pub const LCD_D6_GPIO: i32 = 42;
pub const LCD_D7_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the RGB indicator (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// Initial buzzer LEDC frequency; retuned on every tone.
pub const BUZZER_PWM_FREQ_HZ: u32 = 850;
