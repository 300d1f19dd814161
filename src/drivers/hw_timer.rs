//! One-shot tone timer using ESP-IDF's esp_timer API.
//!
//! A timed tone must end on its own while the poll loop is busy holding an
//! alert phase, so the buzzer arms this timer and the callback silences the
//! LEDC channel.  On simulation targets nothing is scheduled; the buzzer
//! driver tracks the deadline itself.
//!
//! The callback executes in the ESP timer task context (not ISR) and only
//! writes the buzzer duty register.

use crate::error::ActuatorError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TONE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TONE_TIMER is written once in `init_tone_timer()` before any
/// tone is started.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tone_timer() -> esp_timer_handle_t {
    unsafe { TONE_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tone_stop_cb(_arg: *mut core::ffi::c_void) {
    crate::drivers::hw_init::ledc_set(crate::drivers::hw_init::LEDC_CH_BUZZER, 0);
}

/// Create the tone-stop timer.  Call once at boot.
#[cfg(target_os = "espidf")]
pub fn init_tone_timer() -> Result<(), ActuatorError> {
    // SAFETY: TONE_TIMER is written here once at boot from the main task
    // before any tone is armed.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tone_stop_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"tone\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TONE_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tone timer create failed (rc={})", ret);
            return Err(ActuatorError::ToneTimerFailed);
        }
    }
    info!("hw_timer: tone timer ready");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_tone_timer() -> Result<(), ActuatorError> {
    log::info!("hw_timer(sim): tone timer not created");
    Ok(())
}

/// Schedule the buzzer to go quiet `duration_ms` from now, replacing any
/// pending stop.
#[cfg(target_os = "espidf")]
pub fn arm_tone_stop(duration_ms: u32) -> Result<(), ActuatorError> {
    // SAFETY: tone_timer() contract: main task only, null-checked.
    unsafe {
        let t = tone_timer();
        if t.is_null() {
            return Err(ActuatorError::ToneTimerFailed);
        }
        // Stopping an idle timer returns ESP_ERR_INVALID_STATE; harmless.
        esp_timer_stop(t);
        let ret = esp_timer_start_once(t, u64::from(duration_ms) * 1_000);
        if ret != ESP_OK as i32 {
            return Err(ActuatorError::ToneTimerFailed);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn arm_tone_stop(_duration_ms: u32) -> Result<(), ActuatorError> {
    Ok(())
}

/// Drop any pending stop.
#[cfg(target_os = "espidf")]
pub fn cancel_tone_stop() {
    // SAFETY: tone_timer() contract: main task only, null-checked.
    unsafe {
        let t = tone_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn cancel_tone_stop() {}
