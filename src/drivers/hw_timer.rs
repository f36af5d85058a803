//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! A single 1 ms periodic timer drives [`isr::tick_millisecond`], the only
//! writer of the monotonic clock.  On simulation targets nothing is
//! started; tests advance the clock with `isr::sim_advance_ms`.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), and
//! only perform word-sized atomic stores.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::drivers::hw_init::HwInitError;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::isr;

#[cfg(target_os = "espidf")]
static mut CLOCK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn clock_tick_cb(_arg: *mut core::ffi::c_void) {
    isr::tick_millisecond();
}

/// Start the 1 kHz clock timer.
///
/// Every deadline in the firmware is measured against this clock, so a
/// failure here is fatal to the caller.
#[cfg(target_os = "espidf")]
pub fn start_clock() -> Result<(), HwInitError> {
    // SAFETY: CLOCK_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire.  The callback
    // itself only touches the isr atomics.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(clock_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"clock\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut CLOCK_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerInitFailed(ret));
        }
        let ret = esp_timer_start_periodic(CLOCK_TIMER, 1_000); // 1ms
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerInitFailed(ret));
        }

        info!("hw_timer: clock@1kHz started");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_clock() -> Result<(), HwInitError> {
    log::info!("hw_timer(sim): clock not started (advanced by sim_advance_ms)");
    Ok(())
}
