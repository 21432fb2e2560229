use hearth_core::EnvironmentSample;

use crate::error::HearthErrorCode;
use crate::helpers::{handle_ffi_result_error, non_negative, with_world_and_rng, world_from_ptr};
use crate::instance::HearthWorld;

/// Outcome counts of a tick or advance call
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HearthTickSummary {
    pub ticks: u32,
    pub extinguished: u32,
    pub spread: u32,
}

impl From<&hearth_core::TickReport> for HearthTickSummary {
    fn from(report: &hearth_core::TickReport) -> Self {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        HearthTickSummary {
            ticks: report.ticks,
            extinguished: count(report.extinguished.len()),
            spread: count(report.spread.len()),
        }
    }
}

/// Advance every fire by exactly `dt` seconds.
///
/// Thread-safe: acquires the world write lock.
///
/// - `out_summary` (optional) receives what happened during the tick.
///
/// Returns `HearthErrorCode::InvalidParameter` if `dt`, `wind_strength` or
/// `rain_intensity` is negative or not finite.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_summary` if non-null, must be a valid pointer to a `HearthTickSummary`.
#[no_mangle]
pub unsafe extern "C" fn hearth_world_tick(
    ptr: *const HearthWorld,
    dt: f32,
    wind_strength: f32,
    rain_intensity: f32,
    out_summary: *mut HearthTickSummary,
) -> HearthErrorCode {
    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let dt = non_negative("dt", dt)?;
        let env = EnvironmentSample::new(
            non_negative("wind_strength", wind_strength)?,
            non_negative("rain_intensity", rain_intensity)?,
        );

        let summary = with_world_and_rng(instance, |world, rng| {
            HearthTickSummary::from(&world.tick(&env, dt, rng))
        })?;
        if !out_summary.is_null() {
            unsafe {
                *out_summary = summary;
            }
        }
        Ok(())
    })
}

/// Feed frame time to the world, which runs as many fixed 0.2 s ticks as it
/// covers and carries the remainder to the next call.
///
/// Suited to calling once per engine frame.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_summary` if non-null, must be a valid pointer to a `HearthTickSummary`.
#[no_mangle]
pub unsafe extern "C" fn hearth_world_advance(
    ptr: *const HearthWorld,
    elapsed: f32,
    wind_strength: f32,
    rain_intensity: f32,
    out_summary: *mut HearthTickSummary,
) -> HearthErrorCode {
    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let elapsed = non_negative("elapsed", elapsed)?;
        let env = EnvironmentSample::new(
            non_negative("wind_strength", wind_strength)?,
            non_negative("rain_intensity", rain_intensity)?,
        );

        let summary = with_world_and_rng(instance, |world, rng| {
            HearthTickSummary::from(&world.advance(elapsed, &env, rng))
        })?;
        if !out_summary.is_null() {
            unsafe {
                *out_summary = summary;
            }
        }
        Ok(())
    })
}
