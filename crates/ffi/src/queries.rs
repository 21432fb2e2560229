use hearth_core::{FireId, FirePhase, FireState};

use crate::error::{DefaultHearthError, HearthErrorCode};
use crate::fires::HearthFireKind;
use crate::helpers::{handle_ffi_result_error, track_error, with_world, world_from_ptr};
use crate::instance::HearthWorld;

/// C mirror of `FirePhase`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearthFirePhase {
    Unlit = 0,
    Igniting = 1,
    Smoldering = 2,
    Burning = 3,
    Blazing = 4,
    Dying = 5,
    Extinguished = 6,
}

impl From<FirePhase> for HearthFirePhase {
    fn from(phase: FirePhase) -> Self {
        match phase {
            FirePhase::Unlit => HearthFirePhase::Unlit,
            FirePhase::Igniting => HearthFirePhase::Igniting,
            FirePhase::Smoldering => HearthFirePhase::Smoldering,
            FirePhase::Burning => HearthFirePhase::Burning,
            FirePhase::Blazing => HearthFirePhase::Blazing,
            FirePhase::Dying => HearthFirePhase::Dying,
            FirePhase::Extinguished => HearthFirePhase::Extinguished,
        }
    }
}

/// Snapshot of one fire for rendering and gameplay checks
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireStats {
    pub fire_id: u64,
    pub kind: HearthFireKind,
    pub phase: HearthFirePhase,
    pub temperature: f32,
    pub fuel_amount: f32,
    /// 0-100
    pub fuel_percentage: f32,
    pub light_radius: f32,
    pub light_intensity: f32,
    pub cooking_efficiency: f32,
    pub can_smelt: bool,
    pub can_forge: bool,
    pub can_boil_water: bool,
}

impl From<&FireState> for FireStats {
    fn from(fire: &FireState) -> Self {
        FireStats {
            fire_id: fire.id().0,
            kind: fire.kind().into(),
            phase: fire.state().into(),
            temperature: fire.temperature(),
            fuel_amount: fire.fuel_amount(),
            fuel_percentage: fire.fuel_percentage(),
            light_radius: fire.effective_light_radius(),
            light_intensity: fire.light_intensity(),
            cooking_efficiency: fire.cooking_efficiency(),
            can_smelt: fire.can_smelt(),
            can_forge: fire.can_forge(),
            can_boil_water: fire.can_boil_water(),
        }
    }
}

/// Fill `out_stats` with a snapshot of one fire.
///
/// - `out_found` (optional) receives whether the fire exists. A missing fire
///   is not an error; `out_stats` is left untouched.
///
/// Returns
/// - `HearthErrorCode::Ok` (0) on success
/// - `HearthErrorCode::NullPointer` if `ptr` or `out_stats` is null
/// - `HearthErrorCode::LockPoisoned` if the world lock is poisoned
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_stats` must be a valid, non-null pointer to a `FireStats`.
/// - `out_found` if non-null, must be a valid pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_get_stats(
    ptr: *const HearthWorld,
    fire_id: u64,
    out_stats: *mut FireStats,
    out_found: *mut bool,
) -> HearthErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let stats = with_world(instance, |world| world.get(FireId(fire_id)).map(FireStats::from))?;
        unsafe {
            if let Some(stats) = stats {
                *out_stats = stats;
            }
            if !out_found.is_null() {
                *out_found = stats.is_some();
            }
        }
        Ok(())
    })
}

/// Heat reaching `distance` meters from a fire.
///
/// - `out_warmth` receives the warmth (°C equivalent, 0 outside the heat radius).
/// - `out_burn_damage` (optional) receives burn damage per second at that distance.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_warmth` must be a valid, non-null pointer to an `f32`.
/// - `out_burn_damage` if non-null, must be a valid pointer to an `f32`.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_heat_at(
    ptr: *const HearthWorld,
    fire_id: u64,
    distance: f32,
    out_warmth: *mut f32,
    out_burn_damage: *mut f32,
) -> HearthErrorCode {
    if out_warmth.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_warmth"));
    }

    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let (warmth, damage) = with_world(instance, |world| {
            world
                .get(FireId(fire_id))
                .map(|fire| (fire.warmth_at_distance(distance), fire.burn_damage_at(distance)))
        })?
        .ok_or_else(|| DefaultHearthError::unknown_fire(fire_id))?;

        unsafe {
            *out_warmth = warmth;
            if !out_burn_damage.is_null() {
                *out_burn_damage = damage;
            }
        }
        Ok(())
    })
}

/// Number of fires in the world
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_count` must be a valid, non-null pointer to a `usize`.
#[no_mangle]
pub unsafe extern "C" fn hearth_world_fire_count(
    ptr: *const HearthWorld,
    out_count: *mut usize,
) -> HearthErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_count"));
    }

    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let count = with_world(instance, hearth_core::FireWorld::len)?;
        unsafe {
            *out_count = count;
        }
        Ok(())
    })
}
