//! Per-fire mutations: spawn, remove, fuel, ignition and extinguishing

use hearth_core::{
    EnvironmentSample, ExtinguishReason, FireId, FireKind, FuelCategory, IgnitionKind,
    IgnitionSource, Vec3,
};
use tracing::debug;

use crate::error::{DefaultHearthError, HearthErrorCode};
use crate::helpers::{
    handle_ffi_result_error, non_negative, track_error, with_world_and_rng, with_world_mut,
    world_from_ptr,
};
use crate::instance::HearthWorld;

/// C mirror of `FireKind`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearthFireKind {
    Campfire = 0,
    Torch = 1,
    Forge = 2,
    Wildfire = 3,
}

impl From<HearthFireKind> for FireKind {
    fn from(kind: HearthFireKind) -> Self {
        match kind {
            HearthFireKind::Campfire => FireKind::Campfire,
            HearthFireKind::Torch => FireKind::Torch,
            HearthFireKind::Forge => FireKind::Forge,
            HearthFireKind::Wildfire => FireKind::Wildfire,
        }
    }
}

impl From<FireKind> for HearthFireKind {
    fn from(kind: FireKind) -> Self {
        match kind {
            FireKind::Campfire => HearthFireKind::Campfire,
            FireKind::Torch => HearthFireKind::Torch,
            FireKind::Forge => HearthFireKind::Forge,
            FireKind::Wildfire => HearthFireKind::Wildfire,
        }
    }
}

/// C mirror of `FuelCategory`, ordered by burn priority
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearthFuelCategory {
    Gas = 0,
    Tinder = 1,
    Oil = 2,
    Kindling = 3,
    Softwood = 4,
    Hardwood = 5,
    Logs = 6,
    Charcoal = 7,
    Coal = 8,
}

impl From<HearthFuelCategory> for FuelCategory {
    fn from(category: HearthFuelCategory) -> Self {
        match category {
            HearthFuelCategory::Gas => FuelCategory::Gas,
            HearthFuelCategory::Tinder => FuelCategory::Tinder,
            HearthFuelCategory::Oil => FuelCategory::Oil,
            HearthFuelCategory::Kindling => FuelCategory::Kindling,
            HearthFuelCategory::Softwood => FuelCategory::Softwood,
            HearthFuelCategory::Hardwood => FuelCategory::Hardwood,
            HearthFuelCategory::Logs => FuelCategory::Logs,
            HearthFuelCategory::Charcoal => FuelCategory::Charcoal,
            HearthFuelCategory::Coal => FuelCategory::Coal,
        }
    }
}

/// C mirror of the hand-held `IgnitionKind` templates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearthIgnitionKind {
    Matches = 0,
    Lighter = 1,
    FlintAndSteel = 2,
    BowDrill = 3,
    Torch = 4,
}

impl From<HearthIgnitionKind> for IgnitionKind {
    fn from(kind: HearthIgnitionKind) -> Self {
        match kind {
            HearthIgnitionKind::Matches => IgnitionKind::Matches,
            HearthIgnitionKind::Lighter => IgnitionKind::Lighter,
            HearthIgnitionKind::FlintAndSteel => IgnitionKind::FlintAndSteel,
            HearthIgnitionKind::BowDrill => IgnitionKind::BowDrill,
            HearthIgnitionKind::Torch => IgnitionKind::Torch,
        }
    }
}

/// An ignition tool owned by the host.
///
/// `uses_remaining` is read before the attempt and written back after it,
/// so the host's inventory stays in sync. -1 means unlimited.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HearthIgnitionTool {
    pub kind: HearthIgnitionKind,
    pub uses_remaining: i32,
}

/// C mirror of the host-facing `ExtinguishReason`s
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HearthExtinguishReason {
    Player = 0,
    Water = 1,
    Administrative = 2,
}

impl From<HearthExtinguishReason> for ExtinguishReason {
    fn from(reason: HearthExtinguishReason) -> Self {
        match reason {
            HearthExtinguishReason::Player => ExtinguishReason::Player,
            HearthExtinguishReason::Water => ExtinguishReason::Water,
            HearthExtinguishReason::Administrative => ExtinguishReason::Administrative,
        }
    }
}

/// Place a new unlit fire using the kind's preset.
///
/// Returns
/// - `HearthErrorCode::Ok` (0) with the new id in `out_fire_id`
/// - `HearthErrorCode::NullPointer` if `ptr` or `out_fire_id` is null
/// - `HearthErrorCode::InvalidParameter` if a coordinate is not finite
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_fire_id` must be a valid, non-null pointer to a `u64`.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_spawn(
    ptr: *const HearthWorld,
    kind: HearthFireKind,
    x: f32,
    y: f32,
    z: f32,
    out_fire_id: *mut u64,
) -> HearthErrorCode {
    if out_fire_id.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_fire_id"));
    }

    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        for (name, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() {
                return Err(DefaultHearthError::invalid_parameter(name, value));
            }
        }

        let kind = FireKind::from(kind);
        let id = with_world_mut(instance, |world| {
            world.spawn(kind.default_config(), Vec3::new(x, y, z))
        })?;
        unsafe {
            *out_fire_id = id.0;
        }
        Ok(())
    })
}

/// Remove a fire, e.g. when its world object is destroyed.
///
/// Returns `HearthErrorCode::UnknownFire` if no such fire exists.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_remove(ptr: *const HearthWorld, fire_id: u64) -> HearthErrorCode {
    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        with_world_mut(instance, |world| world.remove(FireId(fire_id)))?
            .map(|_| ())
            .ok_or_else(|| DefaultHearthError::unknown_fire(fire_id))
    })
}

/// Add fuel to a fire.
///
/// - `out_accepted` (optional) receives the amount that fit in the pool.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_accepted` if non-null, must be a valid pointer to an `f32`.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_add_fuel(
    ptr: *const HearthWorld,
    fire_id: u64,
    category: HearthFuelCategory,
    amount: f32,
    is_wet: bool,
    out_accepted: *mut f32,
) -> HearthErrorCode {
    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let amount = non_negative("amount", amount)?;

        let accepted = with_world_mut(instance, |world| {
            world
                .get_mut(FireId(fire_id))
                .map(|fire| fire.add_fuel(category.into(), amount, is_wet))
        })?
        .ok_or_else(|| DefaultHearthError::unknown_fire(fire_id))?;

        if !out_accepted.is_null() {
            unsafe {
                *out_accepted = accepted;
            }
        }
        Ok(())
    })
}

/// Attempt to light a fire with a hand-held tool.
///
/// The roll comes from the world's seeded random stream. `tool.uses_remaining`
/// is updated in place.
///
/// - `out_lit` receives whether the fire caught.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `tool` and `out_lit` must be valid, non-null pointers.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_ignite(
    ptr: *const HearthWorld,
    fire_id: u64,
    tool: *mut HearthIgnitionTool,
    wind_strength: f32,
    rain_intensity: f32,
    out_lit: *mut bool,
) -> HearthErrorCode {
    if tool.is_null() {
        return track_error(&DefaultHearthError::null_pointer("tool"));
    }
    if out_lit.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_lit"));
    }

    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        // SAFETY: checked non-null above; the caller guarantees validity.
        let tool = unsafe { &mut *tool };
        let env = EnvironmentSample::new(wind_strength, rain_intensity);
        let mut source =
            IgnitionSource::from_kind(tool.kind.into()).with_uses(tool.uses_remaining);

        let lit = with_world_and_rng(instance, |world, rng| {
            world
                .get_mut(FireId(fire_id))
                .map(|fire| fire.try_ignite(&mut source, &env, rng))
        })?
        .ok_or_else(|| DefaultHearthError::unknown_fire(fire_id))?;

        tool.uses_remaining = source.uses_remaining();
        debug!("FFI ignite fire#{} with {:?}: {}", fire_id, tool.kind, lit);
        unsafe {
            *out_lit = lit;
        }
        Ok(())
    })
}

/// Put a fire out immediately.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_extinguish(
    ptr: *const HearthWorld,
    fire_id: u64,
    reason: HearthExtinguishReason,
) -> HearthErrorCode {
    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        with_world_mut(instance, |world| match world.get_mut(FireId(fire_id)) {
            Some(fire) => {
                fire.extinguish(reason.into());
                Ok(())
            }
            None => Err(DefaultHearthError::unknown_fire(fire_id)),
        })?
    })
}

/// Light `target_id` from the flame of `source_id` (torch transfer).
///
/// - `out_lit` receives whether the target caught.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `hearth_world_new` or null.
/// - `out_lit` must be a valid, non-null pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn hearth_fire_light_from(
    ptr: *const HearthWorld,
    source_id: u64,
    target_id: u64,
    out_lit: *mut bool,
) -> HearthErrorCode {
    if out_lit.is_null() {
        return track_error(&DefaultHearthError::null_pointer("out_lit"));
    }

    handle_ffi_result_error(|| {
        let instance = world_from_ptr(ptr)?;
        let lit = with_world_mut(instance, |world| {
            for id in [source_id, target_id] {
                if world.get(FireId(id)).is_none() {
                    return Err(DefaultHearthError::unknown_fire(id));
                }
            }
            Ok(world.light_from(FireId(source_id), FireId(target_id)))
        })??;
        unsafe {
            *out_lit = lit;
        }
        Ok(())
    })
}
