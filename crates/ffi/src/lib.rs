//! C ABI for the hearth fire simulation
//!
//! A host creates a [`HearthWorld`] with `hearth_world_new`, spawns fires,
//! feeds them fuel and drives them with `hearth_world_advance` once per
//! frame. Every function returns a [`HearthErrorCode`]; on failure
//! `hearth_get_last_error` describes what went wrong.
//!
//! The C header `HearthFFI.h` is generated at build time with cbindgen.

mod error;
mod fires;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{hearth_get_last_error, hearth_get_last_error_code, HearthErrorCode};
pub use fires::{
    hearth_fire_add_fuel, hearth_fire_extinguish, hearth_fire_ignite, hearth_fire_light_from,
    hearth_fire_remove, hearth_fire_spawn, HearthExtinguishReason, HearthFireKind,
    HearthFuelCategory, HearthIgnitionKind, HearthIgnitionTool,
};
pub use instance::{hearth_world_destroy, hearth_world_new, HearthWorld};
pub use queries::{
    hearth_fire_get_stats, hearth_fire_heat_at, hearth_world_fire_count, FireStats,
    HearthFirePhase,
};
pub use simulation::{hearth_world_advance, hearth_world_tick, HearthTickSummary};
