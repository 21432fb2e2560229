//! Hearth Core
//!
//! Deterministic fire simulation for survival games: campfires, torches,
//! forges and wildfires that burn a mixed fuel pool, react to wind and rain,
//! and answer heat queries for warmth, cooking, metalwork and damage.
//!
//! The engine is a pure step function. Hosts own the clock, the weather and
//! the random stream; every operation takes them as arguments so a seeded
//! run replays exactly.
//!
//! ## Layout
//!
//! - [`core_types`]: fuel, ignition sources, environment samples and the
//!   collaborator traits (random draws, item-to-fuel lookup)
//! - [`fire`]: the per-fire state machine, heat queries, spread and save records
//! - [`simulation`]: [`FireWorld`], which owns many fires and ticks them together

pub mod core_types;
pub mod fire;
pub mod simulation;

pub use core_types::{
    EnvironmentSample, FuelCategory, FuelCharge, FuelDescriptor, FuelPool, FuelProperties,
    FuelResolver, FuelTable, IgnitionKind, IgnitionSource, RandomSource, ScriptedRandom, Vec3,
};
pub use fire::{
    ConfigError, ExtinguishReason, FalloffCurve, FireConfig, FireId, FireKind, FirePhase,
    FireSaveRecord, FireState, Flammable, LoadError, RestoredFire, SpreadCandidate,
    SpreadResolver,
};
pub use simulation::{FireWorld, TickReport, WorldStats};
