//! Fire entity: state machine, heat queries, spread and persistence

pub mod config;
pub mod heat;
pub mod persistence;
mod queries;
pub mod spread;
pub mod state;

pub use config::{ConfigError, FireConfig, FireKind};
pub use heat::{FalloffCurve, HeatField};
pub use persistence::{FireSaveRecord, FuelChargeRecord, LoadError, RestoredFire};
pub use queries::{BOIL_TEMPERATURE, FORGE_TEMPERATURE, SMELT_TEMPERATURE};
pub use spread::{Flammable, SpreadCandidate, SpreadResolver};
pub use state::{ExtinguishReason, FireId, FirePhase, FireState};
