//! Core value types and collaborator interfaces

pub mod environment;
pub mod fuel;
pub mod ignition;
pub mod lookup;
pub mod random;
pub mod vec3;

pub use environment::EnvironmentSample;
pub use fuel::*;
pub use ignition::{IgnitionKind, IgnitionSource, UNLIMITED_USES};
pub use lookup::{FuelDescriptor, FuelResolver, FuelTable};
pub use random::{RandomSource, ScriptedRandom};
pub use vec3::Vec3;
