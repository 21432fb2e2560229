//! Fire kinds and their tuning presets
//!
//! Every fire is built from a [`FireConfig`]. The presets below cover the
//! kinds a survival game places in the world; hosts can also author configs
//! as JSON and check them with [`FireConfig::validate`].

use super::heat::FalloffCurve;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of fire this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireKind {
    Campfire,
    Torch,
    Forge,
    Wildfire,
}

impl FireKind {
    pub fn name(self) -> &'static str {
        match self {
            FireKind::Campfire => "Campfire",
            FireKind::Torch => "Torch",
            FireKind::Forge => "Forge",
            FireKind::Wildfire => "Wildfire",
        }
    }

    /// Preset configuration for this kind
    pub fn default_config(self) -> FireConfig {
        match self {
            FireKind::Campfire => FireConfig::campfire(),
            FireKind::Torch => FireConfig::torch(),
            FireKind::Forge => FireConfig::forge(),
            FireKind::Wildfire => FireConfig::wildfire(),
        }
    }
}

impl fmt::Display for FireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tuning for one fire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireConfig {
    pub kind: FireKind,
    pub fuel_capacity: f32,          // Max total fuel units in the pool
    pub max_temperature: f32,        // °C ceiling
    pub fuel_consumption_rate: f32,  // Units per second at Burning
    pub heat_radius: f32,            // meters, warmth reaches this far
    pub light_radius: f32,           // meters, at full intensity
    pub deterrent_radius: f32,       // meters, wildlife keeps away inside this
    pub burn_damage_radius: f32,     // meters, standing inside burns
    pub burn_damage_per_second: f32, // at max temperature and zero distance
    pub falloff: FalloffCurve,
    pub can_spread: bool,
}

impl FireConfig {
    /// Ground campfire
    pub fn campfire() -> Self {
        FireConfig {
            kind: FireKind::Campfire,
            fuel_capacity: 100.0,
            max_temperature: 800.0,
            fuel_consumption_rate: 0.5,
            heat_radius: 5.0,
            light_radius: 10.0,
            deterrent_radius: 8.0,
            burn_damage_radius: 1.0,
            burn_damage_per_second: 10.0,
            falloff: FalloffCurve::Linear,
            can_spread: false,
        }
    }

    /// Hand-held torch
    pub fn torch() -> Self {
        FireConfig {
            kind: FireKind::Torch,
            fuel_capacity: 20.0,
            max_temperature: 600.0,
            fuel_consumption_rate: 0.1,
            heat_radius: 1.5,
            light_radius: 8.0,
            deterrent_radius: 5.0,
            burn_damage_radius: 0.3,
            burn_damage_per_second: 5.0,
            falloff: FalloffCurve::Linear,
            can_spread: false,
        }
    }

    /// Enclosed forge, hot enough to smelt and work metal
    pub fn forge() -> Self {
        FireConfig {
            kind: FireKind::Forge,
            fuel_capacity: 200.0,
            max_temperature: 1200.0,
            fuel_consumption_rate: 0.8,
            heat_radius: 3.0,
            light_radius: 6.0,
            deterrent_radius: 4.0,
            burn_damage_radius: 0.8,
            burn_damage_per_second: 25.0,
            falloff: FalloffCurve::Quadratic,
            can_spread: false,
        }
    }

    /// Uncontained vegetation fire
    pub fn wildfire() -> Self {
        FireConfig {
            kind: FireKind::Wildfire,
            fuel_capacity: 500.0,
            max_temperature: 1200.0,
            fuel_consumption_rate: 2.0,
            heat_radius: 15.0,
            light_radius: 30.0,
            deterrent_radius: 25.0,
            burn_damage_radius: 4.0,
            burn_damage_per_second: 40.0,
            falloff: FalloffCurve::SmoothStep,
            can_spread: true,
        }
    }

    /// Check the config for values the simulation cannot run with
    ///
    /// # Errors
    /// Returns the first invalid field found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("fuel_capacity", self.fuel_capacity),
            ("max_temperature", self.max_temperature),
            ("heat_radius", self.heat_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("fuel_consumption_rate", self.fuel_consumption_rate),
            ("light_radius", self.light_radius),
            ("deterrent_radius", self.deterrent_radius),
            ("burn_damage_radius", self.burn_damage_radius),
            ("burn_damage_per_second", self.burn_damage_per_second),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }

    /// Parse and validate a config from JSON
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed JSON, or the validation error
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FireConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for FireConfig {
    fn default() -> Self {
        Self::campfire()
    }
}

/// Errors from loading or validating a [`FireConfig`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Field must be finite and greater than zero
    NotPositive { field: &'static str, value: f32 },
    /// Field must be finite and not negative
    Negative { field: &'static str, value: f32 },
    /// JSON could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "Config field {field} must be finite and positive, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "Config field {field} must be finite and non-negative, got {value}")
            }
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
