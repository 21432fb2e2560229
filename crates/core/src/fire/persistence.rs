//! Save records for fires
//!
//! The host's save system stores a [`FireSaveRecord`] per fire. Loading is
//! strict about values that cannot be repaired (unknown categories, NaN) and
//! lenient about values that can be clamped back into range. Every repair is
//! reported in [`RestoredFire::corrections`] so nothing impossible is
//! accepted silently.

use super::config::{ConfigError, FireConfig, FireKind};
use super::state::{FireId, FirePhase, FireState};
use crate::core_types::{FuelCategory, FuelCharge, FuelProperties, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Persisted form of one fuel charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelChargeRecord {
    pub category: String,
    pub amount: f32,
    pub burn_temperature: f32,
    pub burn_duration_minutes: f32,
    pub heat_output: f32,
    pub is_wet: bool,
}

impl From<&FuelCharge> for FuelChargeRecord {
    fn from(charge: &FuelCharge) -> Self {
        FuelChargeRecord {
            category: charge.category().name().to_string(),
            amount: charge.amount(),
            burn_temperature: charge.burn_temperature(),
            burn_duration_minutes: charge.burn_duration_minutes(),
            heat_output: charge.heat_output(),
            is_wet: charge.is_wet(),
        }
    }
}

/// Persisted form of a fire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSaveRecord {
    pub id: u64,
    pub temperature: f32,
    pub fuel_charges: Vec<FuelChargeRecord>,
    pub state: FirePhase,
    pub fire_kind: FireKind,
    pub position: [f32; 3],
}

impl FireSaveRecord {
    /// Serialize to JSON
    ///
    /// # Errors
    /// Returns the serializer error if a value cannot be represented
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// Returns `LoadError::Parse` if the JSON is malformed
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))
    }
}

/// Problems found while loading a save record
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Record could not be parsed
    Parse(String),
    /// Charge names a category this engine does not know
    UnknownFuelCategory(String),
    /// A numeric field was NaN or infinite
    NonFinite { field: &'static str },
    /// Config passed in does not match the record's kind
    KindMismatch { expected: FireKind, found: FireKind },
    /// Config passed in is unusable
    InvalidConfig(ConfigError),
    /// Temperature outside `[0, max]`, clamped
    TemperatureOutOfRange { value: f32, max: f32 },
    /// Negative charge amount, dropped
    NegativeFuel { category: FuelCategory, amount: f32 },
    /// Charges exceeded the pool capacity, truncated
    CapacityExceeded { total: f32, capacity: f32 },
    /// Stored state contradicted the temperature, corrected
    StateMismatch { state: FirePhase, temperature: f32 },
}

impl LoadError {
    /// Whether the loader repaired this instead of rejecting the record
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LoadError::TemperatureOutOfRange { .. }
                | LoadError::NegativeFuel { .. }
                | LoadError::CapacityExceeded { .. }
                | LoadError::StateMismatch { .. }
        )
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Parse(msg) => write!(f, "Failed to parse fire record: {msg}"),
            LoadError::UnknownFuelCategory(name) => write!(f, "Unknown fuel category '{name}'"),
            LoadError::NonFinite { field } => write!(f, "Field {field} is not a finite number"),
            LoadError::KindMismatch { expected, found } => {
                write!(f, "Record is a {found} but config is for a {expected}")
            }
            LoadError::InvalidConfig(err) => write!(f, "Invalid config: {err}"),
            LoadError::TemperatureOutOfRange { value, max } => {
                write!(f, "Temperature {value} outside [0, {max}], clamped")
            }
            LoadError::NegativeFuel { category, amount } => {
                write!(f, "Negative {category} amount {amount}, dropped")
            }
            LoadError::CapacityExceeded { total, capacity } => {
                write!(f, "Fuel total {total} exceeds capacity {capacity}, truncated")
            }
            LoadError::StateMismatch { state, temperature } => {
                write!(f, "State {state} inconsistent with {temperature}°C, corrected")
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<ConfigError> for LoadError {
    fn from(err: ConfigError) -> Self {
        LoadError::InvalidConfig(err)
    }
}

/// A fire rebuilt from a save record, plus any repairs made on the way
#[derive(Debug, Clone)]
pub struct RestoredFire {
    pub fire: FireState,
    pub corrections: Vec<LoadError>,
}

impl RestoredFire {
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}

fn finite(value: f32, field: &'static str) -> Result<f32, LoadError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LoadError::NonFinite { field })
    }
}

impl FireState {
    /// Snapshot this fire for the save system
    pub fn to_save_record(&self) -> FireSaveRecord {
        FireSaveRecord {
            id: self.id.0,
            temperature: self.temperature,
            fuel_charges: self
                .fuel
                .charges()
                .into_iter()
                .map(FuelChargeRecord::from)
                .collect(),
            state: self.phase,
            fire_kind: self.config.kind,
            position: [self.position.x, self.position.y, self.position.z],
        }
    }

    /// Rebuild a fire using the record kind's preset config
    ///
    /// # Errors
    /// See [`FireState::from_save_record_with_config`]
    pub fn from_save_record(record: &FireSaveRecord) -> Result<RestoredFire, LoadError> {
        Self::from_save_record_with_config(record, record.fire_kind.default_config())
    }

    /// Rebuild a fire from a record with an explicit config.
    ///
    /// # Errors
    /// Returns an error for unknown categories, non-finite values, an invalid
    /// config or a config for a different fire kind. Out-of-range values are
    /// clamped and listed in the returned corrections instead.
    pub fn from_save_record_with_config(
        record: &FireSaveRecord,
        config: FireConfig,
    ) -> Result<RestoredFire, LoadError> {
        config.validate()?;
        if config.kind != record.fire_kind {
            return Err(LoadError::KindMismatch {
                expected: config.kind,
                found: record.fire_kind,
            });
        }

        let mut corrections = Vec::new();

        let [x, y, z] = record.position;
        let position = Vec3::new(
            finite(x, "position.x")?,
            finite(y, "position.y")?,
            finite(z, "position.z")?,
        );

        let mut temperature = finite(record.temperature, "temperature")?;
        if temperature < 0.0 || temperature > config.max_temperature {
            corrections.push(LoadError::TemperatureOutOfRange {
                value: temperature,
                max: config.max_temperature,
            });
            temperature = temperature.clamp(0.0, config.max_temperature);
        }

        // Validate every charge before touching the pool so a fatal error
        // later in the list leaves nothing half-built
        let mut charges = Vec::with_capacity(record.fuel_charges.len());
        for charge in &record.fuel_charges {
            let category: FuelCategory = charge
                .category
                .parse()
                .map_err(|_| LoadError::UnknownFuelCategory(charge.category.clone()))?;
            let amount = finite(charge.amount, "fuel_charges.amount")?;
            let properties = FuelProperties {
                burn_temperature: finite(charge.burn_temperature, "fuel_charges.burn_temperature")?,
                burn_duration_minutes: finite(
                    charge.burn_duration_minutes,
                    "fuel_charges.burn_duration_minutes",
                )?,
                heat_output: finite(charge.heat_output, "fuel_charges.heat_output")?,
            };

            if amount < 0.0 {
                corrections.push(LoadError::NegativeFuel { category, amount });
                continue;
            }
            if amount == 0.0 {
                continue;
            }
            charges.push(FuelCharge::with_properties(
                category,
                properties,
                amount,
                charge.is_wet,
            ));
        }

        let mut fire = FireState::new(FireId(record.id), config, position);

        let requested: f32 = charges.iter().map(FuelCharge::amount).sum();
        if requested > fire.fuel.capacity() {
            corrections.push(LoadError::CapacityExceeded {
                total: requested,
                capacity: fire.fuel.capacity(),
            });
        }
        for mut charge in charges {
            let room = fire.fuel.remaining_capacity();
            if room <= 0.0 {
                break;
            }
            charge.amount = charge.amount.min(room);
            fire.fuel.restore_charge(charge);
        }

        let mut state = record.state;
        if !state.is_lit() && temperature > 0.0 {
            corrections.push(LoadError::StateMismatch { state, temperature });
            temperature = 0.0;
        } else if state.is_lit() && temperature <= 0.0 {
            corrections.push(LoadError::StateMismatch { state, temperature });
            state = FirePhase::Extinguished;
        } else if state.is_lit() && state != FirePhase::Igniting {
            // Igniting holds at any temperature until the first tick
            let resolved =
                FirePhase::resolve(temperature, fire.fuel.total(), fire.fuel.capacity());
            if resolved != state {
                corrections.push(LoadError::StateMismatch { state, temperature });
                state = resolved;
            }
        }

        fire.phase = state;
        fire.temperature = temperature;

        for correction in &corrections {
            warn!("Restoring {}: {}", fire.id, correction);
        }

        Ok(RestoredFire { fire, corrections })
    }
}
