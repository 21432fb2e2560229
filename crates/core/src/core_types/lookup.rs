//! Fuel lookup collaborator
//!
//! The engine never reads item definitions. Hosts implement [`FuelResolver`]
//! to map their item identifiers to a fuel category and per-item value.
//! [`FuelTable`] is a ready-made table implementation that can be authored
//! as JSON alongside the fire configs.

use super::fuel::FuelCategory;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// What one unit of an item contributes when thrown on a fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelDescriptor {
    pub category: FuelCategory,
    pub unit_value: f32,
    pub wet: bool,
}

/// Host-provided mapping from item identifiers to fuel
pub trait FuelResolver {
    /// Fuel for an item, or `None` if the item does not burn
    fn resolve_fuel(&self, item: &str) -> Option<FuelDescriptor>;
}

impl<F> FuelResolver for F
where
    F: Fn(&str) -> Option<FuelDescriptor>,
{
    fn resolve_fuel(&self, item: &str) -> Option<FuelDescriptor> {
        self(item)
    }
}

/// Table-driven [`FuelResolver`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuelTable {
    entries: FxHashMap<String, FuelDescriptor>,
}

impl FuelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an item
    pub fn insert(&mut self, item: impl Into<String>, descriptor: FuelDescriptor) {
        self.entries.insert(item.into(), descriptor);
    }

    /// Builder form of [`FuelTable::insert`]
    pub fn with(mut self, item: impl Into<String>, category: FuelCategory, unit_value: f32) -> Self {
        self.insert(
            item,
            FuelDescriptor {
                category,
                unit_value,
                wet: false,
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A small table of common survival items
    pub fn survival_defaults() -> Self {
        FuelTable::new()
            .with("dry_grass", FuelCategory::Tinder, 1.0)
            .with("birch_bark", FuelCategory::Tinder, 2.0)
            .with("twig", FuelCategory::Kindling, 2.0)
            .with("stick", FuelCategory::Kindling, 4.0)
            .with("pine_plank", FuelCategory::Softwood, 8.0)
            .with("oak_plank", FuelCategory::Hardwood, 10.0)
            .with("log", FuelCategory::Logs, 20.0)
            .with("charcoal", FuelCategory::Charcoal, 6.0)
            .with("coal", FuelCategory::Coal, 10.0)
            .with("lamp_oil", FuelCategory::Oil, 5.0)
            .with("gas_canister", FuelCategory::Gas, 4.0)
    }

    /// Parse a table from JSON
    ///
    /// # Errors
    /// Returns the parser error if the JSON is malformed or names an unknown category
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl FuelResolver for FuelTable {
    fn resolve_fuel(&self, item: &str) -> Option<FuelDescriptor> {
        self.entries.get(item).copied()
    }
}
