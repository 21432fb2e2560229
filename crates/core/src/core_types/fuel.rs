//! Fuel categories, fuel charges and the per-fire fuel pool
//!
//! A fire burns a small set of discrete fuel charges. Each charge belongs to one
//! [`FuelCategory`] and carries its own burn parameters, copied from the
//! category's [`FuelProperties`] when the charge is created.
//!
//! # Burn priority
//!
//! Consumption always drains the fastest-burning charge first (ascending
//! `burn_duration_minutes`). Charges with equal duration drain in insertion
//! order. The resulting order for the default properties is:
//!
//! ```text
//! Gas < Tinder < Oil < Kindling < Softwood < Hardwood < Logs < Charcoal < Coal
//! ```
//!
//! Oil and Gas are accelerants: very fast, hot, and gone quickly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fuel categories (one pool slot per category and wetness).
pub const FUEL_CATEGORY_COUNT: usize = 9;

/// Category of a fuel charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelCategory {
    Gas,
    Tinder,
    Oil,
    Kindling,
    Softwood,
    Hardwood,
    Logs,
    Charcoal,
    Coal,
}

impl FuelCategory {
    /// Every category, in slot order
    pub const ALL: [FuelCategory; FUEL_CATEGORY_COUNT] = [
        FuelCategory::Gas,
        FuelCategory::Tinder,
        FuelCategory::Oil,
        FuelCategory::Kindling,
        FuelCategory::Softwood,
        FuelCategory::Hardwood,
        FuelCategory::Logs,
        FuelCategory::Charcoal,
        FuelCategory::Coal,
    ];

    /// Stable slot index of this category
    pub fn index(self) -> usize {
        match self {
            FuelCategory::Gas => 0,
            FuelCategory::Tinder => 1,
            FuelCategory::Oil => 2,
            FuelCategory::Kindling => 3,
            FuelCategory::Softwood => 4,
            FuelCategory::Hardwood => 5,
            FuelCategory::Logs => 6,
            FuelCategory::Charcoal => 7,
            FuelCategory::Coal => 8,
        }
    }

    /// Stable lowercase name, used by the save format
    pub fn name(self) -> &'static str {
        match self {
            FuelCategory::Gas => "gas",
            FuelCategory::Tinder => "tinder",
            FuelCategory::Oil => "oil",
            FuelCategory::Kindling => "kindling",
            FuelCategory::Softwood => "softwood",
            FuelCategory::Hardwood => "hardwood",
            FuelCategory::Logs => "logs",
            FuelCategory::Charcoal => "charcoal",
            FuelCategory::Coal => "coal",
        }
    }

    /// Accelerants feed a fire quickly instead of sustaining it
    pub fn is_accelerant(self) -> bool {
        matches!(self, FuelCategory::Oil | FuelCategory::Gas)
    }

    /// Default burn parameters for this category
    pub fn properties(self) -> FuelProperties {
        FuelProperties::for_category(self)
    }
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFuelCategory(pub String);

impl fmt::Display for UnknownFuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown fuel category '{}'", self.0)
    }
}

impl std::error::Error for UnknownFuelCategory {}

impl FromStr for FuelCategory {
    type Err = UnknownFuelCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        FuelCategory::ALL
            .into_iter()
            .find(|category| category.name() == lowered)
            .ok_or_else(|| UnknownFuelCategory(s.to_string()))
    }
}

/// Burn parameters shared by every charge of a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    pub burn_temperature: f32,      // °C the fuel drives a fire toward
    pub burn_duration_minutes: f32, // How long one unit lasts, sets burn priority
    pub heat_output: f32,           // Relative heat weight
}

impl FuelProperties {
    pub const GAS: FuelProperties = FuelProperties {
        burn_temperature: 500.0,
        burn_duration_minutes: 0.25,
        heat_output: 1.3,
    };

    pub const TINDER: FuelProperties = FuelProperties {
        burn_temperature: 300.0,
        burn_duration_minutes: 0.5,
        heat_output: 0.5,
    };

    pub const OIL: FuelProperties = FuelProperties {
        burn_temperature: 600.0,
        burn_duration_minutes: 1.0,
        heat_output: 1.4,
    };

    pub const KINDLING: FuelProperties = FuelProperties {
        burn_temperature: 450.0,
        burn_duration_minutes: 2.0,
        heat_output: 0.8,
    };

    pub const SOFTWOOD: FuelProperties = FuelProperties {
        burn_temperature: 550.0,
        burn_duration_minutes: 8.0,
        heat_output: 1.0,
    };

    pub const HARDWOOD: FuelProperties = FuelProperties {
        burn_temperature: 650.0,
        burn_duration_minutes: 15.0,
        heat_output: 1.2,
    };

    pub const LOGS: FuelProperties = FuelProperties {
        burn_temperature: 700.0,
        burn_duration_minutes: 30.0,
        heat_output: 1.5,
    };

    pub const CHARCOAL: FuelProperties = FuelProperties {
        burn_temperature: 800.0,
        burn_duration_minutes: 45.0,
        heat_output: 1.8,
    };

    pub const COAL: FuelProperties = FuelProperties {
        burn_temperature: 900.0,
        burn_duration_minutes: 60.0,
        heat_output: 2.0,
    };

    /// Default properties for a category
    pub fn for_category(category: FuelCategory) -> Self {
        match category {
            FuelCategory::Gas => Self::GAS,
            FuelCategory::Tinder => Self::TINDER,
            FuelCategory::Oil => Self::OIL,
            FuelCategory::Kindling => Self::KINDLING,
            FuelCategory::Softwood => Self::SOFTWOOD,
            FuelCategory::Hardwood => Self::HARDWOOD,
            FuelCategory::Logs => Self::LOGS,
            FuelCategory::Charcoal => Self::CHARCOAL,
            FuelCategory::Coal => Self::COAL,
        }
    }
}

/// A discrete quantity of one fuel category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelCharge {
    pub(crate) category: FuelCategory,
    pub(crate) amount: f32,
    pub(crate) burn_temperature: f32,
    pub(crate) burn_duration_minutes: f32,
    pub(crate) heat_output: f32,
    pub(crate) is_wet: bool,
    pub(crate) sequence: u64, // Insertion order, breaks burn-priority ties
}

impl FuelCharge {
    /// Create a charge with the category's default burn parameters
    pub fn new(category: FuelCategory, amount: f32, is_wet: bool) -> Self {
        Self::with_properties(category, category.properties(), amount, is_wet)
    }

    /// Create a charge with explicit burn parameters
    pub fn with_properties(
        category: FuelCategory,
        properties: FuelProperties,
        amount: f32,
        is_wet: bool,
    ) -> Self {
        FuelCharge {
            category,
            amount: amount.max(0.0),
            burn_temperature: properties.burn_temperature,
            burn_duration_minutes: properties.burn_duration_minutes,
            heat_output: properties.heat_output,
            is_wet,
            sequence: 0,
        }
    }

    pub fn category(&self) -> FuelCategory {
        self.category
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn burn_temperature(&self) -> f32 {
        self.burn_temperature
    }

    pub fn burn_duration_minutes(&self) -> f32 {
        self.burn_duration_minutes
    }

    pub fn heat_output(&self) -> f32 {
        self.heat_output
    }

    pub fn is_wet(&self) -> bool {
        self.is_wet
    }

    /// Burn parameters of this charge
    pub fn properties(&self) -> FuelProperties {
        FuelProperties {
            burn_temperature: self.burn_temperature,
            burn_duration_minutes: self.burn_duration_minutes,
            heat_output: self.heat_output,
        }
    }
}

const SLOT_COUNT: usize = FUEL_CATEGORY_COUNT * 2;

#[inline]
fn slot_index(category: FuelCategory, is_wet: bool) -> usize {
    category.index() * 2 + usize::from(is_wet)
}

/// Capacity-bounded collection of fuel charges owned by one fire
///
/// Slots are fixed per `(category, wetness)` pair, so removing an exhausted
/// charge never shifts the others. The pool total is recomputed after every
/// mutation and can never exceed `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPool {
    slots: [Option<FuelCharge>; SLOT_COUNT],
    capacity: f32,
    total: f32,
    next_sequence: u64,
}

impl FuelPool {
    /// Create an empty pool. Non-finite or negative capacity becomes 0.
    pub fn new(capacity: f32) -> Self {
        let capacity = if capacity.is_finite() { capacity.max(0.0) } else { 0.0 };
        FuelPool {
            slots: Default::default(),
            capacity,
            total: 0.0,
            next_sequence: 0,
        }
    }

    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// Sum of all charge amounts
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Room left before the pool is full
    pub fn remaining_capacity(&self) -> f32 {
        (self.capacity - self.total).max(0.0)
    }

    /// Fill level as a fraction of capacity (0-1)
    pub fn fill_fraction(&self) -> f32 {
        if self.capacity <= 0.0 {
            0.0
        } else {
            (self.total / self.capacity).clamp(0.0, 1.0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Charges in insertion order
    pub fn charges(&self) -> Vec<&FuelCharge> {
        let mut charges: Vec<&FuelCharge> = self.slots.iter().flatten().collect();
        charges.sort_by_key(|charge| charge.sequence);
        charges
    }

    /// Charges in the order they will be consumed
    pub fn burn_order(&self) -> Vec<&FuelCharge> {
        let mut charges: Vec<&FuelCharge> = self.slots.iter().flatten().collect();
        charges.sort_by(|a, b| {
            a.burn_duration_minutes
                .total_cmp(&b.burn_duration_minutes)
                .then(a.sequence.cmp(&b.sequence))
        });
        charges
    }

    /// Charge stored for a category and wetness, if any
    pub fn charge(&self, category: FuelCategory, is_wet: bool) -> Option<&FuelCharge> {
        self.slots[slot_index(category, is_wet)].as_ref()
    }

    /// Total amount of a category across wet and dry charges
    pub fn amount_of(&self, category: FuelCategory) -> f32 {
        self.charge(category, false).map_or(0.0, FuelCharge::amount)
            + self.charge(category, true).map_or(0.0, FuelCharge::amount)
    }

    pub fn contains(&self, category: FuelCategory) -> bool {
        self.amount_of(category) > 0.0
    }

    pub fn has_wet_charge(&self) -> bool {
        self.slots.iter().flatten().any(|charge| charge.is_wet)
    }

    /// Add fuel with the category's default properties.
    ///
    /// Merges into the existing same-category, same-wetness charge. Returns the
    /// amount actually accepted; anything beyond capacity is discarded.
    pub fn add(&mut self, category: FuelCategory, amount: f32, is_wet: bool) -> f32 {
        self.add_charge(FuelCharge::new(category, amount, is_wet))
    }

    /// Add a prepared charge, merging into an existing slot when present.
    ///
    /// A merged charge keeps the burn parameters and insertion order of the
    /// charge already in the slot.
    pub fn add_charge(&mut self, mut charge: FuelCharge) -> f32 {
        if !charge.amount.is_finite() || charge.amount <= 0.0 {
            return 0.0;
        }

        let accepted = charge.amount.min(self.remaining_capacity());
        if accepted <= 0.0 {
            return 0.0;
        }

        let slot = &mut self.slots[slot_index(charge.category, charge.is_wet)];
        match slot {
            Some(existing) => existing.amount += accepted,
            None => {
                charge.amount = accepted;
                charge.sequence = self.next_sequence;
                self.next_sequence += 1;
                *slot = Some(charge);
            }
        }

        self.recompute_total();
        accepted
    }

    /// Consume up to `amount` in burn-priority order.
    ///
    /// Drains the fastest-burning charge first and carries any remainder to
    /// the next one. Returns the amount actually consumed.
    pub fn consume(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let mut remaining = amount;
        while remaining > 0.0 {
            let Some(index) = self.next_to_burn() else {
                break;
            };
            let Some(charge) = self.slots[index].as_mut() else {
                break;
            };

            let taken = charge.amount.min(remaining);
            charge.amount -= taken;
            remaining -= taken;

            if charge.amount <= 0.0 {
                self.slots[index] = None;
            }
        }

        self.recompute_total();
        amount - remaining
    }

    /// Remove up to `amount` from the smallest charge of a category.
    /// Returns the amount removed.
    pub fn consume_from_smallest(&mut self, category: FuelCategory, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let dry = slot_index(category, false);
        let wet = slot_index(category, true);
        let index = match (&self.slots[dry], &self.slots[wet]) {
            (Some(a), Some(b)) => {
                if b.amount < a.amount {
                    wet
                } else {
                    dry
                }
            }
            (Some(_), None) => dry,
            (None, Some(_)) => wet,
            (None, None) => return 0.0,
        };

        let mut taken = 0.0;
        if let Some(charge) = self.slots[index].as_mut() {
            taken = charge.amount.min(amount);
            charge.amount -= taken;
            if charge.amount <= 0.0 {
                self.slots[index] = None;
            }
        }

        self.recompute_total();
        taken
    }

    /// Remove every charge of a category, returning the amount removed
    pub fn remove_category(&mut self, category: FuelCategory) -> f32 {
        let removed = self.amount_of(category);
        self.slots[slot_index(category, false)] = None;
        self.slots[slot_index(category, true)] = None;
        self.recompute_total();
        removed
    }

    /// Fuel-weighted average burn temperature.
    ///
    /// Each charge is weighted by `(amount / capacity) × heat_output`.
    /// Returns 0 for an empty pool.
    pub fn weighted_burn_temperature(&self) -> f32 {
        if self.capacity <= 0.0 {
            return 0.0;
        }

        let (weighted_sum, weight_total) =
            self.slots.iter().flatten().fold((0.0_f32, 0.0_f32), |(sum, weights), charge| {
                let weight = (charge.amount / self.capacity) * charge.heat_output;
                (sum + charge.burn_temperature * weight, weights + weight)
            });

        if weight_total <= 0.0 {
            0.0
        } else {
            weighted_sum / weight_total
        }
    }

    /// Total heat content (amount × heat output) of the pool
    pub fn heat_content(&self) -> f32 {
        self.slots
            .iter()
            .flatten()
            .map(|charge| charge.amount * charge.heat_output)
            .sum()
    }

    fn next_to_burn(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref()
                    .filter(|charge| charge.amount > 0.0)
                    .map(|charge| (index, charge))
            })
            .min_by(|(_, a), (_, b)| {
                a.burn_duration_minutes
                    .total_cmp(&b.burn_duration_minutes)
                    .then(a.sequence.cmp(&b.sequence))
            })
            .map(|(index, _)| index)
    }

    fn recompute_total(&mut self) {
        self.total = self
            .slots
            .iter()
            .flatten()
            .map(|charge| charge.amount)
            .sum::<f32>()
            .max(0.0);
    }

    /// Insert a restored charge verbatim, keeping its burn parameters.
    /// Used by the save loader after validation.
    pub(crate) fn restore_charge(&mut self, mut charge: FuelCharge) {
        charge.sequence = self.next_sequence;
        self.next_sequence += 1;
        let slot = &mut self.slots[slot_index(charge.category, charge.is_wet)];
        match slot {
            Some(existing) => existing.amount += charge.amount,
            None => *slot = Some(charge),
        }
        self.recompute_total();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in FuelCategory::ALL {
            assert_eq!(category.name().parse::<FuelCategory>(), Ok(category));
        }
        assert_eq!("  LOGS ".parse::<FuelCategory>(), Ok(FuelCategory::Logs));
        assert!("peat".parse::<FuelCategory>().is_err());
    }

    #[test]
    fn test_default_burn_priority_order() {
        let tinder = FuelProperties::TINDER.burn_duration_minutes;
        let kindling = FuelProperties::KINDLING.burn_duration_minutes;
        let softwood = FuelProperties::SOFTWOOD.burn_duration_minutes;
        let logs = FuelProperties::LOGS.burn_duration_minutes;
        let coal = FuelProperties::COAL.burn_duration_minutes;

        assert!(tinder < kindling);
        assert!(kindling < softwood);
        assert!(softwood < logs);
        assert!(logs < coal);
        assert!(FuelProperties::OIL.burn_duration_minutes < kindling);
        assert!(FuelCategory::Gas.is_accelerant());
        assert!(!FuelCategory::Logs.is_accelerant());
    }

    #[test]
    fn test_add_merges_same_category_and_wetness() {
        let mut pool = FuelPool::new(100.0);
        assert_eq!(pool.add(FuelCategory::Kindling, 10.0, false), 10.0);
        assert_eq!(pool.add(FuelCategory::Kindling, 5.0, false), 5.0);
        assert_eq!(pool.add(FuelCategory::Kindling, 3.0, true), 3.0);

        assert_eq!(pool.charges().len(), 2);
        assert_eq!(pool.charge(FuelCategory::Kindling, false).unwrap().amount(), 15.0);
        assert_eq!(pool.amount_of(FuelCategory::Kindling), 18.0);
        assert!(pool.has_wet_charge());
    }

    #[test]
    fn test_add_clamps_to_capacity() {
        let mut pool = FuelPool::new(20.0);
        assert_eq!(pool.add(FuelCategory::Logs, 15.0, false), 15.0);
        assert_eq!(pool.add(FuelCategory::Logs, 15.0, false), 5.0);
        assert_eq!(pool.add(FuelCategory::Tinder, 1.0, false), 0.0);
        assert_eq!(pool.total(), 20.0);
        assert_eq!(pool.fill_fraction(), 1.0);
    }

    #[test]
    fn test_add_rejects_invalid_amounts() {
        let mut pool = FuelPool::new(20.0);
        assert_eq!(pool.add(FuelCategory::Logs, -4.0, false), 0.0);
        assert_eq!(pool.add(FuelCategory::Logs, f32::NAN, false), 0.0);
        assert_eq!(pool.add(FuelCategory::Logs, 0.0, false), 0.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_consume_drains_fastest_first() {
        let mut pool = FuelPool::new(100.0);
        pool.add(FuelCategory::Logs, 50.0, false);
        pool.add(FuelCategory::Tinder, 5.0, false);

        assert_eq!(pool.consume(3.0), 3.0);
        assert_eq!(pool.amount_of(FuelCategory::Tinder), 2.0);
        assert_eq!(pool.amount_of(FuelCategory::Logs), 50.0);

        // Remainder carries into the logs once tinder is gone
        assert_eq!(pool.consume(4.0), 4.0);
        assert!(!pool.contains(FuelCategory::Tinder));
        assert_eq!(pool.amount_of(FuelCategory::Logs), 48.0);
    }

    #[test]
    fn test_consume_ties_break_by_insertion_order() {
        let mut pool = FuelPool::new(100.0);
        pool.add(FuelCategory::Kindling, 4.0, true);
        pool.add(FuelCategory::Kindling, 4.0, false);

        pool.consume(2.0);
        assert_eq!(pool.charge(FuelCategory::Kindling, true).unwrap().amount(), 2.0);
        assert_eq!(pool.charge(FuelCategory::Kindling, false).unwrap().amount(), 4.0);
    }

    #[test]
    fn test_consume_more_than_available() {
        let mut pool = FuelPool::new(100.0);
        pool.add(FuelCategory::Softwood, 2.0, false);
        assert_eq!(pool.consume(10.0), 2.0);
        assert!(pool.is_empty());
        assert_eq!(pool.total(), 0.0);
    }

    #[test]
    fn test_consume_from_smallest_tinder() {
        let mut pool = FuelPool::new(100.0);
        pool.add(FuelCategory::Tinder, 5.0, false);
        pool.add(FuelCategory::Tinder, 0.5, true);

        assert_eq!(pool.consume_from_smallest(FuelCategory::Tinder, 1.0), 0.5);
        assert!(pool.charge(FuelCategory::Tinder, true).is_none());
        assert_eq!(pool.consume_from_smallest(FuelCategory::Tinder, 1.0), 1.0);
        assert_eq!(pool.amount_of(FuelCategory::Tinder), 4.0);
        assert_eq!(pool.consume_from_smallest(FuelCategory::Coal, 1.0), 0.0);
    }

    #[test]
    fn test_weighted_burn_temperature() {
        let mut pool = FuelPool::new(100.0);
        assert_eq!(pool.weighted_burn_temperature(), 0.0);

        pool.add(FuelCategory::Kindling, 30.0, false);
        assert!((pool.weighted_burn_temperature() - 450.0).abs() < 1e-3);

        // Tinder 10 (w = 0.1 * 0.5 = 0.05), Logs 10 (w = 0.1 * 1.5 = 0.15)
        let mut mixed = FuelPool::new(100.0);
        mixed.add(FuelCategory::Tinder, 10.0, false);
        mixed.add(FuelCategory::Logs, 10.0, false);
        let expected = (300.0 * 0.05 + 700.0 * 0.15) / 0.2;
        assert!((mixed.weighted_burn_temperature() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_remove_category_clears_both_slots() {
        let mut pool = FuelPool::new(100.0);
        pool.add(FuelCategory::Logs, 6.0, false);
        pool.add(FuelCategory::Logs, 4.0, true);
        pool.add(FuelCategory::Coal, 1.0, false);

        assert_eq!(pool.remove_category(FuelCategory::Logs), 10.0);
        assert_eq!(pool.total(), 1.0);
    }
}
