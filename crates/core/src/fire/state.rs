//! The fire state machine
//!
//! A [`FireState`] owns its fuel pool and temperature and moves through the
//! discrete phases below. Every tick the temperature chases a fuel-weighted
//! target, wind and rain push it up or down, fuel is burned in priority
//! order, and the phase is re-derived from the new temperature and fuel level.
//!
//! ```text
//! Unlit ─ignite─▶ Igniting ─▶ Smoldering ─▶ Burning ─▶ Blazing
//!                    ▲            │            │          │
//!                    │            └──────▶ Dying ◀────────┘
//!                    │                       │
//!                    └──ignite── Extinguished ◀┘
//! ```
//!
//! # Phase banding
//!
//! | Temperature (°C) | Phase |
//! |---|---|
//! | `t ≤ 0` | Extinguished |
//! | `0 < t < 200` | Igniting |
//! | `200 ≤ t < 400` | Smoldering |
//! | `400 ≤ t < 600` | Burning |
//! | `t ≥ 600` | Blazing |
//!
//! A lit fire whose pool holds less than 10% of capacity is Dying regardless
//! of temperature.

use super::config::{FireConfig, FireKind};
use super::heat::HeatField;
use crate::core_types::{
    EnvironmentSample, FuelCategory, FuelPool, FuelResolver, IgnitionSource, RandomSource, Vec3,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Lower bound of the Smoldering band (°C)
pub const SMOLDERING_THRESHOLD: f32 = 200.0;
/// Lower bound of the Burning band (°C)
pub const BURNING_THRESHOLD: f32 = 400.0;
/// Lower bound of the Blazing band (°C)
pub const BLAZING_THRESHOLD: f32 = 600.0;
/// Fill fraction below which a lit fire is starving
pub const STARVATION_FRACTION: f32 = 0.1;
/// Temperatures below this snap to zero after an update
pub const MIN_SUSTAINED_TEMPERATURE: f32 = 1.0;

/// Fraction of unburned Logs converted to Coal when a hot fire goes out
pub const CHARCOAL_CONVERSION: f32 = 0.3;
/// A fire must have been at least this hot for char-coaling (°C)
pub const CHARCOAL_MIN_TEMPERATURE: f32 = 400.0;

/// Tinder lost on a failed ignition attempt
pub const FAILED_IGNITION_TINDER_COST: f32 = 1.0;

/// Oil charge handed to a fire lit from another flame
pub const TRANSFER_OIL_AMOUNT: f32 = 5.0;
/// Starting temperature of a fire lit from another flame (°C)
pub const TRANSFER_IGNITION_TEMPERATURE: f32 = 400.0;

const TEMPERATURE_APPROACH_RATE: f32 = 0.5; // Fraction of the gap closed per second
const WIND_HEATING: f32 = 10.0; // °C per second per unit of wind
const RAIN_COOLING: f32 = 50.0; // °C per second at full rain
const WIND_BLOWOUT_STRENGTH: f32 = 20.0; // Snuffs a fire that is still igniting
const RAIN_DROWN_INTENSITY: f32 = 0.7;
const RAIN_DROWN_TEMPERATURE: f32 = 300.0;

/// Unique identifier of a fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FireId(pub u64);

impl fmt::Display for FireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fire#{}", self.0)
    }
}

/// Discrete state of a fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirePhase {
    /// Built but never lit
    Unlit,
    /// Just caught, still fragile
    Igniting,
    Smoldering,
    Burning,
    Blazing,
    /// Starved of fuel
    Dying,
    /// Out, but can be relit
    Extinguished,
}

impl FirePhase {
    /// Phase implied by temperature alone
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature <= 0.0 {
            FirePhase::Extinguished
        } else if temperature < SMOLDERING_THRESHOLD {
            FirePhase::Igniting
        } else if temperature < BURNING_THRESHOLD {
            FirePhase::Smoldering
        } else if temperature < BLAZING_THRESHOLD {
            FirePhase::Burning
        } else {
            FirePhase::Blazing
        }
    }

    /// Phase implied by temperature and fuel level.
    ///
    /// Starvation forces Dying for any lit band but never overrides
    /// Extinguished.
    pub fn resolve(temperature: f32, fuel_total: f32, capacity: f32) -> Self {
        let banded = Self::from_temperature(temperature);
        if banded != FirePhase::Extinguished && fuel_total < STARVATION_FRACTION * capacity {
            FirePhase::Dying
        } else {
            banded
        }
    }

    /// Whether the fire is alight in any form
    pub fn is_lit(self) -> bool {
        !matches!(self, FirePhase::Unlit | FirePhase::Extinguished)
    }

    /// Open flame hot enough to warm, cook and light other fires
    pub fn is_flaming(self) -> bool {
        matches!(self, FirePhase::Burning | FirePhase::Blazing)
    }

    /// Whether an ignition attempt is allowed
    pub fn can_ignite(self) -> bool {
        matches!(self, FirePhase::Unlit | FirePhase::Extinguished)
    }

    /// Fuel burn rate relative to Burning
    pub fn consumption_multiplier(self) -> f32 {
        match self {
            FirePhase::Igniting => 0.5,
            FirePhase::Smoldering => 0.7,
            FirePhase::Burning => 1.0,
            FirePhase::Blazing => 1.5,
            FirePhase::Dying => 0.3,
            FirePhase::Unlit | FirePhase::Extinguished => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FirePhase::Unlit => "Unlit",
            FirePhase::Igniting => "Igniting",
            FirePhase::Smoldering => "Smoldering",
            FirePhase::Burning => "Burning",
            FirePhase::Blazing => "Blazing",
            FirePhase::Dying => "Dying",
            FirePhase::Extinguished => "Extinguished",
        }
    }
}

impl fmt::Display for FirePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a fire went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtinguishReason {
    /// Put out by a player action
    Player,
    /// Doused with water
    Water,
    /// Host or script override
    Administrative,
    /// Blown out while still igniting
    Wind,
    /// Drowned by heavy rain
    Rain,
    /// Cooled to nothing after running out of fuel
    BurnedOut,
}

/// A single simulated fire
#[derive(Debug, Clone)]
pub struct FireState {
    pub(crate) id: FireId,
    pub(crate) phase: FirePhase,
    pub(crate) temperature: f32,
    pub(crate) fuel: FuelPool,
    pub(crate) config: FireConfig,
    pub(crate) position: Vec3,
    pub(crate) time_in_phase: f32,
    pub(crate) last_extinguish_reason: Option<ExtinguishReason>,
}

impl FireState {
    /// Create an unlit fire with an empty fuel pool
    pub fn new(id: FireId, config: FireConfig, position: Vec3) -> Self {
        FireState {
            id,
            phase: FirePhase::Unlit,
            temperature: 0.0,
            fuel: FuelPool::new(config.fuel_capacity),
            config,
            position,
            time_in_phase: 0.0,
            last_extinguish_reason: None,
        }
    }

    /// Create an unlit fire from a kind's preset
    pub fn with_kind(id: FireId, kind: FireKind, position: Vec3) -> Self {
        Self::new(id, kind.default_config(), position)
    }

    pub fn id(&self) -> FireId {
        self.id
    }

    pub fn kind(&self) -> FireKind {
        self.config.kind
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Current discrete state
    pub fn state(&self) -> FirePhase {
        self.phase
    }

    /// Current temperature (°C)
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_temperature(&self) -> f32 {
        self.config.max_temperature
    }

    pub fn fuel(&self) -> &FuelPool {
        &self.fuel
    }

    /// Total fuel units in the pool
    pub fn fuel_amount(&self) -> f32 {
        self.fuel.total()
    }

    /// Pool fill level, 0-100
    pub fn fuel_percentage(&self) -> f32 {
        self.fuel.fill_fraction() * 100.0
    }

    pub fn heat_radius(&self) -> f32 {
        self.config.heat_radius
    }

    pub fn light_radius(&self) -> f32 {
        self.config.light_radius
    }

    pub fn deterrent_radius(&self) -> f32 {
        self.config.deterrent_radius
    }

    /// Heat falloff around this fire
    pub fn heat_field(&self) -> HeatField {
        HeatField::new(self.config.heat_radius, self.config.falloff)
    }

    /// Seconds spent in the current phase
    pub fn time_in_state(&self) -> f32 {
        self.time_in_phase
    }

    pub fn last_extinguish_reason(&self) -> Option<ExtinguishReason> {
        self.last_extinguish_reason
    }

    /// Add fuel, returning the amount actually accepted
    pub fn add_fuel(&mut self, category: FuelCategory, amount: f32, is_wet: bool) -> f32 {
        let accepted = self.fuel.add(category, amount, is_wet);
        if accepted < amount {
            debug!(
                "{} accepted {:.2} of {:.2} {} (capacity {:.1})",
                self.id,
                accepted,
                amount,
                category,
                self.fuel.capacity()
            );
        }
        accepted
    }

    /// Add `count` items resolved through the host's fuel lookup.
    ///
    /// Returns `None` if the item is not a fuel, otherwise the amount accepted.
    pub fn add_item_fuel(
        &mut self,
        resolver: &impl FuelResolver,
        item: &str,
        count: u32,
    ) -> Option<f32> {
        let Some(descriptor) = resolver.resolve_fuel(item) else {
            debug!("{} ignored non-fuel item '{}'", self.id, item);
            return None;
        };
        let amount = descriptor.unit_value * count as f32;
        Some(self.add_fuel(descriptor.category, amount, descriptor.wet))
    }

    /// Probability that `source` lights this fire under `env`.
    ///
    /// Penalties multiply: no Tinder ×0.3, no Kindling ×0.5, rain ×(1 - rain),
    /// wind above 10 ×0.7, any wet charge ×0.4.
    pub fn ignition_chance(&self, source: &IgnitionSource, env: &EnvironmentSample) -> f32 {
        let mut chance = source.success_rate();

        if !self.fuel.contains(FuelCategory::Tinder) {
            chance *= 0.3;
        }
        if !self.fuel.contains(FuelCategory::Kindling) {
            chance *= 0.5;
        }
        chance *= 1.0 - env.rain_intensity();
        if env.wind_strength() > 10.0 {
            chance *= 0.7;
        }
        if self.fuel.has_wet_charge() {
            chance *= 0.4;
        }

        chance.clamp(0.0, 1.0)
    }

    /// Try to light the fire.
    ///
    /// Only Unlit or Extinguished fires can be lit, and only with a source
    /// that has uses left; otherwise nothing happens. A source that needs
    /// tinder fails outright without it. Every failed roll burns one unit of
    /// the smallest Tinder charge. On success the fire starts Igniting at the
    /// source's ignition temperature and the source spends a use.
    pub fn try_ignite(
        &mut self,
        source: &mut IgnitionSource,
        env: &EnvironmentSample,
        rng: &mut impl RandomSource,
    ) -> bool {
        if !self.phase.can_ignite() {
            debug!("{} cannot be ignited while {}", self.id, self.phase);
            return false;
        }
        if source.is_exhausted() {
            debug!("{} ignition skipped, {:?} has no uses left", self.id, source.kind());
            return false;
        }
        if !can_start_at(source.ignition_temperature()) {
            debug!(
                "{} ignition skipped, {:?} starts at {:.1}°C",
                self.id,
                source.kind(),
                source.ignition_temperature()
            );
            return false;
        }
        if source.requires_tinder() && !self.fuel.contains(FuelCategory::Tinder) {
            debug!("{} ignition failed, {:?} needs tinder", self.id, source.kind());
            return false;
        }

        let chance = self.ignition_chance(source, env);
        let roll = rng.next_unit();

        if roll < chance {
            source.try_use();
            self.light(source.ignition_temperature());
            info!(
                "{} ignited with {:?} (chance {:.3}, roll {:.3}) at {:.0}°C",
                self.id,
                source.kind(),
                chance,
                roll,
                self.temperature
            );
            true
        } else {
            let lost = self
                .fuel
                .consume_from_smallest(FuelCategory::Tinder, FAILED_IGNITION_TINDER_COST);
            debug!(
                "{} ignition with {:?} failed (chance {:.3}, roll {:.3}), lost {:.2} tinder",
                self.id,
                source.kind(),
                chance,
                roll,
                lost
            );
            false
        }
    }

    /// Light the fire directly from radiant heat, bypassing every penalty.
    ///
    /// Returns `false` if the fire is already lit or the heat is too weak to
    /// sustain a flame.
    pub fn ignite_from_heat(&mut self, ignition_temperature: f32) -> bool {
        if !self.phase.can_ignite() || !can_start_at(ignition_temperature) {
            return false;
        }
        self.light(ignition_temperature);
        info!("{} caught from heat at {:.0}°C", self.id, self.temperature);
        true
    }

    /// Light `other` from this fire's flame.
    ///
    /// Needs this fire Burning or Blazing and `other` Unlit or Extinguished.
    /// The other fire gets a fresh Oil charge and starts at a fixed
    /// temperature; no roll is made.
    pub fn try_light_secondary(&self, other: &mut FireState) -> bool {
        other.catch_flame_from(self.id, self.phase)
    }

    /// Receiving side of [`FireState::try_light_secondary`], for callers that
    /// only hold the source's id and phase.
    pub(crate) fn catch_flame_from(&mut self, source: FireId, source_phase: FirePhase) -> bool {
        if !source_phase.is_flaming() || !self.phase.can_ignite() {
            debug!(
                "{} cannot light {} ({} -> {})",
                source, self.id, source_phase, self.phase
            );
            return false;
        }

        self.add_fuel(FuelCategory::Oil, TRANSFER_OIL_AMOUNT, false);
        self.light(TRANSFER_IGNITION_TEMPERATURE);
        info!("{} lit {} from its flame", source, self.id);
        true
    }

    /// Advance the fire by `dt` seconds.
    ///
    /// Does nothing for Unlit or Extinguished fires or a non-positive `dt`.
    pub fn tick(&mut self, env: &EnvironmentSample, dt: f32) {
        if !self.phase.is_lit() || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let phase_at_start = self.phase;
        let temperature_at_start = self.temperature;
        let wind = env.wind_strength();
        let rain = env.rain_intensity();

        // Fuel-weighted target, pushed by weather
        let modulation = 1.0 - 0.5 * rain + 0.1 * wind;
        let target = (self.fuel.weighted_burn_temperature() * modulation).max(0.0);

        // Wind only fans flames that have something to burn, so an empty
        // fire in a gale still cools and burns out
        let wind_heating = if self.fuel.is_empty() {
            0.0
        } else {
            wind * WIND_HEATING * dt
        };
        let approach = (TEMPERATURE_APPROACH_RATE * dt).min(1.0);
        let mut temperature = self.temperature + (target - self.temperature) * approach
            + wind_heating
            - rain * RAIN_COOLING * dt;
        temperature = temperature.clamp(0.0, self.config.max_temperature);
        if temperature < MIN_SUSTAINED_TEMPERATURE {
            temperature = 0.0;
        }
        self.temperature = temperature;

        if wind > WIND_BLOWOUT_STRENGTH && phase_at_start == FirePhase::Igniting {
            self.go_out(ExtinguishReason::Wind, temperature_at_start);
            return;
        }
        if rain > RAIN_DROWN_INTENSITY && self.temperature < RAIN_DROWN_TEMPERATURE {
            self.go_out(ExtinguishReason::Rain, temperature_at_start);
            return;
        }

        let burn = self.config.fuel_consumption_rate * phase_at_start.consumption_multiplier() * dt;
        self.fuel.consume(burn);

        let next = FirePhase::resolve(self.temperature, self.fuel.total(), self.fuel.capacity());
        if next == FirePhase::Extinguished {
            self.go_out(ExtinguishReason::BurnedOut, temperature_at_start);
            return;
        }

        if next == phase_at_start {
            self.time_in_phase += dt;
        } else {
            debug!(
                "{} {} -> {} at {:.1}°C, fuel {:.2}",
                self.id,
                phase_at_start,
                next,
                self.temperature,
                self.fuel.total()
            );
            self.phase = next;
            self.time_in_phase = 0.0;
        }
    }

    /// Put the fire out immediately. Always succeeds.
    ///
    /// A fire that was at least 400°C converts 30% of its remaining Logs
    /// into Coal; the rest of the Logs is lost.
    pub fn extinguish(&mut self, reason: ExtinguishReason) {
        let temperature = self.temperature;
        self.go_out(reason, temperature);
    }

    fn light(&mut self, ignition_temperature: f32) {
        self.phase = FirePhase::Igniting;
        self.temperature = ignition_temperature.clamp(0.0, self.config.max_temperature);
        self.time_in_phase = 0.0;
        self.last_extinguish_reason = None;
    }

    fn go_out(&mut self, reason: ExtinguishReason, prior_temperature: f32) {
        let was_lit = self.phase.is_lit();
        self.phase = FirePhase::Extinguished;
        self.temperature = 0.0;
        self.time_in_phase = 0.0;
        self.last_extinguish_reason = Some(reason);

        let coal = if prior_temperature >= CHARCOAL_MIN_TEMPERATURE {
            self.char_coal()
        } else {
            0.0
        };

        if was_lit {
            info!(
                "{} extinguished ({:?}) from {:.0}°C, {:.2} coal left",
                self.id, reason, prior_temperature, coal
            );
        }
    }

    /// Convert remaining Logs to Coal, returning the coal produced
    fn char_coal(&mut self) -> f32 {
        let logs = self.fuel.remove_category(FuelCategory::Logs);
        if logs <= 0.0 {
            return 0.0;
        }
        self.fuel.add(FuelCategory::Coal, logs * CHARCOAL_CONVERSION, false)
    }
}

fn can_start_at(ignition_temperature: f32) -> bool {
    ignition_temperature.is_finite() && ignition_temperature >= MIN_SUSTAINED_TEMPERATURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{IgnitionKind, ScriptedRandom};

    fn campfire() -> FireState {
        FireState::new(FireId(1), FireConfig::campfire(), Vec3::zeros())
    }

    fn lit_campfire(temperature: f32) -> FireState {
        let mut fire = campfire();
        fire.phase = FirePhase::from_temperature(temperature);
        fire.temperature = temperature;
        fire
    }

    #[test]
    fn test_banding() {
        assert_eq!(FirePhase::from_temperature(0.0), FirePhase::Extinguished);
        assert_eq!(FirePhase::from_temperature(150.0), FirePhase::Igniting);
        assert_eq!(FirePhase::from_temperature(200.0), FirePhase::Smoldering);
        assert_eq!(FirePhase::from_temperature(400.0), FirePhase::Burning);
        assert_eq!(FirePhase::from_temperature(599.9), FirePhase::Burning);
        assert_eq!(FirePhase::from_temperature(600.0), FirePhase::Blazing);
    }

    #[test]
    fn test_starvation_overrides_bands_but_not_extinguished() {
        assert_eq!(FirePhase::resolve(700.0, 5.0, 100.0), FirePhase::Dying);
        assert_eq!(FirePhase::resolve(700.0, 10.0, 100.0), FirePhase::Blazing);
        assert_eq!(FirePhase::resolve(0.0, 0.0, 100.0), FirePhase::Extinguished);
    }

    #[test]
    fn test_new_fire_is_unlit_and_empty() {
        let fire = campfire();
        assert_eq!(fire.state(), FirePhase::Unlit);
        assert_eq!(fire.temperature(), 0.0);
        assert_eq!(fire.fuel_amount(), 0.0);
        assert_eq!(fire.kind(), FireKind::Campfire);
    }

    #[test]
    fn test_add_fuel_reports_accepted_amount() {
        let mut fire = campfire();
        assert_eq!(fire.add_fuel(FuelCategory::Logs, 80.0, false), 80.0);
        assert_eq!(fire.add_fuel(FuelCategory::Logs, 40.0, false), 20.0);
        assert_eq!(fire.fuel_percentage(), 100.0);
    }

    #[test]
    fn test_ignition_chance_penalties() {
        let mut fire = campfire();
        let lighter = IgnitionSource::lighter();
        let calm = EnvironmentSample::CALM;

        // No tinder, no kindling
        assert!((fire.ignition_chance(&lighter, &calm) - 0.95 * 0.3 * 0.5).abs() < 1e-6);

        fire.add_fuel(FuelCategory::Tinder, 2.0, false);
        fire.add_fuel(FuelCategory::Kindling, 5.0, false);
        assert!((fire.ignition_chance(&lighter, &calm) - 0.95).abs() < 1e-6);

        let stormy = EnvironmentSample::new(15.0, 0.5);
        assert!((fire.ignition_chance(&lighter, &stormy) - 0.95 * 0.5 * 0.7).abs() < 1e-6);

        fire.add_fuel(FuelCategory::Logs, 5.0, true);
        assert!((fire.ignition_chance(&lighter, &calm) - 0.95 * 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_successful_ignition_spends_a_use() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Tinder, 2.0, false);
        fire.add_fuel(FuelCategory::Kindling, 10.0, false);
        let mut lighter = IgnitionSource::lighter();
        let mut rng = ScriptedRandom::always(0.5);

        assert!(fire.try_ignite(&mut lighter, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(fire.state(), FirePhase::Igniting);
        assert_eq!(fire.temperature(), 300.0);
        assert_eq!(lighter.uses_remaining(), 99);
        assert_eq!(fire.fuel().amount_of(FuelCategory::Tinder), 2.0);
    }

    #[test]
    fn test_failed_ignition_costs_tinder() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Tinder, 2.5, false);
        let mut drill = IgnitionSource::bow_drill();
        let mut rng = ScriptedRandom::always(0.99);

        assert!(!fire.try_ignite(&mut drill, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(fire.fuel().amount_of(FuelCategory::Tinder), 1.5);
        assert!(!fire.try_ignite(&mut drill, &EnvironmentSample::CALM, &mut rng));
        assert!(!fire.try_ignite(&mut drill, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(fire.fuel().amount_of(FuelCategory::Tinder), 0.0);
        assert_eq!(fire.state(), FirePhase::Unlit);
    }

    #[test]
    fn test_tinder_requirement_blocks_without_roll() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Kindling, 10.0, false);
        let mut flint = IgnitionSource::flint_and_steel();
        let mut rng = ScriptedRandom::always(0.0);

        assert!(!fire.try_ignite(&mut flint, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(rng.draws(), 0);
        assert_eq!(flint.uses_remaining(), 200);
    }

    #[test]
    fn test_ignite_is_noop_when_lit_or_source_exhausted() {
        let mut fire = lit_campfire(500.0);
        let mut lighter = IgnitionSource::lighter();
        let mut rng = ScriptedRandom::always(0.0);
        assert!(!fire.try_ignite(&mut lighter, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(fire.temperature(), 500.0);

        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Tinder, 3.0, false);
        let mut empty = IgnitionSource::matches().with_uses(0);
        assert!(!fire.try_ignite(&mut empty, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(fire.fuel().amount_of(FuelCategory::Tinder), 3.0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_ignition_temperature_clamped_to_max() {
        let mut torch = FireState::new(FireId(2), FireConfig::torch(), Vec3::zeros());
        assert!(torch.ignite_from_heat(5000.0));
        assert_eq!(torch.temperature(), 600.0);
        assert!(!torch.ignite_from_heat(100.0));
    }

    #[test]
    fn test_cold_ignition_is_rejected() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Tinder, 2.0, false);
        fire.add_fuel(FuelCategory::Kindling, 10.0, false);
        let mut cold = IgnitionSource::new(IgnitionKind::Lighter, 1.0, 0.0, false, 5);
        let mut rng = ScriptedRandom::always(0.0);

        assert!(!fire.try_ignite(&mut cold, &EnvironmentSample::CALM, &mut rng));
        assert_eq!(fire.state(), FirePhase::Unlit);
        assert_eq!(cold.uses_remaining(), 5);
        assert_eq!(rng.draws(), 0);
        assert_eq!(fire.fuel().amount_of(FuelCategory::Tinder), 2.0);

        assert!(!fire.ignite_from_heat(0.0));
        assert!(!fire.ignite_from_heat(f32::NAN));
        assert_eq!(fire.state(), FirePhase::Unlit);
        assert!(fire.ignite_from_heat(MIN_SUSTAINED_TEMPERATURE));
    }

    #[test]
    fn test_wind_does_not_heat_an_empty_fire() {
        let mut fire = lit_campfire(100.0);
        fire.phase = FirePhase::Smoldering;

        fire.tick(&EnvironmentSample::new(10.0, 0.0), 0.2);
        // Target is 0 with no fuel: 100 - 100 * 0.1, no wind term
        assert!((fire.temperature() - 90.0).abs() < 1e-3);
        assert_eq!(fire.state(), FirePhase::Dying);
    }

    #[test]
    fn test_tick_is_noop_when_unlit() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Logs, 50.0, false);
        fire.tick(&EnvironmentSample::new(5.0, 0.0), 1.0);
        assert_eq!(fire.state(), FirePhase::Unlit);
        assert_eq!(fire.fuel_amount(), 50.0);
    }

    #[test]
    fn test_tick_moves_toward_target() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Kindling, 30.0, false);
        fire.ignite_from_heat(250.0);

        fire.tick(&EnvironmentSample::CALM, 0.2);
        // 250 + (450 - 250) * 0.1
        assert!((fire.temperature() - 270.0).abs() < 1e-3);
        assert_eq!(fire.state(), FirePhase::Smoldering);
        // Igniting burns at half rate: 0.5 * 0.5 * 0.2
        assert!((fire.fuel_amount() - 29.95).abs() < 1e-4);
    }

    #[test]
    fn test_wind_blows_out_igniting_fire() {
        let mut fire = campfire();
        fire.add_fuel(FuelCategory::Logs, 90.0, false);
        fire.ignite_from_heat(150.0);

        fire.tick(&EnvironmentSample::new(25.0, 0.0), 0.2);
        assert_eq!(fire.state(), FirePhase::Extinguished);
        assert_eq!(fire.temperature(), 0.0);
        assert_eq!(fire.last_extinguish_reason(), Some(ExtinguishReason::Wind));
    }

    #[test]
    fn test_heavy_rain_drowns_cool_fire() {
        let mut fire = lit_campfire(250.0);
        fire.add_fuel(FuelCategory::Kindling, 50.0, false);

        fire.tick(&EnvironmentSample::new(0.0, 0.9), 0.2);
        assert_eq!(fire.state(), FirePhase::Extinguished);
        assert_eq!(fire.last_extinguish_reason(), Some(ExtinguishReason::Rain));
    }

    #[test]
    fn test_low_fuel_forces_dying() {
        let mut fire = lit_campfire(500.0);
        fire.add_fuel(FuelCategory::Hardwood, 5.0, false);

        fire.tick(&EnvironmentSample::CALM, 0.2);
        assert_eq!(fire.state(), FirePhase::Dying);
    }

    #[test]
    fn test_empty_fire_cools_out() {
        let mut fire = lit_campfire(300.0);
        for _ in 0..400 {
            fire.tick(&EnvironmentSample::new(3.0, 0.0), 0.2);
        }
        assert_eq!(fire.state(), FirePhase::Extinguished);
        assert_eq!(fire.last_extinguish_reason(), Some(ExtinguishReason::BurnedOut));
    }

    #[test]
    fn test_extinguish_char_coals_logs() {
        let mut fire = lit_campfire(650.0);
        fire.add_fuel(FuelCategory::Logs, 10.0, false);

        fire.extinguish(ExtinguishReason::Water);
        assert_eq!(fire.state(), FirePhase::Extinguished);
        assert_eq!(fire.temperature(), 0.0);
        assert_eq!(fire.fuel().amount_of(FuelCategory::Logs), 0.0);
        assert!((fire.fuel().amount_of(FuelCategory::Coal) - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_extinguish_cool_fire_keeps_logs() {
        let mut fire = lit_campfire(250.0);
        fire.add_fuel(FuelCategory::Logs, 10.0, false);

        fire.extinguish(ExtinguishReason::Player);
        assert_eq!(fire.fuel().amount_of(FuelCategory::Logs), 10.0);
        assert_eq!(fire.fuel().amount_of(FuelCategory::Coal), 0.0);
    }

    #[test]
    fn test_light_secondary_requires_open_flame() {
        let source = lit_campfire(250.0);
        let mut torch = FireState::new(FireId(9), FireConfig::torch(), Vec3::zeros());
        assert!(!source.try_light_secondary(&mut torch));

        let source = lit_campfire(450.0);
        assert!(source.try_light_secondary(&mut torch));
        assert_eq!(torch.state(), FirePhase::Igniting);
        assert_eq!(torch.temperature(), TRANSFER_IGNITION_TEMPERATURE);
        assert_eq!(torch.fuel().amount_of(FuelCategory::Oil), TRANSFER_OIL_AMOUNT);

        // Already lit
        assert!(!source.try_light_secondary(&mut torch));
    }

    #[test]
    fn test_add_item_fuel_uses_resolver() {
        let table = crate::core_types::FuelTable::survival_defaults();
        let mut fire = campfire();
        assert_eq!(fire.add_item_fuel(&table, "log", 2), Some(40.0));
        assert_eq!(fire.add_item_fuel(&table, "stone", 1), None);
        assert_eq!(fire.add_item_fuel(&table, "log", 5), Some(60.0));
        assert_eq!(fire.fuel_amount(), 100.0);
    }
}
