//! Read-only heat queries for warmth, cooking, metalwork and damage
//!
//! The engine never searches for nearby entities. Callers measure the
//! distance themselves and ask the fire how much heat reaches it.

use super::config::FireKind;
use super::heat::HeatField;
use super::state::{FirePhase, FireState};

/// Minimum temperature for smelting ore (°C)
pub const SMELT_TEMPERATURE: f32 = 600.0;
/// Minimum temperature for forging metal (°C)
pub const FORGE_TEMPERATURE: f32 = 700.0;
/// Minimum temperature to boil water (°C)
pub const BOIL_TEMPERATURE: f32 = 100.0;

impl FireState {
    /// Warmth reaching `distance` meters from the fire.
    ///
    /// Only Burning and Blazing fires give warmth. Returns
    /// `falloff(1 - d / heat_radius) × temperature` inside the heat radius
    /// and 0 outside it.
    pub fn warmth_at_distance(&self, distance: f32) -> f32 {
        if !self.phase.is_flaming() {
            return 0.0;
        }
        self.heat_field().fraction_at(distance) * self.temperature
    }

    /// How well food cooks over this fire (0-1).
    ///
    /// 0 when the fire is out. Otherwise 0.5 below 300°C, 0.8 up to 400°C,
    /// 1.0 up to 600°C and 0.9 above that, where food starts to scorch.
    pub fn cooking_efficiency(&self) -> f32 {
        if !self.phase.is_lit() {
            return 0.0;
        }
        let t = self.temperature;
        if t < 300.0 {
            0.5
        } else if t < 400.0 {
            0.8
        } else if t <= 600.0 {
            1.0
        } else {
            0.9
        }
    }

    /// Forges at 600°C or above can smelt ore
    pub fn can_smelt(&self) -> bool {
        self.config.kind == FireKind::Forge && self.temperature >= SMELT_TEMPERATURE
    }

    /// Forges at 700°C or above can work metal
    pub fn can_forge(&self) -> bool {
        self.config.kind == FireKind::Forge && self.temperature >= FORGE_TEMPERATURE
    }

    pub fn can_boil_water(&self) -> bool {
        self.temperature >= BOIL_TEMPERATURE
    }

    /// Burn damage per second at `distance` meters.
    ///
    /// Applies inside `burn_damage_radius` while Smoldering, Burning or
    /// Blazing, scaled by how hot the fire is relative to its maximum.
    pub fn burn_damage_at(&self, distance: f32) -> f32 {
        if !matches!(
            self.phase,
            FirePhase::Smoldering | FirePhase::Burning | FirePhase::Blazing
        ) {
            return 0.0;
        }

        let field = HeatField::new(self.config.burn_damage_radius, self.config.falloff);
        let intensity = self.temperature / self.config.max_temperature;
        self.config.burn_damage_per_second * intensity * field.fraction_at(distance)
    }

    /// Light output relative to full intensity (0-1)
    pub fn light_intensity(&self) -> f32 {
        if !self.phase.is_lit() || self.config.max_temperature <= 0.0 {
            return 0.0;
        }
        (self.temperature / self.config.max_temperature).clamp(0.0, 1.0)
    }

    /// Light radius scaled by current intensity
    pub fn effective_light_radius(&self) -> f32 {
        self.config.light_radius * self.light_intensity()
    }

    /// Whether wildlife at `distance` is kept away by the flames
    pub fn deters_at(&self, distance: f32) -> bool {
        self.phase.is_lit()
            && self.phase != FirePhase::Igniting
            && distance.is_finite()
            && distance >= 0.0
            && distance <= self.config.deterrent_radius
    }

    /// Heat content of the fuel currently feeding the flames
    pub fn heat_output(&self) -> f32 {
        if !self.phase.is_lit() {
            return 0.0;
        }
        self.fuel.heat_content()
    }
}
