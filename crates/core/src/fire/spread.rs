//! Fire spread to nearby flammable candidates
//!
//! A spread-capable fire that is very hot and well fed may ignite candidates
//! inside 1.5× its heat radius. Each eligible candidate gets one roll per
//! tick:
//!
//! ```text
//! chance = (1 - d / (1.5 × heat_radius)) × 0.1 × dt
//! ```
//!
//! A successful roll lights the candidate at 80% of the source temperature.
//! Heat transfer is certain once chosen, so none of the usual ignition
//! penalties apply. Starved fires never spread.

use super::state::FireState;
use crate::core_types::RandomSource;
use tracing::debug;

/// Something a spreading fire can set alight
pub trait Flammable {
    /// Already burning candidates are skipped
    fn is_burning(&self) -> bool;

    /// Catch fire from radiant heat. Returns whether it ignited.
    fn receive_heat_ignition(&mut self, ignition_temperature: f32) -> bool;
}

impl Flammable for FireState {
    fn is_burning(&self) -> bool {
        self.state().is_lit()
    }

    fn receive_heat_ignition(&mut self, ignition_temperature: f32) -> bool {
        self.ignite_from_heat(ignition_temperature)
    }
}

impl<T: Flammable + ?Sized> Flammable for &mut T {
    fn is_burning(&self) -> bool {
        (**self).is_burning()
    }

    fn receive_heat_ignition(&mut self, ignition_temperature: f32) -> bool {
        (**self).receive_heat_ignition(ignition_temperature)
    }
}

/// A candidate and its distance from the spreading fire
#[derive(Debug)]
pub struct SpreadCandidate<T> {
    pub target: T,
    pub distance: f32,
}

impl<T> SpreadCandidate<T> {
    pub fn new(target: T, distance: f32) -> Self {
        SpreadCandidate { target, distance }
    }
}

/// Decides whether a fire propagates to its neighbours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadResolver {
    pub min_temperature: f32,    // °C the source must reach
    pub min_fuel_fraction: f32,  // Pool fill the source must keep
    pub reach_factor: f32,       // × heat radius
    pub base_chance: f32,        // Per second at zero distance
    pub ignition_fraction: f32,  // Candidate starts at this × source temperature
}

impl Default for SpreadResolver {
    fn default() -> Self {
        SpreadResolver {
            min_temperature: 700.0,
            min_fuel_fraction: 0.8,
            reach_factor: 1.5,
            base_chance: 0.1,
            ignition_fraction: 0.8,
        }
    }
}

impl SpreadResolver {
    /// Whether `source` is currently able to spread at all
    pub fn can_spread(&self, source: &FireState) -> bool {
        source.config().can_spread
            && source.state().is_lit()
            && source.temperature() >= self.min_temperature
            && source.fuel_amount() >= self.min_fuel_fraction * source.fuel().capacity()
    }

    /// Maximum distance a spread can jump from `source`
    pub fn reach(&self, source: &FireState) -> f32 {
        self.reach_factor * source.heat_radius()
    }

    /// Probability of igniting a candidate at `distance` over `dt` seconds
    pub fn spread_chance(&self, source: &FireState, distance: f32, dt: f32) -> f32 {
        let reach = self.reach(source);
        if reach <= 0.0 || !distance.is_finite() || distance < 0.0 || distance > reach {
            return 0.0;
        }
        ((1.0 - distance / reach) * self.base_chance * dt).clamp(0.0, 1.0)
    }

    /// Temperature a candidate starts at when it catches from `source`
    pub fn ignition_temperature(&self, source: &FireState) -> f32 {
        self.ignition_fraction * source.temperature()
    }

    /// Roll spread against every candidate.
    ///
    /// Candidates out of reach or already burning are skipped without a
    /// roll. Returns the indices of candidates that ignited.
    pub fn resolve<T: Flammable>(
        &self,
        source: &FireState,
        candidates: &mut [SpreadCandidate<T>],
        dt: f32,
        rng: &mut impl RandomSource,
    ) -> Vec<usize> {
        if !self.can_spread(source) || !dt.is_finite() || dt <= 0.0 {
            return Vec::new();
        }

        let ignition_temperature = self.ignition_temperature(source);
        let mut ignited = Vec::new();

        for (index, candidate) in candidates.iter_mut().enumerate() {
            if candidate.target.is_burning() {
                continue;
            }
            let chance = self.spread_chance(source, candidate.distance, dt);
            if chance <= 0.0 {
                continue;
            }

            if rng.next_unit() < chance
                && candidate.target.receive_heat_ignition(ignition_temperature)
            {
                debug!(
                    "{} spread to candidate {} at {:.1}m ({:.0}°C)",
                    source.id(),
                    index,
                    candidate.distance,
                    ignition_temperature
                );
                ignited.push(index);
            }
        }

        ignited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{FuelCategory, ScriptedRandom, Vec3};
    use crate::fire::{FireConfig, FireId, FirePhase};

    /// Candidate that records the heat it was lit with
    #[derive(Default)]
    struct Brush {
        burning: bool,
        lit_at: Option<f32>,
    }

    impl Flammable for Brush {
        fn is_burning(&self) -> bool {
            self.burning
        }

        fn receive_heat_ignition(&mut self, ignition_temperature: f32) -> bool {
            self.burning = true;
            self.lit_at = Some(ignition_temperature);
            true
        }
    }

    fn wildfire(temperature: f32, fuel: f32) -> FireState {
        let mut fire = FireState::new(FireId(1), FireConfig::wildfire(), Vec3::zeros());
        fire.add_fuel(FuelCategory::Hardwood, fuel, false);
        fire.phase = FirePhase::from_temperature(temperature);
        fire.temperature = temperature;
        fire
    }

    #[test]
    fn test_preconditions() {
        let resolver = SpreadResolver::default();
        assert!(resolver.can_spread(&wildfire(800.0, 450.0)));
        assert!(!resolver.can_spread(&wildfire(650.0, 450.0)));
        assert!(!resolver.can_spread(&wildfire(800.0, 350.0)));

        let mut campfire = FireState::new(FireId(2), FireConfig::campfire(), Vec3::zeros());
        campfire.add_fuel(FuelCategory::Coal, 100.0, false);
        campfire.phase = FirePhase::Blazing;
        campfire.temperature = 790.0;
        assert!(!resolver.can_spread(&campfire));
    }

    #[test]
    fn test_spread_chance_falls_with_distance() {
        let resolver = SpreadResolver::default();
        let fire = wildfire(800.0, 450.0);
        // reach = 22.5m
        assert!((resolver.spread_chance(&fire, 0.0, 1.0) - 0.1).abs() < 1e-6);
        assert!((resolver.spread_chance(&fire, 11.25, 1.0) - 0.05).abs() < 1e-6);
        assert_eq!(resolver.spread_chance(&fire, 30.0, 1.0), 0.0);
    }

    #[test]
    fn test_resolve_ignites_on_low_roll() {
        let resolver = SpreadResolver::default();
        let fire = wildfire(800.0, 450.0);
        let mut candidates = vec![
            SpreadCandidate::new(Brush::default(), 2.0),
            SpreadCandidate::new(Brush::default(), 40.0),
            SpreadCandidate::new(
                Brush {
                    burning: true,
                    lit_at: None,
                },
                1.0,
            ),
        ];
        let mut rng = ScriptedRandom::always(0.0);

        let ignited = resolver.resolve(&fire, &mut candidates, 0.2, &mut rng);
        assert_eq!(ignited, vec![0]);
        assert_eq!(candidates[0].target.lit_at, Some(640.0));
        assert!(candidates[1].target.lit_at.is_none());
        // Out-of-reach and burning candidates never roll
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_resolve_respects_roll() {
        let resolver = SpreadResolver::default();
        let fire = wildfire(800.0, 450.0);
        let mut candidates = vec![SpreadCandidate::new(Brush::default(), 2.0)];
        let mut rng = ScriptedRandom::always(0.5);

        assert!(resolver.resolve(&fire, &mut candidates, 0.2, &mut rng).is_empty());
        assert!(!candidates[0].target.burning);
    }

    #[test]
    fn test_resolve_ignites_fire_candidates() {
        let resolver = SpreadResolver::default();
        let fire = wildfire(1000.0, 500.0);
        let mut neighbour = FireState::new(FireId(5), FireConfig::campfire(), Vec3::zeros());
        neighbour.add_fuel(FuelCategory::Logs, 50.0, false);

        let mut candidates = vec![SpreadCandidate::new(&mut neighbour, 3.0)];
        let mut rng = ScriptedRandom::always(0.0);
        assert_eq!(resolver.resolve(&fire, &mut candidates, 1.0, &mut rng), vec![0]);

        assert_eq!(neighbour.state(), FirePhase::Igniting);
        // 0.8 × 1000 clamped to the campfire's 800°C ceiling
        assert_eq!(neighbour.temperature(), 800.0);
    }

    #[test]
    fn test_starved_fire_does_not_spread() {
        let resolver = SpreadResolver::default();
        let fire = wildfire(900.0, 100.0);
        let mut candidates = vec![SpreadCandidate::new(Brush::default(), 0.5)];
        let mut rng = ScriptedRandom::always(0.0);
        assert!(resolver.resolve(&fire, &mut candidates, 1.0, &mut rng).is_empty());
        assert_eq!(rng.draws(), 0);
    }
}
