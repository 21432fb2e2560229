//! Scheduler owning every active fire in a world
//!
//! `FireWorld` hands one shared [`EnvironmentSample`] to every fire each
//! tick, then lets spread-capable fires try to ignite the other fires it
//! owns. Fires are visited in ascending id order so a seeded random source
//! replays identically.
//!
//! Hosts that run on a variable frame rate can call [`FireWorld::advance`],
//! which slices elapsed time into fixed ticks (0.2 s by default).

use crate::core_types::{EnvironmentSample, RandomSource, Vec3};
use crate::fire::{FireConfig, FireId, FirePhase, FireState, Flammable, SpreadCandidate, SpreadResolver};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Default fixed tick interval (seconds)
pub const DEFAULT_TICK_INTERVAL: f32 = 0.2;

/// Upper bound on ticks run by a single `advance` call
const MAX_TICKS_PER_ADVANCE: u32 = 50;

/// What happened during one or more ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Fires that went out
    pub extinguished: Vec<FireId>,
    /// Spread events as (source, newly lit fire)
    pub spread: Vec<(FireId, FireId)>,
    /// Ticks run (1 for `tick`, any number for `advance`)
    pub ticks: u32,
}

impl TickReport {
    fn merge(&mut self, other: TickReport) {
        self.extinguished.extend(other.extinguished);
        self.spread.extend(other.spread);
        self.ticks += other.ticks;
    }
}

/// Statistics for the world
#[derive(Debug, Clone, PartialEq)]
pub struct WorldStats {
    pub total_fires: usize,
    pub lit_fires: usize,
    pub total_fuel: f32,
    pub total_fuel_consumed: f32,
    pub simulation_time: f32,
}

/// Stand-in used while rolling spread against fires still inside the map
struct PendingIgnition {
    id: FireId,
    burning: bool,
    lit_at: Option<f32>,
}

impl Flammable for PendingIgnition {
    fn is_burning(&self) -> bool {
        self.burning
    }

    fn receive_heat_ignition(&mut self, ignition_temperature: f32) -> bool {
        if self.burning {
            return false;
        }
        self.burning = true;
        self.lit_at = Some(ignition_temperature);
        true
    }
}

/// Owns and ticks a set of fires
#[derive(Debug, Clone)]
pub struct FireWorld {
    fires: FxHashMap<FireId, FireState>,
    next_id: u64,
    spread: SpreadResolver,
    tick_interval: f32,
    accumulator: f32,
    total_fuel_consumed: f32,
    simulation_time: f32,
}

impl Default for FireWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl FireWorld {
    pub fn new() -> Self {
        FireWorld {
            fires: FxHashMap::default(),
            next_id: 1,
            spread: SpreadResolver::default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            accumulator: 0.0,
            total_fuel_consumed: 0.0,
            simulation_time: 0.0,
        }
    }

    /// Use a custom spread resolver
    pub fn with_spread_resolver(mut self, spread: SpreadResolver) -> Self {
        self.spread = spread;
        self
    }

    /// Use a different fixed tick for `advance`. Non-positive values are ignored.
    pub fn with_tick_interval(mut self, tick_interval: f32) -> Self {
        if tick_interval.is_finite() && tick_interval > 0.0 {
            self.tick_interval = tick_interval;
        }
        self
    }

    pub fn tick_interval(&self) -> f32 {
        self.tick_interval
    }

    pub fn spread_resolver(&self) -> &SpreadResolver {
        &self.spread
    }

    /// Place a new unlit fire
    pub fn spawn(&mut self, config: FireConfig, position: Vec3) -> FireId {
        let id = self.fresh_id();
        debug!("Spawned {} {} at {:?}", config.kind, id, position);
        self.fires.insert(id, FireState::new(id, config, position));
        id
    }

    /// Adopt an existing fire (e.g. one restored from a save).
    ///
    /// Keeps the fire's id when it is free, otherwise assigns a fresh one.
    pub fn insert(&mut self, mut fire: FireState) -> FireId {
        if self.fires.contains_key(&fire.id) {
            fire.id = self.fresh_id();
        } else if let Some(next) = fire.id.0.checked_add(1) {
            self.next_id = self.next_id.max(next);
        }
        let id = fire.id;
        self.fires.insert(id, fire);
        id
    }

    /// Next unused id. Skips ids taken by adopted fires.
    fn fresh_id(&mut self) -> FireId {
        while self.fires.contains_key(&FireId(self.next_id)) {
            self.next_id = self.next_id.wrapping_add(1);
        }
        let id = FireId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Remove a fire when its world object is destroyed
    pub fn remove(&mut self, id: FireId) -> Option<FireState> {
        self.fires.remove(&id)
    }

    pub fn get(&self, id: FireId) -> Option<&FireState> {
        self.fires.get(&id)
    }

    pub fn get_mut(&mut self, id: FireId) -> Option<&mut FireState> {
        self.fires.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.fires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fires.is_empty()
    }

    /// Fire ids in ascending order
    pub fn ids(&self) -> Vec<FireId> {
        let mut ids: Vec<FireId> = self.fires.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Fires currently alight
    pub fn lit_fires(&self) -> impl Iterator<Item = &FireState> {
        self.fires.values().filter(|fire| fire.state().is_lit())
    }

    /// Light `target` from `source`'s flame (torch transfer)
    pub fn light_from(&mut self, source: FireId, target: FireId) -> bool {
        if source == target {
            return false;
        }
        let Some(source_phase) = self.fires.get(&source).map(FireState::state) else {
            return false;
        };
        match self.fires.get_mut(&target) {
            Some(target_fire) => target_fire.catch_flame_from(source, source_phase),
            None => false,
        }
    }

    /// Advance every fire by `dt` seconds and resolve spread between them
    pub fn tick(
        &mut self,
        env: &EnvironmentSample,
        dt: f32,
        rng: &mut impl RandomSource,
    ) -> TickReport {
        let mut report = TickReport {
            ticks: 1,
            ..TickReport::default()
        };
        if !dt.is_finite() || dt <= 0.0 {
            report.ticks = 0;
            return report;
        }

        let ids = self.ids();

        for id in &ids {
            let Some(fire) = self.fires.get_mut(id) else {
                continue;
            };
            let was_lit = fire.state().is_lit();
            let fuel_before = fire.fuel_amount();

            fire.tick(env, dt);

            self.total_fuel_consumed += (fuel_before - fire.fuel_amount()).max(0.0);
            if was_lit && fire.state() == FirePhase::Extinguished {
                report.extinguished.push(*id);
            }
        }

        // Fires caught this tick start spreading on the next one
        let sources: Vec<FireId> = ids
            .iter()
            .copied()
            .filter(|id| {
                self.fires
                    .get(id)
                    .is_some_and(|fire| self.spread.can_spread(fire))
            })
            .collect();

        for source_id in &sources {
            let Some(source) = self.fires.get(source_id) else {
                continue;
            };

            let origin = source.position();
            let mut candidates: Vec<SpreadCandidate<PendingIgnition>> = ids
                .iter()
                .filter(|id| *id != source_id)
                .filter_map(|id| self.fires.get(id))
                .map(|fire| {
                    SpreadCandidate::new(
                        PendingIgnition {
                            id: fire.id(),
                            burning: fire.state().is_lit(),
                            lit_at: None,
                        },
                        (fire.position() - origin).norm(),
                    )
                })
                .collect();

            let ignited = self.spread.resolve(source, &mut candidates, dt, rng);

            for index in ignited {
                let pending = &candidates[index].target;
                let Some(temperature) = pending.lit_at else {
                    continue;
                };
                if let Some(target) = self.fires.get_mut(&pending.id) {
                    if target.ignite_from_heat(temperature) {
                        info!("{} spread to {}", source_id, pending.id);
                        report.spread.push((*source_id, pending.id));
                    }
                }
            }
        }

        self.simulation_time += dt;
        report
    }

    /// Run as many fixed ticks as `elapsed` seconds cover.
    ///
    /// Leftover time carries into the next call. At most 50 ticks run per
    /// call; time beyond that is dropped.
    pub fn advance(
        &mut self,
        elapsed: f32,
        env: &EnvironmentSample,
        rng: &mut impl RandomSource,
    ) -> TickReport {
        let mut report = TickReport::default();
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return report;
        }

        self.accumulator += elapsed;
        while self.accumulator >= self.tick_interval {
            if report.ticks >= MAX_TICKS_PER_ADVANCE {
                debug!(
                    "advance dropped {:.2}s after {} ticks",
                    self.accumulator, report.ticks
                );
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.tick_interval;
            let step = self.tick(env, self.tick_interval, rng);
            report.merge(step);
        }

        report
    }

    pub fn get_stats(&self) -> WorldStats {
        WorldStats {
            total_fires: self.fires.len(),
            lit_fires: self.lit_fires().count(),
            total_fuel: self.fires.values().map(FireState::fuel_amount).sum(),
            total_fuel_consumed: self.total_fuel_consumed,
            simulation_time: self.simulation_time,
        }
    }
}
