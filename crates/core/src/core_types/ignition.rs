//! Ignition sources: the tools and techniques used to start a fire
//!
//! An [`IgnitionSource`] is an immutable template (success rate, starting
//! temperature, tinder requirement) plus a mutable use counter. The fire
//! decides whether an attempt succeeds; the source only tracks its own
//! depletion through [`IgnitionSource::try_use`].

use serde::{Deserialize, Serialize};

/// Marker for sources that never run out
pub const UNLIMITED_USES: i32 = -1;

/// Template a source was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IgnitionKind {
    Matches,
    Lighter,
    FlintAndSteel,
    BowDrill,
    /// An existing flame held to the fuel
    Torch,
    /// Radiant heat from a neighbouring fire
    Spread,
}

/// A tool or technique used to start a fire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnitionSource {
    kind: IgnitionKind,
    success_rate: f32,         // 0-1 base probability before penalties
    ignition_temperature: f32, // °C the fire starts at on success
    requires_tinder: bool,     // Friction and sparks cannot catch on bare wood
    uses_remaining: i32,       // -1 = unlimited
}

impl IgnitionSource {
    /// Build a custom source. Success rate is clamped to `[0, 1]`.
    pub fn new(
        kind: IgnitionKind,
        success_rate: f32,
        ignition_temperature: f32,
        requires_tinder: bool,
        uses_remaining: i32,
    ) -> Self {
        IgnitionSource {
            kind,
            success_rate: if success_rate.is_finite() {
                success_rate.clamp(0.0, 1.0)
            } else {
                0.0
            },
            ignition_temperature: if ignition_temperature.is_finite() {
                ignition_temperature.max(0.0)
            } else {
                0.0
            },
            requires_tinder,
            uses_remaining: uses_remaining.max(UNLIMITED_USES),
        }
    }

    /// Box of matches
    pub fn matches() -> Self {
        Self::new(IgnitionKind::Matches, 0.7, 250.0, false, 10)
    }

    /// Fuel lighter
    pub fn lighter() -> Self {
        Self::new(IgnitionKind::Lighter, 0.95, 300.0, false, 100)
    }

    /// Flint and steel, sparks need tinder
    pub fn flint_and_steel() -> Self {
        Self::new(IgnitionKind::FlintAndSteel, 0.6, 350.0, true, 200)
    }

    /// Bow drill, slow and unreliable but never wears out
    pub fn bow_drill() -> Self {
        Self::new(IgnitionKind::BowDrill, 0.3, 200.0, true, UNLIMITED_USES)
    }

    /// A burning torch
    pub fn torch() -> Self {
        Self::new(IgnitionKind::Torch, 1.0, 400.0, false, UNLIMITED_USES)
    }

    /// Heat transfer from a spreading fire. Always succeeds once chosen.
    pub fn spread(ignition_temperature: f32) -> Self {
        Self::new(
            IgnitionKind::Spread,
            1.0,
            ignition_temperature,
            false,
            UNLIMITED_USES,
        )
    }

    /// Default template for a kind
    pub fn from_kind(kind: IgnitionKind) -> Self {
        match kind {
            IgnitionKind::Matches => Self::matches(),
            IgnitionKind::Lighter => Self::lighter(),
            IgnitionKind::FlintAndSteel => Self::flint_and_steel(),
            IgnitionKind::BowDrill => Self::bow_drill(),
            IgnitionKind::Torch => Self::torch(),
            IgnitionKind::Spread => Self::spread(400.0),
        }
    }

    /// Same template with a different use count
    pub fn with_uses(mut self, uses_remaining: i32) -> Self {
        self.uses_remaining = uses_remaining.max(UNLIMITED_USES);
        self
    }

    pub fn kind(&self) -> IgnitionKind {
        self.kind
    }

    pub fn success_rate(&self) -> f32 {
        self.success_rate
    }

    pub fn ignition_temperature(&self) -> f32 {
        self.ignition_temperature
    }

    pub fn requires_tinder(&self) -> bool {
        self.requires_tinder
    }

    pub fn uses_remaining(&self) -> i32 {
        self.uses_remaining
    }

    pub fn is_unlimited(&self) -> bool {
        self.uses_remaining == UNLIMITED_USES
    }

    /// A source with no uses left cannot be tried
    pub fn is_exhausted(&self) -> bool {
        self.uses_remaining == 0
    }

    /// Spend one use.
    ///
    /// Returns `false` if the source is exhausted. Unlimited sources always
    /// succeed without changing.
    pub fn try_use(&mut self) -> bool {
        match self.uses_remaining {
            UNLIMITED_USES => true,
            0 => false,
            _ => {
                self.uses_remaining -= 1;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates() {
        let lighter = IgnitionSource::lighter();
        assert_eq!(lighter.kind(), IgnitionKind::Lighter);
        assert_eq!(lighter.success_rate(), 0.95);
        assert!(!lighter.requires_tinder());

        let matches = IgnitionSource::matches();
        assert_eq!(matches.ignition_temperature(), 250.0);
        assert_eq!(matches.uses_remaining(), 10);

        assert!(IgnitionSource::bow_drill().is_unlimited());
        assert!(IgnitionSource::flint_and_steel().requires_tinder());
        assert_eq!(IgnitionSource::from_kind(IgnitionKind::Torch), IgnitionSource::torch());
    }

    #[test]
    fn test_try_use_depletes() {
        let mut matches = IgnitionSource::matches().with_uses(2);
        assert!(matches.try_use());
        assert!(matches.try_use());
        assert!(matches.is_exhausted());
        assert!(!matches.try_use());
        assert_eq!(matches.uses_remaining(), 0);
    }

    #[test]
    fn test_unlimited_never_depletes() {
        let mut drill = IgnitionSource::bow_drill();
        for _ in 0..1000 {
            assert!(drill.try_use());
        }
        assert_eq!(drill.uses_remaining(), UNLIMITED_USES);
    }

    #[test]
    fn test_new_clamps_inputs() {
        let source = IgnitionSource::new(IgnitionKind::Matches, 3.0, -10.0, false, -7);
        assert_eq!(source.success_rate(), 1.0);
        assert_eq!(source.ignition_temperature(), 0.0);
        assert!(source.is_unlimited());
    }
}
