//! Heat field falloff
//!
//! Answers "how much of the fire's heat reaches distance d" without looking
//! at the rest of the fire state. The curve maps the normalized closeness
//! `x = 1 - d / radius` (1 at the fire, 0 at the edge) to a heat fraction.

use serde::{Deserialize, Serialize};

/// Shape of the heat falloff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FalloffCurve {
    /// f(x) = x
    #[default]
    Linear,
    /// f(x) = x², heat concentrated near the source
    Quadratic,
    /// f(x) = 3x² - 2x³, flat near the source and the edge
    SmoothStep,
}

impl FalloffCurve {
    /// Apply the curve to a closeness value, clamped to `[0, 1]`
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        match self {
            FalloffCurve::Linear => x,
            FalloffCurve::Quadratic => x * x,
            FalloffCurve::SmoothStep => x * x * (3.0 - 2.0 * x),
        }
    }
}

/// Distance-to-heat mapping for one radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatField {
    pub radius: f32,
    pub curve: FalloffCurve,
}

impl HeatField {
    pub fn new(radius: f32, curve: FalloffCurve) -> Self {
        HeatField { radius, curve }
    }

    /// Heat fraction reaching `distance`. Zero outside the radius, for
    /// negative or non-finite distances, and for a degenerate radius.
    pub fn fraction_at(&self, distance: f32) -> f32 {
        if !distance.is_finite() || distance < 0.0 {
            return 0.0;
        }
        if !self.radius.is_finite() || self.radius <= 0.0 || distance > self.radius {
            return 0.0;
        }

        self.curve.apply(1.0 - distance / self.radius)
    }

    /// Whether `distance` lies within the field
    pub fn contains(&self, distance: f32) -> bool {
        distance.is_finite() && distance >= 0.0 && distance <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        for curve in [FalloffCurve::Linear, FalloffCurve::Quadratic, FalloffCurve::SmoothStep] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            assert_eq!(curve.apply(2.0), 1.0);
        }
        assert_eq!(FalloffCurve::default(), FalloffCurve::Linear);
    }

    #[test]
    fn test_curve_shapes() {
        assert_eq!(FalloffCurve::Linear.apply(0.5), 0.5);
        assert_eq!(FalloffCurve::Quadratic.apply(0.5), 0.25);
        assert_eq!(FalloffCurve::SmoothStep.apply(0.5), 0.5);
        assert!(FalloffCurve::SmoothStep.apply(0.9) > FalloffCurve::Linear.apply(0.9));
    }

    #[test]
    fn test_fraction_at() {
        let field = HeatField::new(4.0, FalloffCurve::Linear);
        assert_eq!(field.fraction_at(0.0), 1.0);
        assert_eq!(field.fraction_at(1.0), 0.75);
        assert_eq!(field.fraction_at(4.0), 0.0);
        assert_eq!(field.fraction_at(4.5), 0.0);
        assert_eq!(field.fraction_at(-1.0), 0.0);
        assert_eq!(field.fraction_at(f32::NAN), 0.0);
        assert!(field.contains(4.0));
        assert!(!field.contains(4.01));

        let degenerate = HeatField::new(0.0, FalloffCurve::Linear);
        assert_eq!(degenerate.fraction_at(0.0), 0.0);
    }
}
