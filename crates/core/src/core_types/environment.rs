//! Per-tick environmental input shared by every fire

use serde::{Deserialize, Serialize};

/// Wind and rain conditions for one simulation tick.
///
/// Supplied by the host once per tick and read by every active fire. Values
/// are clamped on construction: wind is non-negative, rain lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentSample {
    wind_strength: f32,
    rain_intensity: f32,
}

impl EnvironmentSample {
    /// Calm, dry conditions
    pub const CALM: EnvironmentSample = EnvironmentSample {
        wind_strength: 0.0,
        rain_intensity: 0.0,
    };

    /// Create a sample, clamping out-of-range or non-finite values
    pub fn new(wind_strength: f32, rain_intensity: f32) -> Self {
        let wind_strength = if wind_strength.is_finite() {
            wind_strength.max(0.0)
        } else {
            0.0
        };
        let rain_intensity = if rain_intensity.is_finite() {
            rain_intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };

        EnvironmentSample {
            wind_strength,
            rain_intensity,
        }
    }

    pub fn wind_strength(&self) -> f32 {
        self.wind_strength
    }

    pub fn rain_intensity(&self) -> f32 {
        self.rain_intensity
    }

    pub fn is_raining(&self) -> bool {
        self.rain_intensity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_values() {
        let sample = EnvironmentSample::new(-3.0, 1.7);
        assert_eq!(sample.wind_strength(), 0.0);
        assert_eq!(sample.rain_intensity(), 1.0);

        let sample = EnvironmentSample::new(f32::INFINITY, f32::NAN);
        assert_eq!(sample, EnvironmentSample::CALM);
        assert!(!sample.is_raining());
    }
}
