//! Field configuration.
//!
//! Every constant the simulation uses lives in [`FieldConfig`]. The defaults
//! reproduce the reference look: 55 golden motes, a 100px repulsion radius,
//! gentle drag and a slow upward drift.
//!
//! Configs serialize to JSON; missing fields fall back to their defaults, so
//! a file only needs to name what it changes:
//!
//! ```json
//! { "particle_count": 120, "color": [120, 200, 255] }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// How per-tick constants relate to wall-clock time.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timing {
    /// One frame is one tick regardless of how long it took. Drift speed
    /// follows the display refresh rate.
    #[default]
    PerTick,
    /// Scale each frame by `delta * reference_hz` ticks, capped at
    /// `max_ticks` so a long stall does not teleport particles.
    Scaled { reference_hz: f32, max_ticks: f32 },
}

impl Timing {
    /// Number of reference ticks a frame of `delta_secs` represents.
    pub fn ticks_for(&self, delta_secs: f32) -> f32 {
        match *self {
            Timing::PerTick => 1.0,
            Timing::Scaled {
                reference_hz,
                max_ticks,
            } => (delta_secs * reference_hz).clamp(0.0, max_ticks),
        }
    }
}

/// Complete field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of a field.
    pub particle_count: u32,
    /// Distance within which the pointer pushes particles away.
    pub repel_radius: f32,
    /// Impulse applied at the pointer itself (falls off linearly to zero at the radius).
    pub repel_strength: f32,
    /// Per-tick velocity multiplier.
    pub drag: f32,
    /// Per-tick upward acceleration.
    pub lift: f32,
    /// Initial horizontal speed is uniform in `[-drift_x, drift_x)`.
    pub drift_x: f32,
    /// Initial upward speed range.
    pub rise_speed: [f32; 2],
    /// Disc radius range.
    pub radius: [f32; 2],
    /// Initial opacity range.
    pub initial_alpha: [f32; 2],
    /// Opacity oscillates inside these bounds.
    pub alpha_bounds: [f32; 2],
    /// Opacity change per tick.
    pub alpha_step: f32,
    /// How far past an edge a particle travels before wrapping.
    pub wrap_margin: f32,
    /// Fill color shared by every particle (RGB).
    pub color: [u8; 3],
    /// Window clear color behind the field (RGB).
    pub background: [u8; 3],
    /// Opacity of the whole layer when composited over the background.
    pub opacity: f32,
    /// Quiet period before a resize is applied.
    pub resize_debounce_ms: u64,
    pub timing: Timing,
    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 55,
            repel_radius: 100.0,
            repel_strength: 0.4,
            drag: 0.97,
            lift: 0.008,
            drift_x: 0.15,
            rise_speed: [0.1, 0.5],
            radius: [0.5, 2.0],
            initial_alpha: [0.1, 0.6],
            alpha_bounds: [0.05, 0.6],
            alpha_step: 0.004,
            wrap_margin: 10.0,
            color: [255, 220, 80],
            background: [10, 10, 12],
            opacity: 1.0,
            resize_debounce_ms: 150,
            timing: Timing::PerTick,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_repel_radius(mut self, radius: f32) -> Self {
        self.repel_radius = radius;
        self
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Check that ranges are ordered and factors are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn ordered(name: &str, [min, max]: [f32; 2]) -> Result<(), ConfigError> {
            if min.is_finite() && max.is_finite() && min <= max {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{name} range [{min}, {max}] is not ordered"
                )))
            }
        }

        ordered("rise_speed", self.rise_speed)?;
        ordered("radius", self.radius)?;
        ordered("initial_alpha", self.initial_alpha)?;
        ordered("alpha_bounds", self.alpha_bounds)?;

        if self.radius[0] < 0.0 {
            return Err(ConfigError::Invalid("radius must not be negative".into()));
        }
        if self.alpha_bounds[0] < 0.0 || self.alpha_bounds[1] > 1.0 {
            return Err(ConfigError::Invalid(
                "alpha_bounds must lie within [0, 1]".into(),
            ));
        }
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "drag {} must be in (0, 1]",
                self.drag
            )));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid(format!(
                "opacity {} must be in [0, 1]",
                self.opacity
            )));
        }
        if !(self.alpha_step.is_finite() && self.alpha_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "alpha_step {} must be positive",
                self.alpha_step
            )));
        }
        if !(self.wrap_margin >= 0.0 && self.wrap_margin.is_finite()) {
            return Err(ConfigError::Invalid(
                "wrap_margin must not be negative".into(),
            ));
        }
        if !self.repel_strength.is_finite() {
            return Err(ConfigError::Invalid(
                "repel_strength must be finite".into(),
            ));
        }
        if !(self.repel_radius >= 0.0) {
            return Err(ConfigError::Invalid(
                "repel_radius must not be negative".into(),
            ));
        }
        if let Timing::Scaled {
            reference_hz,
            max_ticks,
        } = self.timing
        {
            if !(reference_hz > 0.0 && max_ticks > 0.0) {
                return Err(ConfigError::Invalid(
                    "scaled timing needs positive reference_hz and max_ticks".into(),
                ));
            }
        }
        Ok(())
    }

    /// Save a configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FieldConfig =
            serde_json::from_str(r#"{ "particle_count": 12, "seed": 5 }"#).unwrap();

        assert_eq!(config.particle_count, 12);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.repel_radius, 100.0);
        assert_eq!(config.timing, Timing::PerTick);
    }

    #[test]
    fn test_scaled_timing_json() {
        let config: FieldConfig = serde_json::from_str(
            r#"{ "timing": { "mode": "scaled", "reference_hz": 60.0, "max_ticks": 3.0 } }"#,
        )
        .unwrap();

        assert_eq!(
            config.timing,
            Timing::Scaled {
                reference_hz: 60.0,
                max_ticks: 3.0
            }
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = FieldConfig::default();
        config.radius = [2.0, 0.5];

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_drag_rejected() {
        let mut config = FieldConfig::default();
        config.drag = 1.5;
        assert!(config.validate().is_err());

        config.drag = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ticks_for() {
        assert_eq!(Timing::PerTick.ticks_for(0.5), 1.0);

        let scaled = Timing::Scaled {
            reference_hz: 60.0,
            max_ticks: 4.0,
        };
        assert!((scaled.ticks_for(1.0 / 120.0) - 0.5).abs() < 1e-5);
        assert_eq!(scaled.ticks_for(10.0), 4.0);
        assert_eq!(scaled.ticks_for(-1.0), 0.0);
    }

    #[test]
    fn test_debounce_duration() {
        assert_eq!(
            FieldConfig::default().resize_debounce(),
            Duration::from_millis(150)
        );
    }
}
