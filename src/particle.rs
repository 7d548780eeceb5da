//! The mote particle record.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::spawn::SpawnContext;

/// Which way a particle's opacity is currently moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaDirection {
    Rising,
    Falling,
}

impl AlphaDirection {
    /// `+1.0` for [`Rising`](Self::Rising), `-1.0` for [`Falling`](Self::Falling).
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            AlphaDirection::Rising => 1.0,
            AlphaDirection::Falling => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            AlphaDirection::Rising => AlphaDirection::Falling,
            AlphaDirection::Falling => AlphaDirection::Rising,
        }
    }
}

/// A single simulated point.
///
/// Positions are surface-local pixels, velocities are pixels per tick.
/// `radius` is chosen at spawn time and never touched by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub alpha_direction: AlphaDirection,
}

impl Particle {
    /// Spawn a particle somewhere on a surface of the given size.
    pub(crate) fn spawn(ctx: &mut SpawnContext, config: &FieldConfig, size: Vec2) -> Self {
        let [rise_min, rise_max] = config.rise_speed;
        let [radius_min, radius_max] = config.radius;
        let [alpha_min, alpha_max] = config.initial_alpha;

        Self {
            position: ctx.random_in_rect(size),
            velocity: Vec2::new(
                ctx.random_range(-config.drift_x, config.drift_x),
                -ctx.random_range(rise_min, rise_max),
            ),
            radius: ctx.random_range(radius_min, radius_max),
            alpha: ctx.random_range(alpha_min, alpha_max),
            alpha_direction: if ctx.random_bool() {
                AlphaDirection::Rising
            } else {
                AlphaDirection::Falling
            },
        }
    }

    /// Advance `alpha` by `amount` in the current direction, reflecting off
    /// `[min, max]` and flipping direction whenever a bound is crossed.
    pub(crate) fn pulse_alpha(&mut self, amount: f32, min: f32, max: f32) {
        self.alpha += amount * self.alpha_direction.sign();

        if self.alpha > max {
            self.alpha = (2.0 * max - self.alpha).max(min);
            self.alpha_direction = self.alpha_direction.flipped();
        } else if self.alpha < min {
            self.alpha = (2.0 * min - self.alpha).min(max);
            self.alpha_direction = self.alpha_direction.flipped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mote(alpha: f32, alpha_direction: AlphaDirection) -> Particle {
        Particle {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: 1.0,
            alpha,
            alpha_direction,
        }
    }

    #[test]
    fn test_direction_sign_and_flip() {
        assert_eq!(AlphaDirection::Rising.sign(), 1.0);
        assert_eq!(AlphaDirection::Falling.sign(), -1.0);
        assert_eq!(AlphaDirection::Rising.flipped(), AlphaDirection::Falling);
        assert_eq!(AlphaDirection::Falling.flipped(), AlphaDirection::Rising);
    }

    #[test]
    fn test_pulse_reflects_at_upper_bound() {
        let mut p = mote(0.598, AlphaDirection::Rising);
        p.pulse_alpha(0.004, 0.05, 0.6);

        assert!((p.alpha - 0.598).abs() < 1e-6);
        assert_eq!(p.alpha_direction, AlphaDirection::Falling);
    }

    #[test]
    fn test_pulse_reflects_at_lower_bound() {
        let mut p = mote(0.051, AlphaDirection::Falling);
        p.pulse_alpha(0.004, 0.05, 0.6);

        assert!((p.alpha - 0.053).abs() < 1e-6);
        assert_eq!(p.alpha_direction, AlphaDirection::Rising);
    }

    #[test]
    fn test_pulse_inside_range_keeps_direction() {
        let mut p = mote(0.3, AlphaDirection::Rising);
        p.pulse_alpha(0.004, 0.05, 0.6);

        assert!((p.alpha - 0.304).abs() < 1e-6);
        assert_eq!(p.alpha_direction, AlphaDirection::Rising);
    }

    #[test]
    fn test_spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut ctx = SpawnContext::seeded(3);
        let size = Vec2::new(320.0, 200.0);

        for _ in 0..500 {
            let p = Particle::spawn(&mut ctx, &config, size);
            assert!(p.position.x >= 0.0 && p.position.x < 320.0);
            assert!(p.position.y >= 0.0 && p.position.y < 200.0);
            assert!(p.velocity.x >= -0.15 && p.velocity.x < 0.15);
            assert!(p.velocity.y <= -0.1 && p.velocity.y > -0.5);
            assert!(p.radius >= 0.5 && p.radius < 2.0);
            assert!(p.alpha >= 0.1 && p.alpha < 0.6);
        }
    }
}
