//! The particle field simulation.
//!
//! [`ParticleField`] owns every piece of mutable simulation state: the
//! particles, the pointer and the surface size. Hosts mutate it only through
//! `&mut self` methods, one call at a time, so it needs no locking.
//!
//! # Per-tick update
//!
//! For each particle:
//!
//! 1. If the pointer is within `repel_radius`, push the particle away from it
//!    with a linear falloff (full strength at the pointer, zero at the radius).
//! 2. Apply drag to both axes and a constant upward `lift` to `vy`.
//! 3. Integrate position.
//! 4. Pulse alpha, reflecting at `alpha_bounds`.
//! 5. Wrap around the edges with `wrap_margin` slack.
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldConfig::default(), 800, 600);
//! field.set_pointer(Vec2::new(400.0, 300.0));
//! field.step();
//! field.render(&mut surface);
//! ```

use glam::{UVec2, Vec2};

use crate::config::FieldConfig;
use crate::input::Pointer;
use crate::particle::Particle;
use crate::spawn::SpawnContext;
use crate::surface::DrawContext;

/// Fixed-size pool of motes on a surface of known size.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    pointer: Pointer,
    size: UVec2,
    config: FieldConfig,
    rng: SpawnContext,
}

impl ParticleField {
    /// Create a field of `config.particle_count` particles spread over a
    /// `width` x `height` surface.
    ///
    /// Seeds from `config.seed` when set, otherwise from the clock.
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => SpawnContext::seeded(seed),
            None => SpawnContext::from_clock(),
        };
        Self::with_rng(config, width, height, rng)
    }

    /// Create a field with an explicit random source.
    pub fn with_rng(config: FieldConfig, width: u32, height: u32, mut rng: SpawnContext) -> Self {
        let size = UVec2::new(width, height);
        let extent = size.as_vec2();
        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(&mut rng, &config, extent))
            .collect();

        Self {
            particles,
            pointer: Pointer::Absent,
            size,
            config,
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particles. The slice cannot grow or shrink, so
    /// the particle count stays fixed.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    // ========== Pointer ==========

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Record a surface-local pointer position for the next step.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Pointer::At(position);
    }

    /// Mark the pointer as absent. Subsequent steps apply no repulsion.
    pub fn clear_pointer(&mut self) {
        self.pointer = Pointer::Absent;
    }

    pub fn set_pointer_state(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    // ========== Size ==========

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Update the surface size. Returns `false` when nothing changed.
    ///
    /// Particles are never moved here; anything now outside the surface
    /// wraps on its next edge crossing.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let size = UVec2::new(width, height);
        if size == self.size {
            return false;
        }
        self.size = size;
        true
    }

    // ========== Simulation ==========

    /// Velocity impulse the pointer would give a particle at `position` on
    /// one reference tick.
    ///
    /// Zero when the pointer is absent, at or beyond `repel_radius`, or
    /// exactly on top of the particle.
    pub fn repulsion_impulse(&self, position: Vec2) -> Vec2 {
        let Some(pointer) = self.pointer.position() else {
            return Vec2::ZERO;
        };

        let radius = self.config.repel_radius;
        let offset = position - pointer;
        let dist_sq = offset.length_squared();

        if dist_sq < radius * radius && dist_sq > 0.0 {
            let dist = dist_sq.sqrt();
            let force = (radius - dist) / radius;
            offset / dist * force * self.config.repel_strength
        } else {
            Vec2::ZERO
        }
    }

    /// Advance exactly one reference tick.
    pub fn step(&mut self) {
        self.advance(1.0);
    }

    /// Advance by `ticks` reference ticks in a single update.
    ///
    /// `advance(1.0)` is one reference tick. Fractional values scale every
    /// per-tick increment; drag compounds as `drag.powf(ticks)`.
    pub fn advance(&mut self, ticks: f32) {
        if ticks <= 0.0 {
            return;
        }

        let drag = self.config.drag.powf(ticks);
        let lift = self.config.lift * ticks;
        let alpha_step = self.config.alpha_step * ticks;
        let [alpha_min, alpha_max] = self.config.alpha_bounds;
        let margin = self.config.wrap_margin;
        let extent = self.size.as_vec2();

        for i in 0..self.particles.len() {
            let impulse = self.repulsion_impulse(self.particles[i].position) * ticks;
            let p = &mut self.particles[i];

            p.velocity += impulse;
            p.velocity.x *= drag;
            p.velocity.y = p.velocity.y * drag - lift;
            p.position += p.velocity * ticks;

            p.pulse_alpha(alpha_step, alpha_min, alpha_max);

            if p.position.y < -margin {
                p.position.y = extent.y + margin;
                p.position.x = self.rng.random_below(extent.x);
            }
            if p.position.x < -margin {
                p.position.x = extent.x + margin;
            } else if p.position.x > extent.x + margin {
                p.position.x = -margin;
            }
        }
    }

    /// Rasterize the current state: clear, then one disc per particle.
    pub fn render<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        ctx.clear();
        ctx.set_fill_color(self.config.color);

        for p in &self.particles {
            ctx.set_global_alpha(p.alpha);
            ctx.fill_circle(p.position, p.radius);
        }

        ctx.set_global_alpha(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::AlphaDirection;

    fn seeded(count: u32, width: u32, height: u32) -> ParticleField {
        ParticleField::new(
            FieldConfig::default().with_particle_count(count).with_seed(11),
            width,
            height,
        )
    }

    fn still(position: Vec2) -> Particle {
        Particle {
            position,
            velocity: Vec2::ZERO,
            radius: 1.0,
            alpha: 0.3,
            alpha_direction: AlphaDirection::Rising,
        }
    }

    #[test]
    fn test_new_spawns_requested_count() {
        assert_eq!(seeded(55, 800, 600).len(), 55);
        assert!(seeded(0, 800, 600).is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = seeded(20, 300, 200);
        let b = seeded(20, 300, 200);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_zero_size_surface_spawns_at_origin() {
        let field = seeded(4, 0, 0);
        assert!(field.particles().iter().all(|p| p.position == Vec2::ZERO));
    }

    #[test]
    fn test_pointer_update_moves_nothing() {
        let mut field = seeded(10, 400, 400);
        let before = field.particles().to_vec();

        field.set_pointer(Vec2::new(200.0, 200.0));
        assert_eq!(field.pointer(), Pointer::At(Vec2::new(200.0, 200.0)));
        assert_eq!(field.particles(), &before[..]);

        field.clear_pointer();
        assert!(field.pointer().is_absent());
    }

    #[test]
    fn test_single_tick_matches_reference_update() {
        let mut field = seeded(1, 400, 400);
        field.particles_mut()[0] = Particle {
            velocity: Vec2::new(0.1, -0.2),
            ..still(Vec2::new(200.0, 200.0))
        };
        field.step();

        let p = field.particles()[0];
        let vx = 0.1 * 0.97;
        let vy = -0.2 * 0.97 - 0.008;
        assert!((p.velocity.x - vx).abs() < 1e-6);
        assert!((p.velocity.y - vy).abs() < 1e-6);
        assert!((p.position.x - (200.0 + vx)).abs() < 1e-4);
        assert!((p.position.y - (200.0 + vy)).abs() < 1e-4);
        assert!((p.alpha - 0.304).abs() < 1e-6);
    }

    #[test]
    fn test_repulsion_pushes_away_from_pointer() {
        let mut field = seeded(1, 400, 400);
        field.particles_mut()[0] = still(Vec2::new(250.0, 200.0));
        field.set_pointer(Vec2::new(200.0, 200.0));

        let impulse = field.repulsion_impulse(Vec2::new(250.0, 200.0));
        // force = (100 - 50) / 100 = 0.5, times strength 0.4
        assert!((impulse.x - 0.2).abs() < 1e-6);
        assert_eq!(impulse.y, 0.0);

        field.step();
        assert!(field.particles()[0].velocity.x > 0.0);
    }

    #[test]
    fn test_repulsion_zero_on_pointer_and_outside_radius() {
        let mut field = seeded(0, 400, 400);
        field.set_pointer(Vec2::new(100.0, 100.0));

        assert_eq!(field.repulsion_impulse(Vec2::new(100.0, 100.0)), Vec2::ZERO);
        assert_eq!(field.repulsion_impulse(Vec2::new(200.0, 100.0)), Vec2::ZERO);
        assert_eq!(field.repulsion_impulse(Vec2::new(300.0, 100.0)), Vec2::ZERO);
    }

    #[test]
    fn test_resize_reports_change() {
        let mut field = seeded(5, 400, 300);
        assert!(!field.resize(400, 300));
        assert!(field.resize(800, 300));
        assert_eq!(field.size(), UVec2::new(800, 300));
    }

    #[test]
    fn test_advance_zero_is_noop() {
        let mut field = seeded(8, 400, 300);
        let before = field.particles().to_vec();
        field.advance(0.0);
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn test_half_ticks_approximate_one_tick() {
        let mut whole = seeded(1, 400, 400);
        whole.particles_mut()[0] = Particle {
            velocity: Vec2::new(0.1, -0.3),
            ..still(Vec2::new(200.0, 200.0))
        };
        let mut halves = whole.clone();

        whole.step();
        halves.advance(0.5);
        halves.advance(0.5);

        let a = whole.particles()[0];
        let b = halves.particles()[0];
        assert!(a.position.distance(b.position) < 0.01);
        assert!((a.alpha - b.alpha).abs() < 1e-5);
    }
}
