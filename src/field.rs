// Particle store for the background field. Regenerated wholesale on
// resize, stepped in place once per animation frame.

use rand::Rng;
use vecmath::{vec2_square_len, vec2_sub};

use crate::particle::Particle;
use crate::viewport::Viewport;

pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Logical-pixel area that yields one particle.
    pub const AREA_PER_PARTICLE: f64 = 18000.0;

    pub fn new() -> ParticleField {
        ParticleField {
            particles: Vec::new(),
        }
    }

    /// How many particles a viewport of this size carries.
    pub fn target_count(viewport: &Viewport) -> usize {
        (viewport.logical_area() / Self::AREA_PER_PARTICLE).floor() as usize
    }

    /// Throw away the old set and fill the field with fresh particles.
    /// A degenerate surface leaves the field empty; never an error.
    pub fn regenerate<R: Rng>(&mut self, viewport: &Viewport, rng: &mut R) {
        self.particles.clear();
        let width = viewport.surface_width();
        let height = viewport.surface_height();
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let count = Self::target_count(viewport);
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::random(rng, width, height));
        }
    }

    /// Advance every particle by one frame.
    pub fn advance(&mut self, viewport: &Viewport) {
        for particle in &mut self.particles {
            particle.step(viewport);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

/// Strength in (0, 1] of the line between two particles, None once they
/// sit at or past `radius` apart. Works on stored positions; the
/// parallax offset never feeds into connections.
pub fn connection_strength(a: &Particle, b: &Particle, radius: f64) -> Option<f64> {
    let delta = vec2_sub(a.pos, b.pos);
    let dist_sq = vec2_square_len(delta);
    if dist_sq < radius * radius {
        Some(1.0 - dist_sq.sqrt() / radius)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 0.5, 1.5)
    }

    #[test]
    fn count_follows_area_formula() {
        let viewport = Viewport::new(1800.0, 1000.0, 1.0);
        assert_eq!(ParticleField::target_count(&viewport), 100);
    }

    #[test]
    fn regenerate_fills_to_target_count() {
        let mut field = ParticleField::new();
        let mut rng = SmallRng::seed_from_u64(42);
        let viewport = Viewport::new(1800.0, 1000.0, 1.0);
        field.regenerate(&viewport, &mut rng);
        assert_eq!(field.len(), 100);
        field.regenerate(&viewport, &mut rng);
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn zero_area_viewport_empties_the_field() {
        let mut field = ParticleField::new();
        let mut rng = SmallRng::seed_from_u64(42);
        field.regenerate(&Viewport::new(1800.0, 1000.0, 1.0), &mut rng);
        assert!(!field.is_empty());
        field.regenerate(&Viewport::new(0.0, 0.0, 1.0), &mut rng);
        assert!(field.is_empty());
    }

    #[test]
    fn connection_at_exact_radius_is_excluded() {
        let a = particle_at(0.0, 0.0);
        let b = particle_at(120.0, 0.0);
        assert!(connection_strength(&a, &b, 120.0).is_none());
    }

    #[test]
    fn connection_at_zero_distance_is_full_strength() {
        let a = particle_at(30.0, 40.0);
        let b = particle_at(30.0, 40.0);
        assert_eq!(connection_strength(&a, &b, 120.0), Some(1.0));
    }

    #[test]
    fn connection_strength_falls_off_with_distance() {
        let a = particle_at(0.0, 0.0);
        let b = particle_at(60.0, 0.0);
        let strength = connection_strength(&a, &b, 120.0).unwrap();
        assert!((strength - 0.5).abs() < 1e-12);
    }
}
