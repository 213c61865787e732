// Simple particle struct to keep track of individual position, velocity,
// depth, and dot radius for the parallax background

use rand::Rng;
use vecmath::{vec2_add, Vector2};

use crate::viewport::Viewport;

#[derive(Copy, Clone)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    /// Simulated distance from the viewer; 1.0 reads as closest.
    /// Scales speed, dot size, opacity, and parallax magnitude.
    pub depth: f64,
    pub radius: f64,
}

impl Particle {
    pub const MIN_DEPTH: f64 = 0.2;
    pub const MAX_DEPTH: f64 = 1.0;
    pub const MAX_DRIFT: f64 = 0.25;
    pub const MIN_RADIUS: f64 = 1.2;
    pub const MAX_RADIUS: f64 = 2.4;
    /// Margin outside the surface before a particle wraps to the far edge.
    pub const WRAP_MARGIN: f64 = 10.0;
    const DEPTH_SPEED_SCALE: f64 = 2.0;
    const PARALLAX_STRENGTH: f64 = 0.0008;

    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, depth: f64, radius: f64) -> Particle {
        Particle {
            pos,
            vel,
            depth,
            radius,
        }
    }

    /// Fresh particle somewhere on the surface. Depth, velocity, and
    /// radius are fixed for the particle's lifetime; only the position
    /// mutates afterwards.
    pub fn random<R: Rng>(rng: &mut R, surface_width: f64, surface_height: f64) -> Particle {
        Particle {
            pos: [
                rng.gen_range(0.0, surface_width),
                rng.gen_range(0.0, surface_height),
            ],
            vel: [
                rng.gen_range(-Self::MAX_DRIFT, Self::MAX_DRIFT),
                rng.gen_range(-Self::MAX_DRIFT, Self::MAX_DRIFT),
            ],
            depth: rng.gen_range(Self::MIN_DEPTH, Self::MAX_DEPTH),
            radius: rng.gen_range(Self::MIN_RADIUS, Self::MAX_RADIUS),
        }
    }

    /// One frame of drift. Deeper particles move faster, and anything
    /// past the wrap margin re-enters from the opposite edge.
    pub fn step(&mut self, viewport: &Viewport) {
        self.pos[0] += self.vel[0] * self.depth * Self::DEPTH_SPEED_SCALE;
        self.pos[1] += self.vel[1] * self.depth * Self::DEPTH_SPEED_SCALE;
        self.pos[0] = wrap(self.pos[0], viewport.surface_width());
        self.pos[1] = wrap(self.pos[1], viewport.surface_height());
    }

    /// Pointer-driven offset for this frame's draw position. Stored
    /// position is left alone; the offset is recomputed every frame.
    pub fn parallax_offset(&self, pointer: Vector2<f64>, viewport: &Viewport) -> Vector2<f64> {
        let width = viewport.surface_width();
        let height = viewport.surface_height();
        let dx = (pointer[0] - width * 0.5) * Self::PARALLAX_STRENGTH * self.depth;
        let dy = (pointer[1] - height * 0.5) * Self::PARALLAX_STRENGTH * self.depth;
        [dx * width, dy * height]
    }

    pub fn draw_pos(&self, pointer: Vector2<f64>, viewport: &Viewport) -> Vector2<f64> {
        vec2_add(self.pos, self.parallax_offset(pointer, viewport))
    }
}

// Assignment, not modular arithmetic: re-entry positions are exact.
fn wrap(coord: f64, extent: f64) -> f64 {
    if coord < -Particle::WRAP_MARGIN {
        extent + Particle::WRAP_MARGIN
    } else if coord > extent + Particle::WRAP_MARGIN {
        -Particle::WRAP_MARGIN
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn still_particle(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 0.5, 1.5)
    }

    #[test]
    fn random_particles_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 1200.0, 800.0);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 1200.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 800.0);
            assert!(p.depth >= Particle::MIN_DEPTH && p.depth <= Particle::MAX_DEPTH);
            assert!(p.vel[0] >= -Particle::MAX_DRIFT && p.vel[0] <= Particle::MAX_DRIFT);
            assert!(p.vel[1] >= -Particle::MAX_DRIFT && p.vel[1] <= Particle::MAX_DRIFT);
            assert!(p.radius >= Particle::MIN_RADIUS && p.radius <= Particle::MAX_RADIUS);
        }
    }

    #[test]
    fn wrap_left_edge_is_exact() {
        let viewport = Viewport::new(640.0, 480.0, 1.0);
        let mut p = still_particle(-11.0, 100.0);
        p.step(&viewport);
        assert_eq!(p.pos[0], 640.0 + Particle::WRAP_MARGIN);
        assert_eq!(p.pos[1], 100.0);
    }

    #[test]
    fn wrap_right_and_bottom_edges_are_exact() {
        let viewport = Viewport::new(640.0, 480.0, 1.0);
        let mut p = still_particle(651.0, 491.0);
        p.step(&viewport);
        assert_eq!(p.pos[0], -Particle::WRAP_MARGIN);
        assert_eq!(p.pos[1], -Particle::WRAP_MARGIN);
    }

    #[test]
    fn step_scales_drift_by_depth() {
        let viewport = Viewport::new(640.0, 480.0, 1.0);
        let mut p = Particle::new([100.0, 100.0], [0.25, -0.1], 0.5, 1.5);
        p.step(&viewport);
        assert!((p.pos[0] - 100.25).abs() < 1e-12);
        assert!((p.pos[1] - 99.9).abs() < 1e-12);
    }

    #[test]
    fn parallax_offset_is_linear_in_depth() {
        let viewport = Viewport::new(1000.0, 500.0, 1.0);
        let pointer = [900.0, 400.0];
        let near = Particle::new([0.0, 0.0], [0.0, 0.0], 0.8, 1.5);
        let far = Particle::new([0.0, 0.0], [0.0, 0.0], 0.4, 1.5);
        let near_offset = near.parallax_offset(pointer, &viewport);
        let far_offset = far.parallax_offset(pointer, &viewport);
        assert!((near_offset[0] - 2.0 * far_offset[0]).abs() < 1e-12);
        assert!((near_offset[1] - 2.0 * far_offset[1]).abs() < 1e-12);
    }

    #[test]
    fn parallax_leaves_stored_position_alone() {
        let viewport = Viewport::new(1000.0, 500.0, 1.0);
        let p = still_particle(10.0, 20.0);
        let drawn = p.draw_pos([900.0, 400.0], &viewport);
        assert_ne!(drawn, p.pos);
        assert_eq!(p.pos, [10.0, 20.0]);
    }

    #[test]
    fn pointer_at_center_means_no_offset() {
        let viewport = Viewport::new(1000.0, 500.0, 1.0);
        let p = still_particle(10.0, 20.0);
        assert_eq!(p.parallax_offset([500.0, 250.0], &viewport), [0.0, 0.0]);
    }
}
