//! Frame-by-frame blend and transform engine.
//!
//! The animator owns the only mutable simulation state carried between
//! frames: the scalar blend value and the elapsed clock. Each frame it damps
//! the blend toward the mode target, then derives every particle's live
//! transform from the two static reference poses plus secondary motion.

use crate::particle::{Category, Particle};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Amplitude of the ambient vertical float while scattered.
const FLOAT_AMPLITUDE: f32 = 0.1;
/// Frequency of the global breathing oscillation, radians per second.
const BREATH_RATE: f32 = 0.5;
/// Amplitude of the breathing oscillation.
const BREATH_AMPLITUDE: f32 = 0.02;
/// Blend level above which the formation starts breathing.
const BREATH_THRESHOLD: f32 = 0.8;
/// Vertical offset so breathing lifts the whole tree, not just the top half.
const BREATH_HEIGHT_BIAS: f32 = 10.0;
/// Scales the height-weighted breathing displacement.
const BREATH_HEIGHT_SCALE: f32 = 0.1;
/// Ornament spin rates on x and y, radians per second.
const ORNAMENT_SPIN: (f32, f32) = (0.2, 0.1);
/// Needle spin rate on y, radians per second.
const NEEDLE_SPIN: f32 = 0.05;

/// A particle's live pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    /// World position.
    pub position: Vec3,
    /// Euler rotation in radians (XYZ order).
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl InstanceTransform {
    /// Column-major model matrix for the instance buffer.
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

/// Advances the blend each frame and computes per-particle transforms.
pub struct Animator {
    blend: f32,
    elapsed: f32,
    damping: f32,
}

impl Animator {
    /// Create an animator starting fully scattered (`blend = 0`).
    pub fn new(damping: f32) -> Self {
        Self {
            blend: 0.0,
            elapsed: 0.0,
            damping,
        }
    }

    /// Current blend value in `[0, 1]`. 0 = scattered, 1 = formed.
    #[inline]
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// Seconds of simulated time since the scene started. Never resets.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the blend toward `target` by `dt` seconds of real time.
    ///
    /// Exponential damping keyed by elapsed time, so convergence speed is
    /// independent of frame rate. The step factor is clamped at 1 so a huge
    /// frame delta lands exactly on the target instead of overshooting.
    pub fn advance(&mut self, target: f32, dt: f32) {
        let step = (dt * self.damping).min(1.0);
        self.blend += (target - self.blend) * step;
        self.elapsed += dt;
    }

    /// Global breathing term for the current elapsed time.
    #[inline]
    fn breath(&self) -> f32 {
        (self.elapsed * BREATH_RATE).sin() * BREATH_AMPLITUDE
    }

    /// Compute a particle's transform for the current frame.
    ///
    /// Position interpolates between the two reference poses by the shared
    /// blend value. Secondary motion: an ambient float that fades out as the
    /// formation assembles (phase keyed by scatter x, so particles float out
    /// of step with each other), and a height-weighted breathing lift once
    /// the tree is mostly formed. Ornaments spin on two axes, needles drift
    /// on one.
    pub fn transform(&self, particle: &Particle) -> InstanceTransform {
        let breath = self.breath();
        let mut position = particle.scatter_pos.lerp(particle.tree_pos, self.blend);

        position.y +=
            (self.elapsed + particle.scatter_pos.x).sin() * FLOAT_AMPLITUDE * (1.0 - self.blend);

        if self.blend > BREATH_THRESHOLD {
            position.y +=
                breath * (particle.tree_pos.y + BREATH_HEIGHT_BIAS) * BREATH_HEIGHT_SCALE;
        }

        let seed = particle.base_rotation;
        let rotation = match particle.category {
            Category::Ornament => Vec3::new(
                seed.x + self.elapsed * ORNAMENT_SPIN.0,
                seed.y + self.elapsed * ORNAMENT_SPIN.1,
                seed.z,
            ),
            Category::Needle => Vec3::new(seed.x, seed.y + self.elapsed * NEEDLE_SPIN, seed.z),
        };

        InstanceTransform {
            position,
            rotation,
            scale: particle.scale * (1.0 + breath),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::palette;

    fn test_particle(category: Category) -> Particle {
        Particle {
            id: 0,
            tree_pos: Vec3::new(1.0, 3.0, -2.0),
            scatter_pos: Vec3::new(-8.0, 5.0, 4.0),
            base_rotation: Vec3::new(0.4, 1.1, 0.0),
            scale: 0.3,
            category,
            color: palette::GOLD_METALLIC,
        }
    }

    #[test]
    fn test_blend_starts_at_zero() {
        let animator = Animator::new(2.5);
        assert_eq!(animator.blend(), 0.0);
        assert_eq!(animator.elapsed(), 0.0);
    }

    #[test]
    fn test_blend_converges_monotonically() {
        let mut animator = Animator::new(2.5);
        let mut prev = animator.blend();
        for _ in 0..300 {
            animator.advance(1.0, 1.0 / 60.0);
            let blend = animator.blend();
            assert!(blend >= prev);
            assert!((0.0..=1.0).contains(&blend));
            prev = blend;
        }
        assert!((1.0 - animator.blend()).abs() < 1e-3);
    }

    #[test]
    fn test_blend_never_overshoots_on_large_delta() {
        let mut animator = Animator::new(2.5);
        // One pathological 10-second frame: step clamps at 1, landing exactly
        // on the target.
        animator.advance(1.0, 10.0);
        assert_eq!(animator.blend(), 1.0);
    }

    #[test]
    fn test_frame_rate_independence() {
        // Same wall-clock span at different frame cadences ends up at nearly
        // the same blend value.
        let mut coarse = Animator::new(2.5);
        let mut fine = Animator::new(2.5);
        for _ in 0..30 {
            coarse.advance(1.0, 1.0 / 30.0);
        }
        for _ in 0..120 {
            fine.advance(1.0, 1.0 / 120.0);
        }
        assert!((coarse.blend() - fine.blend()).abs() < 0.05);
    }

    #[test]
    fn test_retarget_reverses_without_jump() {
        let mut animator = Animator::new(2.5);
        while animator.blend() < 0.5 {
            animator.advance(1.0, 1.0 / 60.0);
        }
        let particle = test_particle(Category::Needle);
        let before = animator.transform(&particle).position;

        // Redirect the target; the next frame must move smoothly, not snap.
        animator.advance(0.0, 1.0 / 60.0);
        let after = animator.transform(&particle).position;
        assert!(before.distance(after) < 0.5);

        let mut prev = animator.blend();
        for _ in 0..60 {
            animator.advance(0.0, 1.0 / 60.0);
            assert!(animator.blend() <= prev);
            prev = animator.blend();
        }
    }

    #[test]
    fn test_position_interpolates_between_poses() {
        let particle = test_particle(Category::Needle);
        let animator = Animator::new(2.5);
        // blend = 0, elapsed = 0: the float term is sin(scatter.x) * 0.1.
        let t = animator.transform(&particle);
        let expected_y = particle.scatter_pos.y + particle.scatter_pos.x.sin() * 0.1;
        assert!((t.position.x - particle.scatter_pos.x).abs() < 1e-5);
        assert!((t.position.y - expected_y).abs() < 1e-5);
        assert!((t.position.z - particle.scatter_pos.z).abs() < 1e-5);
    }

    #[test]
    fn test_float_vanishes_when_formed() {
        let particle = test_particle(Category::Needle);
        let mut animator = Animator::new(2.5);
        animator.advance(1.0, 10.0); // lands exactly on 1.0

        let t = animator.transform(&particle);
        // Ambient float is scaled by (1 - blend) = 0; only breathing remains,
        // and elapsed = 10 gives a known breath value.
        let breath = (10.0_f32 * BREATH_RATE).sin() * BREATH_AMPLITUDE;
        let expected_y = particle.tree_pos.y
            + breath * (particle.tree_pos.y + BREATH_HEIGHT_BIAS) * BREATH_HEIGHT_SCALE;
        assert!((t.position.y - expected_y).abs() < 1e-5);
        assert!((t.scale - particle.scale * (1.0 + breath)).abs() < 1e-6);
    }

    #[test]
    fn test_no_breathing_below_threshold() {
        let particle = test_particle(Category::Needle);
        let mut animator = Animator::new(2.5);
        animator.advance(0.0, 10.0); // blend stays 0, elapsed advances

        let t = animator.transform(&particle);
        let float_y = (animator.elapsed() + particle.scatter_pos.x).sin() * FLOAT_AMPLITUDE;
        assert!((t.position.y - (particle.scatter_pos.y + float_y)).abs() < 1e-5);
    }

    #[test]
    fn test_spin_rates_by_category() {
        let mut animator = Animator::new(2.5);
        animator.advance(0.0, 2.0);

        let ornament = test_particle(Category::Ornament);
        let t = animator.transform(&ornament);
        assert!((t.rotation.x - (ornament.base_rotation.x + 2.0 * 0.2)).abs() < 1e-5);
        assert!((t.rotation.y - (ornament.base_rotation.y + 2.0 * 0.1)).abs() < 1e-5);

        let needle = test_particle(Category::Needle);
        let t = animator.transform(&needle);
        // Needles keep their seed on x and z.
        assert_eq!(t.rotation.x, needle.base_rotation.x);
        assert_eq!(t.rotation.z, needle.base_rotation.z);
        assert!((t.rotation.y - (needle.base_rotation.y + 2.0 * 0.05)).abs() < 1e-5);
    }

    #[test]
    fn test_matrix_applies_scale_and_translation() {
        let transform = InstanceTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            scale: 2.0,
        };
        let m = transform.matrix();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        let unit_x = m.transform_vector3(Vec3::X);
        assert!((unit_x.length() - 2.0).abs() < 1e-5);
    }
}
