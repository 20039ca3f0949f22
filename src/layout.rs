//! Procedural dual-position layout generation.
//!
//! Runs exactly once at scene startup. For every index the generator produces
//! a deterministic spiral-cone position (golden-angle phyllotaxis), a random
//! scatter position (uniform by volume inside a sphere), and the static
//! attributes the animator and renderer read for the rest of the run.

use crate::config::SceneConfig;
use crate::particle::{palette, Category, Particle};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Golden angle in radians. Successive indices land ~137.5 degrees apart,
/// so no two neighbors in sequence share a similar azimuth.
pub const GOLDEN_ANGLE: f32 = 2.39996;

/// Half-range of the per-axis jitter added to tree positions, to give the
/// otherwise perfectly smooth cone surface some volume.
const TREE_JITTER: f32 = 0.25;

/// Random source for layout generation.
///
/// Wraps a `SmallRng` so generation can be seeded for reproducible output,
/// or left unseeded for a fresh arrangement each run.
pub struct LayoutContext {
    rng: SmallRng,
}

impl LayoutContext {
    /// Create a context, seeded when `seed` is `Some`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { rng }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside a sphere of given radius, uniform by volume.
    ///
    /// The radial distance takes a cube root of a uniform draw so points do
    /// not cluster at the center, and the polar angle is arccos-transformed
    /// so directions do not bunch at the poles.
    pub fn random_in_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = (2.0 * self.rng.gen::<f32>() - 1.0).acos();
        let r = radius * self.rng.gen::<f32>().cbrt();

        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }
}

/// Un-jittered spiral-cone position for an index.
///
/// Height ramps linearly from `-tree_height/2` at index 0 toward the apex,
/// and the cone radius tapers linearly to 0 at the top.
pub fn cone_point(index: u32, total: u32, config: &SceneConfig) -> Vec3 {
    let pct = index as f32 / total as f32;
    let y = pct * config.tree_height - config.tree_height / 2.0;
    let radius = config.tree_base_radius * (1.0 - pct);
    let theta = index as f32 * GOLDEN_ANGLE;
    Vec3::new(radius * theta.cos(), y, radius * theta.sin())
}

/// Generate all particle records for a scene.
///
/// Produces `config.total_count()` records with dense ids `[0, N)`. The
/// first `primary_count` indices are needles, the remainder ornaments.
pub fn generate(config: &SceneConfig) -> Vec<Particle> {
    let total = config.total_count();
    let mut ctx = LayoutContext::new(config.seed);

    (0..total)
        .map(|index| {
            let category = if index < config.primary_count {
                Category::Needle
            } else {
                Category::Ornament
            };

            // Static per-particle jitter, fixed for the run.
            let mut tree_pos = cone_point(index, total, config);
            tree_pos.x += ctx.random_range(-TREE_JITTER, TREE_JITTER);
            tree_pos.z += ctx.random_range(-TREE_JITTER, TREE_JITTER);

            let scatter_pos = ctx.random_in_sphere(config.scatter_radius);

            let base_rotation = Vec3::new(ctx.random() * PI, ctx.random() * PI, 0.0);

            let scale = match category {
                Category::Needle => ctx.random_range(0.05, 0.20),
                Category::Ornament => ctx.random_range(0.20, 0.60),
            };

            let color = pick_color(&mut ctx, category);

            Particle {
                id: index,
                tree_pos,
                scatter_pos,
                base_rotation,
                scale,
                category,
                color,
            }
        })
        .collect()
}

/// Weighted color draw for a category.
///
/// Ornaments are mostly metallic gold with pale-gold and rare ruby outliers;
/// needles split evenly between the two emerald shades.
fn pick_color(ctx: &mut LayoutContext, category: Category) -> Vec3 {
    match category {
        Category::Ornament => {
            let mut color = palette::GOLD_METALLIC;
            if ctx.random() > 0.8 {
                color = palette::GOLD_PALE;
            }
            if ctx.random() > 0.95 {
                color = palette::ACCENT_RED;
            }
            color
        }
        Category::Needle => {
            if ctx.random() > 0.5 {
                palette::EMERALD_DEEP
            } else {
                palette::EMERALD_LIGHT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        SceneConfig::new()
            .with_counts(200, 20)
            .with_scatter_radius(10.0)
            .with_tree_size(14.0, 5.0)
            .with_seed(1234)
    }

    #[test]
    fn test_generate_dense_ids() {
        let config = small_config();
        let particles = generate(&config);

        assert_eq!(particles.len(), 220);
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.id, i as u32);
        }
    }

    #[test]
    fn test_category_split_by_index() {
        let config = small_config();
        let particles = generate(&config);

        for p in &particles {
            if p.id < config.primary_count {
                assert_eq!(p.category, Category::Needle);
            } else {
                assert_eq!(p.category, Category::Ornament);
            }
        }
    }

    #[test]
    fn test_cone_base_and_apex() {
        let config = small_config();
        let total = config.total_count();

        // Index 0: bottom of the ramp at full base radius.
        let base = cone_point(0, total, &config);
        assert_eq!(base.y, -config.tree_height / 2.0);
        let base_r = (base.x * base.x + base.z * base.z).sqrt();
        assert!((base_r - config.tree_base_radius).abs() < 1e-5);

        // pct = 1 would be index == total; radius must taper to exactly 0.
        let apex = cone_point(total, total, &config);
        assert!((apex.x * apex.x + apex.z * apex.z).sqrt() < 1e-5);
        assert_eq!(apex.y, config.tree_height / 2.0);
    }

    #[test]
    fn test_cone_radius_monotone_taper() {
        let config = small_config();
        let total = config.total_count();

        let mut prev = f32::INFINITY;
        for i in 0..total {
            let p = cone_point(i, total, &config);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r <= prev + 1e-5);
            prev = r;
        }
    }

    #[test]
    fn test_tree_jitter_bounded() {
        let config = small_config();
        let total = config.total_count();
        let particles = generate(&config);

        for p in &particles {
            let smooth = cone_point(p.id, total, &config);
            assert!((p.tree_pos.x - smooth.x).abs() <= TREE_JITTER);
            assert!((p.tree_pos.z - smooth.z).abs() <= TREE_JITTER);
            // Height carries no jitter.
            assert_eq!(p.tree_pos.y, smooth.y);
        }
    }

    #[test]
    fn test_scatter_within_radius() {
        let mut ctx = LayoutContext::new(Some(99));
        for _ in 0..1000 {
            let p = ctx.random_in_sphere(10.0);
            assert!(p.length() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_scatter_volumetric_distribution() {
        // Uniform-by-volume sampling puts 7/8 of the points outside half the
        // radius. A surface-biased or center-clustered sampler fails this.
        let mut ctx = LayoutContext::new(Some(7));
        let radius = 10.0;
        let mut outer = 0u32;
        let trials = 10_000;
        for _ in 0..trials {
            if ctx.random_in_sphere(radius).length() > radius * 0.5 {
                outer += 1;
            }
        }
        let fraction = outer as f32 / trials as f32;
        assert!(fraction > 0.82 && fraction < 0.93, "outer fraction {fraction}");
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = small_config();
        let a = generate(&config);
        let b = generate(&config);

        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.tree_pos, pb.tree_pos);
            assert_eq!(pa.scatter_pos, pb.scatter_pos);
            assert_eq!(pa.scale, pb.scale);
            assert_eq!(pa.color, pb.color);
        }
    }

    #[test]
    fn test_scale_ranges_by_category() {
        let particles = generate(&small_config());
        for p in &particles {
            match p.category {
                Category::Needle => assert!(p.scale >= 0.05 && p.scale < 0.20),
                Category::Ornament => assert!(p.scale >= 0.20 && p.scale < 0.60),
            }
        }
    }
}
