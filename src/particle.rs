//! Particle records and the scene palette.
//!
//! Every particle carries two reference poses fixed at creation: the position
//! it occupies in the scattered cloud and the position it converges to in the
//! tree formation. The animator interpolates between the two each frame; the
//! records themselves are never mutated.

use glam::Vec3;

/// Visual category of a particle.
///
/// The category decides scale range, palette, and spin behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Small emerald particles forming the body of the tree.
    Needle,
    /// Larger gold-toned particles sprinkled through the formation.
    Ornament,
}

/// An immutable particle record.
///
/// `id` is a dense index in `[0, N)` and doubles as the slot into the
/// renderer's instance buffer. The mapping is stable for the whole run.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Dense sequence index, stable for the lifetime of the run.
    pub id: u32,
    /// Position in the tree formation.
    pub tree_pos: Vec3,
    /// Position in the scattered cloud.
    pub scatter_pos: Vec3,
    /// Angular seed applied before any per-frame spin (radians, XYZ).
    pub base_rotation: Vec3,
    /// Base uniform scale.
    pub scale: f32,
    /// Needle or ornament.
    pub category: Category,
    /// Static instance color, resolved once at creation.
    pub color: Vec3,
}

/// Fixed scene palette (RGB, 0-1 per channel).
pub mod palette {
    use glam::Vec3;

    /// Darkest needle green.
    pub const EMERALD_DEEP: Vec3 = Vec3::new(0.008, 0.102, 0.071);
    /// Lighter needle green.
    pub const EMERALD_LIGHT: Vec3 = Vec3::new(0.043, 0.290, 0.204);
    /// Rich amber gold, the common ornament color.
    pub const GOLD_METALLIC: Vec3 = Vec3::new(1.0, 0.749, 0.0);
    /// Champagne gold.
    pub const GOLD_PALE: Vec3 = Vec3::new(0.976, 0.898, 0.737);
    /// Deep ruby, a rare ornament outlier.
    pub const ACCENT_RED: Vec3 = Vec3::new(0.541, 0.012, 0.012);
}
