//! Scene configuration.
//!
//! All values are fixed at scene creation. The core performs no validation
//! beyond assuming positivity; degenerate values produce degenerate but
//! non-crashing geometry.

/// Configuration for particle counts, layout dimensions, and animation speed.
///
/// Use method chaining to adjust individual values:
///
/// ```
/// use treelight::SceneConfig;
///
/// let config = SceneConfig::new()
///     .with_counts(1000, 80)
///     .with_damping(4.0)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Number of needle particles (the body of the tree).
    pub primary_count: u32,
    /// Number of ornament particles (larger, gold-toned).
    pub accent_count: u32,
    /// Radius of the sphere the scattered cloud occupies.
    pub scatter_radius: f32,
    /// Total height of the tree formation.
    pub tree_height: f32,
    /// Cone radius at the base of the tree.
    pub tree_base_radius: f32,
    /// Damping factor controlling how fast the blend converges per second.
    pub damping: f32,
    /// Optional RNG seed. `None` draws fresh entropy each run.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            primary_count: 2500,
            accent_count: 150,
            scatter_radius: 25.0,
            tree_height: 14.0,
            tree_base_radius: 5.0,
            damping: 2.5,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of particles in the scene.
    #[inline]
    pub fn total_count(&self) -> u32 {
        self.primary_count + self.accent_count
    }

    /// Set the needle and ornament counts.
    pub fn with_counts(mut self, primary: u32, accent: u32) -> Self {
        self.primary_count = primary;
        self.accent_count = accent;
        self
    }

    /// Set the scatter sphere radius.
    pub fn with_scatter_radius(mut self, radius: f32) -> Self {
        self.scatter_radius = radius;
        self
    }

    /// Set the tree height and base radius.
    pub fn with_tree_size(mut self, height: f32, base_radius: f32) -> Self {
        self.tree_height = height;
        self.tree_base_radius = base_radius;
        self
    }

    /// Set the blend damping factor.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Seed the layout RNG for reproducible generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let config = SceneConfig::default();
        assert_eq!(config.total_count(), 2650);
    }

    #[test]
    fn test_builder_chain() {
        let config = SceneConfig::new()
            .with_counts(10, 2)
            .with_scatter_radius(3.0)
            .with_tree_size(8.0, 2.0)
            .with_damping(1.0)
            .with_seed(42);

        assert_eq!(config.total_count(), 12);
        assert_eq!(config.scatter_radius, 3.0);
        assert_eq!(config.tree_height, 8.0);
        assert_eq!(config.seed, Some(42));
    }
}
