//! Fixed-size particle storage.

use crate::config::SceneConfig;
use crate::layout;
use crate::particle::Particle;

/// An ordered, fixed-size collection of particle records.
///
/// Created once at scene initialization and never resized. The animator and
/// renderer both index into it by particle id.
pub struct ParticleStore {
    particles: Box<[Particle]>,
}

impl ParticleStore {
    /// Run layout generation and store the result.
    pub fn generate(config: &SceneConfig) -> Self {
        Self {
            particles: layout::generate(config).into_boxed_slice(),
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Look up a particle by id.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&Particle> {
        self.particles.get(id as usize)
    }

    /// Iterate particles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
