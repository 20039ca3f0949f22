//! # treelight
//!
//! An instanced 3D particle display that morphs between two states: a
//! scattered cloud of points and a spiral-cone tree formation, toggled by
//! user input.
//!
//! ## Quick Start
//!
//! ```no_run
//! use treelight::SceneConfig;
//!
//! fn main() {
//!     treelight::run(SceneConfig::default()).unwrap();
//! }
//! ```
//!
//! Space toggles between scattered and formed; the mouse orbits and zooms.
//!
//! ## Core Concepts
//!
//! ### Dual reference poses
//!
//! Every particle gets two positions at generation time: a deterministic
//! spot on the spiral-cone tree (golden-angle phyllotaxis) and a random spot
//! inside the scatter sphere (uniform by volume). Both are fixed for the
//! run; animation is purely a function of one scalar blend value, which is
//! what makes transitions smooth, reversible, and frame-rate independent.
//!
//! ### Frame loop
//!
//! Each frame the [`Scene`] polls the [`ModeController`], damps the blend
//! toward the mode target, computes all `N` transforms from the shared
//! blend/clock state, and flushes the batch to an [`InstanceSink`]. The sink
//! contract guarantees the renderer never observes a half-written batch.
//!
//! ### Driving the core yourself
//!
//! The windowed front end is optional. Anything that implements
//! [`InstanceSink`] can consume the simulation:
//!
//! ```
//! use treelight::{InstanceBuffer, Scene, SceneConfig};
//!
//! let config = SceneConfig::new().with_counts(100, 8).with_seed(42);
//! let mut scene = Scene::new(&config, InstanceBuffer::new(config.total_count()));
//! scene.init();
//! scene.toggle();
//! scene.frame(1.0 / 60.0);
//! ```

mod animator;
mod app;
mod config;
mod error;
mod gpu;
pub mod greeting;
pub mod layout;
mod mode;
mod particle;
mod render;
mod scene;
mod store;
pub mod time;

pub use animator::{Animator, InstanceTransform};
pub use app::run;
pub use config::SceneConfig;
pub use error::{GpuError, SceneError};
pub use glam::{Mat4, Vec3};
pub use layout::{LayoutContext, GOLDEN_ANGLE};
pub use mode::{Mode, ModeController};
pub use particle::{palette, Category, Particle};
pub use render::{Instance, InstanceBuffer, InstanceSink};
pub use scene::Scene;
pub use store::ParticleStore;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::animator::{Animator, InstanceTransform};
    pub use crate::config::SceneConfig;
    pub use crate::mode::{Mode, ModeController};
    pub use crate::particle::{palette, Category, Particle};
    pub use crate::render::{Instance, InstanceBuffer, InstanceSink};
    pub use crate::scene::Scene;
    pub use crate::store::ParticleStore;
    pub use crate::time::Time;
    pub use crate::{Mat4, Vec3};
}
