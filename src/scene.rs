//! Scene driver: ties store, animator, mode, and sink into a frame loop.

use crate::animator::Animator;
use crate::config::SceneConfig;
use crate::mode::{Mode, ModeController};
use crate::render::InstanceSink;
use crate::store::ParticleStore;

/// The simulation core behind one display.
///
/// Owns the particle store, the animator state, and the mode controller.
/// External code calls [`Scene::init`] once before the first frame, then
/// [`Scene::frame`] from the render loop and [`Scene::toggle`] from input
/// handling. Everything runs synchronously within a frame; the sink sees a
/// fully consistent batch of `N` transforms before each flush.
pub struct Scene<S: InstanceSink> {
    store: ParticleStore,
    animator: Animator,
    controller: ModeController,
    sink: S,
}

impl<S: InstanceSink> Scene<S> {
    /// Generate the particle store and wire up the sink.
    pub fn new(config: &SceneConfig, sink: S) -> Self {
        Self {
            store: ParticleStore::generate(config),
            animator: Animator::new(config.damping),
            controller: ModeController::new(),
            sink,
        }
    }

    /// One-time setup pass: push every instance's static color and its rest
    /// transform. Must run before the first [`Scene::frame`].
    pub fn init(&mut self) {
        for particle in self.store.iter() {
            self.sink.set_color(particle.id, particle.color);
            self.sink
                .write_transform(particle.id, &self.animator.transform(particle));
        }
        self.sink.flush();
    }

    /// Advance one frame by `dt` seconds.
    ///
    /// Polls the mode controller, damps the blend toward its target, writes
    /// all transforms, and flushes the batch. An empty store is a violated
    /// precondition: fatal in debug builds, a skipped frame otherwise.
    pub fn frame(&mut self, dt: f32) {
        if self.store.is_empty() {
            debug_assert!(false, "frame before layout generation completed");
            return;
        }

        self.animator.advance(self.controller.target(), dt);
        for particle in self.store.iter() {
            self.sink
                .write_transform(particle.id, &self.animator.transform(particle));
        }
        self.sink.flush();
    }

    /// Flip between scattered and formed. The external UI trigger.
    pub fn toggle(&mut self) {
        self.controller.toggle();
    }

    /// Current discrete mode.
    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Current blend value.
    pub fn blend(&self) -> f32 {
        self.animator.blend()
    }

    /// Number of particles in the scene.
    pub fn particle_count(&self) -> u32 {
        self.store.len() as u32
    }

    /// The particle store.
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::InstanceBuffer;

    fn test_scene() -> Scene<InstanceBuffer> {
        let config = SceneConfig::new().with_counts(40, 4).with_seed(5);
        let sink = InstanceBuffer::new(config.total_count());
        Scene::new(&config, sink)
    }

    #[test]
    fn test_init_pushes_colors_and_flushes() {
        let mut scene = test_scene();
        scene.init();

        assert!(scene.sink_mut().take_dirty());
        let store_colors: Vec<[f32; 3]> =
            scene.store().iter().map(|p| p.color.to_array()).collect();
        for (instance, color) in scene.sink().instances().iter().zip(store_colors) {
            assert_eq!(instance.color, color);
        }
    }

    #[test]
    fn test_frame_marks_sink_dirty() {
        let mut scene = test_scene();
        scene.init();
        scene.sink_mut().take_dirty();

        scene.frame(1.0 / 60.0);
        assert!(scene.sink_mut().take_dirty());
    }

    #[test]
    fn test_toggle_redirects_blend() {
        let mut scene = test_scene();
        scene.init();
        assert_eq!(scene.mode(), Mode::Scattered);

        scene.toggle();
        for _ in 0..600 {
            scene.frame(1.0 / 60.0);
        }
        assert!(scene.blend() > 0.99);

        scene.toggle();
        for _ in 0..600 {
            scene.frame(1.0 / 60.0);
        }
        assert!(scene.blend() < 0.01);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "frame before layout generation")]
    fn test_frame_on_empty_store_is_fatal_in_debug() {
        let config = SceneConfig::new().with_counts(0, 0);
        let mut scene = Scene::new(&config, InstanceBuffer::new(0));
        scene.frame(1.0 / 60.0);
    }
}
