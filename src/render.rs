//! Instance-buffer contract between the animator and the renderer.
//!
//! The renderer consumes an ordered block of exactly `N` instances per frame,
//! indexed by particle id. Colors are pushed once during setup; transforms are
//! rewritten every frame, and `flush` marks the batch complete so the backend
//! knows its copy is stale.

use crate::animator::InstanceTransform;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One element of the GPU instance buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Instance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Static instance color.
    pub color: [f32; 3],
    pub _padding: f32,
}

/// Destination for per-instance colors and transforms.
///
/// Implementations must tolerate a full-batch rewrite every frame and only
/// consume the data after `flush` ends the batch; reading mid-batch would
/// tear the frame across instances sharing one draw call.
pub trait InstanceSink {
    /// Set an instance's static color. Called once per particle at setup.
    fn set_color(&mut self, id: u32, color: Vec3);

    /// Write an instance's transform for the current frame.
    fn write_transform(&mut self, id: u32, transform: &InstanceTransform);

    /// End the batch and mark the backing buffer as needing upload.
    fn flush(&mut self);
}

/// CPU-side instance buffer.
///
/// Staging store for the GPU path, and a complete sink on its own for tests.
pub struct InstanceBuffer {
    instances: Vec<Instance>,
    dirty: bool,
}

impl InstanceBuffer {
    /// Allocate a zeroed buffer for `count` instances.
    pub fn new(count: u32) -> Self {
        Self {
            instances: vec![Instance::zeroed(); count as usize],
            dirty: false,
        }
    }

    /// All instances, in particle-id order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Raw bytes for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Take the dirty flag, clearing it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl InstanceSink for InstanceBuffer {
    fn set_color(&mut self, id: u32, color: Vec3) {
        self.instances[id as usize].color = color.to_array();
    }

    fn write_transform(&mut self, id: u32, transform: &InstanceTransform) {
        self.instances[id as usize].model = transform.matrix().to_cols_array_2d();
    }

    fn flush(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_buffer_roundtrip() {
        let mut buffer = InstanceBuffer::new(4);
        buffer.set_color(2, Vec3::new(0.1, 0.2, 0.3));
        buffer.write_transform(
            2,
            &InstanceTransform {
                position: Vec3::new(5.0, 0.0, 0.0),
                rotation: Vec3::ZERO,
                scale: 1.0,
            },
        );

        let instance = buffer.instances()[2];
        assert_eq!(instance.color, [0.1, 0.2, 0.3]);
        // Translation lands in the fourth column.
        assert_eq!(instance.model[3][0], 5.0);
    }

    #[test]
    fn test_dirty_flag_set_by_flush() {
        let mut buffer = InstanceBuffer::new(1);
        assert!(!buffer.take_dirty());
        buffer.flush();
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());
    }

    #[test]
    fn test_instance_byte_layout() {
        // mat4 + vec3 + pad = 80 bytes, tightly packed for the vertex buffer.
        assert_eq!(std::mem::size_of::<Instance>(), 80);
        let buffer = InstanceBuffer::new(3);
        assert_eq!(buffer.as_bytes().len(), 240);
    }
}
