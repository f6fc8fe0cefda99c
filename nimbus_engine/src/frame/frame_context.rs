/// FrameContext - everything one frame records, computed before recording
///
/// Built by the `Viewer` (or any other driver of the frame core) and passed
/// by reference to `FrameRenderer::record_and_submit`. Nothing here is
/// shared between frames.

use glam::Mat4;
use crate::scene::{ObjectInstance, TransformBundle};
use super::uniforms::{CameraUniforms, LineVertex, WorldUniforms};

#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    /// Animation time in seconds (pushed to the background and objects pipelines)
    pub time: f32,
    /// Camera matrix of the lines pipeline
    pub clip_from_world: Mat4,
    /// Lighting constants of the objects pipeline
    pub world: WorldUniforms,
    /// Instances to draw, in draw order
    pub instances: Vec<ObjectInstance>,
    /// Line list (pairs of vertices)
    pub line_vertices: Vec<LineVertex>,
}

impl FrameContext {
    pub fn new(time: f32, clip_from_world: Mat4) -> Self {
        Self {
            time,
            clip_from_world,
            ..Self::default()
        }
    }

    pub fn camera_uniforms(&self) -> CameraUniforms {
        CameraUniforms { clip_from_world: self.clip_from_world }
    }

    /// Transforms stream contents, one bundle per instance
    pub fn transforms(&self) -> Vec<TransformBundle> {
        self.instances.iter().map(|instance| instance.transform).collect()
    }

    /// Bytes of the lines stream
    pub fn lines_bytes(&self) -> u64 {
        std::mem::size_of_val(self.line_vertices.as_slice()) as u64
    }

    /// Bytes of the transforms stream
    pub fn transforms_bytes(&self) -> u64 {
        (self.instances.len() * std::mem::size_of::<TransformBundle>()) as u64
    }
}
