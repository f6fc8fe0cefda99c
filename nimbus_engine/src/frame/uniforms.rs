/// GPU-visible per-frame data layouts
///
/// All types are `#[repr(C)]` + `Pod` and match the shader-side std140/std430
/// layouts (vec3 members padded to 16 bytes).

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Set 0 of the lines pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub clip_from_world: Mat4,
}

/// Set 0 of the objects pipeline: sky and sun lighting
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WorldUniforms {
    pub sky_direction: Vec3,
    _pad0: f32,
    pub sky_energy: Vec3,
    _pad1: f32,
    pub sun_direction: Vec3,
    _pad2: f32,
    pub sun_energy: Vec3,
    _pad3: f32,
}

impl WorldUniforms {
    pub fn new(sky_direction: Vec3, sky_energy: Vec3, sun_direction: Vec3, sun_energy: Vec3) -> Self {
        Self {
            sky_direction,
            _pad0: 0.0,
            sky_energy,
            _pad1: 0.0,
            sun_direction,
            _pad2: 0.0,
            sun_energy,
            _pad3: 0.0,
        }
    }
}

impl Default for WorldUniforms {
    /// Blue-ish sky straight up, warm sun along (6, 13, 18) / 23
    fn default() -> Self {
        Self::new(
            Vec3::Z,
            Vec3::new(0.1, 0.1, 0.2),
            Vec3::new(6.0, 13.0, 18.0) / 23.0,
            Vec3::new(1.0, 1.0, 0.9),
        )
    }
}

/// Vertex of the line-list stream
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: Vec3,
    /// RGBA8
    pub color: [u8; 4],
}

impl LineVertex {
    pub fn new(position: Vec3, color: [u8; 4]) -> Self {
        Self { position, color }
    }
}

/// Push constant block of the background and objects pipelines
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TimePush {
    pub time: f32,
}

#[cfg(test)]
#[path = "uniforms_tests.rs"]
mod tests;
