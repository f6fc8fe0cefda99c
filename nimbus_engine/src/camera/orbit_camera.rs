/// OrbitCamera - user-controlled camera orbiting a target point.
///
/// World up is +Z. Azimuth turns around Z starting from +X, elevation tilts
/// up from the XY plane.

use glam::{Mat4, Vec3};
use crate::culling::{make_frustum, CullingFrustum};
use crate::math::{orbit, perspective};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: Vec3,
    /// Distance from the target
    pub radius: f32,
    /// Radians, counterclockwise from +X around +Z
    pub azimuth: f32,
    /// Radians above the XY plane
    pub elevation: f32,
    /// Vertical field of view in radians
    pub vfov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            radius: 2.0,
            azimuth: 0.0,
            elevation: std::f32::consts::FRAC_PI_4,
            vfov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    pub fn view_from_world(&self) -> Mat4 {
        orbit(self.target, self.azimuth, self.elevation, self.radius)
    }

    pub fn clip_from_view(&self, aspect: f32) -> Mat4 {
        perspective(self.vfov, aspect, self.near, self.far)
    }

    pub fn clip_from_world(&self, aspect: f32) -> Mat4 {
        self.clip_from_view(aspect) * self.view_from_world()
    }

    pub fn frustum(&self, aspect: f32) -> CullingFrustum {
        make_frustum(self.vfov, aspect, self.near, self.far)
    }

    /// World-space eye position
    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.target + self.radius * Vec3::new(ce * ca, ce * sa, se)
    }
}

#[cfg(test)]
#[path = "orbit_camera_tests.rs"]
mod tests;
