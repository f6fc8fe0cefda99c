/// CullingFrustum - symmetric view frustum described by its near-plane
/// half-sizes and its near/far distances.
///
/// Corners are generated in view space (camera at the origin looking down
/// -Z, +Y up), which is the frame the SAT test works in.

use glam::{Mat4, Vec3};

/// Corner indices, in the order the SAT test expects
pub const NEAR_TOP_RIGHT: usize = 0;
pub const NEAR_TOP_LEFT: usize = 1;
pub const NEAR_BOTTOM_RIGHT: usize = 2;
pub const NEAR_BOTTOM_LEFT: usize = 3;
pub const FAR_TOP_RIGHT: usize = 4;
pub const FAR_TOP_LEFT: usize = 5;
pub const FAR_BOTTOM_RIGHT: usize = 6;
pub const FAR_BOTTOM_LEFT: usize = 7;

/// Frustum used for culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingFrustum {
    /// Half-width of the near plane
    pub near_right: f32,
    /// Half-height of the near plane
    pub near_top: f32,
    /// Distance to the near plane
    pub near_plane: f32,
    /// Distance to the far plane
    pub far_plane: f32,
}

/// Build a culling frustum from projection parameters
///
/// # Arguments
///
/// * `vfov` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near` - Near plane distance (> 0)
/// * `far` - Far plane distance (> near)
pub fn make_frustum(vfov: f32, aspect: f32, near: f32, far: f32) -> CullingFrustum {
    let near_top = near * (vfov * 0.5).tan();
    CullingFrustum {
        near_right: near_top * aspect,
        near_top,
        near_plane: near,
        far_plane: far,
    }
}

impl CullingFrustum {
    /// The 8 corners in view space
    ///
    /// Order: near top-right, near top-left, near bottom-right, near
    /// bottom-left, then the same four on the far plane.
    pub fn corners(&self) -> [Vec3; 8] {
        let scale = self.far_plane / self.near_plane;
        let (nr, nt, n) = (self.near_right, self.near_top, self.near_plane);
        let (fr, ft, f) = (nr * scale, nt * scale, self.far_plane);
        [
            Vec3::new(nr, nt, -n),
            Vec3::new(-nr, nt, -n),
            Vec3::new(nr, -nt, -n),
            Vec3::new(-nr, -nt, -n),
            Vec3::new(fr, ft, -f),
            Vec3::new(-fr, ft, -f),
            Vec3::new(fr, -ft, -f),
            Vec3::new(-fr, -ft, -f),
        ]
    }

    /// The 8 corners transformed by `world_from_view`
    pub fn corners_in(&self, world_from_view: &Mat4) -> [Vec3; 8] {
        self.corners().map(|corner| world_from_view.transform_point3(corner))
    }

    /// True if the view-space point lies inside or on the frustum
    pub fn contains_point(&self, point: Vec3) -> bool {
        let depth = -point.z;
        if depth < self.near_plane || depth > self.far_plane {
            return false;
        }
        let slope_x = self.near_right / self.near_plane;
        let slope_y = self.near_top / self.near_plane;
        point.x.abs() <= depth * slope_x && point.y.abs() <= depth * slope_y
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
