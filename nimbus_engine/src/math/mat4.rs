/// Matrix/vector kernel
///
/// Pure functions over column-major 4x4 matrices (`glam::Mat4`) and
/// 4-component vectors. Projections target a Y-down clip space with depth
/// in [0, 1]; view matrices map the camera to the origin looking down -Z
/// with +Y up.

use glam::{Mat4, Vec3, Vec4};

/// View direction used by `look_at` when `target - eye` has no usable length
pub const FALLBACK_FORWARD: Vec3 = Vec3::NEG_Z;

/// Up hint used by `look_at` when `up` is zero or parallel to the view direction
pub const FALLBACK_UP: Vec3 = Vec3::Y;

/// Squared length below which a direction is treated as degenerate
const DEGENERATE_LENGTH_SQUARED: f32 = 1.0e-12;

/// Normalize `v`, or `None` if it is too short or not finite
pub fn try_normalize(v: Vec3) -> Option<Vec3> {
    let length_squared = v.length_squared();
    if length_squared.is_finite() && length_squared > DEGENERATE_LENGTH_SQUARED {
        Some(v / length_squared.sqrt())
    } else {
        None
    }
}

/// `a * b`
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    *a * *b
}

/// `a * v`
pub fn apply(a: &Mat4, v: Vec4) -> Vec4 {
    *a * v
}

/// Perspective projection (clip_from_view)
///
/// Y is flipped so +Y in view space lands at the top of a Y-down image, and
/// view depths `-near..-far` map to `0..1`.
///
/// # Arguments
///
/// * `vfov` - Vertical field of view in radians
/// * `aspect` - Width / height
/// * `near` - Near plane distance (> 0)
/// * `far` - Far plane distance (> near)
pub fn perspective(vfov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let e = 1.0 / (vfov * 0.5).tan();
    Mat4::from_cols(
        Vec4::new(e / aspect, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -e, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -0.5 - 0.5 * (far + near) / (far - near), -1.0),
        Vec4::new(0.0, 0.0, -(far * near) / (far - near), 0.0),
    )
}

/// Perspective projection with the far plane at infinity
///
/// Same conventions as `perspective`; view depth `-near` maps to 0 and
/// depth approaches 1 as distance grows.
pub fn infinite_perspective(vfov: f32, aspect: f32, near: f32) -> Mat4 {
    let e = 1.0 / (vfov * 0.5).tan();
    Mat4::from_cols(
        Vec4::new(e / aspect, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -e, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -1.0, -1.0),
        Vec4::new(0.0, 0.0, -near, 0.0),
    )
}

/// View matrix (view_from_world) for a camera at `eye` looking at `target`
///
/// `up` is orthogonalized against the view direction. Degenerate inputs
/// never produce NaN:
/// - `eye == target` looks along `FALLBACK_FORWARD`
/// - an `up` parallel to the view direction is replaced by `FALLBACK_UP`,
///   then by an arbitrary orthonormal vector
///
/// So `look_at(e, e, Vec3::Z)` is the identity orientation translated by `-e`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = try_normalize(target - eye).unwrap_or(FALLBACK_FORWARD);
    let up = orthonormal_up(forward, up);
    let right = forward.cross(up);

    Mat4::from_cols(
        Vec4::new(right.x, up.x, -forward.x, 0.0),
        Vec4::new(right.y, up.y, -forward.y, 0.0),
        Vec4::new(right.z, up.z, -forward.z, 0.0),
        Vec4::new(-right.dot(eye), -up.dot(eye), forward.dot(eye), 1.0),
    )
}

fn orthonormal_up(forward: Vec3, up: Vec3) -> Vec3 {
    for hint in [up, FALLBACK_UP] {
        if let Some(up) = try_normalize(hint - forward * hint.dot(forward)) {
            return up;
        }
    }
    forward.any_orthonormal_vector()
}

/// View matrix for a camera orbiting `target`
///
/// `azimuth` is the counterclockwise angle from +X in the XY plane,
/// `elevation` the angle up from the XY plane (both radians). The camera
/// sits `radius` away from the target and looks at it with +Z as world up.
/// Contains no division, so `radius == 0` is safe.
pub fn orbit(target: Vec3, azimuth: f32, elevation: f32, radius: f32) -> Mat4 {
    let (sa, ca) = azimuth.sin_cos();
    let (se, ce) = elevation.sin_cos();

    let right = Vec3::new(-sa, ca, 0.0);
    let up = Vec3::new(-se * ca, -se * sa, ce);
    let out = Vec3::new(ce * ca, ce * sa, se);
    let eye = target + radius * out;

    Mat4::from_cols(
        Vec4::new(right.x, up.x, out.x, 0.0),
        Vec4::new(right.y, up.y, out.y, 0.0),
        Vec4::new(right.z, up.z, out.z, 0.0),
        Vec4::new(-right.dot(eye), -up.dot(eye), -out.dot(eye), 1.0),
    )
}

#[cfg(test)]
#[path = "mat4_tests.rs"]
mod tests;
