/// Node transform: translation, rotation, scale

use glam::{Mat4, Quat, Vec3};

/// Local transform of a scene node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation
    pub position: Vec3,
    /// Rotation (unit quaternion)
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// parent_from_local = T * R * S
    pub fn parent_from_local(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
    }

    /// local_from_parent = S^-1 * R^-1 * T^-1
    ///
    /// A zero scale component inverts to zero rather than infinity, so the
    /// result stays finite (and is no longer a true inverse on that axis).
    pub fn local_from_parent(&self) -> Mat4 {
        let inverse_scale = Vec3::new(
            inverse_or_zero(self.scale.x),
            inverse_or_zero(self.scale.y),
            inverse_or_zero(self.scale.z),
        );
        Mat4::from_scale(inverse_scale)
            * Mat4::from_quat(self.rotation.conjugate())
            * Mat4::from_translation(-self.position)
    }
}

fn inverse_or_zero(value: f32) -> f32 {
    if value == 0.0 { 0.0 } else { 1.0 / value }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
