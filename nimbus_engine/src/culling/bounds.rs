/// Bounding volumes: local-space AABB and derived OBB

use glam::{Mat4, Vec3};
use crate::math::try_normalize;

// ===== AABB =====

/// Axis-aligned bounding box in mesh-local space
///
/// The default value is `EMPTY` (min = +inf, max = -inf) so that expanding it
/// by the first point yields a zero-volume box at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl AABB {
    /// Box containing nothing
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points` (EMPTY if there are none)
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut aabb = Self::EMPTY;
        for point in points {
            aabb.expand(point);
        }
        aabb
    }

    /// True if min > max on any axis
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to contain `point`
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

// ===== OBB =====

/// Oriented bounding box: center, three orthonormal axes, half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OBB {
    /// Box center
    pub center: Vec3,
    /// Half-lengths along each axis
    pub extents: Vec3,
    /// Orthonormal box axes
    pub axes: [Vec3; 3],
}

impl OBB {
    /// The 8 box corners (all sign combinations of the half-extents)
    pub fn corners(&self) -> [Vec3; 8] {
        let x = self.axes[0] * self.extents.x;
        let y = self.axes[1] * self.extents.y;
        let z = self.axes[2] * self.extents.z;
        let c = self.center;
        [
            c + x + y + z,
            c + x + y - z,
            c + x - y + z,
            c + x - y - z,
            c - x + y + z,
            c - x + y - z,
            c - x - y + z,
            c - x - y - z,
        ]
    }
}

/// Transform a local AABB into an OBB
///
/// Only the min corner and its three axis neighbours are transformed; the
/// edge vectors between them give the axes and extents. Correct for
/// translation, rotation and scale. A shearing transform yields
/// non-orthogonal edges and therefore a wrong box.
///
/// Zero-length edges (flat or degenerate meshes) get an orthonormal
/// completion of the remaining axes so no NaN reaches the SAT test; their
/// extent stays zero.
pub fn aabb_to_obb(transform: &Mat4, aabb: &AABB) -> OBB {
    let (min, max) = (aabb.min, aabb.max);
    let origin = transform.transform_point3(min);
    let edges = [
        transform.transform_point3(Vec3::new(max.x, min.y, min.z)) - origin,
        transform.transform_point3(Vec3::new(min.x, max.y, min.z)) - origin,
        transform.transform_point3(Vec3::new(min.x, min.y, max.z)) - origin,
    ];

    OBB {
        center: origin + 0.5 * (edges[0] + edges[1] + edges[2]),
        extents: 0.5 * Vec3::new(edges[0].length(), edges[1].length(), edges[2].length()),
        axes: complete_axes(edges),
    }
}

fn complete_axes(edges: [Vec3; 3]) -> [Vec3; 3] {
    match edges.map(try_normalize) {
        [Some(a), Some(b), Some(c)] => [a, b, c],
        [None, Some(b), Some(c)] => [fill(b.cross(c), b), b, c],
        [Some(a), None, Some(c)] => [a, fill(c.cross(a), c), c],
        [Some(a), Some(b), None] => [a, b, fill(a.cross(b), a)],
        [Some(a), None, None] => {
            let (b, c) = a.any_orthonormal_pair();
            [a, b, c]
        }
        [None, Some(b), None] => {
            let (c, a) = b.any_orthonormal_pair();
            [a, b, c]
        }
        [None, None, Some(c)] => {
            let (a, b) = c.any_orthonormal_pair();
            [a, b, c]
        }
        [None, None, None] => [Vec3::X, Vec3::Y, Vec3::Z],
    }
}

fn fill(cross: Vec3, fallback: Vec3) -> Vec3 {
    try_normalize(cross).unwrap_or_else(|| fallback.any_orthonormal_vector())
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
