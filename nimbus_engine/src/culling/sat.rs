/// Separating-axis test between a frustum (8 corners) and an OBB
///
/// Both shapes are convex, so they are disjoint iff their projections are
/// disjoint on at least one candidate axis. Candidates:
/// - the 3 OBB face normals
/// - the 5 distinct frustum face normals (near and far share one)
/// - each OBB axis crossed with each distinct frustum edge direction
///   (shared horizontal, shared vertical, 4 lateral edges)
///
/// Candidate axes with no usable length are skipped.

use glam::Vec3;
use crate::culling::bounds::OBB;
use crate::culling::frustum::{
    NEAR_TOP_RIGHT as NTR, NEAR_TOP_LEFT as NTL, NEAR_BOTTOM_RIGHT as NBR,
    NEAR_BOTTOM_LEFT as NBL, FAR_TOP_RIGHT as FTR, FAR_TOP_LEFT as FTL,
    FAR_BOTTOM_RIGHT as FBR, FAR_BOTTOM_LEFT as FBL,
};
use crate::math::try_normalize;

/// Which candidate axis proved the shapes disjoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatingAxis {
    /// OBB axis `i`
    ObbFace(usize),
    /// Frustum face normal `i` (right, top, near/far, bottom, left)
    FrustumFace(usize),
    /// OBB axis `obb_axis` crossed with frustum edge direction `frustum_edge`
    EdgeCross { obb_axis: usize, frustum_edge: usize },
}

/// True if the frustum and the OBB overlap (or touch)
///
/// `frustum_corners` must be in the order produced by
/// `CullingFrustum::corners` and in the same space as `obb`.
pub fn intersects(frustum_corners: &[Vec3; 8], obb: &OBB) -> bool {
    find_separating_axis(frustum_corners, obb).is_none()
}

/// First separating axis found, or `None` if the shapes intersect
pub fn find_separating_axis(frustum_corners: &[Vec3; 8], obb: &OBB) -> Option<SeparatingAxis> {
    let v = frustum_corners;
    let obb_corners = obb.corners();
    let separated = |axis: Vec3| separated_on_axis(v, &obb_corners, axis);

    for (i, axis) in obb.axes.iter().enumerate() {
        if separated(*axis) {
            return Some(SeparatingAxis::ObbFace(i));
        }
    }

    let right_lateral = v[FTR] - v[NTR];
    let right_vertical = v[NBR] - v[NTR];
    let top_horizontal = v[NTL] - v[NTR];
    let bottom_horizontal = v[NBR] - v[NBL];
    let left_vertical = v[NTL] - v[NBL];
    let bottom_left_lateral = v[FBL] - v[NBL];
    let top_left_lateral = v[FTL] - v[NTL];
    let bottom_right_lateral = v[FBR] - v[NBR];

    let face_normals = [
        right_vertical.cross(right_lateral),
        right_lateral.cross(top_horizontal),
        top_horizontal.cross(right_vertical),
        bottom_left_lateral.cross(bottom_horizontal),
        left_vertical.cross(bottom_left_lateral),
    ];
    for (i, normal) in face_normals.iter().enumerate() {
        if separated(*normal) {
            return Some(SeparatingAxis::FrustumFace(i));
        }
    }

    let edges = [
        right_lateral,
        right_vertical,
        top_horizontal,
        bottom_left_lateral,
        top_left_lateral,
        bottom_right_lateral,
    ];
    for (i, axis) in obb.axes.iter().enumerate() {
        for (j, edge) in edges.iter().enumerate() {
            if separated(axis.cross(*edge)) {
                return Some(SeparatingAxis::EdgeCross { obb_axis: i, frustum_edge: j });
            }
        }
    }

    None
}

fn separated_on_axis(frustum_corners: &[Vec3; 8], obb_corners: &[Vec3; 8], axis: Vec3) -> bool {
    let Some(axis) = try_normalize(axis) else {
        return false;
    };
    let (frustum_min, frustum_max) = project(frustum_corners, axis);
    let (obb_min, obb_max) = project(obb_corners, axis);
    obb_max < frustum_min || frustum_max < obb_min
}

fn project(points: &[Vec3; 8], axis: Vec3) -> (f32, f32) {
    points.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), point| {
        let d = point.dot(axis);
        (min.min(d), max.max(d))
    })
}

#[cfg(test)]
#[path = "sat_tests.rs"]
mod tests;
