/// Wireframe helpers for the line-list stream

use glam::Vec3;
use crate::culling::{
    NEAR_TOP_RIGHT, NEAR_TOP_LEFT, NEAR_BOTTOM_RIGHT, NEAR_BOTTOM_LEFT,
    FAR_TOP_RIGHT, FAR_TOP_LEFT, FAR_BOTTOM_RIGHT, FAR_BOTTOM_LEFT,
};
use super::uniforms::LineVertex;

/// Color of the culling frustum drawn in debug camera mode
pub const FRUSTUM_COLOR: [u8; 4] = [0xff, 0xcc, 0x00, 0xff];

const FRUSTUM_EDGES: [(usize, usize); 12] = [
    // near rectangle
    (NEAR_TOP_RIGHT, NEAR_TOP_LEFT),
    (NEAR_TOP_LEFT, NEAR_BOTTOM_LEFT),
    (NEAR_BOTTOM_LEFT, NEAR_BOTTOM_RIGHT),
    (NEAR_BOTTOM_RIGHT, NEAR_TOP_RIGHT),
    // far rectangle
    (FAR_TOP_RIGHT, FAR_TOP_LEFT),
    (FAR_TOP_LEFT, FAR_BOTTOM_LEFT),
    (FAR_BOTTOM_LEFT, FAR_BOTTOM_RIGHT),
    (FAR_BOTTOM_RIGHT, FAR_TOP_RIGHT),
    // lateral edges
    (NEAR_TOP_RIGHT, FAR_TOP_RIGHT),
    (NEAR_TOP_LEFT, FAR_TOP_LEFT),
    (NEAR_BOTTOM_RIGHT, FAR_BOTTOM_RIGHT),
    (NEAR_BOTTOM_LEFT, FAR_BOTTOM_LEFT),
];

/// Append the 12 edges of a frustum (24 vertices) to a line list
pub fn push_frustum_lines(lines: &mut Vec<LineVertex>, corners: &[Vec3; 8], color: [u8; 4]) {
    lines.reserve(FRUSTUM_EDGES.len() * 2);
    for &(a, b) in &FRUSTUM_EDGES {
        lines.push(LineVertex::new(corners[a], color));
        lines.push(LineVertex::new(corners[b], color));
    }
}

/// Append a segment
pub fn push_line(lines: &mut Vec<LineVertex>, from: Vec3, to: Vec3, color: [u8; 4]) {
    lines.push(LineVertex::new(from, color));
    lines.push(LineVertex::new(to, color));
}

#[cfg(test)]
#[path = "debug_lines_tests.rs"]
mod tests;
