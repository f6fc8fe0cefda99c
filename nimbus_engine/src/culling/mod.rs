//! Culling module - frustum geometry, bounding volumes and the SAT test.
//!
//! All functions are pure; callers pick the coordinate frame (the frame
//! renderer culls in view space).

mod bounds;
mod frustum;
mod sat;

pub use bounds::{AABB, OBB, aabb_to_obb};
pub use frustum::{
    CullingFrustum, make_frustum,
    NEAR_TOP_RIGHT, NEAR_TOP_LEFT, NEAR_BOTTOM_RIGHT, NEAR_BOTTOM_LEFT,
    FAR_TOP_RIGHT, FAR_TOP_LEFT, FAR_BOTTOM_RIGHT, FAR_BOTTOM_LEFT,
};
pub use sat::{intersects, find_separating_axis, SeparatingAxis};
