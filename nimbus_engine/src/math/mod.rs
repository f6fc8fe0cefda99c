//! Math module: matrix/vector kernel and node transforms.
//!
//! All matrices are column-major `glam::Mat4`; all functions are pure.

mod mat4;
mod transform;

pub use mat4::{
    multiply, apply, perspective, infinite_perspective, look_at, orbit, try_normalize,
    FALLBACK_FORWARD, FALLBACK_UP,
};
pub use transform::Transform;
