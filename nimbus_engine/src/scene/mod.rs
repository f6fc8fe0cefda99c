//! Scene module
//!
//! Arena-based scene model, keyframe animation drivers, and the per-frame
//! flattening of the node hierarchy into draw instances.

mod scene;
mod animation;
mod flatten;

pub use scene::{
    Scene, Node, Mesh, MeshSlice, Material, Camera, Light, CameraInstance,
};
pub use animation::{Driver, Channel, Interpolation, ChannelValue, animate};
pub use flatten::{
    TransformBundle, ObjectInstance, CullVolume, flatten, cull_instances,
};
