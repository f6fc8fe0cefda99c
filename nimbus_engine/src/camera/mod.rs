//! Camera module - orbit camera, camera rig and input state machine.
//!
//! Cameras are plain values. The rig picks which one renders and which one
//! culls; the input controller turns events into camera updates.

mod orbit_camera;
mod camera_rig;
mod input;

pub use orbit_camera::OrbitCamera;
pub use camera_rig::{
    CameraMode, CameraRig, CameraView, circling_view, INFINITE_CULL_DISTANCE,
};
pub use input::{
    InputEvent, InputMode, InputOutcome, InputController, EventTranslator,
};
