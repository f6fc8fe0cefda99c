//! Frame module - per-frame GPU resources and the submission protocol.
//!
//! A `FrameRenderer` owns one `Workspace` per frame in flight and records
//! a `FrameContext` into one of them per frame.

mod uniforms;
mod stream_buffer;
mod workspace;
mod frame_context;
mod frame_renderer;
mod debug_lines;

pub use uniforms::{CameraUniforms, WorldUniforms, LineVertex, TimePush};
pub use stream_buffer::{StreamBuffer, StreamKind, StreamState, UniformBuffer, round_up};
pub use workspace::{Workspace, FrameState};
pub use frame_context::FrameContext;
pub use frame_renderer::{FrameRenderer, FramePipelines, SceneResources, FrameTarget};
pub use debug_lines::{push_frustum_lines, push_line, FRUSTUM_COLOR};
