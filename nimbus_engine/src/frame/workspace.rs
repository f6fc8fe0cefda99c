/// Workspace - the GPU resources owned by one frame in flight
///
/// Each workspace has its own command list, streamed buffers, uniform
/// buffers and binding groups, so the CPU can record frame k+1 while the
/// GPU still reads frame k from another workspace. Growth of a stream
/// only replaces buffers of this workspace.

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    BindingGroup, BindingResource, Buffer, CommandList, GraphicsDevice, Pipeline,
};
use crate::engine_warn;
use super::stream_buffer::{StreamBuffer, StreamKind, UniformBuffer};
use super::uniforms::{CameraUniforms, WorldUniforms};

/// Binding slots used by the frame renderer
pub(crate) const CAMERA_SET: u32 = 0;
pub(crate) const WORLD_SET: u32 = 0;
pub(crate) const TRANSFORMS_SET: u32 = 1;
pub(crate) const TEXTURE_SET: u32 = 2;
const TRANSFORMS_BINDING: u32 = 0;

/// Submission protocol state of a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Never recorded, or recording aborted and reset
    Idle,
    /// Command list open, uploads being recorded
    Recording,
    /// Transfer barrier recorded
    Barriered,
    /// Inside the render pass, draws being recorded
    InRenderPass,
    /// Handed to the queue; reusable once frame pacing says so
    Submitted,
}

pub struct Workspace {
    index: usize,
    state: FrameState,
    command_list: Box<dyn CommandList>,
    lines: StreamBuffer,
    transforms: StreamBuffer,
    camera: UniformBuffer<CameraUniforms>,
    world: UniformBuffer<WorldUniforms>,
    camera_group: Arc<dyn BindingGroup>,
    world_group: Arc<dyn BindingGroup>,
    /// Created with the first transforms allocation
    transforms_group: Option<Arc<dyn BindingGroup>>,
    objects_pipeline: Arc<dyn Pipeline>,
}

impl Workspace {
    /// Create the command list, uniform buffers and fixed binding groups
    ///
    /// # Arguments
    ///
    /// * `index` - Frame slot of this workspace
    /// * `device` - Graphics device
    /// * `lines_pipeline` - Pipeline whose set 0 receives the camera uniforms
    /// * `objects_pipeline` - Pipeline whose sets 0 and 1 receive world uniforms and transforms
    pub fn new(
        index: usize,
        device: &mut dyn GraphicsDevice,
        lines_pipeline: &Arc<dyn Pipeline>,
        objects_pipeline: &Arc<dyn Pipeline>,
    ) -> Result<Self> {
        let command_list = device.create_command_list()?;
        let camera = UniformBuffer::<CameraUniforms>::new(device, &format!("ws{}.camera", index))?;
        let world = UniformBuffer::<WorldUniforms>::new(device, &format!("ws{}.world", index))?;

        let camera_group = device.create_binding_group(
            lines_pipeline,
            CAMERA_SET,
            &[BindingResource::UniformBuffer(camera.device_buffer().as_ref())],
        )?;
        let world_group = device.create_binding_group(
            objects_pipeline,
            WORLD_SET,
            &[BindingResource::UniformBuffer(world.device_buffer().as_ref())],
        )?;

        Ok(Self {
            index,
            state: FrameState::Idle,
            command_list,
            lines: StreamBuffer::new(StreamKind::Lines, index),
            transforms: StreamBuffer::new(StreamKind::Transforms, index),
            camera,
            world,
            camera_group,
            world_group,
            transforms_group: None,
            objects_pipeline: Arc::clone(objects_pipeline),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn stream(&self, kind: StreamKind) -> &StreamBuffer {
        match kind {
            StreamKind::Lines => &self.lines,
            StreamKind::Transforms => &self.transforms,
        }
    }

    /// Grow one stream and rewrite the binding that reads it
    ///
    /// Must not be called while this workspace's previous submission may
    /// still execute.
    ///
    /// # Errors
    ///
    /// Propagates allocation and binding group errors from the device.
    pub fn ensure_capacity(
        &mut self,
        device: &mut dyn GraphicsDevice,
        kind: StreamKind,
        bytes: u64,
        alignment: u64,
    ) -> Result<()> {
        let stream = match kind {
            StreamKind::Lines => &mut self.lines,
            StreamKind::Transforms => &mut self.transforms,
        };
        if !stream.ensure_capacity(device, bytes, alignment)? {
            return Ok(());
        }
        if kind != StreamKind::Transforms {
            return Ok(());
        }

        let Some(buffer) = self.transforms.device_buffer() else {
            return Ok(());
        };
        let resource = BindingResource::StorageBuffer(buffer.as_ref());
        if let Some(group) = &self.transforms_group {
            return device.update_binding_group(group, TRANSFORMS_BINDING, &resource);
        }
        let group = device.create_binding_group(&self.objects_pipeline, TRANSFORMS_SET, &[resource])?;
        self.transforms_group = Some(group);
        Ok(())
    }

    // ===== RECORDING (driven by FrameRenderer) =====

    pub(crate) fn begin(&mut self) -> Result<()> {
        if matches!(self.state, FrameState::Recording | FrameState::Barriered | FrameState::InRenderPass) {
            engine_warn!("nimbus::Workspace", "Workspace {} restarted while in state {:?}", self.index, self.state);
        }
        self.state = FrameState::Idle;
        self.command_list.begin()?;
        self.state = FrameState::Recording;
        Ok(())
    }

    pub(crate) fn set_state(&mut self, state: FrameState) {
        self.state = state;
    }

    pub(crate) fn command_list(&mut self) -> &mut dyn CommandList {
        self.command_list.as_mut()
    }

    /// Split borrow: the command list plus the buffers streamed into it
    pub(crate) fn uploads(&mut self) -> (&mut dyn CommandList, Uploads<'_>) {
        (
            self.command_list.as_mut(),
            Uploads {
                lines: &self.lines,
                transforms: &self.transforms,
                camera: &self.camera,
                world: &self.world,
            },
        )
    }

    pub(crate) fn lines_buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.lines.device_buffer()
    }

    pub(crate) fn camera_group(&self) -> &Arc<dyn BindingGroup> {
        &self.camera_group
    }

    pub(crate) fn world_group(&self) -> &Arc<dyn BindingGroup> {
        &self.world_group
    }

    pub(crate) fn transforms_group(&self) -> Option<&Arc<dyn BindingGroup>> {
        self.transforms_group.as_ref()
    }

    pub(crate) fn submitted_commands(&self) -> &dyn CommandList {
        self.command_list.as_ref()
    }
}

/// Buffers written during the `Recording` state
pub(crate) struct Uploads<'a> {
    pub lines: &'a StreamBuffer,
    pub transforms: &'a StreamBuffer,
    pub camera: &'a UniformBuffer<CameraUniforms>,
    pub world: &'a UniformBuffer<WorldUniforms>,
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
