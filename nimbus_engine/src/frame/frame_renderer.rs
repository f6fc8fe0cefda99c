/// FrameRenderer - records and submits one frame into a workspace
///
/// Per frame, in one workspace:
///
/// 1. `Idle -> Recording`: grow the streams if needed, reset the command list
/// 2. stream line vertices, camera and world uniforms, instance transforms
/// 3. `Recording -> Barriered`: one transfer -> read barrier
/// 4. `Barriered -> InRenderPass`: clear, full-extent viewport/scissor, then
///    background, lines and objects, always in that order
/// 5. `InRenderPass -> Submitted`: end the pass and the list, submit
///
/// Frame pacing (which workspace, which image, waiting on fences) is the
/// caller's job.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BindingGroup, Buffer, ClearValue, CommandList, Framebuffer, GraphicsDevice, Pipeline,
    Rect2D, RenderPass, ShaderStage, SubmitSync, Viewport,
};
use crate::{engine_bail, engine_err, engine_error, engine_info, engine_trace};
use super::frame_context::FrameContext;
use super::stream_buffer::StreamKind;
use super::uniforms::TimePush;
use super::workspace::{FrameState, Workspace, CAMERA_SET, TEXTURE_SET, TRANSFORMS_SET, WORLD_SET};

/// Pipelines and render pass created by the presentation layer
#[derive(Clone)]
pub struct FramePipelines {
    pub render_pass: Arc<dyn RenderPass>,
    /// Full-screen pass pushed `time`, drawn with 3 vertices
    pub background: Option<Arc<dyn Pipeline>>,
    /// Line list, set 0 = camera
    pub lines: Arc<dyn Pipeline>,
    /// Mesh instances, set 0 = world, set 1 = transforms, set 2 = texture
    pub objects: Arc<dyn Pipeline>,
}

/// Load-time resources shared by every workspace (never written after creation)
#[derive(Clone, Default)]
pub struct SceneResources {
    /// Vertex buffer holding every mesh's vertices
    pub vertex_buffer: Option<Arc<dyn Buffer>>,
    /// One binding group (set 2) per texture; index 0 is the fallback texture
    pub textures: Vec<Arc<dyn BindingGroup>>,
}

/// Image to render into, with the semaphores/fence frame pacing provides
#[derive(Clone)]
pub struct FrameTarget {
    pub framebuffer: Arc<dyn Framebuffer>,
    pub sync: SubmitSync,
}

pub struct FrameRenderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: RenderConfig,
    pipelines: FramePipelines,
    resources: SceneResources,
    workspaces: Vec<Workspace>,
}

impl FrameRenderer {
    /// Create one workspace per frame in flight
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` for an invalid configuration and
    /// propagates device errors raised while creating workspace resources.
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        config: RenderConfig,
        pipelines: FramePipelines,
        resources: SceneResources,
    ) -> Result<Self> {
        config.validate()?;

        let workspaces = {
            let mut guard = lock_device(&device)?;
            (0..config.frames_in_flight)
                .map(|index| Workspace::new(index, &mut *guard, &pipelines.lines, &pipelines.objects))
                .collect::<Result<Vec<_>>>()?
        };

        engine_info!("nimbus::FrameRenderer", "Frame renderer created ({} workspaces, {} textures)",
            workspaces.len(), resources.textures.len());

        Ok(Self { device, config, pipelines, resources, workspaces })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }

    pub fn workspace(&self, index: usize) -> Result<&Workspace> {
        match self.workspaces.get(index) {
            Some(workspace) => Ok(workspace),
            None => engine_bail!("nimbus::FrameRenderer", "Workspace {} out of range ({} workspaces)",
                index, self.workspaces.len()),
        }
    }

    /// Grow one stream of one workspace to hold `bytes`
    ///
    /// `record_and_submit` calls this itself; calling it ahead of time only
    /// moves the allocation out of the frame.
    pub fn ensure_capacity(&mut self, workspace_index: usize, kind: StreamKind, bytes: u64) -> Result<()> {
        let alignment = self.config.stream_alignment;
        let device = Arc::clone(&self.device);
        let mut guard = lock_device(&device)?;
        let workspace = workspace_mut(&mut self.workspaces, workspace_index)?;
        workspace.ensure_capacity(&mut *guard, kind, bytes, alignment)
    }

    /// Record the frame described by `frame` into a workspace and submit it
    ///
    /// # Arguments
    ///
    /// * `workspace_index` - Frame slot; its previous submission must be complete
    /// * `target` - Framebuffer and submission semaphores/fence
    /// * `frame` - Everything the frame draws
    ///
    /// # Errors
    ///
    /// Any error aborts the frame. Allocation failures are propagated from
    /// the device; a texture index without a binding group returns
    /// `Error::InvalidResource`.
    pub fn record_and_submit(
        &mut self,
        workspace_index: usize,
        target: &FrameTarget,
        frame: &FrameContext,
    ) -> Result<()> {
        let alignment = self.config.stream_alignment;
        let device = Arc::clone(&self.device);
        let mut guard = lock_device(&device)?;
        let workspace = workspace_mut(&mut self.workspaces, workspace_index)?;

        // Idle -> Recording
        workspace.ensure_capacity(&mut *guard, StreamKind::Lines, frame.lines_bytes(), alignment)?;
        workspace.ensure_capacity(&mut *guard, StreamKind::Transforms, frame.transforms_bytes(), alignment)?;
        workspace.begin()?;

        let transforms = frame.transforms();
        {
            let (commands, uploads) = workspace.uploads();
            uploads.lines.stream(commands, bytemuck::cast_slice(&frame.line_vertices))?;
            uploads.camera.stream(commands, &frame.camera_uniforms())?;
            uploads.world.stream(commands, &frame.world)?;
            uploads.transforms.stream(commands, bytemuck::cast_slice(&transforms))?;

            // Recording -> Barriered
            commands.transfer_barrier()?;
        }
        workspace.set_state(FrameState::Barriered);

        // Barriered -> InRenderPass
        let bindings = FrameBindings {
            lines_buffer: workspace.lines_buffer().cloned(),
            camera: Arc::clone(workspace.camera_group()),
            world: Arc::clone(workspace.world_group()),
            transforms: workspace.transforms_group().cloned(),
        };
        let clear_values = [
            ClearValue::Color(self.config.clear_color),
            ClearValue::DepthStencil { depth: self.config.clear_depth, stencil: 0 },
        ];
        let commands = workspace.command_list();
        commands.begin_render_pass(&self.pipelines.render_pass, &target.framebuffer, &clear_values)?;
        workspace.set_state(FrameState::InRenderPass);

        let commands = workspace.command_list();
        record_draws(commands, &self.pipelines, &self.resources, &bindings, target, frame)?;

        // InRenderPass -> Submitted
        commands.end_render_pass()?;
        commands.end()?;
        guard.submit(workspace.submitted_commands(), &target.sync)?;
        workspace.set_state(FrameState::Submitted);

        engine_trace!("nimbus::FrameRenderer", "Workspace {}: {} instances, {} line vertices",
            workspace_index, frame.instances.len(), frame.line_vertices.len());
        Ok(())
    }

    /// Wait until the GPU finished every submitted frame
    pub fn wait_idle(&self) -> Result<()> {
        lock_device(&self.device)?.wait_idle()
    }
}

/// Per-workspace bindings captured before the draws are recorded
struct FrameBindings {
    lines_buffer: Option<Arc<dyn Buffer>>,
    camera: Arc<dyn BindingGroup>,
    world: Arc<dyn BindingGroup>,
    transforms: Option<Arc<dyn BindingGroup>>,
}

fn record_draws(
    commands: &mut dyn CommandList,
    pipelines: &FramePipelines,
    resources: &SceneResources,
    bindings: &FrameBindings,
    target: &FrameTarget,
    frame: &FrameContext,
) -> Result<()> {
    let (width, height) = (target.framebuffer.width(), target.framebuffer.height());
    commands.set_viewport(Viewport {
        x: 0.0,
        y: 0.0,
        width: width as f32,
        height: height as f32,
        min_depth: 0.0,
        max_depth: 1.0,
    })?;
    commands.set_scissor(Rect2D { x: 0, y: 0, width, height })?;

    let push = TimePush { time: frame.time };

    if let Some(background) = &pipelines.background {
        commands.bind_pipeline(background)?;
        commands.push_constants(&[ShaderStage::Fragment], 0, bytemuck::bytes_of(&push))?;
        commands.draw(3, 0, 0)?;
    }

    if !frame.line_vertices.is_empty() {
        let Some(lines_buffer) = &bindings.lines_buffer else {
            return Err(invalid_resource("lines stream is not allocated"));
        };
        commands.bind_pipeline(&pipelines.lines)?;
        commands.bind_vertex_buffer(lines_buffer, 0)?;
        commands.bind_binding_group(&pipelines.lines, CAMERA_SET, &bindings.camera)?;
        commands.draw(frame.line_vertices.len() as u32, 0, 0)?;
    }

    if !frame.instances.is_empty() {
        let Some(vertex_buffer) = &resources.vertex_buffer else {
            return Err(invalid_resource("no scene vertex buffer for mesh instances"));
        };
        let Some(transforms) = &bindings.transforms else {
            return Err(invalid_resource("transforms stream is not allocated"));
        };
        commands.bind_pipeline(&pipelines.objects)?;
        commands.push_constants(&[ShaderStage::Fragment], 0, bytemuck::bytes_of(&push))?;
        commands.bind_vertex_buffer(vertex_buffer, 0)?;
        commands.bind_binding_group(&pipelines.objects, WORLD_SET, &bindings.world)?;
        commands.bind_binding_group(&pipelines.objects, TRANSFORMS_SET, transforms)?;

        for (index, instance) in frame.instances.iter().enumerate() {
            let Some(texture) = resources.textures.get(instance.texture as usize) else {
                return Err(invalid_resource(&format!(
                    "texture {} of instance {} (mesh {}) has no binding group ({} textures)",
                    instance.texture, index, instance.mesh, resources.textures.len()
                )));
            };
            commands.bind_binding_group(&pipelines.objects, TEXTURE_SET, texture)?;
            commands.draw(instance.vertices.count, instance.vertices.first, index as u32)?;
        }
    }
    Ok(())
}

fn invalid_resource(message: &str) -> Error {
    engine_error!("nimbus::FrameRenderer", "Invalid resource: {}", message);
    Error::InvalidResource(message.to_string())
}

fn workspace_mut(workspaces: &mut [Workspace], index: usize) -> Result<&mut Workspace> {
    let count = workspaces.len();
    match workspaces.get_mut(index) {
        Some(workspace) => Ok(workspace),
        None => engine_bail!("nimbus::FrameRenderer", "Workspace {} out of range ({} workspaces)", index, count),
    }
}

fn lock_device(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device.lock().map_err(|_| engine_err!("nimbus::FrameRenderer", "Graphics device lock poisoned"))
}

#[cfg(test)]
#[path = "frame_renderer_tests.rs"]
mod tests;
