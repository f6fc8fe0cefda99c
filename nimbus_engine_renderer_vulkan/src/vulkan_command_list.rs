/// CommandList - Vulkan implementation of the engine CommandList trait

use nimbus_engine::nimbus::{Result, Error};
use nimbus_engine::nimbus::render::{
    CommandList as EngineCommandList,
    RenderPass as EngineRenderPass,
    Framebuffer as EngineFramebuffer,
    Pipeline as EnginePipeline,
    Buffer as EngineBuffer,
    BindingGroup as EngineBindingGroup,
    Viewport, Rect2D, ClearValue, ShaderStage,
};
use nimbus_engine::{engine_err, engine_error};
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;
use crate::vulkan_convert;
use crate::vulkan_render_pass::RenderPass;
use crate::vulkan_frame_buffer::Framebuffer;
use crate::vulkan_pipeline::Pipeline;
use crate::vulkan_buffer::Buffer;
use crate::vulkan_binding_group::BindingGroup;

/// Vulkan command list implementation
///
/// One primary command buffer from its own resettable pool. Each workspace
/// owns one, so recording never contends with another frame in flight.
pub struct CommandList {
    /// Shared GPU context
    ctx: Arc<GpuContext>,
    /// Command pool for allocating the command buffer
    command_pool: vk::CommandPool,
    /// Command buffer for recording
    command_buffer: vk::CommandBuffer,
    /// Whether the command list is currently recording
    is_recording: bool,
    /// Whether we're inside a render pass
    in_render_pass: bool,
    /// Currently bound pipeline layout (for push constants)
    bound_pipeline_layout: Option<vk::PipelineLayout>,
}

impl CommandList {
    /// Create a new command list
    pub fn new(ctx: Arc<GpuContext>) -> Result<Self> {
        unsafe {
            let command_pool_create_info = vk::CommandPoolCreateInfo::default()
                .queue_family_index(ctx.graphics_queue_family)
                .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER);

            let command_pool = ctx.device.create_command_pool(&command_pool_create_info, None)
                .map_err(|e| {
                    engine_error!("nimbus::vulkan", "Failed to create command pool: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create command pool: {:?}", e))
                })?;

            let command_buffer_allocate_info = vk::CommandBufferAllocateInfo::default()
                .command_pool(command_pool)
                .level(vk::CommandBufferLevel::PRIMARY)
                .command_buffer_count(1);

            let command_buffer = match ctx.device.allocate_command_buffers(&command_buffer_allocate_info) {
                Ok(buffers) if !buffers.is_empty() => buffers[0],
                Ok(_) => {
                    ctx.device.destroy_command_pool(command_pool, None);
                    return Err(engine_err!("nimbus::vulkan", "No command buffer allocated"));
                }
                Err(e) => {
                    ctx.device.destroy_command_pool(command_pool, None);
                    engine_error!("nimbus::vulkan", "Failed to allocate command buffer: {:?}", e);
                    return Err(Error::InitializationFailed(format!("Failed to allocate command buffer: {:?}", e)));
                }
            };

            Ok(Self {
                ctx,
                command_pool,
                command_buffer,
                is_recording: false,
                in_render_pass: false,
                bound_pipeline_layout: None,
            })
        }
    }

    /// Get the underlying Vulkan command buffer
    pub fn command_buffer(&self) -> vk::CommandBuffer {
        self.command_buffer
    }

    /// Whether recording has ended (ready for submission)
    pub(crate) fn is_executable(&self) -> bool {
        !self.is_recording
    }

    fn require_recording(&self) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }
        Ok(())
    }

    fn require_render_pass(&self) -> Result<()> {
        self.require_recording()?;
        if !self.in_render_pass {
            return Err(Error::BackendError("Not inside a render pass".to_string()));
        }
        Ok(())
    }
}

impl EngineCommandList for CommandList {
    fn begin(&mut self) -> Result<()> {
        unsafe {
            // Reset also discards an aborted recording
            self.ctx.device
                .reset_command_buffer(self.command_buffer, vk::CommandBufferResetFlags::empty())
                .map_err(|e| engine_err!("nimbus::vulkan", "Failed to reset command buffer: {:?}", e))?;

            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

            self.ctx.device
                .begin_command_buffer(self.command_buffer, &begin_info)
                .map_err(|e| engine_err!("nimbus::vulkan", "Failed to begin command buffer: {:?}", e))?;
        }

        self.is_recording = true;
        self.in_render_pass = false;
        self.bound_pipeline_layout = None;

        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.require_recording()?;

        if self.in_render_pass {
            return Err(Error::BackendError("Render pass not ended before ending command list".to_string()));
        }

        unsafe {
            self.ctx.device
                .end_command_buffer(self.command_buffer)
                .map_err(|e| engine_err!("nimbus::vulkan", "Failed to end command buffer: {:?}", e))?;
        }

        self.is_recording = false;

        Ok(())
    }

    fn copy_buffer(&mut self, src: &Arc<dyn EngineBuffer>, dst: &Arc<dyn EngineBuffer>, size: u64) -> Result<()> {
        self.require_recording()?;

        if self.in_render_pass {
            return Err(Error::BackendError("Buffer copies are not allowed inside a render pass".to_string()));
        }

        unsafe {
            let vk_src = &*(src.as_ref() as *const dyn EngineBuffer as *const Buffer);
            let vk_dst = &*(dst.as_ref() as *const dyn EngineBuffer as *const Buffer);

            let region = vk::BufferCopy::default()
                .src_offset(0)
                .dst_offset(0)
                .size(size);

            self.ctx.device.cmd_copy_buffer(self.command_buffer, vk_src.buffer, vk_dst.buffer, &[region]);
        }

        Ok(())
    }

    fn transfer_barrier(&mut self) -> Result<()> {
        self.require_recording()?;

        let (src_stage, dst_stage, barrier) = vulkan_convert::transfer_barrier();

        unsafe {
            self.ctx.device.cmd_pipeline_barrier(
                self.command_buffer,
                src_stage,
                dst_stage,
                vk::DependencyFlags::empty(),
                &[barrier],
                &[],
                &[],
            );
        }

        Ok(())
    }

    fn begin_render_pass(
        &mut self,
        render_pass: &Arc<dyn EngineRenderPass>,
        framebuffer: &Arc<dyn EngineFramebuffer>,
        clear_values: &[ClearValue],
    ) -> Result<()> {
        self.require_recording()?;

        if self.in_render_pass {
            return Err(Error::BackendError("Already inside a render pass".to_string()));
        }

        unsafe {
            // Downcast to Vulkan types
            let vk_render_pass = &*(render_pass.as_ref() as *const dyn EngineRenderPass as *const RenderPass);
            let vk_framebuffer = &*(framebuffer.as_ref() as *const dyn EngineFramebuffer as *const Framebuffer);

            let vk_clear_values: Vec<vk::ClearValue> = clear_values
                .iter()
                .map(vulkan_convert::clear_value)
                .collect();

            let render_pass_info = vk::RenderPassBeginInfo::default()
                .render_pass(vk_render_pass.render_pass)
                .framebuffer(vk_framebuffer.framebuffer)
                .render_area(vk::Rect2D {
                    offset: vk::Offset2D { x: 0, y: 0 },
                    extent: vk::Extent2D {
                        width: framebuffer.width(),
                        height: framebuffer.height(),
                    },
                })
                .clear_values(&vk_clear_values);

            self.ctx.device.cmd_begin_render_pass(
                self.command_buffer,
                &render_pass_info,
                vk::SubpassContents::INLINE,
            );
        }

        self.in_render_pass = true;

        Ok(())
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.require_render_pass()?;

        unsafe {
            self.ctx.device.cmd_end_render_pass(self.command_buffer);
        }
        self.in_render_pass = false;

        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.require_recording()?;

        unsafe {
            self.ctx.device.cmd_set_viewport(self.command_buffer, 0, &[vulkan_convert::viewport(&viewport)]);
        }

        Ok(())
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.require_recording()?;

        unsafe {
            self.ctx.device.cmd_set_scissor(self.command_buffer, 0, &[vulkan_convert::rect_2d(&scissor)]);
        }

        Ok(())
    }

    fn bind_pipeline(&mut self, pipeline: &Arc<dyn EnginePipeline>) -> Result<()> {
        self.require_recording()?;

        unsafe {
            let vk_pipeline = &*(pipeline.as_ref() as *const dyn EnginePipeline as *const Pipeline);

            self.ctx.device.cmd_bind_pipeline(
                self.command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                vk_pipeline.pipeline,
            );

            // Save pipeline layout for push constants
            self.bound_pipeline_layout = Some(vk_pipeline.pipeline_layout);
        }

        Ok(())
    }

    fn bind_binding_group(
        &mut self,
        pipeline: &Arc<dyn EnginePipeline>,
        set_index: u32,
        binding_group: &Arc<dyn EngineBindingGroup>,
    ) -> Result<()> {
        self.require_recording()?;

        unsafe {
            let vk_pipeline = &*(pipeline.as_ref() as *const dyn EnginePipeline as *const Pipeline);
            let vk_group = &*(binding_group.as_ref() as *const dyn EngineBindingGroup as *const BindingGroup);

            self.ctx.device.cmd_bind_descriptor_sets(
                self.command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                vk_pipeline.pipeline_layout,
                set_index,
                &[vk_group.descriptor_set],
                &[], // dynamic_offsets
            );
        }

        Ok(())
    }

    fn push_constants(&mut self, stages: &[ShaderStage], offset: u32, data: &[u8]) -> Result<()> {
        self.require_recording()?;

        let layout = self.bound_pipeline_layout.ok_or_else(|| {
            Error::BackendError("No pipeline bound for push constants".to_string())
        })?;

        unsafe {
            self.ctx.device.cmd_push_constants(
                self.command_buffer,
                layout,
                vulkan_convert::shader_stage_flags(stages),
                offset,
                data,
            );
        }

        Ok(())
    }

    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn EngineBuffer>, offset: u64) -> Result<()> {
        self.require_recording()?;

        unsafe {
            let vk_buffer = &*(buffer.as_ref() as *const dyn EngineBuffer as *const Buffer);

            self.ctx.device.cmd_bind_vertex_buffers(
                self.command_buffer,
                0,
                &[vk_buffer.buffer],
                &[offset],
            );
        }

        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32, first_instance: u32) -> Result<()> {
        self.require_render_pass()?;

        unsafe {
            self.ctx.device.cmd_draw(
                self.command_buffer,
                vertex_count,
                1, // instance_count
                first_vertex,
                first_instance,
            );
        }

        Ok(())
    }
}

impl Drop for CommandList {
    fn drop(&mut self) {
        unsafe {
            // Command buffer is freed with its pool
            self.ctx.device.destroy_command_pool(self.command_pool, None);
        }
    }
}
