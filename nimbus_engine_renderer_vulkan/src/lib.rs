/*!
# Nimbus Engine - Vulkan Backend

Vulkan implementation of the Nimbus GPU layer traits.

This crate implements `nimbus_engine::nimbus::render::GraphicsDevice` using
Ash for Vulkan bindings and gpu-allocator for memory management. The
instance, logical device, queue, swapchain, render pass, framebuffers and
pipelines are created by the presentation layer and handed over through
`GpuContext` and the `from_raw` constructors.
*/

mod vulkan_context;
mod vulkan_convert;
mod vulkan_buffer;
mod vulkan_command_list;
mod vulkan_binding_group;
mod vulkan_pipeline;
mod vulkan_render_pass;
mod vulkan_frame_buffer;
mod vulkan_graphics_device;

pub use vulkan_graphics_device::VulkanGraphicsDevice;
pub use vulkan_context::GpuContext;
pub use vulkan_command_list::CommandList;

// Main nimbus namespace module
pub mod nimbus {
    pub use crate::vulkan_graphics_device::VulkanGraphicsDevice;
    pub use crate::vulkan_context::GpuContext;
    pub use crate::vulkan_pipeline::Pipeline;
    pub use crate::vulkan_render_pass::RenderPass;
    pub use crate::vulkan_frame_buffer::Framebuffer;
}
