/// RenderPass - Vulkan implementation of the engine RenderPass trait

use nimbus_engine::nimbus::render::RenderPass as EngineRenderPass;
use ash::vk;

/// Vulkan render pass implementation
///
/// Simple wrapper around vk::RenderPass
pub struct RenderPass {
    /// Vulkan render pass handle
    pub(crate) render_pass: vk::RenderPass,
    /// Vulkan device (for cleanup)
    device: ash::Device,
}

impl RenderPass {
    /// Wrap a render pass created by the presentation layer
    pub fn from_raw(device: ash::Device, render_pass: vk::RenderPass) -> Self {
        Self { render_pass, device }
    }
}

impl EngineRenderPass for RenderPass {
    // No methods needed - just a type-safe wrapper
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_render_pass(self.render_pass, None);
        }
    }
}
