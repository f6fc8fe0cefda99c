/// Framebuffer - Vulkan implementation of the engine Framebuffer trait
///
/// Wraps a VkFramebuffer grouping one color and one depth attachment.
/// Built by the presentation layer per swapchain image, rebuilt on resize.

use nimbus_engine::nimbus::render::Framebuffer as EngineFramebuffer;
use ash::vk;

/// Vulkan framebuffer implementation
///
/// Takes ownership of the VkFramebuffer. Destroyed when dropped.
pub struct Framebuffer {
    /// Vulkan framebuffer handle
    pub(crate) framebuffer: vk::Framebuffer,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Vulkan device (for cleanup)
    device: ash::Device,
}

impl Framebuffer {
    /// Wrap a framebuffer created by the presentation layer
    pub fn from_raw(
        device: ash::Device,
        framebuffer: vk::Framebuffer,
        width: u32,
        height: u32,
    ) -> Self {
        Self { framebuffer, width, height, device }
    }
}

impl EngineFramebuffer for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_framebuffer(self.framebuffer, None);
        }
    }
}
