/// GpuContext - Vulkan objects shared by every resource of the backend
///
/// The instance, physical device, logical device and queue are created by
/// the presentation layer (it also owns the surface and swapchain). The
/// backend borrows them through this context and never destroys them.

use ash::vk;
use gpu_allocator::vulkan::Allocator;
use std::sync::{Arc, Mutex};

/// Shared GPU context for all Vulkan resources.
///
/// Shared (via `Arc`) by buffers so they can free their memory on drop.
/// The owner must keep the logical device alive until every resource
/// created through the backend has been dropped.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// GPU memory allocator (shared with the presentation layer)
    pub allocator: Arc<Mutex<Allocator>>,

    /// Graphics queue for command submission
    pub graphics_queue: vk::Queue,

    /// Graphics queue family index
    pub graphics_queue_family: u32,
}

impl GpuContext {
    /// Create a new GPU context
    ///
    /// # Arguments
    ///
    /// * `device` - Vulkan logical device
    /// * `allocator` - GPU memory allocator created for `device`
    /// * `graphics_queue` - Graphics queue for command submission
    /// * `graphics_queue_family` - Graphics queue family index
    pub fn new(
        device: ash::Device,
        allocator: Arc<Mutex<Allocator>>,
        graphics_queue: vk::Queue,
        graphics_queue_family: u32,
    ) -> Self {
        Self {
            device,
            allocator,
            graphics_queue,
            graphics_queue_family,
        }
    }
}
