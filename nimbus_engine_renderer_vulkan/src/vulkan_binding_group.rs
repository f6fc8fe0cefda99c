/// BindingGroup - Vulkan implementation of the engine BindingGroup trait

use nimbus_engine::nimbus::render::BindingGroup as EngineBindingGroup;
use ash::vk;

/// Vulkan binding group implementation
///
/// Wraps a VkDescriptorSet handle. The descriptor set itself is owned by
/// the device's descriptor pool and freed when the pool is destroyed.
/// Bindings are rewritten in place by `GraphicsDevice::update_binding_group`.
pub struct BindingGroup {
    /// Vulkan descriptor set handle
    pub(crate) descriptor_set: vk::DescriptorSet,
    /// Set index this binding group was created for
    pub(crate) set_index: u32,
}

impl EngineBindingGroup for BindingGroup {
    fn set_index(&self) -> u32 {
        self.set_index
    }
}
