/// Pipeline - Vulkan implementation of the engine Pipeline trait

use nimbus_engine::nimbus::render::Pipeline as EnginePipeline;
use ash::vk;

/// Vulkan pipeline implementation
///
/// Owns the pipeline, its layout and the descriptor set layouts the
/// layout was built from. All three are destroyed when dropped.
pub struct Pipeline {
    /// Vulkan graphics pipeline
    pub(crate) pipeline: vk::Pipeline,
    /// Pipeline layout (for descriptor set binding and push constants)
    pub(crate) pipeline_layout: vk::PipelineLayout,
    /// Descriptor set layouts, indexed by set number
    pub(crate) descriptor_set_layouts: Vec<vk::DescriptorSetLayout>,
    /// Vulkan device (for cleanup)
    device: ash::Device,
}

impl Pipeline {
    /// Wrap a pipeline built by the pipeline factory
    ///
    /// # Arguments
    ///
    /// * `device` - Vulkan logical device
    /// * `pipeline` - Graphics pipeline
    /// * `pipeline_layout` - Layout the pipeline was created with
    /// * `descriptor_set_layouts` - Set layouts of `pipeline_layout`, in set order
    pub fn from_raw(
        device: ash::Device,
        pipeline: vk::Pipeline,
        pipeline_layout: vk::PipelineLayout,
        descriptor_set_layouts: Vec<vk::DescriptorSetLayout>,
    ) -> Self {
        Self {
            pipeline,
            pipeline_layout,
            descriptor_set_layouts,
            device,
        }
    }
}

impl EnginePipeline for Pipeline {
    fn binding_group_layout_count(&self) -> u32 {
        self.descriptor_set_layouts.len() as u32
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_pipeline(self.pipeline, None);
            self.device.destroy_pipeline_layout(self.pipeline_layout, None);
            for layout in self.descriptor_set_layouts.drain(..) {
                self.device.destroy_descriptor_set_layout(layout, None);
            }
        }
    }
}
