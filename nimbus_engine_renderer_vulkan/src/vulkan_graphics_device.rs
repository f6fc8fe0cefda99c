/// VulkanGraphicsDevice - Vulkan implementation of the engine GraphicsDevice trait
///
/// Built on a logical device, queue and allocator created by the
/// presentation layer. Owns the descriptor pools the binding groups are
/// allocated from.

use nimbus_engine::nimbus::{Result, Error};
use nimbus_engine::nimbus::render::{
    GraphicsDevice,
    Buffer as EngineBuffer,
    BufferDesc,
    CommandList as EngineCommandList,
    BindingGroup as EngineBindingGroup,
    BindingResource,
    Pipeline as EnginePipeline,
    SubmitSync,
};
use nimbus_engine::{engine_bail, engine_err, engine_error, engine_info, engine_debug};
use ash::vk;
use ash::vk::Handle;
use gpu_allocator::vulkan::{AllocationCreateDesc, AllocationScheme};
use std::sync::Arc;

use crate::vulkan_context::GpuContext;
use crate::vulkan_convert;
use crate::vulkan_buffer::Buffer;
use crate::vulkan_command_list::CommandList;
use crate::vulkan_binding_group::BindingGroup;
use crate::vulkan_pipeline::Pipeline;

/// Descriptor sets per pool; a new pool is created when one runs out
const SETS_PER_POOL: u32 = 1024;

/// Vulkan graphics device
pub struct VulkanGraphicsDevice {
    /// Shared GPU context
    ctx: Arc<GpuContext>,
    /// Descriptor pools, the last one is the allocation target
    descriptor_pools: Vec<vk::DescriptorPool>,
}

impl VulkanGraphicsDevice {
    /// Create the device on top of an existing GPU context
    pub fn new(ctx: Arc<GpuContext>) -> Result<Self> {
        let pool = Self::create_descriptor_pool(&ctx.device)?;

        engine_info!("nimbus::vulkan", "Vulkan graphics device created (queue family {})",
            ctx.graphics_queue_family);

        Ok(Self {
            ctx,
            descriptor_pools: vec![pool],
        })
    }

    /// Shared GPU context
    pub fn context(&self) -> &Arc<GpuContext> {
        &self.ctx
    }

    /// Create a descriptor pool with fixed capacity.
    /// Called during init and when the current pool is exhausted.
    fn create_descriptor_pool(device: &ash::Device) -> Result<vk::DescriptorPool> {
        let pool_sizes = [
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: SETS_PER_POOL,
            },
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::STORAGE_BUFFER,
                descriptor_count: SETS_PER_POOL,
            },
        ];
        let info = vk::DescriptorPoolCreateInfo::default()
            .pool_sizes(&pool_sizes)
            .max_sets(SETS_PER_POOL);

        unsafe {
            device.create_descriptor_pool(&info, None)
                .map_err(|e| {
                    engine_error!("nimbus::vulkan", "Failed to create descriptor pool: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create descriptor pool: {:?}", e))
                })
        }
    }

    fn allocate_descriptor_set(&mut self, layout: vk::DescriptorSetLayout) -> Result<vk::DescriptorSet> {
        let layouts = [layout];

        let Some(&current_pool) = self.descriptor_pools.last() else {
            engine_bail!("nimbus::vulkan", "No descriptor pool available");
        };

        let allocate_info = vk::DescriptorSetAllocateInfo::default()
            .descriptor_pool(current_pool)
            .set_layouts(&layouts);

        let sets = unsafe {
            match self.ctx.device.allocate_descriptor_sets(&allocate_info) {
                Ok(sets) => sets,
                Err(vk::Result::ERROR_OUT_OF_POOL_MEMORY) | Err(vk::Result::ERROR_FRAGMENTED_POOL) => {
                    let new_pool = Self::create_descriptor_pool(&self.ctx.device)?;
                    self.descriptor_pools.push(new_pool);
                    engine_info!("nimbus::vulkan",
                        "Descriptor pool exhausted, created new pool (total: {})",
                        self.descriptor_pools.len()
                    );
                    let retry_info = vk::DescriptorSetAllocateInfo::default()
                        .descriptor_pool(new_pool)
                        .set_layouts(&layouts);
                    self.ctx.device.allocate_descriptor_sets(&retry_info)
                        .map_err(|e| engine_err!("nimbus::vulkan",
                            "Failed to allocate descriptor set after pool growth: {:?}", e))?
                }
                Err(e) => engine_bail!("nimbus::vulkan", "Failed to allocate descriptor set: {:?}", e),
            }
        };

        match sets.first() {
            Some(&set) => Ok(set),
            None => Err(engine_err!("nimbus::vulkan", "No descriptor set allocated")),
        }
    }

    /// Point one binding of `descriptor_set` at the buffer of `resource`
    fn write_binding(&self, descriptor_set: vk::DescriptorSet, binding: u32, resource: &BindingResource) {
        let vk_buffer = unsafe { &*(resource.buffer() as *const dyn EngineBuffer as *const Buffer) };

        let buffer_info = vk::DescriptorBufferInfo::default()
            .buffer(vk_buffer.buffer)
            .offset(0)
            .range(vk::WHOLE_SIZE);

        let write = vk::WriteDescriptorSet::default()
            .dst_set(descriptor_set)
            .dst_binding(binding)
            .dst_array_element(0)
            .descriptor_type(vulkan_convert::descriptor_type(resource))
            .buffer_info(std::slice::from_ref(&buffer_info));

        unsafe {
            self.ctx.device.update_descriptor_sets(&[write], &[]);
        }
    }
}

impl GraphicsDevice for VulkanGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn EngineBuffer>> {
        if desc.size == 0 {
            engine_bail!("nimbus::vulkan", "Cannot create zero-size buffer '{}'", desc.name);
        }

        unsafe {
            let buffer_create_info = vk::BufferCreateInfo::default()
                .size(desc.size)
                .usage(vulkan_convert::buffer_usage_flags(desc.usage))
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            let buffer = self.ctx.device.create_buffer(&buffer_create_info, None)
                .map_err(|e| engine_err!("nimbus::vulkan",
                    "Failed to create buffer '{}' of size {} bytes: {:?}", desc.name, desc.size, e))?;

            let requirements = self.ctx.device.get_buffer_memory_requirements(buffer);

            let allocation = {
                let mut allocator = match self.ctx.allocator.lock() {
                    Ok(allocator) => allocator,
                    Err(_) => {
                        self.ctx.device.destroy_buffer(buffer, None);
                        engine_bail!("nimbus::vulkan", "Allocator lock poisoned");
                    }
                };

                allocator.allocate(&AllocationCreateDesc {
                    name: &desc.name,
                    requirements,
                    location: vulkan_convert::memory_location(desc.location),
                    linear: true,
                    allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                })
            };

            let allocation = match allocation {
                Ok(allocation) => allocation,
                Err(gpu_allocator::AllocationError::OutOfMemory) => {
                    self.ctx.device.destroy_buffer(buffer, None);
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    engine_error!("nimbus::vulkan",
                        "Out of GPU memory for buffer '{}' (required: {:.2} MB)", desc.name, size_mb);
                    return Err(Error::OutOfMemory);
                }
                Err(e) => {
                    self.ctx.device.destroy_buffer(buffer, None);
                    engine_bail!("nimbus::vulkan", "Failed to allocate memory for buffer '{}': {:?}", desc.name, e);
                }
            };

            // Wrap first so the memory is released if binding fails
            let vk_buffer = Buffer::new(Arc::clone(&self.ctx), buffer, allocation, desc.size);

            if let Some(allocation) = &vk_buffer.allocation {
                self.ctx.device.bind_buffer_memory(buffer, allocation.memory(), allocation.offset())
                    .map_err(|e| engine_err!("nimbus::vulkan", "Failed to bind buffer memory: {:?}", e))?;
            }

            engine_debug!("nimbus::vulkan", "Created buffer '{}' ({} bytes)", desc.name, desc.size);

            Ok(Arc::new(vk_buffer))
        }
    }

    fn create_command_list(&self) -> Result<Box<dyn EngineCommandList>> {
        Ok(Box::new(CommandList::new(Arc::clone(&self.ctx))?))
    }

    fn create_binding_group(
        &mut self,
        pipeline: &Arc<dyn EnginePipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn EngineBindingGroup>> {
        // Downcast pipeline to access stored descriptor set layouts
        let vk_pipeline = unsafe { &*(pipeline.as_ref() as *const dyn EnginePipeline as *const Pipeline) };

        let Some(&layout) = vk_pipeline.descriptor_set_layouts.get(set_index as usize) else {
            engine_bail!("nimbus::vulkan",
                "create_binding_group: set_index {} out of range (pipeline has {} layouts)",
                set_index, vk_pipeline.descriptor_set_layouts.len());
        };

        let descriptor_set = self.allocate_descriptor_set(layout)?;

        for (binding, resource) in resources.iter().enumerate() {
            self.write_binding(descriptor_set, binding as u32, resource);
        }

        Ok(Arc::new(BindingGroup {
            descriptor_set,
            set_index,
        }))
    }

    fn update_binding_group(
        &mut self,
        group: &Arc<dyn EngineBindingGroup>,
        binding: u32,
        resource: &BindingResource,
    ) -> Result<()> {
        let vk_group = unsafe { &*(group.as_ref() as *const dyn EngineBindingGroup as *const BindingGroup) };
        self.write_binding(vk_group.descriptor_set, binding, resource);
        Ok(())
    }

    fn submit(&self, commands: &dyn EngineCommandList, sync: &SubmitSync) -> Result<()> {
        let vk_commands = unsafe { &*(commands as *const dyn EngineCommandList as *const CommandList) };

        if !vk_commands.is_executable() {
            engine_bail!("nimbus::vulkan", "submit: command list is still recording");
        }

        let command_buffers = [vk_commands.command_buffer()];

        let mut wait_semaphores = Vec::new();
        let mut wait_stages = Vec::new();
        if sync.wait.0 != 0 {
            wait_semaphores.push(vk::Semaphore::from_raw(sync.wait.0));
            wait_stages.push(vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT);
        }

        let mut signal_semaphores = Vec::new();
        if sync.signal.0 != 0 {
            signal_semaphores.push(vk::Semaphore::from_raw(sync.signal.0));
        }

        let fence = vk::Fence::from_raw(sync.fence.0);

        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores);

        unsafe {
            self.ctx.device
                .queue_submit(self.ctx.graphics_queue, &[submit_info], fence)
                .map_err(|e| engine_err!("nimbus::vulkan", "submit: failed to submit queue: {:?}", e))?;
        }

        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.ctx.device
                .device_wait_idle()
                .map_err(|e| engine_err!("nimbus::vulkan", "Failed to wait for device idle: {:?}", e))
        }
    }
}

impl Drop for VulkanGraphicsDevice {
    fn drop(&mut self) {
        unsafe {
            // Sets allocated from the pools must not be in use anymore
            if let Err(e) = self.ctx.device.device_wait_idle() {
                engine_error!("nimbus::vulkan", "device_wait_idle failed during drop: {:?}", e);
            }
            for pool in self.descriptor_pools.drain(..) {
                self.ctx.device.destroy_descriptor_pool(pool, None);
            }
        }
    }
}
