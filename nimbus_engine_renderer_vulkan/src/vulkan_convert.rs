/// Pure conversions from engine GPU types to Vulkan and gpu-allocator types

use nimbus_engine::nimbus::render::{
    BindingResource, BufferUsage, ClearValue, MemoryLocation, Rect2D, ShaderStage, Viewport,
};
use ash::vk;

pub(crate) fn buffer_usage_flags(usage: BufferUsage) -> vk::BufferUsageFlags {
    let mut flags = vk::BufferUsageFlags::empty();
    if usage.contains(BufferUsage::TRANSFER_SRC) {
        flags |= vk::BufferUsageFlags::TRANSFER_SRC;
    }
    if usage.contains(BufferUsage::TRANSFER_DST) {
        flags |= vk::BufferUsageFlags::TRANSFER_DST;
    }
    if usage.contains(BufferUsage::VERTEX) {
        flags |= vk::BufferUsageFlags::VERTEX_BUFFER;
    }
    if usage.contains(BufferUsage::UNIFORM) {
        flags |= vk::BufferUsageFlags::UNIFORM_BUFFER;
    }
    if usage.contains(BufferUsage::STORAGE) {
        flags |= vk::BufferUsageFlags::STORAGE_BUFFER;
    }
    flags
}

/// Staging memory is host-visible and persistently mapped by gpu-allocator
pub(crate) fn memory_location(location: MemoryLocation) -> gpu_allocator::MemoryLocation {
    match location {
        MemoryLocation::HostVisible => gpu_allocator::MemoryLocation::CpuToGpu,
        MemoryLocation::DeviceLocal => gpu_allocator::MemoryLocation::GpuOnly,
    }
}

pub(crate) fn shader_stage_flags(stages: &[ShaderStage]) -> vk::ShaderStageFlags {
    stages.iter().fold(vk::ShaderStageFlags::empty(), |flags, stage| {
        flags | match stage {
            ShaderStage::Vertex => vk::ShaderStageFlags::VERTEX,
            ShaderStage::Fragment => vk::ShaderStageFlags::FRAGMENT,
        }
    })
}

pub(crate) fn descriptor_type(resource: &BindingResource) -> vk::DescriptorType {
    match resource {
        BindingResource::UniformBuffer(_) => vk::DescriptorType::UNIFORM_BUFFER,
        BindingResource::StorageBuffer(_) => vk::DescriptorType::STORAGE_BUFFER,
    }
}

pub(crate) fn clear_value(value: &ClearValue) -> vk::ClearValue {
    match value {
        ClearValue::Color(color) => vk::ClearValue {
            color: vk::ClearColorValue { float32: *color },
        },
        ClearValue::DepthStencil { depth, stencil } => vk::ClearValue {
            depth_stencil: vk::ClearDepthStencilValue { depth: *depth, stencil: *stencil },
        },
    }
}

pub(crate) fn viewport(viewport: &Viewport) -> vk::Viewport {
    vk::Viewport::default()
        .x(viewport.x)
        .y(viewport.y)
        .width(viewport.width)
        .height(viewport.height)
        .min_depth(viewport.min_depth)
        .max_depth(viewport.max_depth)
}

pub(crate) fn rect_2d(rect: &Rect2D) -> vk::Rect2D {
    vk::Rect2D::default()
        .offset(vk::Offset2D { x: rect.x, y: rect.y })
        .extent(vk::Extent2D { width: rect.width, height: rect.height })
}

/// Stages and accesses of the single upload barrier of a frame:
/// every transfer write before any vertex fetch or shader read
pub(crate) fn transfer_barrier() -> (vk::PipelineStageFlags, vk::PipelineStageFlags, vk::MemoryBarrier<'static>) {
    (
        vk::PipelineStageFlags::TRANSFER,
        vk::PipelineStageFlags::VERTEX_INPUT
            | vk::PipelineStageFlags::VERTEX_SHADER
            | vk::PipelineStageFlags::FRAGMENT_SHADER,
        vk::MemoryBarrier::default()
            .src_access_mask(vk::AccessFlags::MEMORY_WRITE)
            .dst_access_mask(vk::AccessFlags::MEMORY_READ),
    )
}

#[cfg(test)]
#[path = "vulkan_convert_tests.rs"]
mod tests;
