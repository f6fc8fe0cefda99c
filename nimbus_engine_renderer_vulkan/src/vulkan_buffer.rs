/// Buffer - Vulkan implementation of the engine Buffer trait

use nimbus_engine::nimbus::{
    Result,
    render::Buffer as EngineBuffer,
};
use nimbus_engine::{engine_bail, engine_error};
use ash::vk;
use gpu_allocator::vulkan::Allocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Vulkan buffer implementation
pub struct Buffer {
    /// Shared GPU context (device, allocator, queue)
    ctx: Arc<GpuContext>,
    /// Vulkan buffer
    pub(crate) buffer: vk::Buffer,
    /// GPU memory allocation
    pub(crate) allocation: Option<Allocation>,
    /// Buffer size
    pub(crate) size: u64,
}

impl Buffer {
    /// Create a new Vulkan buffer
    pub fn new(
        ctx: Arc<GpuContext>,
        buffer: vk::Buffer,
        allocation: Allocation,
        size: u64,
    ) -> Self {
        Self {
            ctx,
            buffer,
            allocation: Some(allocation),
            size,
        }
    }
}

impl EngineBuffer for Buffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset.saturating_add(data.len() as u64) > self.size {
            engine_bail!("nimbus::vulkan",
                "Buffer update out of bounds: {} bytes at offset {} (size {})",
                data.len(), offset, self.size);
        }

        let Some(mapped_ptr) = self.mapped_ptr() else {
            engine_bail!("nimbus::vulkan", "Buffer is not CPU-accessible");
        };

        // Staging memory is host-coherent: no flush needed
        unsafe {
            std::ptr::copy_nonoverlapping(
                data.as_ptr(),
                mapped_ptr.add(offset as usize),
                data.len(),
            );
        }

        Ok(())
    }

    fn mapped_ptr(&self) -> Option<*mut u8> {
        self.allocation
            .as_ref()
            .and_then(|allocation| allocation.mapped_ptr())
            .map(|ptr| ptr.as_ptr() as *mut u8)
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                // Don't panic if lock fails - we still need to destroy the buffer
                match self.ctx.allocator.lock() {
                    Ok(mut allocator) => {
                        if let Err(e) = allocator.free(allocation) {
                            engine_error!("nimbus::vulkan", "Failed to free buffer memory: {:?}", e);
                        }
                    }
                    Err(_) => {
                        engine_error!("nimbus::vulkan", "Allocator lock poisoned, leaking buffer memory");
                    }
                }
            }

            self.ctx.device.destroy_buffer(self.buffer, None);
        }
    }
}
