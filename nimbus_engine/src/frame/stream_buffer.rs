/// Streamed GPU buffers: host-visible staging + device-local copy target
///
/// A `StreamBuffer` carries data whose size changes from frame to frame
/// (line vertices, instance transforms). It starts `Unallocated` and only
/// ever grows, in multiples of the stream alignment. A `UniformBuffer`
/// is the fixed-size variant for per-frame constants.

use std::marker::PhantomData;
use std::sync::Arc;
use bytemuck::Pod;
use crate::error::{Error, Result};
use crate::graphics_device::{
    Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice, MemoryLocation,
};
use crate::{engine_error, engine_info};

/// Dynamic data kinds streamed every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// `LineVertex` list drawn by the lines pipeline
    Lines,
    /// `TransformBundle` array read by the objects pipeline
    Transforms,
}

impl StreamKind {
    /// Usage of the device-local buffer (in addition to TRANSFER_DST)
    pub fn usage(self) -> BufferUsage {
        match self {
            StreamKind::Lines => BufferUsage::VERTEX,
            StreamKind::Transforms => BufferUsage::STORAGE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StreamKind::Lines => "lines",
            StreamKind::Transforms => "transforms",
        }
    }
}

/// Allocation state of a stream buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Unallocated,
    /// Capacity in bytes of both the staging and the device buffer
    Allocated(u64),
}

/// Round `bytes` up to the next multiple of `alignment`
///
/// Returns `None` for a zero alignment or when the result does not fit in a `u64`.
pub fn round_up(bytes: u64, alignment: u64) -> Option<u64> {
    if alignment == 0 {
        return None;
    }
    bytes.div_ceil(alignment).checked_mul(alignment)
}

// ============================================================================
// StreamBuffer
// ============================================================================

pub struct StreamBuffer {
    kind: StreamKind,
    label: String,
    state: StreamState,
    staging: Option<Arc<dyn Buffer>>,
    device: Option<Arc<dyn Buffer>>,
}

impl StreamBuffer {
    /// Create an unallocated stream buffer
    ///
    /// # Arguments
    ///
    /// * `kind` - Data kind, decides the device buffer usage
    /// * `workspace` - Index of the owning workspace (used in buffer names)
    pub fn new(kind: StreamKind, workspace: usize) -> Self {
        Self {
            kind,
            label: format!("ws{}.{}", workspace, kind.name()),
            state: StreamState::Unallocated,
            staging: None,
            device: None,
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Current capacity in bytes (0 when unallocated)
    pub fn capacity(&self) -> u64 {
        match self.state {
            StreamState::Unallocated => 0,
            StreamState::Allocated(capacity) => capacity,
        }
    }

    /// Device-local buffer read by the GPU, if allocated
    pub fn device_buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.device.as_ref()
    }

    /// Host-visible staging buffer, if allocated
    pub fn staging_buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.staging.as_ref()
    }

    /// Grow the buffers so that at least `needed` bytes can be streamed
    ///
    /// Returns `true` when new buffers were allocated. The previous buffers
    /// are released first; the caller must rewrite any binding that pointed
    /// at the old device buffer.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapacityExceeded` when `needed` cannot be rounded up to
    /// `alignment` (zero alignment or overflow); the buffers are kept.
    /// Propagates allocation failures from the device. The stream is left
    /// `Unallocated` in that case.
    pub fn ensure_capacity(
        &mut self,
        device: &mut dyn GraphicsDevice,
        needed: u64,
        alignment: u64,
    ) -> Result<bool> {
        if needed == 0 || needed <= self.capacity() {
            return Ok(false);
        }

        let Some(new_capacity) = round_up(needed, alignment) else {
            engine_error!("nimbus::Workspace", "Cannot size {} for {} bytes with alignment {}",
                self.label, needed, alignment);
            return Err(Error::CapacityExceeded { requested: needed, capacity: self.capacity() });
        };

        self.staging = None;
        self.device = None;
        self.state = StreamState::Unallocated;

        let staging = device.create_buffer(BufferDesc {
            name: format!("{}.staging", self.label),
            size: new_capacity,
            usage: BufferUsage::TRANSFER_SRC,
            location: MemoryLocation::HostVisible,
        })?;
        let gpu = device.create_buffer(BufferDesc {
            name: format!("{}.device", self.label),
            size: new_capacity,
            usage: self.kind.usage() | BufferUsage::TRANSFER_DST,
            location: MemoryLocation::DeviceLocal,
        })?;

        self.staging = Some(staging);
        self.device = Some(gpu);
        self.state = StreamState::Allocated(new_capacity);

        engine_info!("nimbus::Workspace", "Re-allocated {} buffers to {} bytes", self.label, new_capacity);
        Ok(true)
    }

    /// Write `data` to staging and record the staging -> device copy
    ///
    /// Empty data records nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapacityExceeded` if `data` does not fit, before any
    /// byte is written.
    pub fn stream(&self, commands: &mut dyn CommandList, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let requested = data.len() as u64;
        let capacity = self.capacity();
        let (staging, gpu) = match (&self.staging, &self.device) {
            (Some(staging), Some(gpu)) if requested <= capacity => (staging, gpu),
            _ => {
                engine_error!("nimbus::Workspace", "Streaming {} bytes into {} ({} bytes)",
                    requested, self.label, capacity);
                return Err(Error::CapacityExceeded { requested, capacity });
            }
        };
        staging.update(0, data)?;
        commands.copy_buffer(staging, gpu, requested)
    }
}

// ============================================================================
// UniformBuffer
// ============================================================================

/// Fixed-size staging/device pair holding one `T`
pub struct UniformBuffer<T: Pod> {
    staging: Arc<dyn Buffer>,
    device: Arc<dyn Buffer>,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformBuffer<T> {
    pub fn new(device: &mut dyn GraphicsDevice, name: &str) -> Result<Self> {
        let size = std::mem::size_of::<T>() as u64;
        let staging = device.create_buffer(BufferDesc {
            name: format!("{}.staging", name),
            size,
            usage: BufferUsage::TRANSFER_SRC,
            location: MemoryLocation::HostVisible,
        })?;
        let gpu = device.create_buffer(BufferDesc {
            name: format!("{}.device", name),
            size,
            usage: BufferUsage::UNIFORM | BufferUsage::TRANSFER_DST,
            location: MemoryLocation::DeviceLocal,
        })?;
        Ok(Self { staging, device: gpu, _marker: PhantomData })
    }

    pub fn device_buffer(&self) -> &Arc<dyn Buffer> {
        &self.device
    }

    /// Write `value` to staging and record the copy
    pub fn stream(&self, commands: &mut dyn CommandList, value: &T) -> Result<()> {
        let bytes = bytemuck::bytes_of(value);
        self.staging.update(0, bytes)?;
        commands.copy_buffer(&self.staging, &self.device, bytes.len() as u64)
    }
}

#[cfg(test)]
#[path = "stream_buffer_tests.rs"]
mod tests;
