/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Buffers keep their bytes in memory, command lists record a readable
/// command stream, and `submit` executes the recorded buffer copies so
/// tests can inspect what the GPU would read.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferDesc, BufferUsage, MemoryLocation, CommandList,
    BindingGroup, BindingResource, Pipeline, RenderPass, Framebuffer, ShaderStage,
    SubmitSync, Viewport, Rect2D, ClearValue,
};

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    /// Unique label: "<desc name>#<creation index>"
    pub label: String,
    pub size: u64,
    pub usage: BufferUsage,
    pub location: MemoryLocation,
    bytes: Mutex<Vec<u8>>,
    live: Arc<AtomicUsize>,
}

impl MockBuffer {
    fn new(desc: &BufferDesc, index: usize, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            label: format!("{}#{}", desc.name, index),
            size: desc.size,
            usage: desc.usage,
            location: desc.location,
            bytes: Mutex::new(vec![0; desc.size as usize]),
            live,
        }
    }

    /// Snapshot of the buffer contents
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.lock().map(|bytes| bytes.clone()).unwrap_or_default()
    }

    fn write(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset + data.len() as u64;
        if end > self.size {
            engine_bail!("nimbus::mock", "Write of {} bytes at {} overflows '{}' ({} bytes)",
                data.len(), offset, self.label, self.size);
        }
        let mut bytes = self.bytes.lock()
            .map_err(|_| Error::BackendError("mock buffer lock poisoned".to_string()))?;
        bytes[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if self.location != MemoryLocation::HostVisible {
            engine_bail!("nimbus::mock", "'{}' is not host-visible", self.label);
        }
        self.write(offset, data)
    }

    fn mapped_ptr(&self) -> Option<*mut u8> {
        match self.location {
            MemoryLocation::HostVisible => self.bytes.lock().ok().map(|mut bytes| bytes.as_mut_ptr()),
            MemoryLocation::DeviceLocal => None,
        }
    }
}

/// View a buffer created by `MockGraphicsDevice` as a `MockBuffer`
pub fn as_mock_buffer(buffer: &dyn Buffer) -> &MockBuffer {
    unsafe { &*(buffer as *const dyn Buffer as *const MockBuffer) }
}

// ============================================================================
// Mock Pipeline / RenderPass / Framebuffer / BindingGroup
// ============================================================================

#[derive(Debug)]
pub struct MockPipeline {
    pub name: String,
}

impl MockPipeline {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Pipeline for MockPipeline {
    fn binding_group_layout_count(&self) -> u32 {
        3
    }
}

#[derive(Debug)]
pub struct MockRenderPass;

impl RenderPass for MockRenderPass {}

#[derive(Debug)]
pub struct MockFramebuffer {
    pub width: u32,
    pub height: u32,
}

impl MockFramebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Framebuffer for MockFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub struct MockBindingGroup {
    pub name: String,
    pub set_index: u32,
}

impl MockBindingGroup {
    pub fn new(name: &str, set_index: u32) -> Self {
        Self { name: name.to_string(), set_index }
    }
}

impl BindingGroup for MockBindingGroup {
    fn set_index(&self) -> u32 {
        self.set_index
    }
}

fn pipeline_name(pipeline: &Arc<dyn Pipeline>) -> String {
    let mock = unsafe { &*(pipeline.as_ref() as *const dyn Pipeline as *const MockPipeline) };
    mock.name.clone()
}

fn group_name(group: &Arc<dyn BindingGroup>) -> String {
    let mock = unsafe { &*(group.as_ref() as *const dyn BindingGroup as *const MockBindingGroup) };
    mock.name.clone()
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// One recorded command, with resources identified by name/label
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Begin,
    End,
    CopyBuffer { src: String, dst: String, size: u64 },
    TransferBarrier,
    BeginRenderPass { clear_values: Vec<ClearValue> },
    EndRenderPass,
    SetViewport(Viewport),
    SetScissor(Rect2D),
    BindPipeline(String),
    BindBindingGroup { pipeline: String, set_index: u32, group: String },
    PushConstants { stages: Vec<ShaderStage>, offset: u32, data: Vec<u8> },
    BindVertexBuffer { buffer: String, offset: u64 },
    Draw { vertex_count: u32, first_vertex: u32, first_instance: u32 },
}

pub struct MockCommandList {
    pub commands: Vec<MockCommand>,
    copies: Vec<(Arc<dyn Buffer>, Arc<dyn Buffer>, u64)>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new(), copies: Vec::new() }
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.commands.clear();
        self.copies.clear();
        self.commands.push(MockCommand::Begin);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.commands.push(MockCommand::End);
        Ok(())
    }

    fn copy_buffer(&mut self, src: &Arc<dyn Buffer>, dst: &Arc<dyn Buffer>, size: u64) -> Result<()> {
        self.commands.push(MockCommand::CopyBuffer {
            src: as_mock_buffer(src.as_ref()).label.clone(),
            dst: as_mock_buffer(dst.as_ref()).label.clone(),
            size,
        });
        self.copies.push((Arc::clone(src), Arc::clone(dst), size));
        Ok(())
    }

    fn transfer_barrier(&mut self) -> Result<()> {
        self.commands.push(MockCommand::TransferBarrier);
        Ok(())
    }

    fn begin_render_pass(
        &mut self,
        _render_pass: &Arc<dyn RenderPass>,
        _framebuffer: &Arc<dyn Framebuffer>,
        clear_values: &[ClearValue],
    ) -> Result<()> {
        self.commands.push(MockCommand::BeginRenderPass { clear_values: clear_values.to_vec() });
        Ok(())
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.commands.push(MockCommand::EndRenderPass);
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(MockCommand::SetViewport(viewport));
        Ok(())
    }

    fn set_scissor(&mut self, scissor: Rect2D) -> Result<()> {
        self.commands.push(MockCommand::SetScissor(scissor));
        Ok(())
    }

    fn bind_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.commands.push(MockCommand::BindPipeline(pipeline_name(pipeline)));
        Ok(())
    }

    fn bind_binding_group(
        &mut self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        binding_group: &Arc<dyn BindingGroup>,
    ) -> Result<()> {
        self.commands.push(MockCommand::BindBindingGroup {
            pipeline: pipeline_name(pipeline),
            set_index,
            group: group_name(binding_group),
        });
        Ok(())
    }

    fn push_constants(&mut self, stages: &[ShaderStage], offset: u32, data: &[u8]) -> Result<()> {
        self.commands.push(MockCommand::PushConstants {
            stages: stages.to_vec(),
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()> {
        self.commands.push(MockCommand::BindVertexBuffer {
            buffer: as_mock_buffer(buffer.as_ref()).label.clone(),
            offset,
        });
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32, first_instance: u32) -> Result<()> {
        self.commands.push(MockCommand::Draw { vertex_count, first_vertex, first_instance });
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// A recorded queue submission
#[derive(Debug, Clone)]
pub struct MockSubmission {
    pub commands: Vec<MockCommand>,
    pub sync: SubmitSync,
}

/// Mock GraphicsDevice that tracks created resources without GPU
pub struct MockGraphicsDevice {
    /// Labels of every buffer created, in order
    pub created_buffers: Vec<String>,
    /// (group name, binding) -> label of the buffer currently bound
    pub bindings: FxHashMap<(String, u32), String>,
    /// Number of `update_binding_group` calls
    pub binding_updates: usize,
    /// Buffers larger than this fail with `Error::OutOfMemory`
    pub allocation_limit: Option<u64>,
    live_buffers: Arc<AtomicUsize>,
    group_count: usize,
    submissions: Mutex<Vec<MockSubmission>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            created_buffers: Vec::new(),
            bindings: FxHashMap::default(),
            binding_updates: 0,
            allocation_limit: None,
            live_buffers: Arc::new(AtomicUsize::new(0)),
            group_count: 0,
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Buffers created and not yet dropped
    pub fn live_buffer_count(&self) -> usize {
        self.live_buffers.load(Ordering::SeqCst)
    }

    /// Label of the buffer bound at `binding` of `group`
    pub fn bound_buffer(&self, group: &Arc<dyn BindingGroup>, binding: u32) -> Option<&String> {
        self.bindings.get(&(group_name(group), binding))
    }

    pub fn submissions(&self) -> Vec<MockSubmission> {
        self.submissions.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn bind(&mut self, group: String, binding: u32, resource: &BindingResource) {
        let label = as_mock_buffer(resource.buffer()).label.clone();
        self.bindings.insert((group, binding), label);
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if desc.size == 0 {
            engine_bail!("nimbus::mock", "Zero-sized buffer '{}'", desc.name);
        }
        if self.allocation_limit.is_some_and(|limit| desc.size > limit) {
            return Err(Error::OutOfMemory);
        }
        let buffer = MockBuffer::new(&desc, self.created_buffers.len(), Arc::clone(&self.live_buffers));
        self.created_buffers.push(buffer.label.clone());
        Ok(Arc::new(buffer))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new()))
    }

    fn create_binding_group(
        &mut self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>> {
        let name = format!("{}.set{}#{}", pipeline_name(pipeline), set_index, self.group_count);
        self.group_count += 1;
        for (binding, resource) in resources.iter().enumerate() {
            self.bind(name.clone(), binding as u32, resource);
        }
        Ok(Arc::new(MockBindingGroup::new(&name, set_index)))
    }

    fn update_binding_group(
        &mut self,
        group: &Arc<dyn BindingGroup>,
        binding: u32,
        resource: &BindingResource,
    ) -> Result<()> {
        self.binding_updates += 1;
        self.bind(group_name(group), binding, resource);
        Ok(())
    }

    fn submit(&self, commands: &dyn CommandList, sync: &SubmitSync) -> Result<()> {
        let list = unsafe { &*(commands as *const dyn CommandList as *const MockCommandList) };
        if list.commands.last() != Some(&MockCommand::End) {
            engine_bail!("nimbus::mock", "Submitted a command list that is still recording");
        }
        for (src, dst, size) in &list.copies {
            let bytes = as_mock_buffer(src.as_ref()).bytes();
            as_mock_buffer(dst.as_ref()).write(0, &bytes[..*size as usize])?;
        }
        self.submissions.lock()
            .map_err(|_| Error::BackendError("mock submissions lock poisoned".to_string()))?
            .push(MockSubmission { commands: list.commands.clone(), sync: *sync });
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
