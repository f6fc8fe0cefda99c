/// GraphicsDevice trait - the GPU capabilities the frame renderer calls into

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, CommandList, BindingGroup, BindingResource, Pipeline,
};

/// Raw semaphore handle owned by the frame-pacing collaborator
///
/// The value is backend specific (a `VkSemaphore` for Vulkan); 0 means "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SemaphoreHandle(pub u64);

/// Raw fence handle owned by the frame-pacing collaborator (0 = none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FenceHandle(pub u64);

/// Synchronization of one queue submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitSync {
    /// Waited on before color output (image available)
    pub wait: SemaphoreHandle,
    /// Signaled when the work completes (render finished)
    pub signal: SemaphoreHandle,
    /// Signaled when the work completes (workspace free again)
    pub fence: FenceHandle,
}

/// Main graphics device trait
///
/// Factory for buffers, command lists and binding groups, and the queue the
/// recorded work is submitted to. Implemented by backend-specific devices
/// (e.g., VulkanGraphicsDevice).
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a command list for recording commands
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;

    /// Allocate a binding group for one set of a pipeline's layout
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Pipeline whose layout defines the set
    /// * `set_index` - Set index in the pipeline layout
    /// * `resources` - One resource per binding, in binding order
    fn create_binding_group(
        &mut self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>>;

    /// Point one binding of an existing group at a new resource
    ///
    /// # Arguments
    ///
    /// * `group` - Binding group to rewrite
    /// * `binding` - Binding number inside the group
    /// * `resource` - New resource
    fn update_binding_group(
        &mut self,
        group: &Arc<dyn BindingGroup>,
        binding: u32,
        resource: &BindingResource,
    ) -> Result<()>;

    /// Submit a recorded command list to the graphics queue
    ///
    /// # Arguments
    ///
    /// * `commands` - Command list (recording ended)
    /// * `sync` - Semaphores to wait on and signal, fence to signal
    fn submit(&self, commands: &dyn CommandList, sync: &SubmitSync) -> Result<()>;

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;
}
