/// BindingGroup trait and binding resources
///
/// A BindingGroup is a set of GPU resource bindings (buffers) matching one
/// descriptor set layout of a pipeline. Its layout is deduced from the
/// pipeline and set index it was created for.

use crate::graphics_device::Buffer;

/// A concrete resource bound at one binding slot
pub enum BindingResource<'a> {
    /// Uniform buffer binding
    UniformBuffer(&'a dyn Buffer),
    /// Storage buffer binding
    StorageBuffer(&'a dyn Buffer),
}

impl BindingResource<'_> {
    /// The bound buffer
    pub fn buffer(&self) -> &dyn Buffer {
        match self {
            BindingResource::UniformBuffer(buffer) | BindingResource::StorageBuffer(buffer) => *buffer,
        }
    }
}

/// A set of GPU resource bindings
///
/// Bindings may be rewritten with `GraphicsDevice::update_binding_group`
/// only while no submitted command list that uses the group is executing.
pub trait BindingGroup: Send + Sync {
    /// Returns the set index this BindingGroup was created for
    fn set_index(&self) -> u32;
}
