/// Pipeline trait and shader stages
///
/// Pipelines are created by an external collaborator; the core only binds
/// them and allocates binding groups against their layouts.

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Graphics pipeline
pub trait Pipeline: Send + Sync {
    /// Number of descriptor set layouts in the pipeline layout
    fn binding_group_layout_count(&self) -> u32;
}
