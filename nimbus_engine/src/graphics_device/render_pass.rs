/// RenderPass trait
///
/// Created by an external collaborator with one color and one depth
/// attachment, both cleared on load.
pub trait RenderPass: Send + Sync {
    // No methods - marker trait for type safety
}
