/// Framebuffer trait - the attachments a render pass renders into
///
/// Created by an external collaborator per swapchain image, and recreated
/// when the attachments change (e.g., window resize).
pub trait Framebuffer: Send + Sync {
    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;
}
