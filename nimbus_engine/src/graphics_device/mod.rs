/// Graphics device module - the GPU layer traits the core renders through

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod pipeline;
pub mod command_list;
pub mod render_pass;
pub mod binding_group;
pub mod frame_buffer;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use pipeline::*;
pub use command_list::*;
pub use render_pass::*;
pub use binding_group::*;
pub use frame_buffer::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
