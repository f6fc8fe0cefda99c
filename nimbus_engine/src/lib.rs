/*!
# Nimbus Engine

Backend-agnostic per-frame rendering core.

Every frame, the core turns an index-based scene graph and a camera into
a list of draw instances, filters it against the culling frustum, and
records the uploads and draws into one of N per-frame workspaces before
submitting them through the GPU layer traits. GPU backends (Vulkan) live
in separate crates and implement `nimbus::render::GraphicsDevice`.

## Architecture

- **math**: matrix kernel (`perspective`, `look_at`, `orbit`) and `Transform`
- **culling**: frustum geometry, bounding boxes and the SAT frustum/OBB test
- **scene**: arena scene model, animation drivers, flattening and culling
- **camera**: orbit camera, camera rig and the input state machine
- **render**: GPU layer traits (device, buffers, command lists, bindings)
- **frame**: workspaces, streamed buffers and the frame submission protocol

`Viewer` ties the CPU side together and produces a `FrameContext` per
frame; `FrameRenderer` records and submits it.
*/

// Internal modules
mod error;
mod engine;
mod config;
mod viewer;
pub mod log;
pub mod math;
pub mod culling;
pub mod scene;
pub mod camera;
pub mod graphics_device;
pub mod frame;

// Main nimbus namespace module
pub mod nimbus {
    // Error types
    pub use crate::error::{Error, Result};

    // Process-wide services (logger)
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::RenderConfig;

    // Per-frame driver
    pub use crate::viewer::Viewer;

    // Logging sub-module (types only, macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod culling {
        pub use crate::culling::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    // GPU layer traits
    pub mod render {
        pub use crate::graphics_device::*;
    }

    pub mod frame {
        pub use crate::frame::*;
    }
}

// Re-export math library at crate root
pub use glam;
