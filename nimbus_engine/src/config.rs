/// Render configuration
///
/// Plain value passed to `FrameRenderer::new` and `Viewer::new`.

use crate::error::{Error, Result};

/// Frame-core configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of workspaces (frames the presentation engine may keep in flight)
    pub frames_in_flight: usize,
    /// Allocation quantum for streamed buffers, in bytes (power of two)
    pub stream_alignment: u64,
    /// Clear value of the color attachment
    pub clear_color: [f32; 4],
    /// Clear value of the depth attachment
    pub clear_depth: f32,
    /// Filter flattened instances against the culling camera
    pub frustum_culling: bool,
    /// Animation time wraps back to zero after this many seconds
    pub time_wrap: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 2,
            stream_alignment: 4096,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
            frustum_culling: true,
            time_wrap: 60.0,
        }
    }
}

impl RenderConfig {
    /// Check the invariants the frame core relies on
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` if no workspace would be created,
    /// if the stream alignment is not a non-zero power of two, or if
    /// `time_wrap` is not strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.frames_in_flight == 0 {
            return Err(Error::InitializationFailed(
                "frames_in_flight must be at least 1".to_string(),
            ));
        }
        if !self.stream_alignment.is_power_of_two() {
            return Err(Error::InitializationFailed(format!(
                "stream_alignment must be a power of two (got {})",
                self.stream_alignment
            )));
        }
        if self.time_wrap.is_nan() || self.time_wrap <= 0.0 {
            return Err(Error::InitializationFailed(format!(
                "time_wrap must be positive (got {})",
                self.time_wrap
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
