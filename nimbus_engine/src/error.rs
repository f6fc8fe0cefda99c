//! Error types for the Nimbus engine
//!
//! This module defines the error type shared by the frame core and the
//! GPU backends, plus the macros used to log an error at the point where
//! it is raised.

use std::fmt;

/// Result type for Nimbus engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nimbus engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Vulkan, mock device, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, binding group, texture index, etc.)
    InvalidResource(String),

    /// Initialization failed (frame renderer, workspaces, configuration)
    InitializationFailed(String),

    /// More bytes were streamed than the buffer was sized for
    CapacityExceeded {
        /// Bytes the caller tried to stream
        requested: u64,
        /// Current capacity of the streamed buffer
        capacity: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::CapacityExceeded { requested, capacity } => write!(
                f,
                "Capacity exceeded: streaming {} bytes into a {} byte buffer",
                requested, capacity
            ),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR (with file:line) and build an `Error::BackendError` from the message
///
/// # Example
///
/// ```no_run
/// # use nimbus_engine::engine_err;
/// # fn f() -> nimbus_engine::nimbus::Result<()> {
/// let code = -3;
/// Err(engine_err!("nimbus::vulkan", "Failed to reset command buffer: {:?}", code))
/// # }
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::nimbus::Engine::log_detailed(
            $crate::nimbus::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::nimbus::Error::BackendError(message)
    }};
}

/// Log an ERROR (with file:line) and return `Err(Error::BackendError(..))`
///
/// # Example
///
/// ```no_run
/// # use nimbus_engine::engine_bail;
/// # fn f(index: usize, count: usize) -> nimbus_engine::nimbus::Result<()> {
/// if index >= count {
///     engine_bail!("nimbus::Frame", "Workspace {} out of range ({} workspaces)", index, count);
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

/// Log a WARN message and build an `Error::BackendError` from it
#[macro_export]
macro_rules! engine_warn_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::nimbus::Engine::log(
            $crate::nimbus::log::LogSeverity::Warn,
            $source,
            message.clone()
        );
        $crate::nimbus::Error::BackendError(message)
    }};
}

/// Log a WARN message and return `Err(Error::BackendError(..))`
#[macro_export]
macro_rules! engine_bail_warn {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_warn_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
