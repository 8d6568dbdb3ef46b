//! Error types for the harness and the server bootstrap

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the harness or the server bootstrap
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to start the PDF render backend
    #[error("Renderer initialization failed: {0}")]
    InitializationError(String),

    /// The renderer reported a failure for a fixture
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// An external tool exited with a non-zero status
    #[error("exec error ({status}): {stderr}")]
    ToolFailed {
        /// Program that was invoked
        program: String,
        /// Exit status reported by the tool
        status: i32,
        /// Captured standard error output
        stderr: String,
    },

    /// No configuration file could be located
    #[error("Could not find default configuration.")]
    ConfigNotFound,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
