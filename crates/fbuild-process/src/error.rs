//! Error types for process launching.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while launching and observing a subprocess.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program could not be spawned.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child's exit status could not be collected.
    #[error("failed to wait for child process: {0}")]
    Wait(std::io::Error),

    /// Cancellation was requested; the child has been killed.
    #[error("process launch was cancelled")]
    Cancelled,
}

/// Result type for launch operations.
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;
