//! Error types for the configuration model.

use thiserror::Error;

/// Errors that can occur while building or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a block or document back from BFF text is not supported.
    ///
    /// Generated files are owned by the generator; the engine is the only
    /// consumer of the text format. This fails loudly so callers never
    /// mistake the gap for a round-trip capability.
    #[error("deserializing BFF text into the configuration model is not supported")]
    DeserializeUnsupported,

    /// Filesystem error while writing the generated file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
