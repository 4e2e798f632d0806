//! Error types for engine invocations.

use std::path::PathBuf;

use thiserror::Error;

use fbuild_process::LaunchError;

use crate::options::StartOptions;

/// A non-zero engine exit, with everything a caller needs to diagnose it.
#[derive(Debug, Clone)]
pub struct EngineFailure {
    /// The engine's exit code.
    pub exit_code: i32,
    /// The options the run was started with.
    pub options: StartOptions,
    /// Full captured standard output, even when a streaming handler was
    /// also attached.
    pub stdout: String,
    /// Full captured standard error.
    pub stderr: String,
}

/// Errors that can occur while running the engine.
///
/// Configuration-path problems are distinct variants, detected before any
/// subprocess is spawned, so callers can branch on cause.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The engine executable does not exist on disk.
    #[error("the fastbuild executable at '{}' does not exist", .0.display())]
    ExecutableNotFound(PathBuf),

    /// The config file does not exist on disk.
    #[error("the fastbuild config at '{}' does not exist", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config file's containing directory could not be determined.
    #[error("the fastbuild config directory for '{}' is invalid", .0.display())]
    ConfigDirectoryNotFound(PathBuf),

    /// The config file is not named `FBuild.bff` (case-insensitive).
    #[error("the fastbuild config at '{}' is not named 'FBuild.bff'", .0.display())]
    WrongConfigFileName(PathBuf),

    /// The engine ran and exited with a non-zero code.
    #[error("fastbuild exited with code {}", .0.exit_code)]
    EngineFailure(Box<EngineFailure>),

    /// The run was cancelled; the engine process has been killed.
    /// Cancellation is not a build failure.
    #[error("the build was cancelled")]
    Cancelled,

    /// The subprocess could not be launched or observed.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Result type for runner operations.
pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
