//! Validates, launches, and observes FASTBuild engine invocations.
//!
//! The runner takes a [`StartOptions`] record pointing at the engine
//! executable and a generated `FBuild.bff`, validates both paths before
//! anything is spawned, synthesizes the engine's command-line flags, and
//! runs the engine as a subprocess with the config file's directory as the
//! working directory. Output can be streamed line by line while still being
//! captured in full; a non-zero exit surfaces as a structured
//! [`RunnerError::EngineFailure`] carrying the exit code, the options used,
//! and both captured streams.
//!
//! # Example
//!
//! ```no_run
//! use fbuild_runner::{FBuildRunner, StartOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = StartOptions {
//!         verbose: true,
//!         ..StartOptions::new("/opt/fastbuild/fbuild", "build/FBuild.bff")
//!     };
//!     FBuildRunner::new(options).run().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod options;
mod runner;

pub use error::{EngineFailure, RunnerError, RunnerResult};
pub use options::{CacheMode, StartOptions};
pub use runner::{FBuildRunner, OutputHandler, OutputKind};

pub use fbuild_config::CONFIG_FILE_NAME;
pub use fbuild_process::{LaunchError, ProcessResult};
pub use tokio_util::sync::CancellationToken;
