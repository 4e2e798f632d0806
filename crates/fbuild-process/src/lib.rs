//! Asynchronous subprocess launching with line streaming and cancellation.
//!
//! This crate is the process-launch capability the build runner delegates
//! to: spawn a program with arguments and a working directory, stream its
//! stdout/stderr line by line to optional subscribers, and return a captured
//! result with the exit code and buffered output.
//!
//! # Guarantees
//!
//! - Captured output is complete even when line subscribers are attached;
//!   every line is teed into both the buffer and the subscriber.
//! - Lines from one stream arrive in the order the process produced them.
//!   Cross-stream ordering is not guaranteed.
//! - Subscriber invocations are serialized; there are no overlapping calls
//!   for the same process.
//! - Cancellation kills the child rather than waiting for natural exit, and
//!   the OS handle is released on every exit path.
//!
//! # Example
//!
//! ```no_run
//! use fbuild_process::{AsyncProcess, LaunchSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let spec = LaunchSpec::new("/usr/bin/make").with_args(["-j8"]);
//!     let result = AsyncProcess::new(spec)
//!         .on_stdout_line(|line| println!("make: {line}"))
//!         .run_to_completion()
//!         .await?;
//!     println!("exit code {}", result.exit_code);
//!     Ok(())
//! }
//! ```

mod error;
mod process;
mod spec;

pub use error::{LaunchError, LaunchResult};
pub use process::{AsyncProcess, LineCallback, OutputSource, ProcessResult};
pub use spec::{CaptureMode, LaunchSpec};
