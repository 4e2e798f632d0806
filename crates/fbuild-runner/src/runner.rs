//! The engine invocation lifecycle: validate, launch, stream, report.

use std::path::absolute;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use fbuild_config::CONFIG_FILE_NAME;
use fbuild_process::{AsyncProcess, CaptureMode, LaunchError, LaunchSpec};

use crate::error::{EngineFailure, RunnerError, RunnerResult};
use crate::options::StartOptions;

/// How a streamed line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// A standard-output line.
    Information,
    /// A standard-error line.
    Error,
}

/// Caller-supplied sink for streamed engine output.
///
/// Invocations are serialized for a given run; lines from one stream arrive
/// in production order, while the two streams may interleave.
pub type OutputHandler = Box<dyn FnMut(OutputKind, &str) + Send>;

/// Runs the engine for one [`StartOptions`] record.
///
/// A runner may be reused for sequential runs. Overlapping `run*` calls on
/// the same instance are a caller error and are not guarded against.
pub struct FBuildRunner {
    options: StartOptions,
}

impl FBuildRunner {
    /// Creates a runner for the given options.
    pub fn new(options: StartOptions) -> Self {
        Self { options }
    }

    /// The options this runner was built with.
    pub fn options(&self) -> &StartOptions {
        &self.options
    }

    /// Runs the engine to completion with no output streaming.
    pub async fn run(&self) -> RunnerResult<()> {
        self.run_with(None, CancellationToken::new()).await
    }

    /// Runs the engine, streaming each output line to `output` as it
    /// arrives, until the engine exits or `cancellation` fires.
    ///
    /// Validation happens before anything is spawned: the executable must
    /// exist, then the config file must exist, its directory must be
    /// determinable, and its base name must equal `FBuild.bff`
    /// (case-insensitive). The engine runs with the config file's directory
    /// as its working directory.
    ///
    /// A non-zero exit yields [`RunnerError::EngineFailure`] with both
    /// streams captured in full. Cancellation kills the engine and yields
    /// [`RunnerError::Cancelled`], never an exit-code failure.
    pub async fn run_with(
        &self,
        output: Option<OutputHandler>,
        cancellation: CancellationToken,
    ) -> RunnerResult<()> {
        let executable = absolute(&self.options.executable)
            .map_err(|_| RunnerError::ExecutableNotFound(self.options.executable.clone()))?;
        if !executable.is_file() {
            return Err(RunnerError::ExecutableNotFound(executable));
        }

        let config_file = absolute(&self.options.config_file)
            .map_err(|_| RunnerError::ConfigNotFound(self.options.config_file.clone()))?;
        if !config_file.is_file() {
            return Err(RunnerError::ConfigNotFound(config_file));
        }

        let config_dir = config_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| RunnerError::ConfigDirectoryNotFound(config_file.clone()))?
            .to_path_buf();

        let file_name = config_file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if !file_name.eq_ignore_ascii_case(CONFIG_FILE_NAME) {
            return Err(RunnerError::WrongConfigFileName(config_file));
        }

        let args = self.options.to_arguments();
        tracing::debug!(
            executable = %executable.display(),
            working_dir = %config_dir.display(),
            args = ?args,
            "launching fastbuild"
        );

        let spec = LaunchSpec::new(executable)
            .with_args(args)
            .with_working_dir(config_dir)
            .with_capture(CaptureMode::Both);

        let mut process = AsyncProcess::new(spec);
        if let Some(handler) = output {
            // One handler feeds both subscriptions; the capability already
            // serializes line delivery, the mutex satisfies the borrow.
            let handler = Arc::new(Mutex::new(handler));
            let stdout_handler = Arc::clone(&handler);
            process = process
                .on_stdout_line(move |line| {
                    let mut handler = stdout_handler.lock();
                    (*handler)(OutputKind::Information, line);
                })
                .on_stderr_line(move |line| {
                    let mut handler = handler.lock();
                    (*handler)(OutputKind::Error, line);
                });
        }

        let result = match process.run(cancellation).await {
            Ok(result) => result,
            Err(LaunchError::Cancelled) => return Err(RunnerError::Cancelled),
            Err(err) => return Err(RunnerError::Launch(err)),
        };

        if !result.success() {
            return Err(RunnerError::EngineFailure(Box::new(EngineFailure {
                exit_code: result.exit_code,
                options: self.options.clone(),
                stdout: result.stdout,
                stderr: result.stderr,
            })));
        }

        tracing::debug!("fastbuild completed");
        Ok(())
    }
}
