//! Launch configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which streams are buffered into the [`ProcessResult`].
///
/// Line subscribers receive their stream regardless of this mode; capture
/// only controls what the result carries.
///
/// [`ProcessResult`]: crate::ProcessResult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Buffer nothing.
    None,
    /// Buffer standard output only.
    Stdout,
    /// Buffer standard error only.
    Stderr,
    /// Buffer both streams.
    #[default]
    Both,
}

impl CaptureMode {
    pub(crate) fn wants_stdout(self) -> bool {
        matches!(self, CaptureMode::Stdout | CaptureMode::Both)
    }

    pub(crate) fn wants_stderr(self) -> bool {
        matches!(self, CaptureMode::Stderr | CaptureMode::Both)
    }
}

/// Describes one subprocess invocation.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    /// Program to execute.
    pub program: PathBuf,
    /// Arguments, one entry per argv token.
    pub args: Vec<String>,
    /// Working directory; inherits the parent's when unset.
    pub working_dir: Option<PathBuf>,
    /// Which streams to buffer into the result.
    pub capture: CaptureMode,
}

impl LaunchSpec {
    /// Creates a spec for the given program with no arguments, the inherited
    /// working directory, and both streams captured.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            capture: CaptureMode::Both,
        }
    }

    /// Sets the argument list.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets the capture mode.
    pub fn with_capture(mut self, capture: CaptureMode) -> Self {
        self.capture = capture;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_builder() {
        let spec = LaunchSpec::new("/bin/echo")
            .with_args(["hello", "world"])
            .with_working_dir("/tmp")
            .with_capture(CaptureMode::Stderr);

        assert_eq!(spec.program, PathBuf::from("/bin/echo"));
        assert_eq!(spec.args, vec!["hello", "world"]);
        assert_eq!(spec.working_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(spec.capture, CaptureMode::Stderr);
    }

    #[test]
    fn capture_mode_stream_selection() {
        assert!(CaptureMode::Both.wants_stdout());
        assert!(CaptureMode::Both.wants_stderr());
        assert!(CaptureMode::Stdout.wants_stdout());
        assert!(!CaptureMode::Stdout.wants_stderr());
        assert!(!CaptureMode::None.wants_stdout());
        assert!(!CaptureMode::None.wants_stderr());
    }
}
