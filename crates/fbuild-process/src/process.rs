//! The subprocess lifecycle: spawn, stream, await, kill.

use std::process::Stdio;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::error::{LaunchError, LaunchResult};
use crate::spec::LaunchSpec;

/// Which stream a line arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    Stdout,
    Stderr,
}

/// A per-line subscriber.
pub type LineCallback = Box<dyn FnMut(&str) + Send>;

/// Captured outcome of a completed subprocess.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    /// Exit code; -1 when the process was terminated by a signal.
    pub exit_code: i32,
    /// Buffered standard output, newline-joined lines.
    pub stdout: String,
    /// Buffered standard error, newline-joined lines.
    pub stderr: String,
}

impl ProcessResult {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// One subprocess invocation with optional line subscriptions.
///
/// Both streams are piped and pumped through a single channel, so capture
/// buffers stay complete when subscribers are attached and subscriber calls
/// never overlap.
pub struct AsyncProcess {
    spec: LaunchSpec,
    on_stdout: Option<LineCallback>,
    on_stderr: Option<LineCallback>,
}

impl AsyncProcess {
    /// Creates a process from a launch spec, with no subscriptions.
    pub fn new(spec: LaunchSpec) -> Self {
        Self {
            spec,
            on_stdout: None,
            on_stderr: None,
        }
    }

    /// Subscribes to standard-output lines.
    pub fn on_stdout_line(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_stdout = Some(Box::new(callback));
        self
    }

    /// Subscribes to standard-error lines.
    pub fn on_stderr_line(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_stderr = Some(Box::new(callback));
        self
    }

    /// Runs to completion with a token that is never cancelled.
    pub async fn run_to_completion(self) -> LaunchResult<ProcessResult> {
        self.run(CancellationToken::new()).await
    }

    /// Spawns the process and suspends until it exits or the token fires.
    ///
    /// On cancellation the child is killed and reaped and the call returns
    /// [`LaunchError::Cancelled`] promptly; a killed process never surfaces
    /// as an exit-code result.
    pub async fn run(mut self, cancellation: CancellationToken) -> LaunchResult<ProcessResult> {
        let mut cmd = Command::new(&self.spec.program);
        cmd.args(&self.spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.spec.working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            program = %self.spec.program.display(),
            args = ?self.spec.args,
            "spawning process"
        );

        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: self.spec.program.clone(),
            source,
        })?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_lines(
            child.stdout.take(),
            OutputSource::Stdout,
            tx.clone(),
        ));
        tokio::spawn(pump_lines(child.stderr.take(), OutputSource::Stderr, tx));

        let mut stdout_buf = String::new();
        let mut stderr_buf = String::new();

        // Drain lines until both pipes reach EOF; the channel closes once
        // the last pump exits. A single consumer keeps subscriber calls
        // serialized while the two pumps interleave freely.
        loop {
            tokio::select! {
                line = rx.recv() => match line {
                    Some((source, line)) => {
                        self.dispatch(source, &line, &mut stdout_buf, &mut stderr_buf);
                    }
                    None => break,
                },
                _ = cancellation.cancelled() => {
                    let _ = child.kill().await;
                    return Err(LaunchError::Cancelled);
                }
            }
        }

        let status = tokio::select! {
            status = child.wait() => status.map_err(LaunchError::Wait)?,
            _ = cancellation.cancelled() => {
                let _ = child.kill().await;
                return Err(LaunchError::Cancelled);
            }
        };

        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(exit_code, "process exited");

        Ok(ProcessResult {
            exit_code,
            stdout: stdout_buf,
            stderr: stderr_buf,
        })
    }

    /// Tees one line into the capture buffer and the matching subscriber.
    fn dispatch(
        &mut self,
        source: OutputSource,
        line: &str,
        stdout_buf: &mut String,
        stderr_buf: &mut String,
    ) {
        match source {
            OutputSource::Stdout => {
                if self.spec.capture.wants_stdout() {
                    append_line(stdout_buf, line);
                }
                if let Some(callback) = self.on_stdout.as_mut() {
                    callback(line);
                }
            }
            OutputSource::Stderr => {
                if self.spec.capture.wants_stderr() {
                    append_line(stderr_buf, line);
                }
                if let Some(callback) = self.on_stderr.as_mut() {
                    callback(line);
                }
            }
        }
    }
}

fn append_line(buf: &mut String, line: &str) {
    if !buf.is_empty() {
        buf.push('\n');
    }
    buf.push_str(line);
}

/// Reads lines from one pipe and forwards them, tagged with their source,
/// until EOF or until the consumer goes away.
async fn pump_lines<R>(
    stream: Option<R>,
    source: OutputSource,
    tx: UnboundedSender<(OutputSource, String)>,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(stream) = stream else {
        return;
    };
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send((source, line)).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::CaptureMode;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> LaunchSpec {
        LaunchSpec::new("/bin/sh").with_args(["-c", script])
    }

    #[test]
    fn append_line_joins_without_trailing_newline() {
        let mut buf = String::new();
        append_line(&mut buf, "one");
        assert_eq!(buf, "one");
        append_line(&mut buf, "two");
        assert_eq!(buf, "one\ntwo");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_both_streams() {
        let result = AsyncProcess::new(sh("echo out; echo err 1>&2"))
            .run_to_completion()
            .await
            .unwrap();

        assert!(result.success());
        assert_eq!(result.stdout, "out");
        assert_eq!(result.stderr, "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_nonzero_exit_codes() {
        let result = AsyncProcess::new(sh("exit 7"))
            .run_to_completion()
            .await
            .unwrap();

        assert!(!result.success());
        assert_eq!(result.exit_code, 7);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn subscribers_and_capture_both_see_every_line() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let result = AsyncProcess::new(sh("echo one; echo two; echo three"))
            .on_stdout_line(move |line| sink.lock().unwrap().push(line.to_string()))
            .run_to_completion()
            .await
            .unwrap();

        assert_eq!(result.stdout, "one\ntwo\nthree");
        assert_eq!(*seen.lock().unwrap(), vec!["one", "two", "three"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_mode_none_still_feeds_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let spec = sh("echo hello").with_capture(CaptureMode::None);
        let result = AsyncProcess::new(spec)
            .on_stdout_line(move |line| sink.lock().unwrap().push(line.to_string()))
            .run_to_completion()
            .await
            .unwrap();

        assert!(result.stdout.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec!["hello"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn working_directory_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let spec = sh("pwd").with_working_dir(dir.path());

        let result = AsyncProcess::new(spec).run_to_completion().await.unwrap();

        let reported = std::fs::canonicalize(result.stdout.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancellation_kills_the_child_promptly() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let err = AsyncProcess::new(sh("sleep 10; exit 3"))
            .run(token)
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn spawn_failure_names_the_program() {
        let spec = LaunchSpec::new("/nonexistent/program/for/fbuild");
        let err = AsyncProcess::new(spec)
            .run_to_completion()
            .await
            .unwrap_err();

        match err {
            LaunchError::Spawn { program, .. } => {
                assert_eq!(program, std::path::PathBuf::from("/nonexistent/program/for/fbuild"));
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }
}
