//! Reader invocation: spawn, wait, capture, decode.
//!
//! One invocation is a single spawn-wait-parse cycle against a reader script
//! for one load or refresh. The wire protocol is exit code 0 plus a single
//! JSON document on stdout; anything else maps to an error payload.

use std::io::Read;
use std::path::Path;
use std::process::{Child, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use sciview_result::{decode_validated, ErrorResult, FileFormat, ReaderPayload};

use crate::config::ReaderConfig;
use crate::error::{InvokeResult, ReaderError};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Cancellation handle for an in-flight invocation.
///
/// A superseded invocation is not merely ignored: tripping its token kills
/// the reader process, and the wait loop reaps it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, untripped token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the token. The owning invocation kills its child process at the
    /// next poll.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true if the token has been tripped.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Runs reader scripts against data files.
pub struct Invoker {
    config: ReaderConfig,
}

impl Invoker {
    /// Creates an invoker with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Creates an invoker with the given configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Runs the reader for `format` against `file`, returning the decoded,
    /// contract-validated payload or the failure that prevented it.
    pub fn run(&self, format: FileFormat, file: &Path) -> InvokeResult<ReaderPayload> {
        self.run_cancellable(format, file, &CancelToken::new())
    }

    /// Like [`Invoker::run`], but killable through `cancel`.
    pub fn run_cancellable(
        &self,
        format: FileFormat,
        file: &Path,
        cancel: &CancelToken,
    ) -> InvokeResult<ReaderPayload> {
        let python = self.config.resolve_python();
        let script = self.config.resolve_script(format)?;

        let mut cmd = std::process::Command::new(&python);
        cmd.arg(&script.path)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(ReaderError::SpawnFailed)?;

        // Drain both pipes off-thread so a filled pipe can never deadlock the
        // wait loop.
        let stdout_reader = child.stdout.take().map(drain);
        let stderr_reader = child.stderr.take().map(drain);

        let status = wait_for_exit(&mut child, self.config.timeout, cancel)?;

        let stdout = collect(stdout_reader);
        let stderr = collect(stderr_reader);

        if !status.success() && stdout.trim().is_empty() {
            return Err(ReaderError::process_failed(
                status.code().unwrap_or(-1),
                stderr,
            ));
        }

        // Nonzero exit with output still goes through the parser: readers
        // print `{"error": ...}` and exit 1 on their own failures.
        Ok(decode_validated(format, &stdout)?)
    }

    /// The never-fails surface: every error is folded into an error payload.
    ///
    /// This is what providers deliver to views, success or not.
    pub fn invoke(&self, format: FileFormat, file: &Path) -> ReaderPayload {
        self.invoke_cancellable(format, file, &CancelToken::new())
    }

    /// Like [`Invoker::invoke`], but killable through `cancel`.
    pub fn invoke_cancellable(
        &self,
        format: FileFormat,
        file: &Path,
        cancel: &CancelToken,
    ) -> ReaderPayload {
        match self.run_cancellable(format, file, cancel) {
            Ok(payload) => payload,
            Err(err) => ReaderPayload::Error(err.into_payload()),
        }
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new()
    }
}

fn wait_for_exit(
    child: &mut Child,
    timeout: Option<Duration>,
    cancel: &CancelToken,
) -> InvokeResult<ExitStatus> {
    let start = Instant::now();

    loop {
        if cancel.is_cancelled() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ReaderError::Cancelled);
        }

        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if let Some(timeout) = timeout {
                    if start.elapsed() > timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ReaderError::Timeout {
                            timeout_secs: timeout.as_secs(),
                        });
                    }
                }
                std::thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => return Err(ReaderError::Io(e)),
        }
    }
}

fn drain<R: Read + Send + 'static>(mut stream: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Synthesizes the error payload for a failure that occurs before an
/// invocation can even start (e.g., unknown file format at the provider).
pub fn error_payload(message: impl Into<String>) -> ReaderPayload {
    ReaderPayload::Error(ErrorResult::new(message))
}
