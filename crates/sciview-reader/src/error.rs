//! Error types for reader invocation.

use sciview_result::{ContractError, ErrorResult};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for reader invocation operations.
pub type InvokeResult<T> = Result<T, ReaderError>;

/// Hint appended when the interpreter itself could not be started or is
/// missing packages the reader needs.
pub const PYTHON_PATH_HINT: &str =
    "Tip: Configure the Python interpreter path to point to a Python with required packages installed.";

/// Marker the Python interpreter prints when an import fails.
const MODULE_NOT_FOUND_MARKER: &str = "No module named";

/// Errors that can occur while running a reader script.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Failed to spawn the Python process.
    #[error("Failed to spawn Python: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Reader process exceeded the configured timeout.
    #[error("Reader process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Reader process was superseded and killed before completing.
    #[error("Reader invocation was cancelled")]
    Cancelled,

    /// Reader process exited nonzero without producing output.
    #[error("Reader process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Reader script not found at the configured location.
    #[error("Reader script not found at: {path}")]
    ScriptNotFound { path: PathBuf },

    /// Reader output broke the payload contract (not JSON, wrong shape, or
    /// invariant violation).
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Folds this error into the error payload delivered to viewers.
    ///
    /// This is where the invocation surface keeps its "never rejects"
    /// promise: every failure becomes an `ErrorResult` message, with a
    /// remediation hint where one is known.
    pub fn into_payload(self) -> ErrorResult {
        let message = match &self {
            ReaderError::ProcessFailed { exit_code, stderr } => {
                let mut message = if stderr.trim().is_empty() {
                    format!("Process exited with code {}", exit_code)
                } else {
                    stderr.clone()
                };
                if stderr.contains(MODULE_NOT_FOUND_MARKER) {
                    message.push_str("\n\n");
                    message.push_str(PYTHON_PATH_HINT);
                }
                message
            }
            ReaderError::SpawnFailed(_) => {
                format!("{}\n\n{}", self, PYTHON_PATH_HINT)
            }
            _ => self.to_string(),
        };
        ErrorResult::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failed_empty_stderr_is_generic() {
        let payload = ReaderError::process_failed(3, "").into_payload();
        assert_eq!(payload.error, "Process exited with code 3");
    }

    #[test]
    fn test_process_failed_uses_stderr_text() {
        let payload = ReaderError::process_failed(1, "Traceback: boom").into_payload();
        assert_eq!(payload.error, "Traceback: boom");
    }

    #[test]
    fn test_module_not_found_appends_hint() {
        let payload =
            ReaderError::process_failed(1, "ModuleNotFoundError: No module named 'h5py'")
                .into_payload();
        assert!(payload.error.contains("No module named 'h5py'"));
        assert!(payload.error.contains(PYTHON_PATH_HINT));
    }

    #[test]
    fn test_spawn_failure_appends_hint() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let payload = ReaderError::SpawnFailed(io).into_payload();
        assert!(payload.error.starts_with("Failed to spawn Python:"));
        assert!(payload.error.contains(PYTHON_PATH_HINT));
    }

    #[test]
    fn test_parse_failure_embeds_raw_output() {
        let err = ReaderError::Contract(ContractError::ParseFailed {
            output: "not json".to_string(),
        });
        assert_eq!(err.into_payload().error, "Failed to parse JSON: not json");
    }
}
