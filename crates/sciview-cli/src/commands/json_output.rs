//! JSON output types for machine-readable CLI output.
//!
//! This module provides structured output types for the `--json` flag on
//! `inspect`, `check`, and `formats`. The codes are stable and can be used
//! for programmatic error handling.

use sciview_result::{ContractViolation, ReaderPayload};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file format or extension
    pub const UNKNOWN_FORMAT: &str = "CLI_002";
    /// Reader invocation produced an error payload
    pub const READER_ERROR: &str = "CLI_003";
    /// Payload violates the reader result contract
    pub const CONTRACT_VIOLATION: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "C003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Node or field path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the node path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Maps a reader error payload to its CLI_003 entry; success payloads map
/// to no errors.
pub fn reader_errors(payload: &ReaderPayload) -> Vec<JsonError> {
    match payload.error() {
        Some(message) => vec![JsonError::new(error_codes::READER_ERROR, message)],
        None => Vec::new(),
    }
}

/// Converts a contract violation into JSON output form.
pub fn violation_to_json(violation: &ContractViolation) -> JsonError {
    let mut error = JsonError::new(violation.code.code(), violation.message.clone());
    if let Some(path) = &violation.path {
        error = error.with_path(path.clone());
    }
    error
}

/// Output of `sciview inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Whether the reader produced a success payload.
    pub success: bool,
    /// The detected or requested file format.
    pub format: String,
    /// The reader payload (success shape or error shape).
    pub payload: ReaderPayload,
    /// CLI-level errors (not reader errors).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<JsonError>,
}

/// Output of `sciview check --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Whether the payload satisfies the contract.
    pub success: bool,
    /// The format the payload was checked against.
    pub format: String,
    /// Contract violations found.
    pub errors: Vec<JsonError>,
    /// Contract warnings found.
    pub warnings: Vec<JsonError>,
}

/// One entry of `sciview formats --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatEntry {
    /// Format identifier (e.g., "hdf5").
    pub format: String,
    /// Registered file extensions.
    pub extensions: Vec<String>,
    /// Reader script the format invokes.
    pub reader_script: String,
    /// Viewer kind the payload renders with.
    pub viewer: String,
}
