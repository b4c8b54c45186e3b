//! Error types for payload decoding and contract validation.

use thiserror::Error;

/// Contract violation codes for reader payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractCode {
    /// C001: Payload shape does not match the format's viewer kind
    ShapeMismatch,
    /// C002: Group node carries dataset-only fields
    GroupWithDatasetFields,
    /// C003: Dataset node carries children
    DatasetWithChildren,
    /// C004: Dataset node missing shape or dtype
    DatasetMissingFields,
    /// C005: Duplicate child path among siblings
    DuplicateChildPath,
    /// C006: Table preview exceeds the row cap
    TablePreviewTooLong,
    /// C007: Table preview row key not present in schema
    PreviewKeyNotInSchema,
    /// C008: Array size does not equal the product of its shape
    SizeShapeMismatch,
    /// C009: Array preview exceeds the element cap
    ArrayPreviewTooLong,
}

impl ContractCode {
    /// Returns the code string (e.g., "C001").
    pub fn code(&self) -> &'static str {
        match self {
            ContractCode::ShapeMismatch => "C001",
            ContractCode::GroupWithDatasetFields => "C002",
            ContractCode::DatasetWithChildren => "C003",
            ContractCode::DatasetMissingFields => "C004",
            ContractCode::DuplicateChildPath => "C005",
            ContractCode::TablePreviewTooLong => "C006",
            ContractCode::PreviewKeyNotInSchema => "C007",
            ContractCode::SizeShapeMismatch => "C008",
            ContractCode::ArrayPreviewTooLong => "C009",
        }
    }
}

impl std::fmt::Display for ContractCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for contract validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractWarningCode {
    /// W001: Error payload with an empty message
    EmptyErrorMessage,
}

impl ContractWarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            ContractWarningCode::EmptyErrorMessage => "W001",
        }
    }
}

impl std::fmt::Display for ContractWarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A contract violation with code, message, and node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    /// The violation code.
    pub code: ContractCode,
    /// Human-readable message.
    pub message: String,
    /// Path to the offending node or field (e.g., "/group_a/ds1.preview").
    pub path: Option<String>,
}

impl ContractViolation {
    /// Creates a new violation.
    pub fn new(code: ContractCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new violation with a node path.
    pub fn with_path(
        code: ContractCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {} (at {})", self.code, self.message, path),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// A contract warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractWarning {
    /// The warning code.
    pub code: ContractWarningCode,
    /// Human-readable message.
    pub message: String,
}

impl ContractWarning {
    /// Creates a new warning.
    pub fn new(code: ContractWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result of contract validation: ok iff no violations were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Violations found (payload breaks the contract).
    pub violations: Vec<ContractViolation>,
    /// Warnings found (payload is accepted, but suspect).
    pub warnings: Vec<ContractWarning>,
}

impl ValidationResult {
    /// Returns true if the payload satisfies the contract.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Records a violation.
    pub fn add_violation(&mut self, violation: ContractViolation) {
        self.violations.push(violation);
    }

    /// Records a warning.
    pub fn add_warning(&mut self, warning: ContractWarning) {
        self.warnings.push(warning);
    }
}

/// Errors from decoding a reader payload.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Output was not valid JSON. The raw text is embedded for diagnosis.
    #[error("Failed to parse JSON: {output}")]
    ParseFailed {
        /// The raw reader output.
        output: String,
    },

    /// JSON parsed, but does not deserialize as the expected payload shape.
    #[error("Reader payload does not match the {expected} contract: {source}")]
    WrongShape {
        /// Name of the expected shape (e.g., "TreeNode").
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// JSON deserialized, but the payload violates a contract invariant.
    #[error("Reader payload violates the contract: {}", first_violation(.result))]
    Invalid {
        /// The full validation result.
        result: ValidationResult,
    },
}

fn first_violation(result: &ValidationResult) -> String {
    result
        .violations
        .first()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown violation".to_string())
}
