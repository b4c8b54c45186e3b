//! SciView Reader Result Contract
//!
//! This crate provides the types, decoding, and validation for the JSON
//! contract between SciView and its external Python reader scripts. Each
//! reader parses one scientific file format and emits a single JSON document
//! on stdout:
//!
//! - **Tree** (HDF5, pickle): a recursive group/dataset hierarchy
//! - **Table** (parquet): summary, schema, and a capped row preview
//! - **Array** (npy): shape, dtype, size, and a capped element preview
//! - **Error**: `{"error": "..."}`, mutually exclusive with the above
//!
//! # Example
//!
//! ```
//! use sciview_result::{decode_payload, validate_payload, FileFormat, ReaderPayload};
//!
//! let raw = r#"{"shape": [3], "dtype": "int64", "size": 3, "preview": [1, 2, 3]}"#;
//! let payload = decode_payload(FileFormat::Npy, raw).unwrap();
//! assert!(validate_payload(&payload, FileFormat::Npy).is_ok());
//! assert!(matches!(payload, ReaderPayload::Array(_)));
//! ```
//!
//! # Modules
//!
//! - [`format`]: file format and viewer registry
//! - [`payload`]: wire types and decoding
//! - [`error`]: contract violation codes and errors
//! - [`validation`]: invariant checks on decoded payloads

pub mod error;
pub mod format;
pub mod payload;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    ContractCode, ContractError, ContractViolation, ContractWarning, ContractWarningCode,
    ValidationResult,
};
pub use format::{FileFormat, ViewerKind};
pub use payload::{
    decode_payload, ArrayResult, ColumnField, ErrorResult, NodeKind, ReaderPayload, TableResult,
    TableSummary, TreeNode, ARRAY_PREVIEW_ELEMENTS, TABLE_PREVIEW_ROWS, TRUNCATION_MARKER,
};
pub use validation::validate_payload;

/// Decodes raw reader output and validates it in one step.
///
/// This is the surface the invocation layer uses: any shape or invariant
/// problem comes back as a [`ContractError`] rather than reaching a renderer.
pub fn decode_validated(
    format: FileFormat,
    raw: &str,
) -> Result<ReaderPayload, ContractError> {
    let payload = decode_payload(format, raw)?;
    let result = validate_payload(&payload, format);
    if !result.is_ok() {
        return Err(ContractError::Invalid { result });
    }
    Ok(payload)
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_decode_validated_rejects_invariant_break() {
        // Parses and has the right shape, but size != product(shape).
        let raw = r#"{"shape": [2, 2], "dtype": "int8", "size": 5, "preview": [0]}"#;
        let err = decode_validated(FileFormat::Npy, raw).unwrap_err();
        assert!(matches!(err, ContractError::Invalid { .. }));
        assert!(err.to_string().contains("C008"));
    }

    #[test]
    fn test_decode_validated_accepts_reader_error() {
        let payload = decode_validated(FileFormat::Parquet, r#"{"error": "file is corrupt"}"#)
            .unwrap();
        assert_eq!(payload.error(), Some("file is corrupt"));
    }
}
