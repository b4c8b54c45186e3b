//! Wire types for the reader result contract.
//!
//! These mirror, key for key, the JSON the Python reader scripts emit on
//! stdout. The union is untagged: consumers discriminate on the presence of
//! an `error` field, then on the shape registered for the file format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ContractError;
use crate::format::{FileFormat, ViewerKind};

/// Maximum number of preview rows a table payload may carry.
pub const TABLE_PREVIEW_ROWS: usize = 10;

/// Maximum number of numeric preview elements an array payload may carry.
pub const ARRAY_PREVIEW_ELEMENTS: usize = 20;

/// Truncation marker appended to array previews longer than the cap.
pub const TRUNCATION_MARKER: &str = "...";

/// Node kind in a tree payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A container node; may have children, never data fields.
    Group,
    /// A leaf node with shape, dtype, and preview.
    Dataset,
}

/// One node of an HDF5 or pickle tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Node name (last path segment; file root uses the file stem or "/").
    pub name: String,
    /// Absolute node path from the file root.
    pub path: String,
    /// Whether this node is a group or a dataset.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Node attributes.
    pub attrs: Map<String, Value>,
    /// Child nodes (groups only; possibly empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    /// Dataset shape (datasets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<u64>>,
    /// Dataset dtype (datasets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<String>,
    /// Flattened head of the dataset's values (datasets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Value>,
}

/// Summary block of a table payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Total row count of the file (not the preview length).
    pub rows: u64,
    /// Column count.
    pub columns: u64,
    /// Row group count.
    pub row_groups: u64,
    /// File size in megabytes.
    pub size_mb: f64,
    /// Compression codec of the first column chunk, or "unknown".
    pub compression: String,
}

/// One column of a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnField {
    /// Column name.
    pub name: String,
    /// Column dtype as reported by the reader.
    pub dtype: String,
}

/// Parquet table payload: summary, schema, and a capped row preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResult {
    /// File-level summary.
    pub summary: TableSummary,
    /// Column schema.
    pub schema: Vec<ColumnField>,
    /// First rows of the table; keys are a subset of the schema names.
    pub preview: Vec<Map<String, Value>>,
}

/// NumPy array payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayResult {
    /// Array shape.
    pub shape: Vec<u64>,
    /// Array dtype.
    pub dtype: String,
    /// Total element count; equals the product of `shape`.
    pub size: u64,
    /// Flattened head of the array. Elements are numbers, except for an
    /// optional trailing "..." marker when the array was truncated.
    pub preview: Vec<Value>,
}

/// Error payload: mutually exclusive with the success shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    /// The reader's error message.
    pub error: String,
}

impl ErrorResult {
    /// Creates an error payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// A decoded reader payload: one of the three success shapes, or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReaderPayload {
    /// Reader-reported (or synthesized) error.
    Error(ErrorResult),
    /// HDF5 / pickle tree.
    Tree(TreeNode),
    /// Parquet table.
    Table(TableResult),
    /// NumPy array.
    Array(ArrayResult),
}

impl ReaderPayload {
    /// Returns the error message if this is an error payload.
    pub fn error(&self) -> Option<&str> {
        match self {
            ReaderPayload::Error(e) => Some(&e.error),
            _ => None,
        }
    }

    /// Returns true if this payload is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, ReaderPayload::Error(_))
    }

    /// Returns the viewer kind this payload renders with, if successful.
    pub fn viewer(&self) -> Option<ViewerKind> {
        match self {
            ReaderPayload::Error(_) => None,
            ReaderPayload::Tree(_) => Some(ViewerKind::Tree),
            ReaderPayload::Table(_) => Some(ViewerKind::Table),
            ReaderPayload::Array(_) => Some(ViewerKind::Array),
        }
    }
}

/// Decodes raw reader output into the payload shape registered for `format`.
///
/// An `error` field anywhere at the top level short-circuits to
/// [`ReaderPayload::Error`] regardless of format; otherwise the output must
/// deserialize as the format's registered shape. Invariant checks are a
/// separate pass, see [`crate::validation::validate_payload`].
pub fn decode_payload(format: FileFormat, raw: &str) -> Result<ReaderPayload, ContractError> {
    // Readers emit a trailing newline; the error message must carry the
    // output without it.
    let trimmed = raw.trim();
    let value: Value =
        serde_json::from_str(trimmed).map_err(|_| ContractError::ParseFailed {
            output: trimmed.to_string(),
        })?;

    if value
        .as_object()
        .map_or(false, |obj| obj.contains_key("error"))
    {
        let error = serde_json::from_value::<ErrorResult>(value).map_err(|e| {
            ContractError::WrongShape {
                expected: "ErrorResult",
                source: e,
            }
        })?;
        return Ok(ReaderPayload::Error(error));
    }

    match format.viewer() {
        ViewerKind::Tree => serde_json::from_value::<TreeNode>(value)
            .map(ReaderPayload::Tree)
            .map_err(|e| ContractError::WrongShape {
                expected: "TreeNode",
                source: e,
            }),
        ViewerKind::Table => serde_json::from_value::<TableResult>(value)
            .map(ReaderPayload::Table)
            .map_err(|e| ContractError::WrongShape {
                expected: "TableResult",
                source: e,
            }),
        ViewerKind::Array => serde_json::from_value::<ArrayResult>(value)
            .map(ReaderPayload::Array)
            .map_err(|e| ContractError::WrongShape {
                expected: "ArrayResult",
                source: e,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TREE_JSON: &str = r#"{
        "name": "run_01",
        "path": "/",
        "type": "group",
        "attrs": {"version": 2},
        "children": [
            {
                "name": "temperature",
                "path": "/temperature",
                "type": "dataset",
                "attrs": {},
                "shape": [100, 3],
                "dtype": "float64",
                "preview": [1.5, 2.5, 3.5]
            }
        ]
    }"#;

    #[test]
    fn test_decode_tree() {
        let payload = decode_payload(FileFormat::Hdf5, TREE_JSON).unwrap();
        let ReaderPayload::Tree(root) = payload else {
            panic!("expected tree payload");
        };
        assert_eq!(root.kind, NodeKind::Group);
        assert_eq!(root.children.as_ref().unwrap().len(), 1);
        let child = &root.children.as_ref().unwrap()[0];
        assert_eq!(child.kind, NodeKind::Dataset);
        assert_eq!(child.shape, Some(vec![100, 3]));
        assert_eq!(child.dtype.as_deref(), Some("float64"));
    }

    #[test]
    fn test_decode_table() {
        let raw = r#"{
            "summary": {"rows": 5000, "columns": 2, "row_groups": 1, "size_mb": 0.42, "compression": "SNAPPY"},
            "schema": [{"name": "id", "dtype": "int64"}, {"name": "value", "dtype": "double"}],
            "preview": [{"id": 1, "value": 0.5}]
        }"#;
        let payload = decode_payload(FileFormat::Parquet, raw).unwrap();
        let ReaderPayload::Table(table) = payload else {
            panic!("expected table payload");
        };
        assert_eq!(table.summary.rows, 5000);
        assert_eq!(table.schema.len(), 2);
        assert_eq!(table.preview.len(), 1);
    }

    #[test]
    fn test_decode_array_with_truncation_marker() {
        let raw = r#"{
            "shape": [100],
            "dtype": "int32",
            "size": 100,
            "preview": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, "..."]
        }"#;
        let payload = decode_payload(FileFormat::Npy, raw).unwrap();
        let ReaderPayload::Array(array) = payload else {
            panic!("expected array payload");
        };
        assert_eq!(array.size, 100);
        assert_eq!(array.preview.len(), ARRAY_PREVIEW_ELEMENTS + 1);
        assert_eq!(
            array.preview.last().unwrap().as_str(),
            Some(TRUNCATION_MARKER)
        );
    }

    #[test]
    fn test_error_discriminator_wins_for_any_format() {
        for format in FileFormat::all() {
            let payload = decode_payload(*format, r#"{"error": "boom"}"#).unwrap();
            assert_eq!(payload.error(), Some("boom"));
        }
    }

    #[test]
    fn test_decode_not_json_embeds_raw_output() {
        let err = decode_payload(FileFormat::Npy, "not json").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse JSON: not json");
    }

    #[test]
    fn test_decode_not_json_strips_trailing_newline() {
        // Readers always terminate their output with a newline.
        let err = decode_payload(FileFormat::Npy, "not json\n").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse JSON: not json");
    }

    #[test]
    fn test_decode_wrong_shape_for_format() {
        // A table payload opened as npy must be a contract error, not a pass-through.
        let raw = r#"{
            "summary": {"rows": 1, "columns": 1, "row_groups": 1, "size_mb": 0.1, "compression": "none"},
            "schema": [],
            "preview": []
        }"#;
        let err = decode_payload(FileFormat::Npy, raw).unwrap_err();
        assert!(err.to_string().contains("ArrayResult"));
    }

    #[test]
    fn test_payload_serializes_untagged() {
        let payload = ReaderPayload::Error(ErrorResult::new("boom"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn test_group_serializes_without_dataset_fields() {
        let node = TreeNode {
            name: "/".to_string(),
            path: "/".to_string(),
            kind: NodeKind::Group,
            attrs: Map::new(),
            children: Some(Vec::new()),
            shape: None,
            dtype: None,
            preview: None,
        };
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("shape"));
        assert!(!json.contains("dtype"));
        assert!(json.contains(r#""type":"group""#));
    }
}
