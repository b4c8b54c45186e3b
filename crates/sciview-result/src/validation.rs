//! Contract validation for decoded reader payloads.
//!
//! Decoding checks that JSON deserializes into the right shape; this pass
//! checks the invariants the shapes cannot express on their own.

use std::collections::HashSet;

use crate::error::{
    ContractCode, ContractViolation, ContractWarning, ContractWarningCode, ValidationResult,
};
use crate::format::{FileFormat, ViewerKind};
use crate::payload::{
    ArrayResult, NodeKind, ReaderPayload, TableResult, TreeNode, ARRAY_PREVIEW_ELEMENTS,
    TABLE_PREVIEW_ROWS,
};

/// Validates a decoded payload against the contract for `format`.
///
/// Error payloads are always accepted (with a warning when the message is
/// empty); success payloads must match the format's viewer kind and satisfy
/// the per-shape invariants.
pub fn validate_payload(payload: &ReaderPayload, format: FileFormat) -> ValidationResult {
    let mut result = ValidationResult::default();

    match payload {
        ReaderPayload::Error(error) => {
            if error.error.trim().is_empty() {
                result.add_warning(ContractWarning::new(
                    ContractWarningCode::EmptyErrorMessage,
                    "error payload has an empty message",
                ));
            }
        }
        ReaderPayload::Tree(root) => {
            check_viewer(format, ViewerKind::Tree, &mut result);
            validate_tree_node(root, &mut result);
        }
        ReaderPayload::Table(table) => {
            check_viewer(format, ViewerKind::Table, &mut result);
            validate_table(table, &mut result);
        }
        ReaderPayload::Array(array) => {
            check_viewer(format, ViewerKind::Array, &mut result);
            validate_array(array, &mut result);
        }
    }

    result
}

fn check_viewer(format: FileFormat, got: ViewerKind, result: &mut ValidationResult) {
    if format.viewer() != got {
        result.add_violation(ContractViolation::new(
            ContractCode::ShapeMismatch,
            format!(
                "{} files render with the {} viewer, got a {} payload",
                format,
                format.viewer(),
                got
            ),
        ));
    }
}

fn validate_tree_node(node: &TreeNode, result: &mut ValidationResult) {
    match node.kind {
        NodeKind::Group => {
            if node.shape.is_some() || node.dtype.is_some() || node.preview.is_some() {
                result.add_violation(ContractViolation::with_path(
                    ContractCode::GroupWithDatasetFields,
                    "group node carries shape/dtype/preview",
                    &node.path,
                ));
            }
        }
        NodeKind::Dataset => {
            if node.children.is_some() {
                result.add_violation(ContractViolation::with_path(
                    ContractCode::DatasetWithChildren,
                    "dataset node carries children",
                    &node.path,
                ));
            }
            if node.shape.is_none() || node.dtype.is_none() {
                result.add_violation(ContractViolation::with_path(
                    ContractCode::DatasetMissingFields,
                    "dataset node is missing shape or dtype",
                    &node.path,
                ));
            }
        }
    }

    if let Some(children) = &node.children {
        let mut seen = HashSet::new();
        for child in children {
            if !seen.insert(child.path.as_str()) {
                result.add_violation(ContractViolation::with_path(
                    ContractCode::DuplicateChildPath,
                    "duplicate path among siblings",
                    &child.path,
                ));
            }
            validate_tree_node(child, result);
        }
    }
}

fn validate_table(table: &TableResult, result: &mut ValidationResult) {
    if table.preview.len() > TABLE_PREVIEW_ROWS {
        result.add_violation(ContractViolation::new(
            ContractCode::TablePreviewTooLong,
            format!(
                "table preview has {} rows, cap is {}",
                table.preview.len(),
                TABLE_PREVIEW_ROWS
            ),
        ));
    }

    let columns: HashSet<&str> = table.schema.iter().map(|c| c.name.as_str()).collect();
    for (row_index, row) in table.preview.iter().enumerate() {
        for key in row.keys() {
            if !columns.contains(key.as_str()) {
                result.add_violation(ContractViolation::with_path(
                    ContractCode::PreviewKeyNotInSchema,
                    format!("preview key '{}' is not a schema column", key),
                    format!("preview[{}]", row_index),
                ));
            }
        }
    }
}

fn validate_array(array: &ArrayResult, result: &mut ValidationResult) {
    let expected: u64 = array.shape.iter().product();
    if expected != array.size {
        result.add_violation(ContractViolation::new(
            ContractCode::SizeShapeMismatch,
            format!(
                "size {} does not equal the product of shape {:?} ({})",
                array.size, array.shape, expected
            ),
        ));
    }

    // The trailing "..." marker is not a data element.
    let numeric = array.preview.iter().filter(|v| v.is_number()).count();
    if numeric > ARRAY_PREVIEW_ELEMENTS {
        result.add_violation(ContractViolation::new(
            ContractCode::ArrayPreviewTooLong,
            format!(
                "array preview has {} elements, cap is {}",
                numeric, ARRAY_PREVIEW_ELEMENTS
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{decode_payload, ColumnField, ErrorResult, TableSummary};
    use serde_json::{json, Map};

    fn group(path: &str, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            name: path.rsplit('/').next().unwrap_or("/").to_string(),
            path: path.to_string(),
            kind: NodeKind::Group,
            attrs: Map::new(),
            children: Some(children),
            shape: None,
            dtype: None,
            preview: None,
        }
    }

    fn dataset(path: &str) -> TreeNode {
        TreeNode {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            kind: NodeKind::Dataset,
            attrs: Map::new(),
            children: None,
            shape: Some(vec![4]),
            dtype: Some("int64".to_string()),
            preview: Some(json!([1, 2, 3, 4])),
        }
    }

    #[test]
    fn test_valid_tree_passes() {
        let root = group("/", vec![dataset("/a"), group("/b", vec![dataset("/b/c")])]);
        let result = validate_payload(&ReaderPayload::Tree(root), FileFormat::Hdf5);
        assert!(result.is_ok(), "{:?}", result.violations);
    }

    #[test]
    fn test_dataset_with_children_is_c003() {
        let mut bad = dataset("/a");
        bad.children = Some(vec![]);
        let root = group("/", vec![bad]);
        let result = validate_payload(&ReaderPayload::Tree(root), FileFormat::Hdf5);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].code, ContractCode::DatasetWithChildren);
        assert_eq!(result.violations[0].path.as_deref(), Some("/a"));
    }

    #[test]
    fn test_group_with_dataset_fields_is_c002() {
        let mut bad = group("/g", vec![]);
        bad.dtype = Some("float32".to_string());
        let result = validate_payload(&ReaderPayload::Tree(bad), FileFormat::Pickle);
        assert_eq!(result.violations[0].code, ContractCode::GroupWithDatasetFields);
    }

    #[test]
    fn test_duplicate_sibling_paths_is_c005() {
        let root = group("/", vec![dataset("/a"), dataset("/a")]);
        let result = validate_payload(&ReaderPayload::Tree(root), FileFormat::Hdf5);
        assert!(result
            .violations
            .iter()
            .any(|v| v.code == ContractCode::DuplicateChildPath));
    }

    #[test]
    fn test_viewer_mismatch_is_c001() {
        let root = group("/", vec![]);
        let result = validate_payload(&ReaderPayload::Tree(root), FileFormat::Parquet);
        assert_eq!(result.violations[0].code, ContractCode::ShapeMismatch);
    }

    #[test]
    fn test_table_preview_cap_and_schema_keys() {
        let table = TableResult {
            summary: TableSummary {
                rows: 100,
                columns: 1,
                row_groups: 1,
                size_mb: 0.1,
                compression: "SNAPPY".to_string(),
            },
            schema: vec![ColumnField {
                name: "id".to_string(),
                dtype: "int64".to_string(),
            }],
            preview: (0..11)
                .map(|i| {
                    let mut row = Map::new();
                    row.insert("id".to_string(), json!(i));
                    if i == 0 {
                        row.insert("ghost".to_string(), json!(0));
                    }
                    row
                })
                .collect(),
        };
        let result = validate_payload(&ReaderPayload::Table(table), FileFormat::Parquet);
        let codes: Vec<_> = result.violations.iter().map(|v| v.code).collect();
        assert!(codes.contains(&ContractCode::TablePreviewTooLong));
        assert!(codes.contains(&ContractCode::PreviewKeyNotInSchema));
    }

    #[test]
    fn test_array_size_shape_mismatch_is_c008() {
        let array = ArrayResult {
            shape: vec![10, 10],
            dtype: "float64".to_string(),
            size: 99,
            preview: vec![json!(1.0)],
        };
        let result = validate_payload(&ReaderPayload::Array(array), FileFormat::Npy);
        assert_eq!(result.violations[0].code, ContractCode::SizeShapeMismatch);
    }

    #[test]
    fn test_array_truncation_marker_not_counted() {
        let raw = json!({
            "shape": [100],
            "dtype": "int32",
            "size": 100,
            "preview": (0..20).map(|i| json!(i)).chain([json!("...")]).collect::<Vec<_>>()
        })
        .to_string();
        let payload = decode_payload(FileFormat::Npy, &raw).unwrap();
        let result = validate_payload(&payload, FileFormat::Npy);
        assert!(result.is_ok(), "{:?}", result.violations);
    }

    #[test]
    fn test_empty_error_message_is_w001() {
        let payload = ReaderPayload::Error(ErrorResult::new("  "));
        let result = validate_payload(&payload, FileFormat::Hdf5);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 1);
    }
}
