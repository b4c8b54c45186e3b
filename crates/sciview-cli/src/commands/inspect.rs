//! Inspect command implementation
//!
//! Runs the reader for a data file and prints the resulting payload, either
//! as a colored human summary or as machine-readable JSON.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use sciview_reader::{Invoker, ReaderConfig};
use sciview_result::{
    ArrayResult, FileFormat, NodeKind, ReaderPayload, TableResult, TreeNode,
};

use super::json_output::{self, error_codes, InspectOutput, JsonError};

/// Options for the inspect command.
pub struct InspectArgs<'a> {
    /// Path of the data file.
    pub input: &'a str,
    /// Format override; detected from the extension when absent.
    pub format: Option<FileFormat>,
    /// Python interpreter override.
    pub python: Option<&'a str>,
    /// Reader scripts directory override.
    pub scripts_dir: Option<&'a str>,
    /// Reader timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Machine-readable JSON output.
    pub json: bool,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 success, 1 reader or format error
pub fn run(args: InspectArgs<'_>) -> Result<ExitCode> {
    let path = Path::new(args.input);
    let format = match args.format.or_else(|| FileFormat::from_path(path)) {
        Some(format) => format,
        None => {
            let message = format!("Unsupported file type: {}", args.input);
            if args.json {
                let error = JsonError::new(error_codes::UNKNOWN_FORMAT, &message);
                println!("{}", serde_json::to_string(&serde_json::json!({
                    "success": false,
                    "errors": [error],
                }))?);
            } else {
                eprintln!("{} {}", "error:".red().bold(), message);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut config = match args.scripts_dir {
        Some(dir) => ReaderConfig::with_scripts_dir(dir),
        None => ReaderConfig::default(),
    };
    if let Some(python) = args.python {
        config = config.python_path(python);
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }

    let payload = Invoker::with_config(config).invoke(format, path);
    let failed = payload.is_error();

    if args.json {
        let output = InspectOutput {
            success: !failed,
            format: format.to_string(),
            errors: json_output::reader_errors(&payload),
            payload,
        };
        let rendered = if args.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{}", rendered);
    } else {
        print_human(args.input, format, &payload);
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_human(input: &str, format: FileFormat, payload: &ReaderPayload) {
    println!(
        "{} {} ({})",
        "Inspecting:".cyan().bold(),
        input,
        format
    );
    println!();

    match payload {
        ReaderPayload::Error(error) => {
            eprintln!("{} {}", "error:".red().bold(), error.error);
        }
        ReaderPayload::Tree(root) => print_tree(root, 0),
        ReaderPayload::Table(table) => print_table(table),
        ReaderPayload::Array(array) => print_array(array),
    }
}

fn print_tree(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.kind {
        NodeKind::Group => {
            let child_count = node.children.as_ref().map_or(0, |c| c.len());
            println!(
                "{}{} {} ({} children, {} attrs)",
                indent,
                "group".blue().bold(),
                node.name,
                child_count,
                node.attrs.len()
            );
            if let Some(children) = &node.children {
                for child in children {
                    print_tree(child, depth + 1);
                }
            }
        }
        NodeKind::Dataset => {
            let shape = node
                .shape
                .as_ref()
                .map(|s| format!("{:?}", s))
                .unwrap_or_default();
            println!(
                "{}{} {} {} {}",
                indent,
                "dataset".green(),
                node.name,
                shape.dimmed(),
                node.dtype.as_deref().unwrap_or("").dimmed()
            );
        }
    }
}

fn print_table(table: &TableResult) {
    println!("{}", "Summary:".bold());
    println!("  rows:        {}", table.summary.rows);
    println!("  columns:     {}", table.summary.columns);
    println!("  row groups:  {}", table.summary.row_groups);
    println!("  size:        {} MB", table.summary.size_mb);
    println!("  compression: {}", table.summary.compression);
    println!();

    println!("{}", "Schema:".bold());
    for column in &table.schema {
        println!("  {} {}", column.name, column.dtype.dimmed());
    }
    println!();

    println!("{} {} rows", "Preview:".bold(), table.preview.len());
    for row in &table.preview {
        let cells: Vec<String> = table
            .schema
            .iter()
            .map(|c| {
                row.get(&c.name)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "null".to_string())
            })
            .collect();
        println!("  {}", cells.join(" | "));
    }
}

fn print_array(array: &ArrayResult) {
    println!("  shape:   {:?}", array.shape);
    println!("  dtype:   {}", array.dtype);
    println!("  size:    {}", array.size);
    let preview: Vec<String> = array.preview.iter().map(|v| v.to_string()).collect();
    println!("  preview: [{}]", preview.join(", "));
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn stub_args(input: &str) -> InspectArgs<'_> {
        InspectArgs {
            input,
            format: None,
            python: None,
            scripts_dir: None,
            timeout_secs: None,
            json: true,
            pretty: false,
        }
    }

    #[test]
    fn test_unknown_extension_fails() {
        let code = run(stub_args("notes.txt")).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_inspect_with_stub_reader() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("npy_reader.py"),
            r#"echo '{"shape": [2], "dtype": "int8", "size": 2, "preview": [1, 2]}'"#,
        )
        .unwrap();
        let scripts_dir = dir.path().to_str().unwrap().to_string();
        let mut args = stub_args("weights.npy");
        args.python = Some("sh");
        args.scripts_dir = Some(&scripts_dir);
        let code = run(args).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
    }
}
