//! Formats command implementation
//!
//! Lists the registered file formats, their extensions, reader scripts, and
//! viewer bindings.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use sciview_result::FileFormat;

use super::json_output::FormatEntry;

/// Run the formats command
pub fn run(json_output: bool) -> Result<ExitCode> {
    if json_output {
        let entries: Vec<FormatEntry> = FileFormat::all()
            .iter()
            .map(|f| FormatEntry {
                format: f.to_string(),
                extensions: f.extensions().iter().map(|e| e.to_string()).collect(),
                reader_script: f.reader_script().to_string(),
                viewer: f.viewer().to_string(),
            })
            .collect();
        println!("{}", serde_json::to_string(&entries)?);
    } else {
        println!("{}", "Registered formats:".cyan().bold());
        for format in FileFormat::all() {
            println!(
                "  {} extensions: {} | script: {} | viewer: {}",
                format.to_string().bold(),
                format.extensions().join(", "),
                format.reader_script(),
                format.viewer()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
