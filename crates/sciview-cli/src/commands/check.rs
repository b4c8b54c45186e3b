//! Check command implementation
//!
//! Validates a reader payload file against the contract for a format,
//! without invoking any reader. Useful when developing reader scripts.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sciview_result::{decode_payload, validate_payload, FileFormat};

use super::json_output::{error_codes, violation_to_json, CheckOutput, JsonError};

/// Run the check command
///
/// # Arguments
/// * `payload_path` - Path to a JSON file holding a reader payload
/// * `format` - Format whose contract the payload must satisfy
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 contract satisfied, 1 otherwise
pub fn run(payload_path: &str, format: FileFormat, json_output: bool) -> Result<ExitCode> {
    let raw = match std::fs::read_to_string(Path::new(payload_path)) {
        Ok(raw) => raw,
        Err(e) => {
            let error = JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read {}: {}", payload_path, e),
            );
            return finish(format, vec![error], Vec::new(), json_output);
        }
    };

    let payload = match decode_payload(format, &raw) {
        Ok(payload) => payload,
        Err(e) => {
            let error = JsonError::new(error_codes::CONTRACT_VIOLATION, e.to_string());
            return finish(format, vec![error], Vec::new(), json_output);
        }
    };

    let result = validate_payload(&payload, format);
    let errors: Vec<JsonError> = result.violations.iter().map(violation_to_json).collect();
    let warnings: Vec<JsonError> = result
        .warnings
        .iter()
        .map(|w| JsonError::new(w.code.code(), w.message.clone()))
        .collect();

    finish(format, errors, warnings, json_output)
}

fn finish(
    format: FileFormat,
    errors: Vec<JsonError>,
    warnings: Vec<JsonError>,
    json_output: bool,
) -> Result<ExitCode> {
    let success = errors.is_empty();

    if json_output {
        let output = CheckOutput {
            success,
            format: format.to_string(),
            errors,
            warnings,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for error in &errors {
            match &error.path {
                Some(path) => println!(
                    "{} [{}] {} (at {})",
                    "error:".red().bold(),
                    error.code,
                    error.message,
                    path
                ),
                None => println!("{} [{}] {}", "error:".red().bold(), error.code, error.message),
            }
        }
        for warning in &warnings {
            println!(
                "{} [{}] {}",
                "warning:".yellow().bold(),
                warning.code,
                warning.message
            );
        }
        if success {
            println!("{} payload satisfies the {} contract", "ok".green(), format);
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
