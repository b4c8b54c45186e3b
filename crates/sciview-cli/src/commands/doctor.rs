//! Doctor command implementation
//!
//! Checks system dependencies and configuration.

use anyhow::Result;
use colored::Colorize;
use std::process::{Command, ExitCode};

use sciview_reader::ReaderConfig;
use sciview_result::FileFormat;

/// Run the doctor command
///
/// Checks:
/// - Python interpreter resolution and version
/// - Reader script presence
/// - Python packages the readers import
///
/// # Returns
/// Exit code: 0 if the interpreter works, 1 otherwise
pub fn run() -> Result<ExitCode> {
    println!("{}", "SciView Doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    let mut all_ok = true;
    let config = ReaderConfig::default();

    println!("{}", "Versions:".bold());
    println!("  {} sciview-cli v{}", "->".green(), env!("CARGO_PKG_VERSION"));
    println!();

    // Interpreter
    println!("{}", "Interpreter:".bold());
    let python = config.resolve_python();
    match python_version(&python) {
        Some(version) => {
            println!("  {} {} ({})", "ok".green(), version.trim(), python.display());
        }
        None => {
            println!("  {} Python not runnable: {}", "!!".red(), python.display());
            println!(
                "     {}",
                "Set the Python interpreter path or SCIVIEW_PYTHON.".dimmed()
            );
            all_ok = false;
        }
    }
    println!();

    // Reader scripts
    println!("{}", "Reader scripts:".bold());
    for format in FileFormat::all() {
        match config.resolve_script(*format) {
            Ok(script) => {
                println!("  {} {} -> {}", "ok".green(), format, script.path.display());
            }
            Err(e) => {
                println!("  {} {}: {}", "!!".red(), format, e);
                all_ok = false;
            }
        }
    }
    println!();

    // Python packages the readers import
    println!("{}", "Python packages:".bold());
    for module in ["h5py", "numpy", "pyarrow", "pandas"] {
        match check_module(&python, module) {
            ModuleStatus::Found => println!("  {} {}", "ok".green(), module),
            ModuleStatus::Missing => {
                println!("  {} {} (not importable)", "!!".yellow(), module);
                println!(
                    "     {}",
                    format!("pip install {} to enable the readers that need it.", module)
                        .dimmed()
                );
                // Not a hard failure - each reader only needs its own packages
            }
            ModuleStatus::Error(e) => {
                println!("  {} {} check failed: {}", "!!".red(), module, e);
                all_ok = false;
            }
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "FAILURE".red().bold()
        );
        Ok(ExitCode::FAILURE)
    }
}

enum ModuleStatus {
    Found,
    Missing,
    Error(String),
}

fn python_version(python: &std::path::Path) -> Option<String> {
    let output = Command::new(python).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    // Some Pythons print the version on stderr.
    let text = if output.stdout.is_empty() {
        output.stderr
    } else {
        output.stdout
    };
    Some(String::from_utf8_lossy(&text).into_owned())
}

fn check_module(python: &std::path::Path, module: &str) -> ModuleStatus {
    match Command::new(python)
        .arg("-c")
        .arg(format!("import {}", module))
        .output()
    {
        Ok(output) if output.status.success() => ModuleStatus::Found,
        Ok(_) => ModuleStatus::Missing,
        Err(e) => ModuleStatus::Error(e.to_string()),
    }
}
