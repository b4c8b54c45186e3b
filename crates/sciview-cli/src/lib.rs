//! SciView CLI library.
//!
//! Command implementations live here so the editor and tests can reuse
//! them; `main.rs` is argument parsing and dispatch only.

pub mod commands;
