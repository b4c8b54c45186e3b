//! IPC command handlers for the SciView editor.
//!
//! These commands are exposed to the frontend via Tauri's IPC mechanism.

pub mod document;
pub mod load;
pub mod settings;
