//! SciView Editor - Tauri plugin for the scientific data viewer.
//!
//! This crate provides the Rust backend for the SciView editor, exposing
//! IPC commands to open documents, run reader invocations, and manage
//! viewer settings. The view templates (tree/table/array) talk to it via
//! the command surface and the `viewer-loading` / `viewer-data` /
//! `file-changed` events.

pub mod commands;
pub mod session;
pub mod watcher;

use std::sync::Mutex;

use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

use commands::settings::ViewerSettings;
use session::SessionMap;

// Re-export the commands at crate level for Tauri's generate_handler!
pub use commands::document::{close_document, open_document};
pub use commands::load::{
    load_document, refresh_document, DataEvent, LoadingEvent, EVENT_DATA, EVENT_LOADING,
};
pub use commands::settings::{get_settings, update_settings};
pub use watcher::{
    unwatch_document, watch_document, FileChangeEvent, WatcherState, EVENT_FILE_CHANGED,
};

/// Shared plugin state: open sessions plus the live viewer settings.
#[derive(Default)]
pub struct EditorState {
    /// Open documents and their load generations.
    pub sessions: SessionMap,
    /// Current settings; snapshotted per invocation.
    pub settings: ViewerSettings,
}

/// Initialize the SciView Tauri plugin.
///
/// # Example
///
/// ```ignore
/// fn main() {
///     tauri::Builder::default()
///         .plugin(sciview_editor::init())
///         .run(tauri::generate_context!())
///         .expect("error running tauri");
/// }
/// ```
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("sciview")
        .invoke_handler(tauri::generate_handler![
            open_document,
            close_document,
            load_document,
            refresh_document,
            get_settings,
            update_settings,
            watch_document,
            unwatch_document,
        ])
        .setup(|app, _api| {
            app.manage(Mutex::new(EditorState::default()));
            app.manage(Mutex::new(WatcherState::default()));
            Ok(())
        })
        .build()
}
