//! Load and refresh commands.
//!
//! The host->view half of the message protocol lives here as Tauri events:
//! `viewer-loading` (show spinner), then `viewer-data` carrying the reader
//! payload (render or show its `error`). The view->host `refresh` message is
//! the `refresh_document` command.

use std::path::PathBuf;
use std::sync::Mutex;

use sciview_reader::Invoker;
use sciview_result::ReaderPayload;
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Manager, Runtime};

use crate::EditorState;

/// Event telling the view to show its loading state.
pub const EVENT_LOADING: &str = "viewer-loading";

/// Event carrying a reader payload to the view.
pub const EVENT_DATA: &str = "viewer-data";

/// Payload of [`EVENT_LOADING`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingEvent {
    /// Document path the spinner belongs to.
    pub path: String,
}

/// Payload of [`EVENT_DATA`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEvent {
    /// Document path the data belongs to.
    pub path: String,
    /// The reader result, success or error.
    pub payload: ReaderPayload,
}

/// Initial load of an open document.
#[tauri::command]
pub async fn load_document<R: Runtime>(app: AppHandle<R>, path: String) -> Result<(), String> {
    run_load(app, path, false).await
}

/// Re-runs the reader for an open document.
///
/// Emits `viewer-loading` immediately, then the usual `viewer-data`.
#[tauri::command]
pub async fn refresh_document<R: Runtime>(app: AppHandle<R>, path: String) -> Result<(), String> {
    run_load(app, path, true).await
}

async fn run_load<R: Runtime>(
    app: AppHandle<R>,
    path: String,
    emit_loading: bool,
) -> Result<(), String> {
    let (format, ticket, config) = {
        let state = app.state::<Mutex<EditorState>>();
        let mut state = state.lock().map_err(|e| e.to_string())?;
        let key = PathBuf::from(&path);
        let format = state
            .sessions
            .format(&key)
            .ok_or_else(|| format!("Document is not open: {}", path))?;
        let ticket = state
            .sessions
            .begin_load(&key)
            .ok_or_else(|| format!("Document is not open: {}", path))?;
        (format, ticket, state.settings.to_reader_config())
    };

    if emit_loading {
        app.emit(EVENT_LOADING, LoadingEvent { path: path.clone() })
            .map_err(|e| e.to_string())?;
    }

    let cancel = ticket.cancel.clone();
    let file = PathBuf::from(&path);
    let payload = tauri::async_runtime::spawn_blocking(move || {
        Invoker::with_config(config).invoke_cancellable(format, &file, &cancel)
    })
    .await
    .map_err(|e| e.to_string())?;

    // Deliver only if this is still the latest load for a still-open
    // document; stale completions are dropped, not rendered.
    let deliver = {
        let state = app.state::<Mutex<EditorState>>();
        let mut state = state.lock().map_err(|e| e.to_string())?;
        state
            .sessions
            .finish_load(&PathBuf::from(&path), ticket.generation)
    };

    if deliver {
        app.emit(EVENT_DATA, DataEvent { path, payload })
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
