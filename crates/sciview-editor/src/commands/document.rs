//! Document open/close commands.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::session::DocumentInfo;
use crate::EditorState;

/// Opens a document and returns its format and viewer binding.
///
/// Fails only on an unregistered file extension. No resources are held;
/// the reader runs per load, not per document.
#[tauri::command]
pub fn open_document(
    path: String,
    state: tauri::State<'_, Mutex<EditorState>>,
) -> Result<DocumentInfo, String> {
    let mut state = state.lock().map_err(|e| e.to_string())?;
    state.sessions.open(&PathBuf::from(path))
}

/// Closes a document, cancelling any in-flight reader invocation.
#[tauri::command]
pub fn close_document(
    path: String,
    state: tauri::State<'_, Mutex<EditorState>>,
) -> Result<(), String> {
    let mut state = state.lock().map_err(|e| e.to_string())?;
    state.sessions.close(&PathBuf::from(path));
    Ok(())
}
