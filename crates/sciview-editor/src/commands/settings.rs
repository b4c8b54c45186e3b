//! Viewer settings commands.
//!
//! Settings are explicit managed state. Each invocation snapshots the
//! current settings into a `ReaderConfig`, so changes apply to the next
//! load without restarting anything.

use std::sync::Mutex;
use std::time::Duration;

use sciview_reader::ReaderConfig;
use serde::{Deserialize, Serialize};

use crate::EditorState;

/// User-facing viewer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerSettings {
    /// Python interpreter used for all reader invocations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_path: Option<String>,
    /// Directory holding the reader scripts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<String>,
    /// Reader timeout in seconds; absent means wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ViewerSettings {
    /// Snapshots these settings into an invocation config.
    pub fn to_reader_config(&self) -> ReaderConfig {
        let mut config = match &self.scripts_dir {
            Some(dir) => ReaderConfig::with_scripts_dir(dir),
            None => ReaderConfig::default(),
        };
        if let Some(python) = &self.python_path {
            config = config.python_path(python);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

/// Returns the current viewer settings.
#[tauri::command]
pub fn get_settings(
    state: tauri::State<'_, Mutex<EditorState>>,
) -> Result<ViewerSettings, String> {
    let state = state.lock().map_err(|e| e.to_string())?;
    Ok(state.settings.clone())
}

/// Replaces the viewer settings; the next load uses them.
#[tauri::command]
pub fn update_settings(
    settings: ViewerSettings,
    state: tauri::State<'_, Mutex<EditorState>>,
) -> Result<(), String> {
    let mut state = state.lock().map_err(|e| e.to_string())?;
    state.settings = settings;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_settings_snapshot_into_config() {
        let settings = ViewerSettings {
            python_path: Some("/opt/venv/bin/python".to_string()),
            scripts_dir: Some("/opt/sciview/python".to_string()),
            timeout_secs: Some(30),
        };
        let config = settings.to_reader_config();
        assert_eq!(config.python_path, Some(PathBuf::from("/opt/venv/bin/python")));
        assert_eq!(config.scripts_dir, PathBuf::from("/opt/sciview/python"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_default_settings_wait_indefinitely() {
        let config = ViewerSettings::default().to_reader_config();
        assert_eq!(config.timeout, None);
        assert_eq!(config.python_path, None);
    }
}
