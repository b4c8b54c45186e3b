//! On-disk change detection for open documents.
//!
//! The host only reports: the view reacts to `file-changed` by issuing a
//! `refresh_document`, so a change never triggers a reader invocation on
//! its own.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};

/// Event emitted when a watched document changes on disk.
pub const EVENT_FILE_CHANGED: &str = "file-changed";

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Payload of [`EVENT_FILE_CHANGED`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChangeEvent {
    /// The document path that changed.
    pub path: String,
    /// One of "created", "modified", "removed".
    pub kind: String,
}

/// One watcher per watched document; dropping an entry stops it.
#[derive(Default)]
pub struct WatcherState {
    watchers: HashMap<PathBuf, RecommendedWatcher>,
}

/// Start watching a document for external changes.
#[tauri::command]
pub fn watch_document<R: Runtime>(
    app: AppHandle<R>,
    path: String,
    state: tauri::State<'_, std::sync::Mutex<WatcherState>>,
) -> Result<(), String> {
    let path = PathBuf::from(&path);
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }

    let mut state = state.lock().map_err(|e| e.to_string())?;
    state.watchers.remove(&path);

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |event: Result<Event, notify::Error>| {
            if let Ok(event) = event {
                let _ = tx.send(event);
            }
        },
        Config::default().with_poll_interval(DEBOUNCE),
    )
    .map_err(|e| e.to_string())?;

    // Some platforms only deliver events for directories, so watch the
    // parent and filter down to the document below.
    let target = path.parent().unwrap_or(&path);
    watcher
        .watch(target, RecursiveMode::NonRecursive)
        .map_err(|e| e.to_string())?;

    let document = path.clone();
    std::thread::spawn(move || forward_changes(app, rx, document));

    state.watchers.insert(path, watcher);
    Ok(())
}

/// Stop watching a document.
#[tauri::command]
pub fn unwatch_document(
    path: String,
    state: tauri::State<'_, std::sync::Mutex<WatcherState>>,
) -> Result<(), String> {
    let mut state = state.lock().map_err(|e| e.to_string())?;
    state.watchers.remove(&PathBuf::from(path));
    Ok(())
}

/// Pump loop: filters raw notify events down to debounced `file-changed`
/// emissions for one document. Exits when the watcher (the sender) drops.
fn forward_changes<R: Runtime>(app: AppHandle<R>, rx: mpsc::Receiver<Event>, document: PathBuf) {
    let mut gate = DebounceGate::new(DEBOUNCE);
    while let Ok(event) = rx.recv() {
        if !event.paths.iter().any(|p| p == &document) {
            continue;
        }
        let Some(kind) = change_kind(&event.kind) else {
            continue;
        };
        if !gate.admit(Instant::now()) {
            continue;
        }
        let _ = app.emit(
            EVENT_FILE_CHANGED,
            FileChangeEvent {
                path: document.to_string_lossy().into_owned(),
                kind: kind.to_string(),
            },
        );
    }
}

fn change_kind(kind: &EventKind) -> Option<&'static str> {
    match kind {
        EventKind::Create(_) => Some("created"),
        EventKind::Modify(_) => Some("modified"),
        EventKind::Remove(_) => Some("removed"),
        _ => None,
    }
}

/// Admits at most one event per window; editors tend to write a file
/// several times in quick succession on save.
struct DebounceGate {
    window: Duration,
    last: Option<Instant>,
}

impl DebounceGate {
    fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    fn admit(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
