//! Per-document session state.
//!
//! Each open document carries a monotonically increasing load generation.
//! Issuing a new load supersedes any outstanding invocation: its cancel
//! token is tripped (killing the reader process) and its completion, should
//! it still arrive, is dropped instead of overwriting fresher data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use sciview_reader::CancelToken;
use sciview_result::{FileFormat, ViewerKind};
use serde::{Deserialize, Serialize};

/// What the frontend needs to know about an opened document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Absolute path of the file.
    pub path: String,
    /// Detected file format.
    pub format: FileFormat,
    /// View template that renders this document.
    pub viewer: ViewerKind,
}

/// Permission to deliver the result of one load attempt.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    /// Generation this load was issued as.
    pub generation: u64,
    /// Token killing the invocation if a newer load supersedes it.
    pub cancel: CancelToken,
}

#[derive(Debug)]
struct DocumentSession {
    format: FileFormat,
    generation: u64,
    inflight: Option<CancelToken>,
}

/// All open documents, keyed by path.
#[derive(Debug, Default)]
pub struct SessionMap {
    sessions: HashMap<PathBuf, DocumentSession>,
}

impl SessionMap {
    /// Creates an empty session map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a document, detecting its format from the file extension.
    ///
    /// Opening holds no resources; it only registers the session. Reopening
    /// an already-open path is a no-op apart from returning its info.
    pub fn open(&mut self, path: &Path) -> Result<DocumentInfo, String> {
        let format = FileFormat::from_path(path)
            .ok_or_else(|| format!("Unsupported file type: {}", path.display()))?;
        self.sessions
            .entry(path.to_path_buf())
            .or_insert(DocumentSession {
                format,
                generation: 0,
                inflight: None,
            });
        Ok(DocumentInfo {
            path: path.display().to_string(),
            format,
            viewer: format.viewer(),
        })
    }

    /// Closes a document, cancelling any in-flight invocation.
    pub fn close(&mut self, path: &Path) {
        if let Some(session) = self.sessions.remove(path) {
            if let Some(cancel) = session.inflight {
                cancel.cancel();
            }
        }
    }

    /// Returns the format of an open document.
    pub fn format(&self, path: &Path) -> Option<FileFormat> {
        self.sessions.get(path).map(|s| s.format)
    }

    /// Begins a load attempt for `path`, superseding any outstanding one.
    ///
    /// Returns `None` when the document is not open.
    pub fn begin_load(&mut self, path: &Path) -> Option<LoadTicket> {
        let session = self.sessions.get_mut(path)?;
        if let Some(previous) = session.inflight.take() {
            previous.cancel();
        }
        session.generation += 1;
        let cancel = CancelToken::new();
        session.inflight = Some(cancel.clone());
        Some(LoadTicket {
            generation: session.generation,
            cancel,
        })
    }

    /// Settles a completed load attempt.
    ///
    /// Returns true if the result may be delivered: the document is still
    /// open and `generation` is the latest issued. Stale or orphaned
    /// completions return false and must be dropped silently.
    pub fn finish_load(&mut self, path: &Path, generation: u64) -> bool {
        match self.sessions.get_mut(path) {
            Some(session) if session.generation == generation => {
                session.inflight = None;
                true
            }
            _ => false,
        }
    }
}
