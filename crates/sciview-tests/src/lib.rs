//! Shared helpers for SciView integration tests.
//!
//! Reader invocations are exercised against stub scripts executed by `sh`
//! instead of Python: script resolution only cares about file names, so a
//! shell script named `npy_reader.py` stands in for the real reader. This
//! keeps the tests hermetic; no Python installation is required.

use std::path::PathBuf;

use sciview_reader::ReaderConfig;
use sciview_result::FileFormat;

/// A scripts directory populated with stub readers.
pub struct StubReaders {
    dir: tempfile::TempDir,
}

impl StubReaders {
    /// Creates an empty stub scripts directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp scripts dir"),
        }
    }

    /// Installs a stub reader for `format` with the given shell body.
    pub fn install(&self, format: FileFormat, body: &str) -> &Self {
        std::fs::write(self.dir.path().join(format.reader_script()), body)
            .expect("write stub reader");
        self
    }

    /// Returns a reader config invoking the stubs through `sh`.
    pub fn config(&self) -> ReaderConfig {
        ReaderConfig::with_scripts_dir(self.dir.path()).python_path("sh")
    }

    /// Returns the scripts directory path.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}

impl Default for StubReaders {
    fn default() -> Self {
        Self::new()
    }
}
