//! Invocation configuration and interpreter/script resolution.
//!
//! Configuration is explicit: callers build a [`ReaderConfig`] and pass it
//! in. Nothing is read from ambient state at spawn time; the environment
//! variables below are documented fallbacks of the resolution chain only.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sciview_result::FileFormat;

use crate::error::{InvokeResult, ReaderError};

/// Environment variable overriding the Python interpreter.
pub const PYTHON_ENV_VAR: &str = "SCIVIEW_PYTHON";

/// Environment variable overriding the reader scripts directory.
pub const READERS_DIR_ENV_VAR: &str = "SCIVIEW_READERS_DIR";

const EMBEDDED_H5_READER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../python/h5_reader.py"
));
const EMBEDDED_PICKLE_READER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../python/pickle_reader.py"
));
const EMBEDDED_PARQUET_READER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../python/parquet_reader.py"
));
const EMBEDDED_NPY_READER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../python/npy_reader.py"
));

/// Configuration for reader invocations.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Path to the Python interpreter. `None` walks the resolution chain.
    pub python_path: Option<PathBuf>,
    /// Directory holding the reader scripts.
    pub scripts_dir: PathBuf,
    /// Maximum time to wait for the reader process. `None` waits
    /// indefinitely, matching the original viewer's behavior.
    pub timeout: Option<Duration>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            python_path: None,
            scripts_dir: PathBuf::from("python"),
            timeout: None,
        }
    }
}

impl ReaderConfig {
    /// Creates a config with the given scripts directory.
    pub fn with_scripts_dir(scripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            ..Default::default()
        }
    }

    /// Sets the Python interpreter path.
    pub fn python_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.python_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Resolves the Python interpreter to invoke.
    ///
    /// Chain: explicit config -> `SCIVIEW_PYTHON` -> first match in PATH ->
    /// common install locations -> bare platform default. The last step never
    /// fails here; a missing interpreter surfaces as a spawn error with a
    /// configuration hint, which is the failure mode viewers render.
    pub fn resolve_python(&self) -> PathBuf {
        if let Some(ref path) = self.python_path {
            return path.clone();
        }

        if let Ok(path) = std::env::var(PYTHON_ENV_VAR) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        let candidates: &[&str] = if cfg!(windows) {
            &["python", "python3"]
        } else {
            &["python3", "python"]
        };

        for name in candidates {
            if let Ok(path) = which::which(name) {
                return path;
            }
        }

        let common_paths: &[&str] = if cfg!(windows) {
            &[]
        } else if cfg!(target_os = "macos") {
            &[
                "/usr/local/bin/python3",
                "/opt/homebrew/bin/python3",
                "/usr/bin/python3",
            ]
        } else {
            &["/usr/bin/python3", "/usr/local/bin/python3"]
        };

        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return path;
            }
        }

        PathBuf::from(candidates[0])
    }

    /// Resolves the reader script for `format`.
    ///
    /// Chain: configured scripts directory -> `SCIVIEW_READERS_DIR` ->
    /// embedded copy written to a temp file.
    pub fn resolve_script(&self, format: FileFormat) -> InvokeResult<ResolvedScript> {
        let script_name = format.reader_script();

        let configured = self.scripts_dir.join(script_name);
        if configured.exists() {
            return Ok(ResolvedScript {
                path: configured,
                _tempfile: None,
            });
        }

        if let Ok(dir) = std::env::var(READERS_DIR_ENV_VAR) {
            let path = Path::new(&dir).join(script_name);
            if path.exists() {
                return Ok(ResolvedScript {
                    path,
                    _tempfile: None,
                });
            }
            return Err(ReaderError::ScriptNotFound { path });
        }

        // Last resort: write the embedded reader to a temp file.
        let mut file = tempfile::Builder::new()
            .prefix("sciview_reader_")
            .suffix(".py")
            .tempfile()
            .map_err(ReaderError::Io)?;
        file.write_all(embedded_source(format).as_bytes())
            .map_err(ReaderError::Io)?;
        file.flush().map_err(ReaderError::Io)?;

        Ok(ResolvedScript {
            path: file.path().to_path_buf(),
            _tempfile: Some(file),
        })
    }
}

/// A resolved reader script path, keeping any backing temp file alive.
pub struct ResolvedScript {
    /// Path passed to the interpreter.
    pub path: PathBuf,
    _tempfile: Option<tempfile::NamedTempFile>,
}

fn embedded_source(format: FileFormat) -> &'static str {
    match format {
        FileFormat::Hdf5 => EMBEDDED_H5_READER,
        FileFormat::Pickle => EMBEDDED_PICKLE_READER,
        FileFormat::Parquet => EMBEDDED_PARQUET_READER,
        FileFormat::Npy => EMBEDDED_NPY_READER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_python_path_wins() {
        let config = ReaderConfig::default().python_path("/opt/venv/bin/python");
        assert_eq!(config.resolve_python(), PathBuf::from("/opt/venv/bin/python"));
    }

    #[test]
    fn test_resolve_script_prefers_scripts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("npy_reader.py");
        std::fs::write(&script, "print('{}')").unwrap();

        let config = ReaderConfig::with_scripts_dir(dir.path());
        let resolved = config.resolve_script(FileFormat::Npy).unwrap();
        assert_eq!(resolved.path, script);
    }

    #[test]
    fn test_resolve_script_falls_back_to_embedded() {
        let config = ReaderConfig::with_scripts_dir("/definitely/not/a/real/dir");
        let resolved = config.resolve_script(FileFormat::Hdf5).unwrap();
        assert!(resolved.path.exists());
        let body = std::fs::read_to_string(&resolved.path).unwrap();
        assert!(body.contains("h5py"));
    }

    #[test]
    fn test_embedded_sources_cover_all_formats() {
        for format in FileFormat::all() {
            assert!(!embedded_source(*format).is_empty());
        }
    }
}
