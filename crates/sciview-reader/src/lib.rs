//! SciView Reader Invocation
//!
//! This crate shells out to the Python reader scripts that parse scientific
//! data files (HDF5, pickle, parquet, npy) and emit a JSON payload on stdout.
//! Argument vector: `[python, script_path, file_path]`.
//!
//! The high-level surface is [`Invoker::invoke`], which never fails: every
//! failure mode (spawn error, nonzero exit, malformed or contract-breaking
//! output, timeout, cancellation) is folded into an
//! [`sciview_result::ErrorResult`] payload for the view layer to render.
//!
//! # Example
//!
//! ```no_run
//! use sciview_reader::{Invoker, ReaderConfig};
//! use sciview_result::FileFormat;
//! use std::path::Path;
//!
//! let invoker = Invoker::with_config(ReaderConfig::default());
//! let payload = invoker.invoke(FileFormat::Hdf5, Path::new("run_01.h5"));
//! if let Some(message) = payload.error() {
//!     eprintln!("reader failed: {message}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod invoke;

pub use config::{ReaderConfig, ResolvedScript, PYTHON_ENV_VAR, READERS_DIR_ENV_VAR};
pub use error::{InvokeResult, ReaderError, PYTHON_PATH_HINT};
pub use invoke::{error_payload, CancelToken, Invoker};
