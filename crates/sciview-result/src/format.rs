//! File format registry.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File formats supported by SciView v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    /// HDF5 hierarchical data files.
    Hdf5,
    /// Python pickle files.
    Pickle,
    /// Apache Parquet columnar tables.
    Parquet,
    /// NumPy array files.
    Npy,
}

/// The kind of view a format's payload is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerKind {
    /// Collapsible group/dataset tree with a detail panel.
    Tree,
    /// Summary, schema, and preview tables.
    Table,
    /// Shape/dtype/size plus a truncated numeric preview.
    Array,
}

impl FileFormat {
    /// Returns the format as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Hdf5 => "hdf5",
            FileFormat::Pickle => "pickle",
            FileFormat::Parquet => "parquet",
            FileFormat::Npy => "npy",
        }
    }

    /// Returns the reader script name for this format.
    pub fn reader_script(&self) -> &'static str {
        match self {
            FileFormat::Hdf5 => "h5_reader.py",
            FileFormat::Pickle => "pickle_reader.py",
            FileFormat::Parquet => "parquet_reader.py",
            FileFormat::Npy => "npy_reader.py",
        }
    }

    /// Returns the viewer kind that renders this format's payload.
    pub fn viewer(&self) -> ViewerKind {
        match self {
            FileFormat::Hdf5 | FileFormat::Pickle => ViewerKind::Tree,
            FileFormat::Parquet => ViewerKind::Table,
            FileFormat::Npy => ViewerKind::Array,
        }
    }

    /// Returns the file extensions registered for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileFormat::Hdf5 => &["h5", "hdf5", "hdf"],
            FileFormat::Pickle => &["pkl", "pickle"],
            FileFormat::Parquet => &["parquet", "pq"],
            FileFormat::Npy => &["npy"],
        }
    }

    /// Resolves a format from a file path's extension.
    pub fn from_path(path: &Path) -> Option<FileFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        FileFormat::all()
            .iter()
            .copied()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }

    /// Returns all supported formats.
    pub fn all() -> &'static [FileFormat] {
        &[
            FileFormat::Hdf5,
            FileFormat::Pickle,
            FileFormat::Parquet,
            FileFormat::Npy,
        ]
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hdf5" | "h5" => Ok(FileFormat::Hdf5),
            "pickle" | "pkl" => Ok(FileFormat::Pickle),
            "parquet" | "pq" => Ok(FileFormat::Parquet),
            "npy" => Ok(FileFormat::Npy),
            _ => Err(format!("unknown file format: {}", s)),
        }
    }
}

impl ViewerKind {
    /// Returns the viewer kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerKind::Tree => "tree",
            ViewerKind::Table => "table",
            ViewerKind::Array => "array",
        }
    }
}

impl std::fmt::Display for ViewerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
