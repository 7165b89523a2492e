//! Failures while locating or preparing the data directory.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// Neither `LYSERGIC_DATA_DIR` nor a platform data directory is available.
    #[error("no data directory available for this platform")]
    NoDataDir,

    #[error("{0} exists and is not a directory")]
    NotADirectory(PathBuf),

    #[error("could not create {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// The probe file could not be written or removed.
    #[error("cannot write to {path}: {reason}")]
    NotWritable { path: PathBuf, reason: String },

    /// `LYSERGIC_DATA_DIR` or a caller-supplied path was blank.
    #[error("data directory path is empty")]
    EmptyPath,
}
