//! Cache database path resolution.

use std::path::{Path, PathBuf};

use super::ensure::ensure_directory;
use super::error::PathError;
use super::platform::data_root;

/// File name of the cache database.
pub const DATABASE_FILE_NAME: &str = "lysergic.db";

/// Path to the cache database under the data root.
pub fn database_path() -> Result<PathBuf, PathError> {
    database_path_in(&data_root()?)
}

/// Path to the cache database under an explicit data directory.
///
/// The directory is created if it doesn't exist.
pub fn database_path_in(data_dir: &Path) -> Result<PathBuf, PathError> {
    ensure_directory(data_dir)?;
    Ok(data_dir.join(DATABASE_FILE_NAME))
}
