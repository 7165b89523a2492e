//! Data root resolution.

use std::env;
use std::path::PathBuf;

use super::ensure::ensure_directory;
use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "LYSERGIC_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `LYSERGIC_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/lysergic`)
///
/// The directory is created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var(DATA_DIR_ENV) {
        Ok(path) if path.trim().is_empty() => return Err(PathError::EmptyPath),
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("lysergic"),
    };

    ensure_directory(&root)?;
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn test_data_root_honours_env_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("nested");
        let _env = EnvVarGuard::set(DATA_DIR_ENV, target.to_str().unwrap());

        assert_eq!(data_root().unwrap(), target);
        assert!(target.is_dir());
    }

    #[test]
    fn test_blank_override_is_rejected() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _env = EnvVarGuard::set(DATA_DIR_ENV, "  ");

        assert!(matches!(data_root(), Err(PathError::EmptyPath)));
    }
}
