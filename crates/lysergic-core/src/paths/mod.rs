//! Path utilities for lysergic data directories.
//!
//! - Data root (`LYSERGIC_DATA_DIR` or the platform data directory)
//! - Cache database location
//!
//! Functions return `PathBuf` and `PathError`; there is no terminal I/O here.

mod database;
mod ensure;
mod error;
mod platform;

#[cfg(test)]
mod test_utils;

pub use database::{DATABASE_FILE_NAME, database_path, database_path_in};
pub use ensure::{ensure_directory, verify_writable};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
