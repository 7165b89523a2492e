//! Paths command handler.
//!
//! Displays resolved paths for diagnostics.

use anyhow::Result;

use crate::bootstrap::CliConfig;

/// Print the data directory, cache database and server URL in
/// `key = value` format.
pub fn execute(config: &CliConfig) -> Result<()> {
    let db_path = config.database_path()?;
    let data_dir = db_path.parent().unwrap_or(db_path.as_path());

    println!("data_dir = {}", data_dir.display());
    println!("database = {}", db_path.display());
    println!("server_url = {}", config.server_url);
    Ok(())
}
