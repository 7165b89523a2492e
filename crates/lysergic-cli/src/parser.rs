//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;
use lysergic_erowid::DEFAULT_BASE_URL;

use crate::commands::Commands;

/// Command-line interface for browsing Erowid experience reports.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "lysergic")]
#[command(about = "Browse and listen to Erowid experience reports")]
#[command(version)]
pub struct Cli {
    /// Base URL of the lysergic crawler API
    #[arg(
        long = "server-url",
        env = "LYSERGIC_SERVER_URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub server_url: String,

    /// Override the data directory holding the cache database
    #[arg(long = "data-dir", env = "LYSERGIC_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
