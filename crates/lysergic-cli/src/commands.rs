//! Main commands enum and subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the random experience feed
    Feed {
        /// Minimum number of unique reports to load
        #[arg(short, long)]
        size: Option<usize>,
        /// Append one more batch; optionally the reports sampled per substance
        /// (defaults to the configured page size)
        #[arg(short, long, num_args = 0..=1, value_name = "N")]
        more: Option<Option<u32>>,
    },

    /// List the substance catalog
    Substances {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a full experience report
    Experience {
        /// Erowid report URL
        url: String,
    },

    /// List reports in an Erowid category
    Category {
        /// Erowid category URL
        url: String,
        /// Offset of the first report
        #[arg(long, default_value = "0")]
        start: u32,
        /// Number of reports to fetch
        #[arg(long, default_value = "20")]
        max: u32,
    },

    /// List the report categories of a substance
    Categories {
        /// Erowid substance vault URL
        url: String,
    },

    /// Show reference information for a substance
    Info {
        /// Erowid substance vault URL
        url: String,
    },

    /// Show today's randomly chosen report
    Story,

    /// Manage saved reports
    Bookmarks {
        #[command(subcommand)]
        command: BookmarkCommand,
    },

    /// Read a report aloud as a chunked transcript
    Read {
        /// Erowid report URL
        url: String,
        /// Preferred voice name
        #[arg(long)]
        voice: Option<String>,
    },

    /// Show resolved data paths
    Paths,
}

/// Bookmark subcommands.
#[derive(Subcommand)]
pub enum BookmarkCommand {
    /// List saved reports
    List,

    /// Fetch a report and save it
    Add {
        /// Erowid report URL
        url: String,
    },

    /// Remove a saved report
    Remove {
        /// Erowid report URL
        url: String,
    },
}
