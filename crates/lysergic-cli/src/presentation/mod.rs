//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod report;
pub mod tables;

// Re-export commonly used items
pub use report::{print_experience, print_summaries};
pub use tables::{format_optional, print_separator, truncate_string};
