//! Bookmark command handlers.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::BookmarkCommand;
use crate::error::CliError;
use crate::handlers::checked_url;
use crate::presentation::print_summaries;

pub async fn execute(ctx: &CliContext, command: BookmarkCommand) -> Result<()> {
    let bookmarks = ctx.app().bookmarks();
    match command {
        BookmarkCommand::List => {
            let saved = bookmarks.list().await;
            if saved.is_empty() {
                println!("No bookmarks saved.");
                println!("Use 'lysergic bookmarks add <url>' to save a report.");
            } else {
                print_summaries(&saved);
            }
        }
        BookmarkCommand::Add { url } => {
            let url = checked_url(&url)?;
            let detail = ctx
                .app()
                .explore()
                .experience(&url)
                .await
                .map_err(CliError::from)?;
            if !bookmarks.save(detail.to_summary()).await {
                return Err(CliError::Io("failed to write bookmarks".to_string()).into());
            }
            println!("Saved: {}", detail.title);
        }
        BookmarkCommand::Remove { url } => {
            if bookmarks.remove(url.trim()).await {
                println!("Removed.");
            } else {
                println!("No bookmark for {url}");
            }
        }
    }
    Ok(())
}
