//! Feed command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::print_summaries;

/// Load the random feed and print it.
///
/// `size` overrides the configured initial size. `more` appends one extra
/// batch, sampled with the given number of reports per substance or with the
/// configured page size when no number was passed.
pub async fn execute(ctx: &CliContext, size: Option<usize>, more: Option<Option<u32>>) -> Result<()> {
    let feed = ctx.app().feed();
    let size = size.unwrap_or(feed.config().initial_size);

    feed.refresh_feed(size).await;
    let added = match more {
        Some(Some(batch_size)) => Some(feed.append_more(batch_size).await),
        Some(None) => Some(feed.append_page().await),
        None => None,
    };
    if let Some(added) = added {
        tracing::info!(added, "Appended to feed");
    }

    let items = feed.feed();
    if items.is_empty() {
        println!("No experiences found.");
        println!("Is the crawler server reachable at {}?", ctx.server_url());
        return Ok(());
    }

    println!("{} experience(s):\n", items.len());
    print_summaries(&items);
    Ok(())
}
