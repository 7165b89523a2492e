//! Story of the day handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::print_experience;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    // The story is drawn from the cached substance links.
    ctx.app().feed().ensure_link_catalog().await;

    match ctx.app().story().story_of_the_day().await {
        Some(story) => print_experience(&story),
        None => println!("No story of the day available right now."),
    }
    Ok(())
}
