//! Report, category and reference lookups.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::checked_url;
use crate::presentation::{print_experience, print_separator, print_summaries};

/// Fetch and print one full report.
pub async fn experience(ctx: &CliContext, url: &str) -> Result<()> {
    let url = checked_url(url)?;
    let detail = ctx
        .app()
        .explore()
        .experience(&url)
        .await
        .map_err(CliError::from)?;
    print_experience(&detail);
    Ok(())
}

/// Print one page of a category listing.
pub async fn category(ctx: &CliContext, url: &str, start: u32, max: u32) -> Result<()> {
    let url = checked_url(url)?;
    let page = ctx
        .app()
        .explore()
        .category_experiences(&url, start, max)
        .await
        .map_err(CliError::from)?;

    if page.experiences.is_empty() {
        println!("No reports in this range.");
        return Ok(());
    }

    print_summaries(&page.experiences);
    if page.pagination.has_next {
        println!(
            "\nMore reports available: --start {}",
            start.saturating_add(max)
        );
    }
    Ok(())
}

/// Print the report categories of a substance.
pub async fn categories(ctx: &CliContext, url: &str) -> Result<()> {
    let url = checked_url(url)?;
    let categories = ctx
        .app()
        .explore()
        .substance_categories(&url)
        .await
        .map_err(CliError::from)?;

    if !categories.has_experiences || categories.categories.is_empty() {
        println!("No experience reports for this substance.");
        return Ok(());
    }

    println!("{:<40} {:>7} URL", "Category", "Reports");
    print_separator(100);
    for (name, category) in &categories.categories {
        println!("{name:<40} {:>7} {}", category.experience_count, category.url);
    }
    Ok(())
}

/// Print the reference document of a substance as JSON sections.
pub async fn info(ctx: &CliContext, url: &str) -> Result<()> {
    let url = checked_url(url)?;
    let info = ctx
        .app()
        .explore()
        .information(&url)
        .await
        .map_err(CliError::from)?;

    if !info.success {
        println!("No reference information found.");
        return Ok(());
    }

    if let Some(domain) = &info.domain {
        println!("Source: {domain}\n");
    }
    for (section, value) in &info.sections {
        println!("[{section}]");
        match value {
            serde_json::Value::String(text) => println!("{text}"),
            other => println!("{}", serde_json::to_string_pretty(other)?),
        }
        println!();
    }
    Ok(())
}
