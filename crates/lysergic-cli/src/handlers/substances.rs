//! Substances command handler.

use anyhow::{Result, bail};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_separator;

/// Print the substance catalog, optionally limited to one category.
pub async fn execute(ctx: &CliContext, category: Option<&str>) -> Result<()> {
    let Some(catalog) = ctx.app().feed().ensure_substance_catalog().await else {
        return Err(CliError::Unavailable(format!(
            "could not load the substance catalog from {}",
            ctx.server_url()
        ))
        .into());
    };

    let mut shown = 0;
    for (name, substances) in catalog.categories() {
        if category.is_some_and(|wanted| !name.eq_ignore_ascii_case(wanted.trim())) {
            continue;
        }
        println!("{name} ({})", substances.len());
        print_separator(40);
        for substance in substances {
            match &substance.info_url {
                Some(url) => println!("  {:<32} {url}", substance.name),
                None => println!("  {}", substance.name),
            }
        }
        println!();
        shown += 1;
    }

    if shown == 0 {
        if let Some(wanted) = category {
            bail!(CliError::Arguments(format!("unknown category '{wanted}'")));
        }
        println!("The substance catalog is empty.");
    }
    Ok(())
}
