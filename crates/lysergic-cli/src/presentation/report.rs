//! Experience report display.

use lysergic_core::{ExperienceDetail, ExperienceSummary};
use lysergic_speech::text_utils::strip_markup;

use super::tables::{format_optional, print_separator, truncate_string};

/// Print a numbered table of report summaries.
pub fn print_summaries(items: &[ExperienceSummary]) {
    println!("{:<4} {:<40} {:<18} {:<16} URL", "#", "Title", "Substance", "Author");
    print_separator(110);

    for (i, item) in items.iter().enumerate() {
        println!(
            "{:<4} {:<40} {:<18} {:<16} {}",
            i + 1,
            truncate_string(&item.title, 39),
            truncate_string(&format_optional(item.substance.as_ref(), "--"), 17),
            truncate_string(&format_optional(item.author.as_ref(), "--"), 15),
            item.url
        );
    }
}

/// Print a full report: header, metadata, dose chart and plain-text body.
pub fn print_experience(detail: &ExperienceDetail) {
    println!("{}", detail.title);
    print_separator(detail.title.chars().count().clamp(10, 80));

    if let Some(author) = &detail.author {
        println!("Author:     {author}");
    }
    if let Some(substances) = &detail.substances {
        println!("Substances: {substances}");
    }
    let meta = &detail.metadata;
    for (label, value) in [
        ("Published:", &meta.published),
        ("Gender:   ", &meta.gender),
        ("Age:      ", &meta.age),
        ("Views:    ", &meta.views),
    ] {
        if let Some(value) = value {
            println!("{label}  {value}");
        }
    }

    if !detail.doses.is_empty() {
        println!();
        println!("Doses:");
        for dose in &detail.doses {
            println!("  - {}", dose.describe());
        }
    }

    println!();
    println!("{}", strip_markup(&detail.content));
    println!();
    println!("Source: {}", detail.url);
}
