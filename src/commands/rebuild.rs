//! Rebuild command - reseed the corpus

use anyhow::Result;
use colored::Colorize;

use super::open_matcher;

pub fn run(json: bool) -> Result<()> {
    let (paths, matcher) = open_matcher()?;
    let report = matcher.reseed()?;
    let documents = report.ids.end - report.ids.start;

    if json {
        let output = serde_json::json!({
            "documents": documents,
            "persisted": report.persisted,
            "storage": paths.resolved.storage_dir,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} Rebuilt knowledge base with {} seed documents",
        "✓".green(),
        documents
    );
    if report.persisted {
        println!("  {}", paths.resolved.storage_dir.display().to_string().dimmed());
    } else {
        println!("{} Failed to persist the rebuilt index", "⚠".yellow());
    }

    Ok(())
}
