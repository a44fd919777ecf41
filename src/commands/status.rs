//! Status command - knowledge base summary

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::open_matcher;

#[derive(Serialize)]
struct StatusReport {
    documents: usize,
    embedder: String,
    dimension: usize,
    index: PathBuf,
    documents_file: PathBuf,
}

pub fn run(json: bool) -> Result<()> {
    let (paths, matcher) = open_matcher()?;
    let status = matcher.status()?;

    let report = StatusReport {
        documents: status.documents,
        embedder: status.embedder,
        dimension: status.dimension,
        index: paths.resolved.index.clone(),
        documents_file: paths.resolved.documents.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Wellness Knowledge Base".bold());
    println!("{}", "=".repeat(50));
    println!("  {:<12} {}", "Documents:", report.documents.to_string().green());
    println!(
        "  {:<12} {} ({}d)",
        "Embedder:",
        report.embedder.cyan(),
        report.dimension
    );
    println!("  {:<12} {}", "Index:", report.index.display());
    println!("  {:<12} {}", "Documents:", report.documents_file.display());

    Ok(())
}
