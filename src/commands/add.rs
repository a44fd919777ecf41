//! Add command - append a question/answer pair

use anyhow::Result;
use colored::Colorize;

use super::open_matcher;

pub fn run(question: &str, answer: &str, json: bool) -> Result<()> {
    let (_, matcher) = open_matcher()?;
    let added = matcher.add_knowledge(question, answer)?;

    if json {
        let output = serde_json::json!({
            "status": "success",
            "message": "Knowledge added successfully",
            "id": added.id,
            "persisted": added.persisted,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} Added #{}: {}", "✓".green(), added.id, question.cyan());
    if !added.persisted {
        println!(
            "{} Could not write to disk; the entry lives only in this process",
            "⚠".yellow()
        );
    }

    Ok(())
}
