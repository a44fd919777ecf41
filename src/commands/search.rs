//! Search command - nearest corpus entries without answer shaping

use anyhow::Result;
use colored::Colorize;

use super::{open_matcher, score_colored};

pub fn run(text: &str, limit: usize, json: bool) -> Result<()> {
    let (_, matcher) = open_matcher()?;
    let results = matcher.search(text, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{} No results found for: {}", "→".dimmed(), text.cyan());
        return Ok(());
    }

    println!(
        "{} {} results for: {}",
        "→".dimmed(),
        results.len(),
        text.cyan()
    );
    println!();

    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. [{}] {} {}",
            (i + 1).to_string().bold(),
            score_colored(result.score),
            result.document.question.cyan(),
            format!("(#{})", result.document.id).dimmed()
        );

        let answer = &result.document.answer;
        let display = if answer.chars().count() > 100 {
            format!("{}...", answer.chars().take(100).collect::<String>())
        } else {
            answer.clone()
        };
        println!("   {}", display.dimmed());
    }

    Ok(())
}
