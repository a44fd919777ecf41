//! Query command - full matcher response

use anyhow::Result;
use colored::Colorize;

use super::{open_matcher, score_colored};

pub fn run(text: &str, json: bool) -> Result<()> {
    let (_, matcher) = open_matcher()?;
    let response = matcher.process_query(text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{} {}", "→".dimmed(), text.cyan());
    println!();
    println!("{}", response.answer);
    println!();
    println!(
        "{} {}",
        "Confidence:".bold(),
        score_colored(response.confidence)
    );

    if !response.sources.is_empty() {
        println!("{}", "Sources:".bold());
        for source in &response.sources {
            println!("  [{}] {}", score_colored(source.score), source.question);
        }
    }

    println!("{}", "You might also ask:".bold());
    for question in &response.follow_up_questions {
        println!("  • {}", question.cyan());
    }

    Ok(())
}
