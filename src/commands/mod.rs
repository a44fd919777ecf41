pub mod add;
pub mod init;
pub mod query;
pub mod rebuild;
pub mod search;
pub mod status;

use anyhow::Result;
use wellness_kb::core::paths::KbPaths;
use wellness_kb::KnowledgeMatcher;

/// Open the knowledge base under the resolved root
fn open_matcher() -> Result<(KbPaths, KnowledgeMatcher)> {
    let paths = KbPaths::new()?;
    let matcher = KnowledgeMatcher::open(&paths)?;
    Ok((paths, matcher))
}

fn score_colored(score: f32) -> colored::ColoredString {
    use colored::Colorize;

    let score_str = format!("{:.2}", score);
    if score >= wellness_kb::knowledge::CONFIDENCE_THRESHOLD {
        score_str.green()
    } else if score > 0.0 {
        score_str.yellow()
    } else {
        score_str.dimmed()
    }
}
