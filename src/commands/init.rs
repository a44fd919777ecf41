//! Config initialization command

use anyhow::Result;
use colored::*;

use wellness_kb::core::config::{Config, CONFIG_FILE};
use wellness_kb::core::paths::get_root;

pub fn run(force: bool) -> Result<()> {
    let root = get_root()?;
    let config_path = root.join(CONFIG_FILE);

    if config_path.exists() && !force {
        println!(
            "{} Config already exists: {} (use --force to overwrite)",
            "→".blue(),
            config_path.display()
        );
        return Ok(());
    }

    let existed = config_path.exists();
    Config::default().save(&root)?;

    if existed {
        println!("{} Overwrote {}", "✓".green(), config_path.display());
    } else {
        println!("{} Created {}", "✓".green(), config_path.display());
    }

    Ok(())
}
