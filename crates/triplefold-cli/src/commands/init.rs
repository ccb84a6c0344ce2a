//! Initialize a new Triplefold project.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    println!("{} Initializing Triplefold project...", "→".blue());

    let config_path = base_path.join("triplefold.toml");
    if !config_path.exists() {
        let config = Config::default();
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    println!();
    println!("{} Triplefold project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} triplefold stats --input triples.json", "1.".blue());
    println!("  {} triplefold reduce --input triples.json", "2.".blue());

    Ok(())
}
