use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::quests;
use crate::store::FsStore;

/// Show a player's progress through a quest.
/// Usage: questline show [quest] --player <id>
pub fn execute(quest: Option<String>, player: String, store_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load(Path::new("."))?;
    let store = FsStore::open(config.resolve_store_dir(store_dir))?;
    let registry = quests::registry();

    let quest_name = quest.unwrap_or_else(|| quests::FIRST_QUEST.to_string());
    let handle = registry.resolve(&quest_name)?;
    let status = handle.status(&store, &player)?;

    println!(
        "{} v{} [{}]",
        status.key.bold(),
        status.version,
        handle.difficulty()
    );
    println!("{}", handle.description());
    println!();

    for (name, done) in &status.stages {
        if *done {
            println!("  {} {}", "✓".green(), name);
        } else {
            println!("  {} {}", "·".dimmed(), name.as_str().dimmed());
        }
    }

    println!();
    if status.complete {
        println!("{}", "Quest complete".green().bold());
    } else {
        let done = status.stages.iter().filter(|(_, d)| *d).count();
        println!("{done}/{} stages complete", status.stages.len());
    }

    Ok(())
}
