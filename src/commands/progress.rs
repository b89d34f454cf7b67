use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::quests;
use crate::store::FsStore;

/// List a player's started-but-unfinished quests.
/// Usage: questline progress --player <id>
pub fn execute(player: String, store_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load(Path::new("."))?;
    let store = FsStore::open(config.resolve_store_dir(store_dir))?;
    let registry = quests::registry();

    let statuses = registry.in_progress(&store, &player)?;
    if statuses.is_empty() {
        println!("No quests in progress for {player}");
        return Ok(());
    }

    for status in statuses {
        let done = status.stages.iter().filter(|(_, d)| *d).count();
        println!(
            "{} v{} - {done}/{} stages complete",
            status.key.bold(),
            status.version,
            status.stages.len()
        );
    }

    Ok(())
}
