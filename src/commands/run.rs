use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::quests;
use crate::store::FsStore;
use crate::tick::TickKind;

/// Run one execution pass of a quest for a player.
/// Usage: questline run [quest] --player <id>
pub fn execute(
    quest: Option<String>,
    player: String,
    tick: TickKind,
    store_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load(Path::new("."))?;
    let store = FsStore::open(config.resolve_store_dir(store_dir))?;
    let registry = quests::registry();

    let quest_name = quest.unwrap_or_else(|| quests::FIRST_QUEST.to_string());
    registry.run_quest(&store, &quest_name, &player, tick)?;

    println!("Ran {quest_name} for {player} ({tick} tick)");
    Ok(())
}
