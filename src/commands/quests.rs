use anyhow::Result;
use colored::Colorize;

use crate::quests;

/// List the registered quest types.
/// Usage: questline quests
pub fn execute() -> Result<()> {
    println!("{}\n", crate::LOGO);

    let registry = quests::registry();

    for handle in registry.iter() {
        let first = if handle.name() == quests::FIRST_QUEST {
            " (first quest)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "{} v{} [{}] - {}{}",
            handle.name().bold(),
            handle.version(),
            handle.difficulty(),
            handle.description(),
            first
        );
    }

    Ok(())
}
