//! Built-in quest types
//!
//! Quests register here explicitly; there is no implicit discovery. Add
//! new quest types to [`registry`] to make them resolvable.

pub mod intro;

pub use intro::IntroQuest;

use crate::quest::QuestKind;
use crate::registry::Registry;

/// The quest every new player starts with.
pub const FIRST_QUEST: &str = IntroQuest::NAME;

/// Build the process-wide registry of known quest types.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register::<IntroQuest>();
    registry
}
