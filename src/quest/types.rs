use semver::Version;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::stage::StageDecl;

/// Author-declared difficulty metadata. Display only, never computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// Stable identifier of one player's instance of one quest type.
///
/// Rendered as `{player}:{QuestName}`; the quest type name is everything
/// after the last `:` so player identifiers may themselves contain colons
/// (e.g. `github:1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestKey {
    player: String,
    quest: String,
}

impl QuestKey {
    pub fn new(player: impl Into<String>, quest: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            quest: quest.into(),
        }
    }

    /// Split a rendered key back into player and quest type name.
    pub fn parse(key: &str) -> Option<Self> {
        let (player, quest) = key.rsplit_once(':')?;
        if player.is_empty() || quest.is_empty() {
            return None;
        }
        Some(Self::new(player, quest))
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn quest_name(&self) -> &str {
        &self.quest
    }
}

impl std::fmt::Display for QuestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.player, self.quest)
    }
}

/// The authoring interface for a quest type.
///
/// A quest type declares its identity (name, version, display metadata),
/// its payload schema, and its stage set. The payload round-trips through
/// JSON on every save/load; bumping the minor of [`QuestKind::version`]
/// signals additive payload changes, bumping its major signals an
/// incompatible shape.
pub trait QuestKind: Sized + 'static {
    /// Quest-specific payload. Schema is owned by the quest author.
    type Data: Serialize + DeserializeOwned + Default;

    /// Unique quest type name, used in keys and registry lookups.
    const NAME: &'static str;

    /// Version of this quest's code, checked against loaded snapshots.
    fn version() -> Version;

    /// Difficulty metadata, display only.
    fn difficulty() -> Difficulty;

    /// Quest description metadata, display only.
    fn description() -> &'static str;

    /// The declared stage set.
    fn stages() -> Vec<StageDecl<Self>>;
}
