//! Quest registry
//!
//! Maps quest type names to their concrete implementations. Populated
//! explicitly at startup (see [`crate::quests::registry`]) and read-only
//! afterwards - no implicit discovery.

use std::collections::HashMap;
use std::marker::PhantomData;

use semver::Version;
use tracing::error;

use crate::error::QuestError;
use crate::quest::{Difficulty, Quest, QuestKey, QuestKind};
use crate::store::DocumentStore;
use crate::tick::TickKind;

/// Object-safe handle to a registered quest type.
pub trait QuestHandle {
    fn name(&self) -> &'static str;
    fn version(&self) -> Version;
    fn difficulty(&self) -> Difficulty;
    fn description(&self) -> &'static str;

    /// Load -> execute one pass -> save, for one player.
    ///
    /// Definition and load errors surface unmodified; nothing is written
    /// on any error path.
    fn run(
        &self,
        store: &dyn DocumentStore,
        player: &str,
        tick: TickKind,
    ) -> Result<(), QuestError>;

    /// Whether the player has a stored snapshot of this quest. Does not
    /// load or version-check it.
    fn exists(&self, store: &dyn DocumentStore, player: &str) -> Result<bool, QuestError>;

    /// Load the player's quest and report its current progress.
    fn status(&self, store: &dyn DocumentStore, player: &str) -> Result<QuestStatus, QuestError>;
}

/// Progress report for display, independent of the concrete quest type.
pub struct QuestStatus {
    pub key: String,
    pub version: Version,
    pub complete: bool,
    /// `(stage name, done)` in topological order.
    pub stages: Vec<(String, bool)>,
}

struct Handle<Q: QuestKind>(PhantomData<Q>);

impl<Q: QuestKind> QuestHandle for Handle<Q> {
    fn name(&self) -> &'static str {
        Q::NAME
    }

    fn version(&self) -> Version {
        Q::version()
    }

    fn difficulty(&self) -> Difficulty {
        Q::difficulty()
    }

    fn description(&self) -> &'static str {
        Q::description()
    }

    fn run(
        &self,
        store: &dyn DocumentStore,
        player: &str,
        tick: TickKind,
    ) -> Result<(), QuestError> {
        let mut quest = Quest::<Q>::load(store, player)?;
        quest.execute_stages(tick)?;
        quest.save(store)
    }

    fn exists(&self, store: &dyn DocumentStore, player: &str) -> Result<bool, QuestError> {
        let key = QuestKey::new(player, Q::NAME);
        let doc = store
            .get(&key)
            .map_err(|err| QuestError::store(key.to_string(), err))?;
        Ok(doc.is_some())
    }

    fn status(&self, store: &dyn DocumentStore, player: &str) -> Result<QuestStatus, QuestError> {
        let quest = Quest::<Q>::load(store, player)?;
        let stages = quest
            .graph()
            .names()
            .map(|name| (name.to_string(), quest.graph().is_done(name)))
            .collect();
        Ok(QuestStatus {
            key: quest.key().to_string(),
            version: Q::version(),
            complete: quest.is_complete(),
            stages,
        })
    }
}

/// Name -> quest type table. Build once at startup, then resolve only.
#[derive(Default)]
pub struct Registry {
    quests: HashMap<&'static str, Box<dyn QuestHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<Q: QuestKind>(&mut self) {
        self.quests.insert(Q::NAME, Box::new(Handle::<Q>(PhantomData)));
    }

    /// Find a quest type by name.
    pub fn resolve(&self, name: &str) -> Result<&dyn QuestHandle, QuestError> {
        self.quests
            .get(name)
            .map(|handle| handle.as_ref())
            .ok_or_else(|| QuestError::UnknownQuest(name.to_string()))
    }

    /// Registered quest handles, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &dyn QuestHandle> {
        let mut handles: Vec<&dyn QuestHandle> =
            self.quests.values().map(|handle| handle.as_ref()).collect();
        handles.sort_by_key(|h| h.name());
        handles.into_iter()
    }

    /// Progress reports for every registered quest type the player has
    /// started but not concluded, sorted by quest name.
    pub fn in_progress(
        &self,
        store: &dyn DocumentStore,
        player: &str,
    ) -> Result<Vec<QuestStatus>, QuestError> {
        let mut statuses = Vec::new();
        for handle in self.iter() {
            if !handle.exists(store, player)? {
                continue;
            }
            let status = handle.status(store, player)?;
            if !status.complete {
                statuses.push(status);
            }
        }
        Ok(statuses)
    }

    /// The engine entry point exposed to the trigger layer: resolve the
    /// quest type, then load -> execute pass -> save.
    pub fn run_quest(
        &self,
        store: &dyn DocumentStore,
        quest_name: &str,
        player: &str,
        tick: TickKind,
    ) -> Result<(), QuestError> {
        let handle = self.resolve(quest_name)?;
        handle.run(store, player, tick).inspect_err(|err| {
            error!(quest = quest_name, player, %err, "quest run failed");
        })
    }
}
