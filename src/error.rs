//! Error types for the quest engine
//!
//! Errors fall into three families, and all of them surface to the
//! invocation boundary unchanged:
//! - [`DefinitionError`]: a bug in a quest's authored stage set (cycle or
//!   dangling dependency). Not data-dependent; should be caught by tests.
//! - [`LoadError`]: a persisted snapshot that cannot be applied (schema,
//!   version safety, payload decoding). The quest is left untouched.
//! - Lookup/stage/store failures, which are per-request.

use semver::Version;
use thiserror::Error;

/// A structural fault in a quest's declared stage graph.
///
/// These are programming errors in quest authoring, not data problems;
/// they abort the entire operation and never partially apply.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("quest '{quest}': stage '{stage}' depends on undeclared stage '{dependency}'")]
    UnknownDependency {
        quest: String,
        stage: String,
        dependency: String,
    },

    #[error("quest '{quest}': dependency cycle: {}", cycle.join(" -> "))]
    Cycle { quest: String, cycle: Vec<String> },

    #[error("quest '{quest}': stage '{stage}' is declared more than once")]
    DuplicateStage { quest: String, stage: String },
}

/// A fault in reading, version-checking, or deserializing a snapshot.
///
/// On any of these the snapshot is not applied at all; the caller decides
/// policy (refuse to resume, force-reset, ...). The engine never guesses.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("quest '{quest}' ({key}): snapshot does not match the expected schema")]
    SnapshotSchema {
        quest: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quest '{quest}' ({key}): unsafe version migration {start} -> {dest}")]
    UnsafeVersion {
        quest: String,
        key: String,
        start: Version,
        dest: Version,
    },

    #[error("quest '{quest}' ({key}): snapshot version '{version}' is not valid semver")]
    BadVersion {
        quest: String,
        key: String,
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("quest '{quest}' ({key}): quest data failed to deserialize")]
    PayloadDecode {
        quest: String,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quest '{quest}' ({key}): completed stage '{stage}' is not in the declared stage set")]
    UnknownCompletedStage {
        quest: String,
        key: String,
        stage: String,
    },
}

/// Top-level error surfaced by the engine entry points.
#[derive(Debug, Error)]
pub enum QuestError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no quest registered under '{0}'")]
    UnknownQuest(String),

    #[error("quest '{quest}': stage '{stage}' failed")]
    Stage {
        quest: String,
        stage: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("document store failure for key '{key}'")]
    Store {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl QuestError {
    pub fn stage(quest: impl Into<String>, stage: impl Into<String>, source: anyhow::Error) -> Self {
        QuestError::Stage {
            quest: quest.into(),
            stage: stage.into(),
            source,
        }
    }

    pub fn store(key: impl Into<String>, source: anyhow::Error) -> Self {
        QuestError::Store {
            key: key.into(),
            source,
        }
    }
}
