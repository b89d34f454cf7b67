//! Document store the engine persists quest snapshots into
//!
//! The engine only needs get / full-replace set / merge-set of JSON-shaped
//! documents addressed by quest key. Backends plug in behind
//! [`DocumentStore`]: the filesystem store for real runs, the memory store
//! for tests.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use anyhow::Result;

use crate::quest::QuestKey;

/// Key-value access to JSON documents.
///
/// `set` is a full replace. Two invocations racing on the same key are a
/// last-write-wins hazard; the engine provides no mutual exclusion and a
/// deployment must serialize invocations per key (or a backend may add
/// optimistic concurrency of its own).
pub trait DocumentStore {
    /// Fetch the document at `key`, if any.
    fn get(&self, key: &QuestKey) -> Result<Option<serde_json::Value>>;

    /// Replace the document at `key` wholesale.
    fn set(&self, key: &QuestKey, doc: serde_json::Value) -> Result<()>;

    /// Merge top-level fields of `doc` into the existing document,
    /// creating it if absent. Callers that keep extra fields alongside a
    /// quest snapshot at the same key use this rather than `set`.
    fn merge(&self, key: &QuestKey, doc: serde_json::Value) -> Result<()> {
        let merged = match (self.get(key)?, doc) {
            (Some(serde_json::Value::Object(mut existing)), serde_json::Value::Object(update)) => {
                existing.extend(update);
                serde_json::Value::Object(existing)
            }
            (_, update) => update,
        };
        self.set(key, merged)
    }
}
