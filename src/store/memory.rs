//! In-memory document store, used by tests

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::quest::QuestKey;

use super::DocumentStore;

#[derive(Default)]
pub struct MemoryStore {
    docs: RefCell<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.borrow().is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &QuestKey) -> Result<Option<serde_json::Value>> {
        Ok(self.docs.borrow().get(&key.to_string()).cloned())
    }

    fn set(&self, key: &QuestKey, doc: serde_json::Value) -> Result<()> {
        self.docs.borrow_mut().insert(key.to_string(), doc);
        Ok(())
    }
}
