//! Filesystem-backed document store
//!
//! One JSON file per quest key under a data directory. Reads and writes go
//! through `fs2` advisory locks so concurrent invocations cannot interleave
//! a read with a half-written file. Advisory locks are cooperative - all
//! participants must go through this store for the locking to be effective.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::quest::QuestKey;

use super::DocumentStore;

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create store directory: {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &QuestKey) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl DocumentStore for FsStore {
    fn get(&self, key: &QuestKey) -> Result<Option<serde_json::Value>> {
        let path = self.document_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = locked_read(&path)?;
        let doc = serde_json::from_str(&content)
            .with_context(|| format!("Malformed document at {}", path.display()))?;
        Ok(Some(doc))
    }

    fn set(&self, key: &QuestKey, doc: serde_json::Value) -> Result<()> {
        let path = self.document_path(key);
        let content = serde_json::to_string_pretty(&doc)?;
        locked_write(&path, &content)
    }
}

/// Read file contents with a shared (read) lock.
fn locked_read(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.lock_shared()
        .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

/// Write file contents with an exclusive (write) lock.
///
/// The file is truncated AFTER acquiring the lock, preventing the TOCTOU
/// race where another process reads an empty file between truncation and
/// write completion. The sequence is: open -> lock -> truncate -> write ->
/// flush.
fn locked_write(path: &Path, content: &str) -> Result<()> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;
    file.set_len(0)
        .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key() -> QuestKey {
        QuestKey::new("github:1234", "IntroQuest")
    }

    #[test]
    fn test_get_absent_key() {
        let temp = tempfile::tempdir().unwrap();
        let store = FsStore::open(temp.path()).unwrap();

        assert!(store.get(&key()).unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let temp = tempfile::tempdir().unwrap();
        let store = FsStore::open(temp.path()).unwrap();

        let doc = json!({"version": "0.1.0", "complete": false});
        store.set(&key(), doc.clone()).unwrap();

        assert_eq!(store.get(&key()).unwrap(), Some(doc));
    }

    #[test]
    fn test_set_is_full_replace() {
        let temp = tempfile::tempdir().unwrap();
        let store = FsStore::open(temp.path()).unwrap();

        store.set(&key(), json!({"a": 1, "b": 2})).unwrap();
        store.set(&key(), json!({"b": 3})).unwrap();

        assert_eq!(store.get(&key()).unwrap(), Some(json!({"b": 3})));
    }

    #[test]
    fn test_merge_keeps_existing_fields() {
        let temp = tempfile::tempdir().unwrap();
        let store = FsStore::open(temp.path()).unwrap();

        store.set(&key(), json!({"a": 1, "b": 2})).unwrap();
        store.merge(&key(), json!({"b": 3, "c": 4})).unwrap();

        assert_eq!(
            store.get(&key()).unwrap(),
            Some(json!({"a": 1, "b": 3, "c": 4}))
        );
    }

    #[test]
    fn test_merge_creates_absent_document() {
        let temp = tempfile::tempdir().unwrap();
        let store = FsStore::open(temp.path()).unwrap();

        store.merge(&key(), json!({"a": 1})).unwrap();
        assert_eq!(store.get(&key()).unwrap(), Some(json!({"a": 1})));
    }
}
