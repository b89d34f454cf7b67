//! End-to-end tests through the public API
//!
//! Each test drives the registry entry point against a filesystem store in
//! a temp directory, the same path the CLI takes.

use questline::error::{LoadError, QuestError};
use questline::quest::QuestKey;
use questline::quests::{self, FIRST_QUEST};
use questline::store::{DocumentStore, FsStore};
use questline::tick::TickKind;
use serde_json::json;

const PLAYER: &str = "github:1234";

fn intro_key() -> QuestKey {
    QuestKey::new(PLAYER, "IntroQuest")
}

#[test]
fn test_fresh_run_persists_a_snapshot() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();

    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Scheduled)
        .unwrap();

    let doc = store.get(&intro_key()).unwrap().expect("snapshot written");
    assert_eq!(doc["version"], "0.1.0");
    assert_eq!(doc["completed_stages"], json!(["Welcome"]));
    assert_eq!(doc["complete"], false);
}

#[test]
fn test_resume_continues_from_snapshot() {
    let temp = tempfile::tempdir().unwrap();
    let registry = quests::registry();

    // first invocation: scheduled tick only gets through Welcome
    {
        let store = FsStore::open(temp.path()).unwrap();
        registry
            .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Scheduled)
            .unwrap();
    }

    // second invocation reopens the store, as a new process would
    let store = FsStore::open(temp.path()).unwrap();
    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Triggered)
        .unwrap();

    let doc = store.get(&intro_key()).unwrap().unwrap();
    assert_eq!(
        doc["completed_stages"],
        json!(["Welcome", "FirstSteps", "Finale"])
    );
    assert_eq!(doc["complete"], true);
}

#[test]
fn test_completed_quest_run_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();

    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Triggered)
        .unwrap();
    let before = store.get(&intro_key()).unwrap().unwrap();

    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Triggered)
        .unwrap();
    let after = store.get(&intro_key()).unwrap().unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_newer_snapshot_is_rejected_and_left_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();

    // a snapshot from a newer minor than the running code
    let newer = json!({
        "version": "0.2.0",
        "serialized_data": "{\"greeted\":true,\"steps_taken\":0}",
        "completed_stages": ["Welcome"],
        "complete": false,
    });
    store.set(&intro_key(), newer.clone()).unwrap();

    let err = registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Triggered)
        .unwrap_err();
    assert!(matches!(
        err,
        QuestError::Load(LoadError::UnsafeVersion { .. })
    ));

    // nothing was written on the error path
    assert_eq!(store.get(&intro_key()).unwrap(), Some(newer));
}

#[test]
fn test_unknown_quest_name_is_a_lookup_error() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();

    let err = registry
        .run_quest(&store, "NoSuchQuest", PLAYER, TickKind::Triggered)
        .unwrap_err();
    assert!(matches!(err, QuestError::UnknownQuest(_)));
}

#[test]
fn test_in_progress_tracks_started_unfinished_quests() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();

    // nothing started yet
    assert!(registry.in_progress(&store, PLAYER).unwrap().is_empty());

    // a scheduled pass leaves the intro quest mid-flight
    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Scheduled)
        .unwrap();
    let statuses = registry.in_progress(&store, PLAYER).unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].key, format!("{PLAYER}:IntroQuest"));
    assert!(!statuses[0].complete);

    // finishing the quest drops it from the listing
    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Triggered)
        .unwrap();
    assert!(registry.in_progress(&store, PLAYER).unwrap().is_empty());
}

#[test]
fn test_exists_probes_the_stored_snapshot() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();
    let handle = registry.resolve(FIRST_QUEST).unwrap();

    assert!(!handle.exists(&store, PLAYER).unwrap());

    registry
        .run_quest(&store, FIRST_QUEST, PLAYER, TickKind::Scheduled)
        .unwrap();

    assert!(handle.exists(&store, PLAYER).unwrap());
    assert!(!handle.exists(&store, "github:9999").unwrap());
}

#[test]
fn test_two_players_do_not_share_progress() {
    let temp = tempfile::tempdir().unwrap();
    let store = FsStore::open(temp.path()).unwrap();
    let registry = quests::registry();

    registry
        .run_quest(&store, FIRST_QUEST, "github:1", TickKind::Triggered)
        .unwrap();
    registry
        .run_quest(&store, FIRST_QUEST, "github:2", TickKind::Scheduled)
        .unwrap();

    let one = store
        .get(&QuestKey::new("github:1", "IntroQuest"))
        .unwrap()
        .unwrap();
    let two = store
        .get(&QuestKey::new("github:2", "IntroQuest"))
        .unwrap()
        .unwrap();

    assert_eq!(one["complete"], true);
    assert_eq!(two["complete"], false);
}
