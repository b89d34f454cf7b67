//! Versioned persisted form of a quest's state
//!
//! A [`Snapshot`] is the wire shape written to the document store: the
//! quest code's semver at save time, the serialized quest payload, the
//! list of completed stage names, and the completion flag. It is written
//! wholesale on save and either fully applied or rejected on load.

use semver::Version;
use serde::{Deserialize, Serialize};

/// The persisted/wire shape of a quest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    /// Semver of the quest code that wrote this snapshot.
    pub version: String,
    /// The quest payload, serialized as JSON by the quest type.
    pub serialized_data: String,
    /// Names of stages already finished, in completion order.
    #[serde(default)]
    pub completed_stages: Vec<String>,
    /// Whether the quest has concluded. Never resets to false.
    #[serde(default)]
    pub complete: bool,
}

/// Whether loading a snapshot saved at `start` into code at `dest` is safe.
///
/// Safe iff the major versions match and the snapshot's minor does not
/// lead the code's minor. A major bump signals an incompatible payload
/// shape; a snapshot from a newer minor may carry fields the running code
/// would silently lose or misinterpret. Patch is never compared.
pub fn semver_safe(start: &Version, dest: &Version) -> bool {
    if start.major != dest.major {
        return false;
    }

    // a minor downgrade means the snapshot is newer than the code
    if start.minor > dest.minor {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_same_version_is_safe() {
        assert!(semver_safe(&v("1.2.0"), &v("1.2.0")));
    }

    #[test]
    fn test_minor_upgrade_is_safe() {
        assert!(semver_safe(&v("1.2.0"), &v("1.3.0")));
    }

    #[test]
    fn test_minor_downgrade_is_unsafe() {
        assert!(!semver_safe(&v("1.3.0"), &v("1.2.0")));
    }

    #[test]
    fn test_major_mismatch_is_unsafe() {
        assert!(!semver_safe(&v("2.0.0"), &v("1.9.9")));
        assert!(!semver_safe(&v("1.0.0"), &v("2.0.0")));
    }

    #[test]
    fn test_patch_is_ignored() {
        assert!(semver_safe(&v("1.2.9"), &v("1.2.0")));
        assert!(semver_safe(&v("1.2.0"), &v("1.2.9")));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = Snapshot {
            version: "0.1.0".to_string(),
            serialized_data: r#"{"greeted":true}"#.to_string(),
            completed_stages: vec!["Welcome".to_string()],
            complete: false,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_defaults_optional_fields() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"version":"0.1.0","serialized_data":"{}"}"#).unwrap();
        assert!(snapshot.completed_stages.is_empty());
        assert!(!snapshot.complete);
    }
}
