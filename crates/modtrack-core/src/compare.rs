//! Diff of two snapshots: added, removed, version and enabled-state changes

use crate::record::ENABLED_YES;
use crate::snapshot::Snapshot;
use serde::Serialize;
use std::collections::BTreeSet;

/// A mod whose version differs between the two snapshots
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct VersionChange {
    pub key: String,
    pub old_version: String,
    pub new_version: String,
}

/// A mod that was switched on or off
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct EnabledChange {
    pub key: String,
    /// `Yes`/`No` in the older snapshot
    pub old_state: String,
    /// `Yes`/`No` in the newer snapshot
    pub new_state: String,
}

impl EnabledChange {
    pub fn now_enabled(&self) -> bool {
        self.new_state == ENABLED_YES
    }
}

/// Result of comparing a newer snapshot against an older one
#[derive(Debug, Clone, Default, Serialize)]
pub struct Comparison {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub version_changes: Vec<VersionChange>,
    pub enabled_changes: Vec<EnabledChange>,
}

impl Comparison {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.version_changes.is_empty()
            && self.enabled_changes.is_empty()
    }

    /// One-line tally for the end of a report
    pub fn summary_line(&self) -> String {
        format!(
            "{} added, {} removed, {} updated, {} status changes",
            self.added.len(),
            self.removed.len(),
            self.version_changes.len(),
            self.enabled_changes.len()
        )
    }
}

/// Compare two snapshots.
///
/// A mod present in both may show up in both change lists. Change lists
/// come out sorted by key.
pub fn compare_snapshots(newer: &Snapshot, older: &Snapshot) -> Comparison {
    let newer_keys: BTreeSet<&String> = newer.entries.keys().collect();
    let older_keys: BTreeSet<&String> = older.entries.keys().collect();

    let added = newer_keys
        .difference(&older_keys)
        .map(|k| (*k).clone())
        .collect();
    let removed = older_keys
        .difference(&newer_keys)
        .map(|k| (*k).clone())
        .collect();

    let mut version_changes = Vec::new();
    let mut enabled_changes = Vec::new();

    for key in newer_keys.intersection(&older_keys) {
        let (new, old) = (&newer.entries[*key], &older.entries[*key]);

        if new.version != old.version {
            version_changes.push(VersionChange {
                key: (*key).clone(),
                old_version: old.version.clone(),
                new_version: new.version.clone(),
            });
        }
        if new.enabled != old.enabled {
            enabled_changes.push(EnabledChange {
                key: (*key).clone(),
                old_state: old.enabled.clone(),
                new_state: new.enabled.clone(),
            });
        }
    }

    Comparison {
        added,
        removed,
        version_changes,
        enabled_changes,
    }
}
