//! Merge freshly parsed scenes into the previous breakdown table.
//!
//! Rows are keyed by `(day, scene)`. Only the annotation lookup is keyed:
//! every parsed record becomes a row, even when several share a key.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::cleanup::clean_commas;
use crate::scene::SceneRecord;

/// Number of columns in a breakdown table.
pub const BREAKDOWN_COLUMNS: usize = 7;

const SFX_COLUMN: usize = 5;
const NOTES_COLUMN: usize = 6;

/// Identity of a scene across schedule revisions.
///
/// Ordered lexicographically by day, then scene, as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneKey {
    pub day: String,
    pub scene: String,
}

impl SceneKey {
    pub fn new(day: impl Into<String>, scene: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            scene: scene.into(),
        }
    }
}

impl From<&SceneRecord> for SceneKey {
    fn from(record: &SceneRecord) -> Self {
        Self::new(record.day.clone(), record.scene.clone())
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.day, self.scene)
    }
}

/// Hand-maintained columns carried over between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub sfx: String,
    pub notes: String,
}

/// Annotations of the previous breakdown, keyed by scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExistingAnnotations {
    by_key: BTreeMap<SceneKey, Annotation>,
}

impl ExistingAnnotations {
    /// Read annotations from the cell texts of a table.
    ///
    /// Row 0 is the header and is skipped, as are rows with fewer than
    /// [`BREAKDOWN_COLUMNS`] cells. Cell texts are trimmed. A later row
    /// replaces an earlier one with the same key.
    pub fn from_table_rows(rows: &[Vec<String>]) -> Self {
        let mut by_key = BTreeMap::new();
        for cells in rows.iter().skip(1) {
            if cells.len() < BREAKDOWN_COLUMNS {
                continue;
            }
            let key = SceneKey::new(cells[0].trim(), cells[1].trim());
            by_key.insert(
                key,
                Annotation {
                    sfx: cells[SFX_COLUMN].trim().to_string(),
                    notes: cells[NOTES_COLUMN].trim().to_string(),
                },
            );
        }
        Self { by_key }
    }

    pub fn insert(&mut self, key: SceneKey, annotation: Annotation) {
        self.by_key.insert(key, annotation);
    }

    pub fn get(&self, key: &SceneKey) -> Option<&Annotation> {
        self.by_key.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SceneKey> {
        self.by_key.keys()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// One output row of the breakdown table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakdownRow {
    pub day: String,
    pub scene: String,
    pub timing: String,
    pub summary: String,
    pub cast: String,
    pub sfx: String,
    pub notes: String,
}

impl BreakdownRow {
    /// Cell values in column order.
    pub fn cells(&self) -> [&str; BREAKDOWN_COLUMNS] {
        [
            &self.day,
            &self.scene,
            &self.timing,
            &self.summary,
            &self.cast,
            &self.sfx,
            &self.notes,
        ]
    }
}

/// A difference between the old and the new set of scene keys.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeLogEntry {
    Added(SceneKey),
    Removed(SceneKey),
}

impl fmt::Display for ChangeLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeLogEntry::Added(key) => write!(f, "ADDED {key}"),
            ChangeLogEntry::Removed(key) => write!(f, "REMOVED {key}"),
        }
    }
}

/// Rows to write plus the key-level change log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeResult {
    pub rows: Vec<BreakdownRow>,
    pub changelog: Vec<ChangeLogEntry>,
}

/// Build output rows for `records`, carrying annotations over by key.
///
/// The change log lists keys only in the new records (`Added`) and keys
/// only in the old table (`Removed`), each group sorted by key, added first.
pub fn merge_records(records: &[SceneRecord], existing: &ExistingAnnotations) -> MergeResult {
    let mut new_keys = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let key = SceneKey::from(record);
        let annotation = existing.get(&key).cloned().unwrap_or_default();
        rows.push(BreakdownRow {
            day: record.day.clone(),
            scene: record.scene.clone(),
            timing: record.timing.clone(),
            summary: clean_commas(&record.summary),
            cast: clean_commas(&record.cast),
            sfx: annotation.sfx,
            notes: annotation.notes,
        });
        new_keys.insert(key);
    }

    let old_keys: BTreeSet<&SceneKey> = existing.keys().collect();
    let mut changelog: Vec<ChangeLogEntry> = new_keys
        .iter()
        .filter(|k| !old_keys.contains(k))
        .cloned()
        .map(ChangeLogEntry::Added)
        .collect();
    changelog.extend(
        old_keys
            .iter()
            .filter(|k| !new_keys.contains(**k))
            .map(|k| ChangeLogEntry::Removed((*k).clone())),
    );

    debug!(
        rows = rows.len(),
        changes = changelog.len(),
        "merged scene records"
    );
    MergeResult { rows, changelog }
}
