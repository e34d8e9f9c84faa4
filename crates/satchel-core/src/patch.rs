//! Bulk patches and the patch-application engine.
//!
//! A [`Patch`] is an ordered sequence of `(key, operation)` entries, with
//! operations drawn from [`Operation`]: replace the whole value, merge
//! partial fields into it, or delete it. The engine, [`apply_patch`], folds a
//! patch over a snapshot of the collection and returns the next collection in
//! canonical comparator order.
//!
//! The ordering contract: entries apply in sequence order, and later entries
//! for the same key supersede earlier effects. A store adopts the returned
//! collection wholesale; on error the snapshot is discarded and the store is
//! left untouched.
//!
//! ## Wire form
//!
//! Patches serialize as a JSON array so entry order survives the network:
//!
//! ```json
//! [
//!   { "key": 1, "op": "merge", "value": { "body": "pizza" } },
//!   { "key": 7, "op": "delete" }
//! ]
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};
use crate::types::{Keyed, Record};

/// One per-key mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Operation<T> {
    /// Replace the whole value under the entry's key, inserting if absent.
    Replace(T),
    /// Shallow-merge these fields into the JSON object form of the current
    /// value. Merging against an absent key is a no-op.
    Merge(Map<String, Value>),
    /// Remove the key if present.
    Delete,
}

/// A single `(key, operation)` pair within a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, T::Key: Serialize",
    deserialize = "T: Deserialize<'de>, T::Key: Deserialize<'de>"
))]
pub struct PatchEntry<T: Keyed> {
    /// The key this entry addresses.
    pub key: T::Key,
    /// What to do at that key.
    #[serde(flatten)]
    pub op: Operation<T>,
}

/// An ordered description of bulk changes to a keyed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize, T::Key: Serialize",
    deserialize = "T: Deserialize<'de>, T::Key: Deserialize<'de>"
))]
pub struct Patch<T: Keyed> {
    entries: Vec<PatchEntry<T>>,
}

impl<T: Keyed> Patch<T> {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a replace operation, keyed by the value's own key.
    pub fn replace(mut self, value: T) -> Self {
        self.entries.push(PatchEntry {
            key: value.key(),
            op: Operation::Replace(value),
        });
        self
    }

    /// Append a merge of partial fields at `key`.
    pub fn merge(mut self, key: T::Key, fields: Map<String, Value>) -> Self {
        self.entries.push(PatchEntry {
            key,
            op: Operation::Merge(fields),
        });
        self
    }

    /// Append a delete at `key`.
    pub fn delete(mut self, key: T::Key) -> Self {
        self.entries.push(PatchEntry {
            key,
            op: Operation::Delete,
        });
        self
    }

    /// Append an arbitrary entry.
    pub fn push(&mut self, entry: PatchEntry<T>) {
        self.entries.push(entry);
    }

    /// The entries, in application order.
    pub fn entries(&self) -> &[PatchEntry<T>] {
        &self.entries
    }

    /// Number of entries in the patch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the patch contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Keyed> Default for Patch<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared total order over documents. Defaults to comparing extracted keys.
pub struct Comparator<T>(Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>);

impl<T> Comparator<T> {
    /// Wrap an arbitrary comparison function.
    pub fn new(cmp: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(cmp))
    }

    /// Compare two documents.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<T: Keyed> Comparator<T> {
    /// The default order: compare by extracted key.
    pub fn by_key() -> Self {
        Self::new(|a: &T, b: &T| a.key().cmp(&b.key()))
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// Optimization hints handed to the engine alongside a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyHints {
    /// True if the snapshot is already in comparator order. Lets the engine
    /// trade the final sort for a linear verification pass; correctness never
    /// depends on it, so a stale flag only costs time.
    pub sorted: bool,
}

/// Apply a patch to a snapshot of the collection.
///
/// Entries apply in sequence order; later entries for the same key supersede
/// earlier effects. The returned collection is always in canonical
/// `comparator` order, regardless of what `hints` claimed about the input.
///
/// Fails without partial effect if a `Replace` value's own key disagrees with
/// its entry key, or if a `Merge` targets a non-object document or would
/// change its key.
pub fn apply_patch<T: Record>(
    snapshot: Vec<T>,
    patch: &Patch<T>,
    comparator: &Comparator<T>,
    hints: ApplyHints,
) -> Result<Vec<T>> {
    // Tombstone slots keep earlier positions stable so the position index
    // stays valid across deletes.
    let mut positions: HashMap<T::Key, usize> = HashMap::with_capacity(snapshot.len());
    let mut slots: Vec<Option<T>> = Vec::with_capacity(snapshot.len() + patch.len());
    for item in snapshot {
        positions.insert(item.key(), slots.len());
        slots.push(Some(item));
    }

    for entry in patch.entries() {
        match &entry.op {
            Operation::Replace(value) => {
                if value.key() != entry.key {
                    return Err(StoreError::Patch(format!(
                        "replace value carries key {} but entry addresses {}",
                        value.key(),
                        entry.key
                    )));
                }
                match positions.get(&entry.key).copied() {
                    Some(i) => slots[i] = Some(value.clone()),
                    None => {
                        positions.insert(entry.key.clone(), slots.len());
                        slots.push(Some(value.clone()));
                    }
                }
            }
            Operation::Merge(fields) => {
                let Some(&i) = positions.get(&entry.key) else {
                    continue;
                };
                if let Some(current) = slots[i].take() {
                    slots[i] = Some(merge_fields(current, fields, &entry.key)?);
                }
            }
            Operation::Delete => {
                if let Some(i) = positions.remove(&entry.key) {
                    slots[i] = None;
                }
            }
        }
    }

    let mut next: Vec<T> = slots.into_iter().flatten().collect();
    if !(hints.sorted && is_sorted(&next, comparator)) {
        next.sort_by(|a, b| comparator.compare(a, b));
    }
    Ok(next)
}

fn merge_fields<T: Record>(current: T, fields: &Map<String, Value>, key: &T::Key) -> Result<T> {
    let mut value = serde_json::to_value(&current)?;
    let Value::Object(obj) = &mut value else {
        return Err(StoreError::Patch(format!(
            "cannot merge fields into non-object document {key}"
        )));
    };
    for (name, field) in fields {
        obj.insert(name.clone(), field.clone());
    }

    let merged: T = serde_json::from_value(value)?;
    if merged.key() != *key {
        return Err(StoreError::Patch(format!(
            "merge changed the key of document {key}"
        )));
    }
    Ok(merged)
}

fn is_sorted<T>(items: &[T], comparator: &Comparator<T>) -> bool {
    items
        .windows(2)
        .all(|pair| comparator.compare(&pair[0], &pair[1]) != Ordering::Greater)
}
