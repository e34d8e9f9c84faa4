//! In-memory implementation of the Store trait.
//!
//! Documents live in a `Vec` whose iteration order is the store's natural
//! order, with a key-to-position map for point lookups. The `sorted` flag
//! records whether that natural order currently matches the comparator; it is
//! handed to the patch engine as an optimization hint and never relied on for
//! correctness.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use async_trait::async_trait;
use satchel_core::{apply_patch, ApplyHints, Comparator, Index, Patch, Record, StoreError};

use crate::traits::Store;
use satchel_core::Result;

/// In-memory keyed collection.
///
/// All work happens synchronously under a `RwLock`; results come back as
/// already-resolved futures so the interface matches the remote backend.
pub struct MemoryStore<T: Record> {
    inner: RwLock<Inner<T>>,
    comparator: Comparator<T>,
}

struct Inner<T: Record> {
    /// Documents in natural order.
    items: Vec<T>,
    /// Key to position in `items`.
    positions: HashMap<T::Key, usize>,
    /// True iff `items` is currently in comparator order with no new-key
    /// insert since the last bulk application.
    sorted: bool,
}

impl<T: Record> MemoryStore<T> {
    /// Create an empty store ordered by extracted key.
    pub fn new() -> Self {
        Self::with_comparator(Comparator::by_key())
    }

    /// Create an empty store with a custom document order.
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                positions: HashMap::new(),
                // An empty collection is trivially in order.
                sorted: true,
            }),
            comparator,
        }
    }

    /// Every document, in natural order. Local-only: the six-operation
    /// [`Store`] contract deliberately excludes a listing, since the wire
    /// protocol has no route for it.
    pub async fn all(&self) -> Result<Vec<T>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.items.clone())
    }

    /// Current value of the sortedness hint. Diagnostic only.
    pub fn sorted(&self) -> bool {
        self.inner.read().unwrap().sorted
    }

    /// Number of documents currently held.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().items.len()
    }

    /// True if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Inner<T> {
    fn reindex(&mut self) {
        self.positions.clear();
        for (i, item) in self.items.iter().enumerate() {
            self.positions.insert(item.key(), i);
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Store<T> for MemoryStore<T> {
    async fn find(&self, key: &T::Key) -> Result<T> {
        let inner = self.inner.read().unwrap();
        match inner.positions.get(key) {
            Some(&i) => Ok(inner.items[i].clone()),
            None => Err(StoreError::DoesNotExist(key.to_string())),
        }
    }

    async fn find_all<V>(&self, index: &Index<T, V>, value: &V) -> Result<Vec<T>>
    where
        V: fmt::Display + Sync + ?Sized,
    {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .items
            .iter()
            .filter(|item| index.matches(value, item))
            .cloned()
            .collect())
    }

    async fn update(&self, doc: T) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        let key = doc.key();
        match inner.positions.get(&key).copied() {
            Some(i) => {
                // In-place replacement keeps the key at the same position, so
                // the sortedness of a key-ordered collection is unaffected.
                inner.items[i] = doc;
            }
            None => {
                let at = inner.items.len();
                inner.items.push(doc);
                inner.positions.insert(key, at);
                // A new key may belong at an arbitrary position.
                inner.sorted = false;
            }
        }
        Ok(())
    }

    async fn remove(&self, key: &T::Key) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();
        match inner.positions.remove(key) {
            Some(i) => {
                inner.items.remove(i);
                inner.reindex();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_all<V>(&self, index: &Index<T, V>, value: &V) -> Result<bool>
    where
        V: fmt::Display + Sync + ?Sized,
    {
        let mut inner = self.inner.write().unwrap();
        let before = inner.items.len();
        inner.items.retain(|item| !index.matches(value, item));
        if inner.items.len() == before {
            return Ok(false);
        }
        inner.reindex();
        Ok(true)
    }

    async fn bulk(&self, patch: Patch<T>) -> Result<usize> {
        let mut inner = self.inner.write().unwrap();
        let snapshot = inner.items.clone();
        let hints = ApplyHints {
            sorted: inner.sorted,
        };

        // Adopt the engine's result only on success; a failed patch leaves
        // the collection exactly as it was.
        let next = apply_patch(snapshot, &patch, &self.comparator, hints)?;

        inner.items = next;
        inner.reindex();
        inner.sorted = true;
        Ok(patch.len())
    }
}
