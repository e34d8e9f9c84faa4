//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a concrete document type, its
//! indexes, and canonically seeded stores.

use satchel_core::{Index, IndexMap, Keyed};
use satchel_store::{MemoryStore, Store};
use serde::{Deserialize, Serialize};

/// The document type used throughout the test suites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub uid: u32,
    pub author: String,
    pub body: String,
}

impl Note {
    pub fn new(uid: u32, author: &str, body: &str) -> Self {
        Self {
            uid,
            author: author.to_string(),
            body: body.to_string(),
        }
    }
}

impl Keyed for Note {
    type Key = u32;

    fn key(&self) -> u32 {
        self.uid
    }
}

/// Index over `Note::author`.
pub fn by_author() -> Index<Note> {
    Index::new("by_author", |v, n| n.author == v)
}

/// Index over `Note::body`.
pub fn by_body() -> Index<Note> {
    Index::new("by_body", |v, n| n.body == v)
}

/// An index that is intentionally left out of [`note_index_map`], for
/// missing-encoder tests.
pub fn by_nothing() -> Index<Note> {
    Index::new("by_nothing", |_, _| false)
}

/// Encoders for [`by_author`] and [`by_body`].
pub fn note_index_map() -> IndexMap {
    IndexMap::new()
        .add_simple_field(&by_author(), "author")
        .add_simple_field(&by_body(), "body")
}

/// The canonical sample set: two hellos and a goodbye.
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note::new(1, "hello", "world"),
        Note::new(2, "hello", "friend"),
        Note::new(3, "goodbye", "Mr. Chips"),
    ]
}

/// A memory store pre-loaded with [`sample_notes`].
pub async fn seeded_store() -> MemoryStore<Note> {
    let store = MemoryStore::new();
    for note in sample_notes() {
        store
            .update(note)
            .await
            .expect("memory update cannot fail");
    }
    store
}
