//! Contracts a document type must satisfy to live in a store.
//!
//! A store is polymorphic over its element type `T`; all it asks of `T` is a
//! key-extraction function, expressed here as the [`Keyed`] trait. Keys are
//! totally ordered, hashable values (strings or numbers in practice) that can
//! be rendered into a URL path segment.

use std::fmt;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Bound alias for the key type extracted from a document.
///
/// `Display` is required so a key can travel in a URL path; the serde bounds
/// let it travel in a bulk patch body.
pub trait DocumentKey:
    Ord
    + Hash
    + Eq
    + Clone
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

impl<K> DocumentKey for K where
    K: Ord
        + Hash
        + Eq
        + Clone
        + fmt::Debug
        + fmt::Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

/// A document with an extractable key.
///
/// The store never mutates a document's key after insertion; two documents
/// with equal keys occupy the same slot.
pub trait Keyed {
    /// The key type. Unique per document within one store.
    type Key: DocumentKey;

    /// Extract this document's key.
    fn key(&self) -> Self::Key;
}

/// The full element-type contract shared by both backends.
///
/// The in-memory backend stores values directly and only needs `Clone`; the
/// serde bounds exist for the remote wire format and for the merge operation
/// of the patch engine. They are folded into one alias so a caller can swap
/// backends without changing bounds.
pub trait Record: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> Record for T where T: Keyed + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}
