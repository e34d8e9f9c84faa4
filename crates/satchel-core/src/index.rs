//! Named indexes and their wire-level query encoders.
//!
//! An [`Index`] is an explicit `{name, predicate}` record rather than a bare
//! function: the name is a cross-process protocol key (the remote backend
//! puts it in the URL path), so it must be stable and collision-free without
//! relying on reflection.

use std::collections::HashMap;
use std::fmt;

use url::form_urlencoded;

use crate::error::{Result, StoreError};

/// A named binary predicate `(value, item) -> bool`.
///
/// Used both to filter a local collection and to tell a remote call which
/// query parameter to use. Two indexes must not share a name unless they are
/// semantically identical.
///
/// The value type `V` defaults to `str` so string-valued indexes read
/// naturally:
///
/// ```
/// use satchel_core::Index;
///
/// struct Note { author: String }
///
/// let by_author: Index<Note> = Index::new("by_author", |v, n| n.author == v);
/// assert_eq!(by_author.name(), "by_author");
/// ```
pub struct Index<T, V: ?Sized = str> {
    name: &'static str,
    predicate: fn(&V, &T) -> bool,
}

impl<T, V: ?Sized> Index<T, V> {
    /// Create an index from a name and a pure predicate.
    pub fn new(name: &'static str, predicate: fn(&V, &T) -> bool) -> Self {
        Self { name, predicate }
    }

    /// The protocol name of this index.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the predicate against one item.
    pub fn matches(&self, value: &V, item: &T) -> bool {
        (self.predicate)(value, item)
    }
}

// fn pointers are Copy regardless of T and V, so a derive's extra bounds
// would be wrong here.
impl<T, V: ?Sized> Clone for Index<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V: ?Sized> Copy for Index<T, V> {}

impl<T, V: ?Sized> fmt::Debug for Index<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index").field("name", &self.name).finish()
    }
}

/// Registry mapping an index's name to its query-string encoder.
///
/// Built once per remote store. Every index ever passed to `find_all` or
/// `remove_all` on that store must be registered here, or the call fails with
/// [`StoreError::MissingIndex`] at first use.
#[derive(Debug, Clone, Default)]
pub struct IndexMap {
    fields: HashMap<&'static str, String>,
}

impl IndexMap {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single-field encoder for `index`: the query value is
    /// rendered as one percent-encoded `field=value` parameter.
    ///
    /// Returns `self` so registrations chain:
    ///
    /// ```
    /// use satchel_core::{Index, IndexMap};
    ///
    /// struct Note { author: String, body: String }
    ///
    /// let by_author: Index<Note> = Index::new("by_author", |v, n| n.author == v);
    /// let by_body: Index<Note> = Index::new("by_body", |v, n| n.body == v);
    ///
    /// let map = IndexMap::new()
    ///     .add_simple_field(&by_author, "author")
    ///     .add_simple_field(&by_body, "body");
    ///
    /// assert_eq!(map.encode("by_author", "hello world").unwrap(), "author=hello+world");
    /// ```
    pub fn add_simple_field<T, V: ?Sized>(mut self, index: &Index<T, V>, field: &str) -> Self {
        self.fields.insert(index.name(), field.to_string());
        self
    }

    /// Encode a query value into a wire-level query-string fragment for the
    /// named index.
    pub fn encode<V>(&self, index_name: &str, value: &V) -> Result<String>
    where
        V: fmt::Display + ?Sized,
    {
        let field = self
            .fields
            .get(index_name)
            .ok_or_else(|| StoreError::MissingIndex(index_name.to_string()))?;

        let fragment = form_urlencoded::Serializer::new(String::new())
            .append_pair(field, &format!("{value}"))
            .finish();
        Ok(fragment)
    }

    /// Whether the named index has a registered encoder.
    pub fn contains(&self, index_name: &str) -> bool {
        self.fields.contains_key(index_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        color: String,
        size: u32,
    }

    fn by_color() -> Index<Item> {
        Index::new("by_color", |v, item| item.color == v)
    }

    fn by_size() -> Index<Item, u32> {
        Index::new("by_size", |v, item| item.size == *v)
    }

    #[test]
    fn predicate_filters() {
        let idx = by_color();
        let red = Item {
            color: "red".into(),
            size: 1,
        };
        assert!(idx.matches("red", &red));
        assert!(!idx.matches("blue", &red));
    }

    #[test]
    fn encode_simple_field() {
        let map = IndexMap::new().add_simple_field(&by_color(), "color");
        assert_eq!(map.encode("by_color", "red").unwrap(), "color=red");
    }

    #[test]
    fn encode_percent_encodes() {
        let map = IndexMap::new().add_simple_field(&by_color(), "color");
        assert_eq!(
            map.encode("by_color", "Mr. Chips").unwrap(),
            "color=Mr.+Chips"
        );
    }

    #[test]
    fn encode_numeric_value() {
        let map = IndexMap::new().add_simple_field(&by_size(), "size");
        assert_eq!(map.encode("by_size", &42u32).unwrap(), "size=42");
    }

    #[test]
    fn unregistered_index_is_a_config_error() {
        let map = IndexMap::new();
        let err = map.encode("by_color", "red").unwrap_err();
        assert!(matches!(err, StoreError::MissingIndex(name) if name == "by_color"));
    }
}
