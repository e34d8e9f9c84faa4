//! Store trait: the uniform six-operation contract.
//!
//! Both backends implement this trait, so a caller can be written once and
//! handed either an in-memory collection or an HTTP proxy. All methods are
//! async for interface uniformity; the in-memory backend does its work
//! synchronously and returns already-resolved futures.
//!
//! Neither backend performs internal locking across operations: a caller that
//! mutates one store from several threads must serialize those calls itself.

use std::fmt;

use async_trait::async_trait;
use satchel_core::{Index, Patch, Record, Result};

/// The store trait: point lookup, predicate scan, upsert, delete,
/// predicate-delete, and bulk patch application.
///
/// # Errors
///
/// Every operation rejects with the shared [`StoreError`] taxonomy; in
/// particular a lookup miss is always `DoesNotExist`, whichever backend the
/// caller holds.
///
/// [`StoreError`]: satchel_core::StoreError
#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    /// Get the document for `key`.
    ///
    /// Fails with `DoesNotExist` if the key is absent - including on an
    /// empty store.
    async fn find(&self, key: &T::Key) -> Result<T>;

    /// The subset of the collection for which `index(value, item)` holds, in
    /// the collection's natural order.
    async fn find_all<V>(&self, index: &Index<T, V>, value: &V) -> Result<Vec<T>>
    where
        V: fmt::Display + Sync + ?Sized;

    /// Upsert by the document's extracted key. Never fails under normal
    /// operation.
    async fn update(&self, doc: T) -> Result<()>;

    /// Delete `key` if present. Returns whether a deletion occurred.
    async fn remove(&self, key: &T::Key) -> Result<bool>;

    /// Delete every document matching the index predicate. Returns whether
    /// any deletion occurred; zero matches is a non-error no-op.
    async fn remove_all<V>(&self, index: &Index<T, V>, value: &V) -> Result<bool>
    where
        V: fmt::Display + Sync + ?Sized;

    /// Apply a bulk patch to the whole collection in one step.
    ///
    /// Returns the number of entries the patch contained. Patch-engine
    /// failures propagate unmodified and leave the collection untouched.
    async fn bulk(&self, patch: Patch<T>) -> Result<usize>;
}
