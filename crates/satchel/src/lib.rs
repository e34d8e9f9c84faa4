//! # Satchel
//!
//! A uniform document-store abstraction with two interchangeable backends:
//! an in-process keyed collection and an HTTP-backed proxy to the same
//! contract.
//!
//! ## Overview
//!
//! A caller obtains a [`Store`] parameterized by an element type and its
//! key-extraction function ([`Keyed`]), then issues the same six operations
//! against it regardless of where the collection lives:
//!
//! - `find` / `find_all` - point lookup and named-index queries
//! - `update` / `remove` / `remove_all` - upsert and deletion
//! - `bulk` - atomic-per-key application of an ordered [`Patch`]
//!
//! Both backends raise the same error taxonomy: a lookup miss is
//! [`StoreError::DoesNotExist`] whether it came from a map probe or an HTTP
//! 404.
//!
//! ## Key Concepts
//!
//! - **Document**: an application value stored under a unique key.
//! - **Index**: a named predicate used to query by a non-key attribute. The
//!   name doubles as the wire-protocol key, so it must be stable.
//! - **Patch**: an ordered, per-key description of bulk mutations. Later
//!   entries for the same key supersede earlier effects.
//! - **Sortedness hint**: whether the collection's natural order currently
//!   matches its comparator; purely an optimization input for the patch
//!   engine.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use satchel::{Client, Index, IndexMap, Keyed, MemoryStore, Store};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Note {
//!     uid: u32,
//!     author: String,
//! }
//!
//! impl Keyed for Note {
//!     type Key = u32;
//!     fn key(&self) -> u32 {
//!         self.uid
//!     }
//! }
//!
//! let by_author: Index<Note> = Index::new("by_author", |v, n| n.author == v);
//!
//! # async fn example(by_author: Index<Note>) -> satchel::Result<()> {
//! // Local backend.
//! let local = MemoryStore::new();
//! local.update(Note { uid: 1, author: "hello".into() }).await?;
//!
//! // Remote backend: same contract, same errors.
//! let client = Client::connect("http://localhost:3000")?;
//! let remote = client.store::<Note>(
//!     "notes",
//!     IndexMap::new().add_simple_field(&by_author, "author"),
//! );
//! let hits = remote.find_all(&by_author, "hello").await?;
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

// Re-export component crates
pub use satchel_core as core;
pub use satchel_remote as remote;
pub use satchel_store as store;

// Re-export main types for convenience
pub use satchel_core::{
    apply_patch, ApplyHints, Comparator, Index, IndexMap, Keyed, Operation, Patch, PatchEntry,
    Record, ResponseInfo, Result, StoreError,
};
pub use satchel_remote::{Client, ClientConfig, RemoteStore, RequestOptions};
pub use satchel_store::{MemoryStore, Store};
