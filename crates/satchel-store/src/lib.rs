//! # Satchel Store
//!
//! The [`Store`] trait - the uniform six-operation contract every Satchel
//! backend implements - and the in-process [`MemoryStore`] backend.
//!
//! ## Overview
//!
//! A store is obtained once per element type and lives as long as the caller
//! holds it; it owns nothing that needs explicit release. The in-memory
//! backend here executes operations directly against its collection; the
//! HTTP-backed twin lives in `satchel-remote` and projects the same contract
//! onto network calls with the same error taxonomy.
//!
//! ## Usage
//!
//! ```
//! use satchel_core::{Index, Keyed};
//! use satchel_store::{MemoryStore, Store};
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
//! # async fn example() {
//! let store = MemoryStore::new();
//! store.update(Note { uid: 1, author: "hello".into() }).await.unwrap();
//!
//! let by_author: Index<Note> = Index::new("by_author", |v, n| n.author == v);
//! let hits = store.find_all(&by_author, "hello").await.unwrap();
//! assert_eq!(hits.len(), 1);
//! # }
//! ```

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::Store;

// The error taxonomy is shared across backends by design.
pub use satchel_core::{Result, StoreError};
