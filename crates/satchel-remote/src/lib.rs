//! # Satchel Remote
//!
//! The HTTP-backed store backend: a [`Client`] owning connection-level
//! configuration and the [`RemoteStore`] it builds, which projects the
//! uniform [`Store`](satchel_store::Store) contract onto JSON-over-HTTP
//! calls.
//!
//! ## Overview
//!
//! A remote store is indistinguishable from the in-memory one at the call
//! site: same six operations, same error taxonomy. A 404 surfaces as
//! `DoesNotExist` exactly like a local lookup miss; a 200 whose body does
//! not parse is a `Protocol` error; any other non-2xx carries the response
//! for inspection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use satchel_core::{Index, IndexMap, Keyed};
//! use satchel_remote::Client;
//! use satchel_store::Store;
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
//! # async fn example() -> satchel_core::Result<()> {
//! let by_author: Index<Note> = Index::new("by_author", |v, n| n.author == v);
//! let index_map = IndexMap::new().add_simple_field(&by_author, "author");
//!
//! let client = Client::connect("http://localhost:3000")?;
//! let notes = client.store::<Note>("notes", index_map);
//!
//! let hits = notes.find_all(&by_author, "hello").await?;
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod response;
pub mod store;

pub use client::{Client, ClientConfig, RequestOptions};
pub use store::RemoteStore;

pub use satchel_core::{ResponseInfo, Result, StoreError};
