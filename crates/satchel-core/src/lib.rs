//! # Satchel Core
//!
//! Core primitives for the Satchel document store: the contracts a document
//! type must satisfy, named indexes and their wire encoders, bulk patches and
//! the patch-application engine, and the error taxonomy shared by every
//! backend.
//!
//! ## Overview
//!
//! Satchel presents one store contract with two interchangeable backends: an
//! in-process keyed collection and an HTTP-backed proxy. This crate holds
//! everything both backends agree on, so neither depends on the other.
//!
//! ## Key Types
//!
//! - [`Keyed`] / [`Record`] - what a document type must provide
//! - [`Index`] - a named query predicate
//! - [`IndexMap`] - index-name to query-encoder registry for remote stores
//! - [`Patch`] / [`Operation`] - ordered bulk-change descriptions
//! - [`apply_patch`] - the patch engine
//! - [`StoreError`] - the uniform error taxonomy
//!
//! ## Usage
//!
//! ```
//! use satchel_core::{apply_patch, ApplyHints, Comparator, Keyed, Patch};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Note {
//!     uid: u32,
//!     body: String,
//! }
//!
//! impl Keyed for Note {
//!     type Key = u32;
//!     fn key(&self) -> u32 {
//!         self.uid
//!     }
//! }
//!
//! let snapshot = vec![Note { uid: 2, body: "b".into() }, Note { uid: 1, body: "a".into() }];
//! let patch = Patch::new().delete(2);
//! let next = apply_patch(snapshot, &patch, &Comparator::by_key(), ApplyHints::default()).unwrap();
//! assert_eq!(next.len(), 1);
//! ```

pub mod error;
pub mod index;
pub mod patch;
pub mod types;

pub use error::{ResponseInfo, Result, StoreError};
pub use index::{Index, IndexMap};
pub use patch::{apply_patch, ApplyHints, Comparator, Operation, Patch, PatchEntry};
pub use types::{DocumentKey, Keyed, Record};
