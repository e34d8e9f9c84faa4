//! # Satchel Testkit
//!
//! Testing utilities for Satchel.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a concrete [`Note`](fixtures::Note) document type, its
//!   indexes and index map, and canonically seeded stores
//! - **Server**: an in-process axum server speaking the Satchel wire
//!   protocol over a shared `MemoryStore`, for exercising the remote backend
//!   without external processes
//! - **Generators**: proptest strategies for notes and patches
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use satchel_testkit::{fixtures, server};
//!
//! # async fn example() {
//! let store = Arc::new(fixtures::seeded_store().await);
//! let srv = server::serve(store).await.unwrap();
//! println!("conforming server at {}", srv.base_url());
//! # }
//! ```

pub mod fixtures;
pub mod generators;
pub mod server;

pub use fixtures::{by_author, by_body, by_nothing, note_index_map, sample_notes, seeded_store, Note};
pub use server::{serve, TestServer};
