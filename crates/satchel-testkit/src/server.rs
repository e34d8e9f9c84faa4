//! In-process conforming server for remote-store tests.
//!
//! Implements the wire protocol over a shared [`MemoryStore`], bound to an
//! ephemeral port. Routes:
//!
//! - `GET    /:endpoint/items/:key` - 200 with the JSON document, or 404
//! - `PUT    /:endpoint/items/:key` - upsert from the JSON body, 204
//! - `DELETE /:endpoint/items/:key` - 204 whether or not the key existed
//! - `GET    /:endpoint/findAll/:index?field=value` - 200 with a JSON array
//! - `DELETE /:endpoint/removeAll/:index?field=value` - 204
//! - `POST   /:endpoint/bulk` - apply the JSON patch body, 204
//!
//! Index queries filter on the serialized field named in the query string,
//! which is exactly what an `IndexMap::add_simple_field` registration
//! promises the server will receive.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use satchel_core::{Patch, Record};
use satchel_store::{MemoryStore, Store};

/// Handle to a running test server. Aborts the serve task on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// The base URL remote clients should connect to.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The bound socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the wire protocol over `store` on an ephemeral local port.
pub async fn serve<T: Record>(store: Arc<MemoryStore<T>>) -> std::io::Result<TestServer> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    debug!(%addr, "test server listening");

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer { addr, handle })
}

/// Build the protocol router, for composing into a larger test app.
pub fn router<T: Record>(store: Arc<MemoryStore<T>>) -> Router {
    Router::new()
        .route(
            "/:endpoint/items/:key",
            get(find_item::<T>).put(put_item::<T>).delete(delete_item::<T>),
        )
        .route("/:endpoint/findAll/:index", get(find_matching::<T>))
        .route(
            "/:endpoint/removeAll/:index",
            axum::routing::delete(remove_matching::<T>),
        )
        .route("/:endpoint/bulk", post(apply_bulk::<T>))
        .with_state(store)
}

async fn lookup<T: Record>(store: &MemoryStore<T>, key: &str) -> Option<T> {
    let all = store.all().await.ok()?;
    all.into_iter().find(|doc| doc.key().to_string() == key)
}

async fn find_item<T: Record>(
    State(store): State<Arc<MemoryStore<T>>>,
    Path((_endpoint, key)): Path<(String, String)>,
) -> Response {
    match lookup(&store, &key).await {
        Some(doc) => (StatusCode::OK, Json(doc)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn put_item<T: Record>(
    State(store): State<Arc<MemoryStore<T>>>,
    Path((_endpoint, key)): Path<(String, String)>,
    Json(doc): Json<T>,
) -> Response {
    if doc.key().to_string() != key {
        return StatusCode::BAD_REQUEST.into_response();
    }
    match store.update(doc).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn delete_item<T: Record>(
    State(store): State<Arc<MemoryStore<T>>>,
    Path((_endpoint, key)): Path<(String, String)>,
) -> Response {
    if let Some(doc) = lookup(&store, &key).await {
        if store.remove(&doc.key()).await.is_err() {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn find_matching<T: Record>(
    State(store): State<Arc<MemoryStore<T>>>,
    Path((_endpoint, _index)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some((field, want)) = params.into_iter().next() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(all) = store.all().await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    let hits: Vec<T> = all
        .into_iter()
        .filter(|doc| field_matches(doc, &field, &want))
        .collect();
    (StatusCode::OK, Json(hits)).into_response()
}

async fn remove_matching<T: Record>(
    State(store): State<Arc<MemoryStore<T>>>,
    Path((_endpoint, _index)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some((field, want)) = params.into_iter().next() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(all) = store.all().await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    for doc in all.iter().filter(|doc| field_matches(*doc, &field, &want)) {
        if store.remove(&doc.key()).await.is_err() {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn apply_bulk<T: Record>(
    State(store): State<Arc<MemoryStore<T>>>,
    Path(_endpoint): Path<String>,
    Json(patch): Json<Patch<T>>,
) -> Response {
    match store.bulk(patch).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

/// Compare the serialized form of `field` against the query value, the way a
/// simple-field encoder renders it.
fn field_matches<T: Serialize>(doc: &T, field: &str, want: &str) -> bool {
    match serde_json::to_value(doc) {
        Ok(Value::Object(map)) => match map.get(field) {
            Some(Value::String(s)) => s == want,
            Some(other) => other.to_string() == want,
            None => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_notes, Note};

    #[test]
    fn field_matches_strings_and_numbers() {
        let note = Note::new(7, "hello", "world");
        assert!(field_matches(&note, "author", "hello"));
        assert!(field_matches(&note, "uid", "7"));
        assert!(!field_matches(&note, "author", "goodbye"));
        assert!(!field_matches(&note, "missing", "x"));
    }

    #[tokio::test]
    async fn server_binds_an_ephemeral_port() {
        let store = Arc::new(MemoryStore::<Note>::new());
        for note in sample_notes() {
            store.update(note).await.unwrap();
        }
        let server = serve(store).await.unwrap();
        assert_ne!(server.addr().port(), 0);
    }
}
