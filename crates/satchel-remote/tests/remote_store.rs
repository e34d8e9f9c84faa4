//! Integration tests for the HTTP backend against an in-process conforming
//! server, plus hostile-server cases for the response-mapping contract.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap as AxumHeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::header::{HeaderMap, HeaderValue};

use satchel_core::{Patch, StoreError};
use satchel_remote::{Client, RemoteStore};
use satchel_store::Store;
use satchel_testkit::fixtures::{by_author, by_nothing, note_index_map, seeded_store, Note};
use satchel_testkit::server;

async fn seeded_remote() -> (server::TestServer, Arc<satchel_store::MemoryStore<Note>>, RemoteStore<Note>) {
    let backing = Arc::new(seeded_store().await);
    let srv = server::serve(Arc::clone(&backing)).await.unwrap();
    let client = Client::connect(&srv.base_url()).unwrap();
    let store = client.store::<Note>("notes", note_index_map());
    (srv, backing, store)
}

async fn spawn_app(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn update_then_find_roundtrips() {
    let (_srv, _backing, store) = seeded_remote().await;

    let note = Note::new(4, "brand", "new");
    store.update(note.clone()).await.unwrap();

    let found = store.find(&4).await.unwrap();
    assert_eq!(found, note);
}

#[tokio::test]
async fn missing_key_maps_404_to_does_not_exist() {
    let (_srv, _backing, store) = seeded_remote().await;

    let err = store.find(&99).await.unwrap_err();
    assert!(matches!(err, StoreError::DoesNotExist(key) if key == "99"));
}

#[tokio::test]
async fn find_all_filters_in_order() {
    let (_srv, _backing, store) = seeded_remote().await;

    let hits = store.find_all(&by_author(), "hello").await.unwrap();
    assert_eq!(hits.iter().map(|n| n.uid).collect::<Vec<_>>(), vec![1, 2]);
}

#[tokio::test]
async fn unregistered_index_fails_before_any_request() {
    let backing = Arc::new(seeded_store().await);
    let srv = server::serve(Arc::clone(&backing)).await.unwrap();
    // Empty index map: the store is constructible, the defect surfaces at
    // first use.
    let client = Client::connect(&srv.base_url()).unwrap();
    let store = client.store::<Note>("notes", satchel_core::IndexMap::new());

    let err = store.find_all(&by_nothing(), "x").await.unwrap_err();
    assert!(matches!(err, StoreError::MissingIndex(name) if name == "by_nothing"));
}

#[tokio::test]
async fn remove_deletes_on_the_server() {
    let (_srv, backing, store) = seeded_remote().await;

    assert!(store.remove(&1).await.unwrap());
    assert!(backing.find(&1).await.unwrap_err().is_does_not_exist());
    assert!(store.find(&1).await.unwrap_err().is_does_not_exist());
}

#[tokio::test]
async fn remove_all_deletes_every_match() {
    let (_srv, backing, store) = seeded_remote().await;

    assert!(store.remove_all(&by_author(), "hello").await.unwrap());

    let left = backing.all().await.unwrap();
    assert_eq!(left.iter().map(|n| n.uid).collect::<Vec<_>>(), vec![3]);
}

#[tokio::test]
async fn bulk_merge_patches_one_field() {
    let (_srv, _backing, store) = seeded_remote().await;

    let mut fields = serde_json::Map::new();
    fields.insert("body".into(), serde_json::json!("pizza"));
    let count = store.bulk(Patch::new().merge(1, fields)).await.unwrap();
    assert_eq!(count, 1);

    let patched = store.find(&1).await.unwrap();
    assert_eq!(patched.body, "pizza");
    assert_eq!(patched.author, "hello");
}

#[tokio::test]
async fn unparsable_200_body_is_a_protocol_error() {
    let app = Router::new().route(
        "/notes/items/:key",
        get(|| async { (StatusCode::OK, "definitely not json") }),
    );
    let (base, _handle) = spawn_app(app).await;

    let client = Client::connect(&base).unwrap();
    let store = client.store::<Note>("notes", note_index_map());

    let err = store.find(&1).await.unwrap_err();
    assert!(matches!(err, StoreError::Protocol(_)));
}

#[tokio::test]
async fn other_statuses_carry_the_response() {
    let app = Router::new().route(
        "/notes/items/:key",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let (base, _handle) = spawn_app(app).await;

    let client = Client::connect(&base).unwrap();
    let store = client.store::<Note>("notes", note_index_map());

    let err = store.find(&1).await.unwrap_err();
    match err {
        StoreError::Remote(info) => {
            assert_eq!(info.status, 500);
            assert_eq!(info.status_text, "Internal Server Error");
            assert!(!info.headers.is_empty());
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn updated_headers_reach_existing_stores() {
    type Seen = Arc<Mutex<Vec<Option<String>>>>;

    async fn record(State(seen): State<Seen>, headers: AxumHeaderMap) -> impl IntoResponse {
        let session = headers
            .get("x-session")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        seen.lock().unwrap().push(session);
        Json(Note::new(1, "hello", "world"))
    }

    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/notes/items/:key", get(record))
        .with_state(Arc::clone(&seen));
    let (base, _handle) = spawn_app(app).await;

    let client = Client::connect(&base).unwrap();
    let store = client.store::<Note>("notes", note_index_map());

    store.find(&1).await.unwrap();

    let mut headers = HeaderMap::new();
    headers.insert("x-session", HeaderValue::from_static("opened"));
    client.update_headers(headers);

    store.find(&1).await.unwrap();

    let calls = seen.lock().unwrap();
    assert_eq!(*calls, vec![None, Some("opened".to_string())]);
}
