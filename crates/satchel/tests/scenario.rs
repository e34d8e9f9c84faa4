//! The end-to-end scenario, run identically against both backends: seed
//! three notes, query by author, merge-patch one field, and check the error
//! taxonomy stays uniform.

use std::sync::Arc;

use satchel::{Patch, Store, StoreError};
use satchel_testkit::fixtures::{by_author, sample_notes, Note};
use satchel_testkit::{note_index_map, server};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn run_scenario<S: Store<Note>>(store: &S) {
    for note in sample_notes() {
        store.update(note).await.unwrap();
    }

    // Named-index query returns the two hellos, in natural order.
    let hellos = store.find_all(&by_author(), "hello").await.unwrap();
    assert_eq!(
        hellos,
        vec![
            Note::new(1, "hello", "world"),
            Note::new(2, "hello", "friend"),
        ]
    );

    // Merge-patch one field of one document.
    let mut fields = serde_json::Map::new();
    fields.insert("body".into(), serde_json::json!("pizza"));
    let count = store.bulk(Patch::new().merge(1, fields)).await.unwrap();
    assert_eq!(count, 1);

    let patched = store.find(&1).await.unwrap();
    assert_eq!(patched.body, "pizza");
    assert_eq!(patched.author, "hello");

    // A miss is DoesNotExist on every backend, never another kind.
    let err = store.find(&99).await.unwrap_err();
    assert!(matches!(err, StoreError::DoesNotExist(key) if key == "99"));
}

#[tokio::test]
async fn scenario_on_memory_store() {
    init_tracing();
    let store = satchel::MemoryStore::new();
    run_scenario(&store).await;
}

#[tokio::test]
async fn scenario_on_remote_store() {
    init_tracing();
    let backing = Arc::new(satchel::MemoryStore::<Note>::new());
    let srv = server::serve(Arc::clone(&backing)).await.unwrap();

    let client = satchel::Client::connect(&srv.base_url()).unwrap();
    let store = client.store::<Note>("notes", note_index_map());

    run_scenario(&store).await;
}
