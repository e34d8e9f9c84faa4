//! Proptest strategies for documents and patches.

use proptest::collection::btree_map;
use proptest::prelude::*;
use serde_json::json;

use satchel_core::{Operation, Patch, PatchEntry};

use crate::fixtures::Note;

/// A small author vocabulary keeps index queries interesting.
pub fn arb_author() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("hello".to_string()),
        Just("goodbye".to_string()),
        Just("aloha".to_string()),
    ]
}

/// An arbitrary note with a bounded uid space.
pub fn arb_note() -> impl Strategy<Value = Note> {
    (0u32..64, arb_author(), "[a-z]{0,12}").prop_map(|(uid, author, body)| Note {
        uid,
        author,
        body,
    })
}

/// A collection of notes with unique uids.
pub fn arb_notes(max: usize) -> impl Strategy<Value = Vec<Note>> {
    btree_map(0u32..64, (arb_author(), "[a-z]{0,12}"), 0..max).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(uid, (author, body))| Note { uid, author, body })
            .collect()
    })
}

/// An arbitrary patch operation for the note's uid space.
pub fn arb_operation() -> impl Strategy<Value = (u32, Operation<Note>)> {
    (0u32..64).prop_flat_map(|uid| {
        prop_oneof![
            arb_author().prop_map(move |author| {
                (
                    uid,
                    Operation::Replace(Note {
                        uid,
                        author,
                        body: "replaced".to_string(),
                    }),
                )
            }),
            "[a-z]{0,8}".prop_map(move |body| {
                let mut fields = serde_json::Map::new();
                fields.insert("body".to_string(), json!(body));
                (uid, Operation::Merge(fields))
            }),
            Just((uid, Operation::Delete)),
        ]
    })
}

/// An arbitrary ordered patch.
pub fn arb_patch(max_entries: usize) -> impl Strategy<Value = Patch<Note>> {
    proptest::collection::vec(arb_operation(), 0..max_entries).prop_map(|ops| {
        let mut patch = Patch::new();
        for (key, op) in ops {
            patch.push(PatchEntry { key, op });
        }
        patch
    })
}

/// A patch containing only replace operations.
pub fn arb_replace_patch(max_entries: usize) -> impl Strategy<Value = Patch<Note>> {
    proptest::collection::vec(arb_note(), 0..max_entries).prop_map(|notes| {
        let mut patch = Patch::new();
        for note in notes {
            patch = patch.replace(note);
        }
        patch
    })
}
