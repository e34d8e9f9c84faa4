//! Property tests over the patch engine and the store contract, using the
//! testkit generators.

use proptest::prelude::*;

use satchel::{apply_patch, ApplyHints, Comparator, Keyed, Patch, Store};
use satchel_testkit::fixtures::{by_author, Note};
use satchel_testkit::generators::{arb_notes, arb_patch, arb_replace_patch};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build runtime")
        .block_on(future)
}

proptest! {
    /// Applying a replace-only patch twice yields the same state as once.
    #[test]
    fn replace_only_patches_are_idempotent(
        snapshot in arb_notes(16),
        patch in arb_replace_patch(8),
    ) {
        let cmp = Comparator::by_key();
        let once = apply_patch(snapshot, &patch, &cmp, ApplyHints::default()).unwrap();
        let twice = apply_patch(once.clone(), &patch, &cmp, ApplyHints { sorted: true }).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// The engine's output is in comparator order no matter what the hint
    /// claimed about the input.
    #[test]
    fn output_is_sorted_even_with_stale_hints(
        snapshot in arb_notes(16),
        patch in arb_patch(12),
        claim_sorted in any::<bool>(),
    ) {
        let cmp = Comparator::by_key();
        let shuffled: Vec<Note> = snapshot.into_iter().rev().collect();
        let next = apply_patch(shuffled, &patch, &cmp, ApplyHints { sorted: claim_sorted }).unwrap();

        let keys: Vec<u32> = next.iter().map(|n| n.key()).collect();
        let mut sorted_keys = keys.clone();
        sorted_keys.sort_unstable();
        prop_assert_eq!(keys, sorted_keys);
    }

    /// Keys stay unique through any patch.
    #[test]
    fn patches_never_duplicate_keys(
        snapshot in arb_notes(16),
        patch in arb_patch(12),
    ) {
        let cmp = Comparator::by_key();
        let next = apply_patch(snapshot, &patch, &cmp, ApplyHints::default()).unwrap();

        let mut keys: Vec<u32> = next.iter().map(|n| n.key()).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
    }

    /// find_all is exactly the ordered filter of the collection, whatever
    /// sequence of updates and bulks produced it.
    #[test]
    fn find_all_matches_naive_filter(
        seed in arb_notes(12),
        patch in arb_patch(8),
    ) {
        block_on(async {
            let store = satchel::MemoryStore::new();
            for note in seed {
                store.update(note).await.unwrap();
            }
            store.bulk(patch).await.unwrap();

            let all = store.all().await.unwrap();
            let naive: Vec<Note> = all
                .iter()
                .filter(|n| by_author().matches("hello", n))
                .cloned()
                .collect();
            let queried = store.find_all(&by_author(), "hello").await.unwrap();
            assert_eq!(queried, naive);
        });
    }

    /// After any interleaving of new-key updates and a bulk, a further bulk
    /// still leaves the collection in canonical order.
    #[test]
    fn bulk_after_updates_restores_canonical_order(
        seed in arb_notes(12),
        late in arb_notes(6),
        patch in arb_patch(8),
    ) {
        block_on(async {
            let store = satchel::MemoryStore::new();
            for note in seed {
                store.update(note).await.unwrap();
            }
            store.bulk(Patch::new()).await.unwrap();
            for note in late {
                store.update(note).await.unwrap();
            }
            store.bulk(patch).await.unwrap();

            let keys: Vec<u32> = store
                .all()
                .await
                .unwrap()
                .iter()
                .map(|n| n.key())
                .collect();
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            assert_eq!(keys, sorted);
            assert!(store.sorted());
        });
    }
}
