// Integration tests (native) for the `mystery-box` crate.
// These tests avoid wasm-specific functionality and exercise the storage and
// draw logic through the public API so they can run under `cargo test` on the
// host, against the same keys the browser build uses.

use mystery_box::store::{MemoryBacking, PaperStore};
use mystery_box::{HISTORY_STORAGE_KEY, POOL_STORAGE_KEY};

fn store() -> PaperStore<MemoryBacking> {
    PaperStore::new(MemoryBacking::new(), POOL_STORAGE_KEY, HISTORY_STORAGE_KEY)
}

// Existing deployments have papers stored under these exact keys; renaming
// them would silently orphan every box already in the wild.
#[test]
fn storage_keys_are_stable() {
    assert_eq!(POOL_STORAGE_KEY, "mystery_papers_data");
    assert_eq!(HISTORY_STORAGE_KEY, "mystery_papers_history");
}

#[test]
fn add_then_draw_round_trip() {
    let s = store();
    s.add("a trip to the moon").expect("non-blank content");
    assert_eq!(s.draw_random().as_deref(), Some("a trip to the moon"));
    assert!(s.list_active().is_empty());
    assert_eq!(s.list_history().len(), 1);
}

// The stored format is shared with earlier JS deployments: camelCase fields,
// epoch milliseconds, openedAt absent until a paper is drawn.
#[test]
fn reads_legacy_stored_papers() {
    let backing = MemoryBacking::new();
    backing.seed(
        POOL_STORAGE_KEY,
        r#"[{"id":"abc","content":"chocolate","createdAt":1700000000000}]"#,
    );
    let s = PaperStore::new(backing, POOL_STORAGE_KEY, HISTORY_STORAGE_KEY);
    let pool = s.list_active();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].content, "chocolate");
    assert_eq!(pool[0].opened_at, None);
}
