//! Durable paper storage over a key-value substrate.
//!
//! Two independent collections live under two injected keys: the active pool
//! and the draw history, each a JSON array of papers. Every mutation writes
//! the full resulting collection back, so a subsequent read from any caller
//! observes it immediately. Reads fail soft: missing or malformed stored JSON
//! decodes to an empty collection and is reported on the console, never
//! raised to the caller.
//!
//! The store assumes a single tab / single thread of control. Two tabs
//! mutating the same keys can interleave read-modify-write cycles and lose
//! updates; nothing here coordinates that.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::group::{self, PaperGroup};
use crate::paper::Paper;

/// Key-value substrate the store persists into. The browser build uses
/// `window.localStorage`; native code and tests use an in-memory map.
pub trait StorageBacking {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory backing for native use and tests.
#[derive(Default)]
pub struct MemoryBacking {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBacking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value under a key, e.g. to simulate corrupt stored data.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBacking for MemoryBacking {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage` backing.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Grab local storage from the window. `None` when the browser denies
    /// access (e.g. storage disabled by policy).
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl StorageBacking for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        // Quota exhaustion is the only realistic failure; the pool is tens of
        // entries, so drop the error rather than crash the page.
        self.storage.set_item(key, value).ok();
    }

    fn remove(&self, key: &str) {
        self.storage.remove_item(key).ok();
    }
}

/// Paper store: CRUD over the active pool and the draw history. Constructed
/// once with its two storage keys and passed by reference to the pages; there
/// is no ambient global store.
pub struct PaperStore<B: StorageBacking> {
    backing: B,
    pool_key: String,
    history_key: String,
}

impl<B: StorageBacking> PaperStore<B> {
    pub fn new(backing: B, pool_key: &str, history_key: &str) -> Self {
        Self {
            backing,
            pool_key: pool_key.to_string(),
            history_key: history_key.to_string(),
        }
    }

    /// Current active pool; empty when nothing is stored or the stored data
    /// is unreadable.
    pub fn list_active(&self) -> Vec<Paper> {
        self.read_papers(&self.pool_key)
    }

    /// Draw history in draw order; same fail-soft contract as `list_active`.
    pub fn list_history(&self) -> Vec<Paper> {
        self.read_papers(&self.history_key)
    }

    /// Append one fresh paper. Blank (empty-after-trim) content is rejected
    /// with `None` instead of creating an unwinnable empty prize.
    pub fn add(&self, content: &str) -> Option<Paper> {
        if content.trim().is_empty() {
            return None;
        }
        let paper = Paper::fresh(content);
        let mut pool = self.list_active();
        pool.push(paper.clone());
        self.save_pool(&pool);
        Some(paper)
    }

    /// Re-content / re-quantify a whole group: every active paper matching
    /// `old_content` (trimmed) is dropped, then `new_count` fresh papers with
    /// `new_content` are appended. The group's old ids are not preserved;
    /// papers outside the group are untouched.
    pub fn replace_group(&self, old_content: &str, new_content: &str, new_count: usize) {
        let old = old_content.trim();
        let mut pool: Vec<Paper> = self
            .list_active()
            .into_iter()
            .filter(|p| !p.matches_content(old))
            .collect();
        for _ in 0..new_count {
            pool.push(Paper::fresh(new_content));
        }
        self.save_pool(&pool);
    }

    /// Drop every active paper whose trimmed content matches. No-op when
    /// nothing matches.
    pub fn delete_group(&self, content: &str) {
        let target = content.trim();
        let pool: Vec<Paper> = self
            .list_active()
            .into_iter()
            .filter(|p| !p.matches_content(target))
            .collect();
        self.save_pool(&pool);
    }

    /// Discard the whole draw history. Irreversible; the active pool is not
    /// touched.
    pub fn clear_history(&self) {
        self.backing.remove(&self.history_key);
    }

    /// Grouped view of the active pool for the admin list.
    pub fn grouped_active(&self) -> Vec<PaperGroup> {
        group::grouped(&self.list_active())
    }

    pub(crate) fn save_pool(&self, papers: &[Paper]) {
        self.write_papers(&self.pool_key, papers);
    }

    pub(crate) fn save_history(&self, papers: &[Paper]) {
        self.write_papers(&self.history_key, papers);
    }

    fn read_papers(&self, key: &str) -> Vec<Paper> {
        let Some(raw) = self.backing.read(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(papers) => papers,
            Err(err) => {
                warn(&format!("discarding unreadable paper data under '{key}': {err}"));
                Vec::new()
            }
        }
    }

    fn write_papers(&self, key: &str, papers: &[Paper]) {
        match serde_json::to_string(papers) {
            Ok(json) => self.backing.write(key, &json),
            Err(err) => warn(&format!("failed to encode papers for '{key}': {err}")),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn warn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(msg: &str) {
    eprintln!("{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PaperStore<MemoryBacking> {
        PaperStore::new(MemoryBacking::new(), "test_pool", "test_history")
    }

    #[test]
    fn empty_store_lists_nothing() {
        let s = store();
        assert!(s.list_active().is_empty());
        assert!(s.list_history().is_empty());
    }

    #[test]
    fn add_trims_and_appends() {
        let s = store();
        let p = s.add("  candy  ").expect("non-blank add succeeds");
        assert_eq!(p.content, "candy");
        let pool = s.list_active();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0], p);
    }

    #[test]
    fn add_rejects_blank_content() {
        let s = store();
        assert!(s.add("").is_none());
        assert!(s.add("   \n\t").is_none());
        assert!(s.list_active().is_empty());
    }

    #[test]
    fn corrupt_pool_data_reads_as_empty() {
        let backing = MemoryBacking::new();
        backing.seed("test_pool", "{not json");
        backing.seed("test_history", "[1, 2, 3]");
        let s = PaperStore::new(backing, "test_pool", "test_history");
        assert!(s.list_active().is_empty());
        assert!(s.list_history().is_empty());
    }

    #[test]
    fn corrupt_pool_recovers_on_next_write() {
        let backing = MemoryBacking::new();
        backing.seed("test_pool", "garbage");
        let s = PaperStore::new(backing, "test_pool", "test_history");
        s.add("fresh start");
        assert_eq!(s.list_active().len(), 1);
    }

    #[test]
    fn delete_group_removes_all_and_only_matches() {
        let s = store();
        s.add("keep");
        s.add("drop");
        s.add(" drop ");
        let keep_id = s.list_active()[0].id.clone();

        s.delete_group("drop");
        let pool = s.list_active();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, keep_id);

        // Unmatched delete is a no-op.
        s.delete_group("missing");
        assert_eq!(s.list_active().len(), 1);
    }

    #[test]
    fn replace_group_requantifies_with_fresh_ids() {
        let s = store();
        s.add("foo");
        s.add("foo");
        s.add("other");
        let other_id = s
            .list_active()
            .iter()
            .find(|p| p.content == "other")
            .unwrap()
            .id
            .clone();
        let old_foo_ids: Vec<String> = s
            .list_active()
            .iter()
            .filter(|p| p.content == "foo")
            .map(|p| p.id.clone())
            .collect();

        s.replace_group("foo", "bar", 3);
        let pool = s.list_active();
        assert_eq!(pool.len(), 4);
        assert!(pool.iter().all(|p| p.content != "foo"));
        let bars: Vec<&Paper> = pool.iter().filter(|p| p.content == "bar").collect();
        assert_eq!(bars.len(), 3);
        for bar in &bars {
            assert!(!old_foo_ids.contains(&bar.id), "ids must be fresh");
        }
        // Unrelated paper untouched, same id and content.
        let other = pool.iter().find(|p| p.content == "other").unwrap();
        assert_eq!(other.id, other_id);
    }

    #[test]
    fn replace_group_to_zero_empties_the_group() {
        let s = store();
        s.add("foo");
        s.add("foo");
        s.replace_group("foo", "foo", 0);
        assert!(s.list_active().is_empty());
    }

    #[test]
    fn clear_history_leaves_pool_alone() {
        let s = store();
        s.add("a");
        s.draw_random();
        assert_eq!(s.list_history().len(), 1);
        s.add("b");
        s.clear_history();
        assert!(s.list_history().is_empty());
        assert_eq!(s.list_active().len(), 1);
    }

    #[test]
    fn stored_json_round_trips_through_the_backing() {
        let backing = MemoryBacking::new();
        let s = PaperStore::new(backing, "test_pool", "test_history");
        s.add("payload");
        let raw = s.backing.read("test_pool").expect("pool persisted");
        assert!(raw.starts_with('['), "pool is a JSON array: {raw}");
        assert!(raw.contains("\"createdAt\""), "{raw}");
    }
}
