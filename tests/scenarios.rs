// End-to-end store scenarios (native): the sequences the admin panel and the
// game page actually perform, run against an in-memory backing.

use std::collections::HashMap;

use mystery_box::group::grouped;
use mystery_box::store::{MemoryBacking, PaperStore};

fn store() -> PaperStore<MemoryBacking> {
    PaperStore::new(MemoryBacking::new(), "pool", "history")
}

// Admin adds a prize with quantity N by looping add(); the grouped view must
// collapse those back into one row with count N.
#[test]
fn quantity_add_shows_as_one_group() {
    let s = store();
    for _ in 0..5 {
        s.add("lipstick");
    }
    s.add("perfume");

    let groups = s.grouped_active();
    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].content.as_str(), groups[0].count), ("lipstick", 5));
    assert_eq!((groups[1].content.as_str(), groups[1].count), ("perfume", 1));
    assert_eq!(s.list_active().len(), 6);
}

// Drain a weighted pool completely: every stored paper comes out exactly once,
// so the per-content tallies match what was put in.
#[test]
fn drained_pool_preserves_weighting_totals() {
    let s = store();
    for _ in 0..3 {
        s.add("A");
    }
    for _ in 0..2 {
        s.add("B");
    }

    let mut tally: HashMap<String, usize> = HashMap::new();
    while let Some(content) = s.draw_random() {
        *tally.entry(content).or_default() += 1;
    }
    assert_eq!(tally.get("A"), Some(&3));
    assert_eq!(tally.get("B"), Some(&2));
    assert_eq!(s.list_history().len(), 5);
    assert!(s.list_active().is_empty());
}

// History keeps draw order; the admin page renders it reversed so the latest
// draw sits on top.
#[test]
fn history_accumulates_in_draw_order() {
    let s = store();
    s.add("only one");
    s.add("only one");

    let first = s.draw_random().unwrap();
    let second = s.draw_random().unwrap();
    let history = s.list_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, first);
    assert_eq!(history[1].content, second);
    assert!(history[0].opened_at.unwrap() <= history[1].opened_at.unwrap());
}

// Editing a group swaps content and count in one step without disturbing the
// rest of the pool or the history.
#[test]
fn edit_group_flow() {
    let s = store();
    // Draw while the pool holds a single paper so history is deterministic.
    s.add("warmup");
    s.draw_random();
    for _ in 0..4 {
        s.add("old text");
    }
    s.add("bystander");

    s.replace_group("old text", "new text", 2);
    let groups = s.grouped_active();
    assert!(groups.iter().all(|g| g.content != "old text"));
    let new_group = groups.iter().find(|g| g.content == "new text").unwrap();
    assert_eq!(new_group.count, 2);
    assert!(groups.iter().any(|g| g.content == "bystander"));
    assert_eq!(s.list_history().len(), 1);
}

// Two-click delete ends in delete_group(); it must only ever touch the pool.
#[test]
fn delete_group_never_touches_history() {
    let s = store();
    s.add("target");
    s.add("target");
    s.add("safe");
    s.draw_random();
    let history_before = s.list_history();

    s.delete_group("target");
    assert!(s.grouped_active().iter().all(|g| g.content != "target"));
    assert_eq!(s.list_history(), history_before);
}

// Clearing history then drawing again starts a fresh log.
#[test]
fn clear_then_redraw() {
    let s = store();
    s.add("x");
    s.add("y");
    s.draw_random();
    s.clear_history();
    assert!(s.list_history().is_empty());

    s.draw_random();
    assert_eq!(s.list_history().len(), 1);
}

// The standalone grouping helper drives the admin list directly.
#[test]
fn grouped_preserves_first_seen_order() {
    let s = store();
    s.add("b");
    s.add("a");
    s.add("b");
    let groups = grouped(&s.list_active());
    let order: Vec<&str> = groups.iter().map(|g| g.content.as_str()).collect();
    assert_eq!(order, ["b", "a"]);
}
