//! The draw: pick one active paper uniformly at random, migrate it from the
//! pool to history with an opened timestamp, and hand back its content.
//!
//! Every remaining paper is equally likely regardless of content, so a prize
//! added with quantity 5 is five times as likely to come up as one added
//! once. That quantity-as-probability weighting is the whole pricing model of
//! the box.

use crate::paper;
use crate::store::{PaperStore, StorageBacking};

impl<B: StorageBacking> PaperStore<B> {
    /// Draw one paper. `None` signals an exhausted pool and performs no
    /// mutation; the caller renders that as its own outcome, distinct from
    /// any storage failure. Otherwise the winner moves from pool to history
    /// (pool −1, history +1, nothing else touched) and its stored content is
    /// returned exactly as stored, without re-trimming.
    pub fn draw_random(&self) -> Option<String> {
        let mut pool = self.list_active();
        if pool.is_empty() {
            return None;
        }
        let idx = uniform_index(pool.len());
        let mut winner = pool.remove(idx);
        winner.opened_at = Some(paper::now_millis());
        let content = winner.content.clone();

        let mut history = self.list_history();
        history.push(winner);
        self.save_history(&history);
        self.save_pool(&pool);
        Some(content)
    }
}

/// Uniform index in `[0, len)`, re-drawn fresh on every call. Rejection
/// sampling keeps the result unbiased for every pool size, not just powers of
/// two.
pub fn uniform_index(len: usize) -> usize {
    debug_assert!(len > 0);
    let bound = len as u64;
    let zone = (u64::MAX / bound) * bound;
    let mut buf = [0u8; 8];
    for _ in 0..64 {
        if getrandom::getrandom(&mut buf).is_err() {
            break;
        }
        let v = u64::from_le_bytes(buf);
        if v < zone {
            return (v % bound) as usize;
        }
    }
    // Entropy source unavailable; degrade to a clock-seeded congruential
    // step so the game keeps working.
    (paper::now_millis() as usize)
        .wrapping_mul(1664525)
        .wrapping_add(1013904223)
        % len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBacking;

    fn store() -> PaperStore<MemoryBacking> {
        PaperStore::new(MemoryBacking::new(), "test_pool", "test_history")
    }

    #[test]
    fn draw_on_empty_pool_is_a_pure_none() {
        let s = store();
        assert_eq!(s.draw_random(), None);
        assert!(s.list_active().is_empty());
        assert!(s.list_history().is_empty());
    }

    #[test]
    fn draw_migrates_exactly_one_paper() {
        let s = store();
        s.add("a");
        s.add("b");
        s.add("c");
        let before = s.list_active();
        let start = paper::now_millis();

        let content = s.draw_random().expect("pool not empty");
        let pool = s.list_active();
        let history = s.list_history();
        assert_eq!(pool.len(), before.len() - 1);
        assert_eq!(history.len(), 1);

        let drawn = &history[0];
        assert_eq!(drawn.content, content);
        assert!(drawn.opened_at.expect("stamped") >= start);
        // The drawn id left the pool; everything else stayed.
        assert!(pool.iter().all(|p| p.id != drawn.id));
        assert!(before.iter().any(|p| p.id == drawn.id));
        for p in &pool {
            assert!(before.iter().any(|b| b.id == p.id && b.content == p.content));
        }
    }

    #[test]
    fn draw_returns_stored_content_untrimmed() {
        let s = store();
        // Bypass add() trimming by writing the pool directly, as corrupt or
        // hand-edited storage could.
        let p = crate::paper::Paper {
            id: "raw".into(),
            content: "  spaced  ".into(),
            created_at: 1,
            opened_at: None,
        };
        s.save_pool(std::slice::from_ref(&p));
        assert_eq!(s.draw_random().as_deref(), Some("  spaced  "));
    }

    #[test]
    fn pool_drains_then_signals_exhaustion() {
        let s = store();
        for _ in 0..3 {
            s.add("A");
        }
        for _ in 0..2 {
            s.add("B");
        }
        for _ in 0..5 {
            let c = s.draw_random().expect("five papers to draw");
            assert!(c == "A" || c == "B");
        }
        assert_eq!(s.draw_random(), None);
        assert_eq!(s.list_history().len(), 5);
    }

    #[test]
    fn uniform_index_stays_in_bounds() {
        for len in 1..=17 {
            for _ in 0..200 {
                assert!(uniform_index(len) < len);
            }
        }
    }

    #[test]
    fn uniform_index_reaches_every_slot() {
        let mut seen = [false; 5];
        // 500 draws missing one of 5 slots has probability ~5 * 0.8^500.
        for _ in 0..500 {
            seen[uniform_index(5)] = true;
        }
        assert!(seen.iter().all(|&s| s), "seen: {seen:?}");
    }
}
