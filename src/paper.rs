//! Paper data model: one unit of prize content with identity and lifecycle
//! timestamps.
//!
//! The serialized shape is the one the game has always kept in local storage:
//! `{ id, content, createdAt, openedAt? }` with epoch-millisecond timestamps.
//! `openedAt` exists if and only if the paper has been drawn into history.

use serde::{Deserialize, Serialize};

/// A single prize paper. Lives in the active pool until drawn, then moves to
/// history with `opened_at` stamped. `id` stays stable across that move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<u64>,
}

impl Paper {
    /// Fresh active paper: trimmed content, new id, creation timestamp.
    pub fn fresh(content: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.trim().to_string(),
            created_at: now_millis(),
            opened_at: None,
        }
    }

    /// Group membership is defined on trimmed content. `target` must already
    /// be trimmed by the caller.
    pub fn matches_content(&self, target: &str) -> bool {
        self.content.trim() == target
    }
}

/// Current time as epoch milliseconds (what `Date.now()` reports in the
/// browser).
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_trims_and_starts_unopened() {
        let p = Paper::fresh("  hello world \n");
        assert_eq!(p.content, "hello world");
        assert!(p.opened_at.is_none());
        assert!(!p.id.is_empty());
        assert!(p.created_at > 0);
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = Paper::fresh("x");
        let b = Paper::fresh("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_camel_case_and_omits_unset_opened_at() {
        let p = Paper {
            id: "abc".into(),
            content: "hi".into(),
            created_at: 1700000000000,
            opened_at: None,
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"createdAt\":1700000000000"), "{json}");
        assert!(!json.contains("openedAt"), "{json}");

        let opened = Paper {
            opened_at: Some(1700000000001),
            ..p
        };
        let json = serde_json::to_string(&opened).unwrap();
        assert!(json.contains("\"openedAt\":1700000000001"), "{json}");
    }

    #[test]
    fn deserializes_entries_with_missing_fields() {
        // Stored data written by older or buggy versions may miss fields;
        // they default instead of poisoning the whole collection.
        let p: Paper = serde_json::from_str(r#"{ "id": "only-id" }"#).unwrap();
        assert_eq!(p.id, "only-id");
        assert_eq!(p.content, "");
        assert_eq!(p.created_at, 0);
        assert!(p.opened_at.is_none());
    }

    #[test]
    fn matches_content_compares_trimmed() {
        let p = Paper {
            id: "i".into(),
            content: "  prize  ".into(),
            created_at: 0,
            opened_at: None,
        };
        assert!(p.matches_content("prize"));
        assert!(!p.matches_content("other"));
    }
}
