//! Read-side projection of the active pool: distinct trimmed contents with
//! their counts, in first-seen order. Computed fresh on every read and never
//! persisted.

use crate::paper::Paper;

/// One admin-facing group: a distinct prize text and how many copies of it
/// remain in the box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperGroup {
    pub content: String,
    pub count: usize,
}

/// Partition papers by trimmed content. Entries whose content trims to empty
/// are skipped as malformed rather than surfaced as an error.
pub fn grouped(papers: &[Paper]) -> Vec<PaperGroup> {
    let mut groups: Vec<PaperGroup> = Vec::new();
    for paper in papers {
        let content = paper.content.trim();
        if content.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|g| g.content == content) {
            Some(g) => g.count += 1,
            None => groups.push(PaperGroup {
                content: content.to_string(),
                count: 1,
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(content: &str) -> Paper {
        Paper {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.to_string(),
            created_at: 0,
            opened_at: None,
        }
    }

    #[test]
    fn counts_partition_the_pool() {
        let pool = vec![paper("A"), paper("B"), paper("A"), paper("A")];
        let groups = grouped(&pool);
        assert_eq!(groups.len(), 2);
        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, pool.len());
        assert_eq!(groups[0], PaperGroup { content: "A".into(), count: 3 });
        assert_eq!(groups[1], PaperGroup { content: "B".into(), count: 1 });
    }

    #[test]
    fn trims_before_grouping() {
        let pool = vec![paper(" tea "), paper("tea"), paper("tea\n")];
        let groups = grouped(&pool);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].content, "tea");
        assert_eq!(groups[0].count, 3);
    }

    #[test]
    fn blank_content_is_excluded() {
        let pool = vec![paper(""), paper("   "), paper("keep")];
        let groups = grouped(&pool);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].content, "keep");
    }

    #[test]
    fn empty_pool_yields_no_groups() {
        assert!(grouped(&[]).is_empty());
    }
}
