//! De-duplicating merge of feed pages
//!
//! The server gives no guarantee that a page boundary is stable between
//! requests (new posts shift older ones down), so the same post can show up
//! on two consecutive pages. The client drops repeats and keeps the
//! position where a post was first seen.

use crate::types::{FeedItem, PostId};
use std::collections::HashSet;

/// What a merge did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Items appended
    pub appended: usize,
    /// Items dropped because their id was already present
    pub duplicates: usize,
}

/// Merge `incoming` after `existing`, skipping ids already present
pub fn merge(existing: &[FeedItem], incoming: &[FeedItem]) -> Vec<FeedItem> {
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());
    merged.extend_from_slice(existing);
    merge_into(&mut merged, incoming);
    merged
}

/// In-place form of [`merge`]
pub fn merge_into(existing: &mut Vec<FeedItem>, incoming: &[FeedItem]) -> MergeStats {
    let mut seen: HashSet<PostId> = existing.iter().map(|item| item.post_id).collect();
    let mut stats = MergeStats::default();

    for item in incoming {
        // insert() also catches repeats inside `incoming` itself
        if seen.insert(item.post_id) {
            existing.push(item.clone());
            stats.appended += 1;
        } else {
            stats.duplicates += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn post(id: PostId, content: &str) -> FeedItem {
        FeedItem {
            post_id: id,
            author_id: 1,
            content: content.to_string(),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn ids(items: &[FeedItem]) -> Vec<PostId> {
        items.iter().map(|i| i.post_id).collect()
    }

    #[test]
    fn test_merge_disjoint() {
        let merged = merge(&[post(5, "a"), post(4, "b")], &[post(3, "c"), post(2, "d")]);
        assert_eq!(ids(&merged), vec![5, 4, 3, 2]);
    }

    #[test]
    fn test_merge_drops_overlap() {
        let existing = vec![post(10, "a"), post(9, "b"), post(8, "c")];
        let incoming = vec![post(8, "c"), post(7, "d"), post(6, "e")];

        let merged = merge(&existing, &incoming);
        assert_eq!(ids(&merged), vec![10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_merge_keeps_first_seen_position_and_payload() {
        let existing = vec![post(3, "original"), post(2, "x")];
        let incoming = vec![post(1, "y"), post(3, "edited")];

        let merged = merge(&existing, &incoming);
        assert_eq!(ids(&merged), vec![3, 2, 1]);
        assert_eq!(merged[0].content, "original");
    }

    #[test]
    fn test_merge_duplicates_within_incoming() {
        let mut items = vec![post(1, "a")];
        let stats = merge_into(&mut items, &[post(2, "b"), post(2, "b"), post(1, "a")]);

        assert_eq!(ids(&items), vec![1, 2]);
        assert_eq!(
            stats,
            MergeStats {
                appended: 1,
                duplicates: 2
            }
        );
    }

    #[test]
    fn test_merge_empty_sides() {
        assert!(merge(&[], &[]).is_empty());
        assert_eq!(ids(&merge(&[], &[post(1, "a")])), vec![1]);
        assert_eq!(ids(&merge(&[post(1, "a")], &[])), vec![1]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let page = vec![post(3, "a"), post(2, "b"), post(1, "c")];
        let once = merge(&[], &page);
        let twice = merge(&once, &page);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_many_overlapping_pages_never_duplicate() {
        let mut items = Vec::new();
        // sliding windows of 10 ids, advancing by 7, so each page repeats 3
        for start in (0..100).step_by(7) {
            let page: Vec<_> = (start..start + 10).map(|id| post(id, "p")).collect();
            merge_into(&mut items, &page);
        }

        let unique: HashSet<_> = items.iter().map(|i| i.post_id).collect();
        assert_eq!(unique.len(), items.len());
        assert!(ids(&items).windows(2).all(|w| w[0] < w[1]));
    }
}
