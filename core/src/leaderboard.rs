//! Leaderboard ranking.
//!
//! Operates on a bounded sample of the most recent non-comment reports
//! across all raiders — a "most recent N" fetch, not a full table scan.
//! Ranking within that sample is the documented approximation.

use serde::Serialize;

use crate::{
    identity,
    types::{Slug, Tag},
};

/// Hard ceiling on the number of entries a caller may request.
pub const MAX_LIMIT: usize = 100;

/// One row of the recent-report scan: the reported raider's canonical tag
/// and its stored display casing.
#[derive(Debug, Clone)]
pub struct RecentReportRow {
    pub tag: Tag,
    pub display_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub tag: Tag,
    pub display_tag: String,
    pub slug: Slug,
    pub report_count: i64,
}

/// Rank the sample descending by report count, grouped by canonical tag.
/// Ties keep first-seen order (the sort is stable over insertion order);
/// `limit` is clamped to `[1, MAX_LIMIT]`.
pub fn rank_recent(sample: &[RecentReportRow], limit: usize) -> Vec<LeaderboardEntry> {
    let limit = limit.clamp(1, MAX_LIMIT);

    let mut entries: Vec<LeaderboardEntry> = Vec::new();
    for row in sample {
        match entries.iter_mut().find(|e| e.tag == row.tag) {
            Some(entry) => entry.report_count += 1,
            None => entries.push(LeaderboardEntry {
                tag: row.tag.clone(),
                display_tag: row.display_tag.clone(),
                slug: identity::slugify(&row.tag),
                report_count: 1,
            }),
        }
    }

    entries.sort_by(|a, b| b.report_count.cmp(&a.report_count));
    entries.truncate(limit);
    entries
}
