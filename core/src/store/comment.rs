//! Store methods for the comment feed and vote counters.

use rusqlite::{params, OptionalExtension};

use super::ReportStore;
use crate::{
    category::ReportReason,
    comments::{CommentEntry, CommentSort, VotePair},
    error::EngineResult,
};

impl ReportStore {
    /// Comment feed for one raider. Sort happens in SQL: `Top` ranks by raw
    /// upvotes (recency as tiebreaker), `Recent` by creation time.
    pub fn comments_for_raider(
        &self,
        raider_id: &str,
        sort: CommentSort,
        limit: usize,
    ) -> EngineResult<Vec<CommentEntry>> {
        let order = match sort {
            CommentSort::Top => "upvotes DESC, created_at DESC",
            CommentSort::Recent => "created_at DESC",
        };
        let sql = format!(
            "SELECT id, comments, reporter_label, created_at, upvotes, downvotes
             FROM reports
             WHERE raider_id = ?1 AND reason = ?2
             ORDER BY {order}
             LIMIT ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![raider_id, ReportReason::Comment.as_str(), limit as i64],
            |row| {
                let upvotes: i64 = row.get(4)?;
                let downvotes: i64 = row.get(5)?;
                Ok(CommentEntry {
                    id: row.get(0)?,
                    body: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    reporter_label: row.get(2)?,
                    created_at: row.get(3)?,
                    upvotes,
                    downvotes,
                    score: upvotes - downvotes,
                })
            },
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Current vote pair for a comment. None when the id is unknown or the
    /// row is not a comment.
    pub fn comment_votes(&self, comment_id: &str) -> EngineResult<Option<VotePair>> {
        self.conn
            .query_row(
                "SELECT upvotes, downvotes FROM reports WHERE id = ?1 AND reason = ?2",
                params![comment_id, ReportReason::Comment.as_str()],
                |row| {
                    Ok(VotePair {
                        upvotes: row.get(0)?,
                        downvotes: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_comment_votes(&self, comment_id: &str, votes: VotePair) -> EngineResult<()> {
        self.conn.execute(
            "UPDATE reports SET upvotes = ?1, downvotes = ?2 WHERE id = ?3",
            params![votes.upvotes, votes.downvotes, comment_id],
        )?;
        Ok(())
    }

    // ── Test / summary helpers ─────────────────────────────────

    pub fn comment_count(&self, raider_id: &str) -> EngineResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM reports WHERE raider_id = ?1 AND reason = ?2",
                params![raider_id, ReportReason::Comment.as_str()],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}
