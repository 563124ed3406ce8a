//! Store methods for the report stream.

use rusqlite::params;

use super::ReportStore;
use crate::{
    category::ReportReason, error::EngineResult, leaderboard::RecentReportRow,
    report::ReportRecord,
};

fn report_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReportRecord> {
    let evidence_json: Option<String> = row.get(5)?;
    Ok(ReportRecord {
        id: row.get(0)?,
        raider_id: row.get(1)?,
        reason: row.get(2)?,
        comments: row.get(3)?,
        created_at: row.get(4)?,
        // A malformed JSON column degrades to "no evidence", never a panic.
        evidence_urls: evidence_json
            .as_deref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default(),
        upvotes: row.get(6)?,
        downvotes: row.get(7)?,
        reporter_label: row.get(8)?,
    })
}

impl ReportStore {
    pub fn insert_report(&self, r: &ReportRecord) -> EngineResult<()> {
        let evidence_json = if r.evidence_urls.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&r.evidence_urls)?)
        };
        self.conn.execute(
            "INSERT INTO reports (
                id, raider_id, reason, comments, created_at,
                evidence_urls, upvotes, downvotes, reporter_label
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                r.id,
                r.raider_id,
                r.reason,
                r.comments,
                r.created_at,
                evidence_json,
                r.upvotes,
                r.downvotes,
                r.reporter_label,
            ],
        )?;
        Ok(())
    }

    /// Full non-comment report history for one raider, oldest first.
    pub fn reports_for_raider(&self, raider_id: &str) -> EngineResult<Vec<ReportRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, raider_id, reason, comments, created_at,
                    evidence_urls, upvotes, downvotes, reporter_label
             FROM reports
             WHERE raider_id = ?1 AND reason != ?2
             ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map(
            params![raider_id, ReportReason::Comment.as_str()],
            report_row_mapper,
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Non-comment reports for one raider whose `created_at` falls in
    /// `[from, to]` (RFC 3339 bounds; lexicographic order is chronological).
    pub fn reports_in_window(
        &self,
        raider_id: &str,
        from: &str,
        to: &str,
    ) -> EngineResult<Vec<ReportRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, raider_id, reason, comments, created_at,
                    evidence_urls, upvotes, downvotes, reporter_label
             FROM reports
             WHERE raider_id = ?1 AND reason != ?2
               AND created_at >= ?3 AND created_at <= ?4
             ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map(
            params![raider_id, ReportReason::Comment.as_str(), from, to],
            report_row_mapper,
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// The most recent non-comment reports across all raiders, newest
    /// first, carrying the reported raider's tags (leaderboard sample).
    pub fn recent_reports(&self, scan_limit: usize) -> EngineResult<Vec<RecentReportRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT raiders.tag, raiders.display_tag
             FROM reports
             JOIN raiders ON raiders.id = reports.raider_id
             WHERE reports.reason != ?1
             ORDER BY reports.created_at DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(
            params![ReportReason::Comment.as_str(), scan_limit as i64],
            |row| {
                Ok(RecentReportRow {
                    tag: row.get(0)?,
                    display_tag: row.get(1)?,
                })
            },
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Test / summary helpers ─────────────────────────────────

    pub fn report_count(&self) -> EngineResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM reports WHERE reason != ?1",
                params![ReportReason::Comment.as_str()],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}
