//! Report model and submission shapes.
//!
//! A report row is immutable once written except for its vote pair, which
//! only the comment/vote ledger touches. `created_at` is server-assigned at
//! insert time and stored as RFC 3339 UTC with millisecond precision — a
//! format whose lexicographic order is chronological, so the store can
//! range-filter and sort on the raw column.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    category::ReportReason,
    types::{RaiderId, ReportId},
};

/// A stored report row, comments included. `reason` is kept as the raw wire
/// value: aggregators parse it and silently drop values outside the known
/// set rather than erroring on old data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    pub raider_id: RaiderId,
    pub reason: String,
    pub comments: Option<String>,
    pub created_at: String,
    pub evidence_urls: Vec<String>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub reporter_label: Option<String>,
}

impl ReportRecord {
    /// Parsed reason category, None for values outside the known set.
    pub fn reason_category(&self) -> Option<ReportReason> {
        ReportReason::parse(&self.reason)
    }

    /// Parsed creation instant, None when the stored value is malformed.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// An inbound report submission, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewReport {
    pub tag: String,
    pub reason: String,
    pub comments: Option<String>,
    pub reporter_label: Option<String>,
    pub evidence: Vec<EvidenceFile>,
}

/// One evidence attachment as received from the caller.
#[derive(Debug, Clone)]
pub struct EvidenceFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// The storage timestamp format. One format everywhere, never localized.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
