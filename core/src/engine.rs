//! The report engine — facade over the store, the scorer, the bucketer,
//! the leaderboard, and the comment ledger.
//!
//! RULES:
//!   - Read operations are pure functions of a store snapshot and the clock.
//!   - Write operations fully succeed or fail outright; a failed evidence
//!     attachment aborts the whole submission before any row is written.
//!   - The store and evidence store are injected; tests substitute an
//!     in-memory store and a stub evidence store.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    category::ReportReason,
    comments::{self, CommentEntry, CommentSort, PrevVote, Vote},
    config::EngineConfig,
    error::{EngineError, EngineResult},
    evidence::{EvidenceStore, LocalEvidenceStore},
    identity::{self, RaiderRecord},
    leaderboard::{self, LeaderboardEntry},
    report::{format_timestamp, NewReport, ReportRecord},
    reputation::{self, ReputationSummary},
    store::ReportStore,
    timeseries::{self, Span, TimeSeries},
    types::{Slug, Tag},
};

/// Default number of leaderboard entries when the caller doesn't ask.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Wire shape of the summary read.
#[derive(Debug, Clone, Serialize)]
pub struct RaiderSummary {
    pub tag: Tag,
    pub display_tag: String,
    pub slug: Slug,
    #[serde(flatten)]
    pub reputation: ReputationSummary,
}

/// Wire shape of a vote write: the counters after the transition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteOutcome {
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

pub struct ReportEngine {
    store: ReportStore,
    evidence: Box<dyn EvidenceStore>,
    config: EngineConfig,
}

impl ReportEngine {
    pub fn new(store: ReportStore, evidence: Box<dyn EvidenceStore>, config: EngineConfig) -> Self {
        Self {
            store,
            evidence,
            config,
        }
    }

    /// Build a fully wired engine from configuration: open the database,
    /// apply migrations, mount the local evidence store.
    pub fn open(config: EngineConfig) -> EngineResult<Self> {
        let store = ReportStore::open(&config.database)?;
        store.migrate()?;
        let evidence = Box::new(LocalEvidenceStore::new(
            &config.evidence_dir,
            &config.evidence_base_url,
        ));
        Ok(Self::new(store, evidence, config))
    }

    /// Direct store access for tests and seeding tools.
    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    // ── Writes ─────────────────────────────────────────────────

    /// Validate and persist a behavioral report. Creates the raider row on
    /// first report (upsert-by-tag); `created_at` is assigned here, never
    /// taken from the caller.
    pub fn submit_report(&self, submission: NewReport) -> EngineResult<ReportRecord> {
        let tag = identity::normalize_tag(&submission.tag)?;
        let reason = ReportReason::parse(submission.reason.trim())
            .filter(|r| !r.is_comment())
            .ok_or_else(|| EngineError::InvalidReason {
                raw: submission.reason.clone(),
            })?;

        // Attachments first: any failure aborts before a row is written.
        let mut evidence_urls = Vec::with_capacity(submission.evidence.len());
        for file in &submission.evidence {
            evidence_urls.push(self.evidence.store(&file.bytes, &file.content_type)?);
        }

        let now = format_timestamp(Utc::now());
        let raider = self.store.upsert_raider(&tag, submission.tag.trim(), &now)?;
        let record = ReportRecord {
            id: Uuid::new_v4().to_string(),
            raider_id: raider.id,
            reason: reason.as_str().to_string(),
            comments: normalize_text(submission.comments),
            created_at: now,
            evidence_urls,
            upvotes: 0,
            downvotes: 0,
            reporter_label: normalize_text(submission.reporter_label),
        };
        self.store.insert_report(&record)?;
        log::info!("report {} against {tag}: {}", record.id, reason.as_str());
        Ok(record)
    }

    /// Attach a free-text comment to an existing raider.
    pub fn add_comment(
        &self,
        tag: &str,
        body: &str,
        reporter_label: Option<String>,
    ) -> EngineResult<CommentEntry> {
        let body = body.trim();
        if body.is_empty() {
            return Err(EngineError::Validation("comment body is required".into()));
        }
        let tag = identity::normalize_tag(tag)?;
        let raider = self.require_raider(&tag)?;
        let record = ReportRecord {
            id: Uuid::new_v4().to_string(),
            raider_id: raider.id,
            reason: ReportReason::Comment.as_str().to_string(),
            comments: Some(body.to_string()),
            created_at: format_timestamp(Utc::now()),
            evidence_urls: Vec::new(),
            upvotes: 0,
            downvotes: 0,
            reporter_label: normalize_text(reporter_label),
        };
        self.store.insert_report(&record)?;
        log::debug!("comment {} on {tag}", record.id);
        Ok(CommentEntry {
            id: record.id,
            body: body.to_string(),
            reporter_label: record.reporter_label,
            created_at: record.created_at,
            upvotes: 0,
            downvotes: 0,
            score: 0,
        })
    }

    /// Apply a vote transition to a comment's counters. Read-modify-write:
    /// concurrent votes on the same comment can race and lose an increment,
    /// which is accepted for these counters.
    pub fn apply_vote(
        &self,
        comment_id: &str,
        vote: Vote,
        prev: PrevVote,
    ) -> EngineResult<VoteOutcome> {
        let current = self
            .store
            .comment_votes(comment_id)?
            .ok_or_else(|| EngineError::NotFound {
                entity: "comment",
                key: comment_id.to_string(),
            })?;
        let next = comments::apply_transition(current, vote, prev);
        if next != current {
            self.store.set_comment_votes(comment_id, next)?;
        }
        Ok(VoteOutcome {
            upvotes: next.upvotes,
            downvotes: next.downvotes,
            score: next.score(),
        })
    }

    // ── Reads ──────────────────────────────────────────────────

    /// Reputation summary for the raider behind `slug`.
    pub fn summary(&self, slug: &str) -> EngineResult<RaiderSummary> {
        let tag = identity::deslugify(slug)?;
        let raider = self.require_raider(&tag)?;
        let history = self.store.reports_for_raider(&raider.id)?;
        let reputation = reputation::score_reports(Utc::now(), &history);
        Ok(RaiderSummary {
            slug: identity::slugify(&raider.tag),
            tag: raider.tag,
            display_tag: raider.display_tag,
            reputation,
        })
    }

    /// Chart buckets for the raider behind `slug`.
    pub fn stats(&self, slug: &str, span: Span, offset: i64) -> EngineResult<TimeSeries> {
        let tag = identity::deslugify(slug)?;
        let raider = self.require_raider(&tag)?;
        let offset = offset.clamp(0, 1_000) as u32;
        let today = Utc::now().date_naive();
        let window = timeseries::window_for(today, span, offset);
        let rows = self.store.reports_in_window(
            &raider.id,
            &format_timestamp(window.start_at()),
            &format_timestamp(window.end_at()),
        )?;
        Ok(timeseries::bucket_reports(today, span, offset, &rows))
    }

    /// Comment feed for the raider behind `slug`.
    pub fn comments(
        &self,
        slug: &str,
        sort: CommentSort,
        limit: Option<usize>,
    ) -> EngineResult<Vec<CommentEntry>> {
        let tag = identity::deslugify(slug)?;
        let raider = self.require_raider(&tag)?;
        self.store
            .comments_for_raider(&raider.id, sort, comments::clamp_limit(limit))
    }

    /// Most-reported raiders within the recent-report sample.
    pub fn leaderboard(&self, limit: Option<usize>) -> EngineResult<Vec<LeaderboardEntry>> {
        let sample = self
            .store
            .recent_reports(self.config.leaderboard_scan_limit)?;
        Ok(leaderboard::rank_recent(
            &sample,
            limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
        ))
    }

    fn require_raider(&self, tag: &str) -> EngineResult<RaiderRecord> {
        self.store
            .raider_by_tag(tag)?
            .ok_or_else(|| EngineError::NotFound {
                entity: "raider",
                key: tag.to_string(),
            })
    }
}

fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
