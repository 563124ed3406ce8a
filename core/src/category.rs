//! The report reason table.
//!
//! RULE: This is the only place reason categories, their wire values,
//! display labels, and chart colors are declared. Every component that
//! filters, charts, or validates reasons goes through this enum.

use serde::{Deserialize, Serialize};

/// A report reason category. Wire values are the kebab-case serde names;
/// `Comment` is the free-text sentinel and never appears in charts,
/// scores, or leaderboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportReason {
    Betrayal,
    RatTactics,
    AfkGriefing,
    VerbalAbuse,
    CheatingExploiting,
    OffensiveName,
    Comment,
}

impl ReportReason {
    /// The chartable categories, in display order. Excludes `Comment`.
    pub const CHARTABLE: [ReportReason; 6] = [
        ReportReason::Betrayal,
        ReportReason::RatTactics,
        ReportReason::AfkGriefing,
        ReportReason::VerbalAbuse,
        ReportReason::CheatingExploiting,
        ReportReason::OffensiveName,
    ];

    /// Stable wire value, as stored in the `reports.reason` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportReason::Betrayal => "betrayal",
            ReportReason::RatTactics => "rat-tactics",
            ReportReason::AfkGriefing => "afk-griefing",
            ReportReason::VerbalAbuse => "verbal-abuse",
            ReportReason::CheatingExploiting => "cheating-exploiting",
            ReportReason::OffensiveName => "offensive-name",
            ReportReason::Comment => "comment",
        }
    }

    /// Parse a wire value. Returns None for anything outside the set —
    /// callers decide whether that is a rejection (submission) or a
    /// silent drop (aggregation).
    pub fn parse(raw: &str) -> Option<ReportReason> {
        match raw {
            "betrayal" => Some(ReportReason::Betrayal),
            "rat-tactics" => Some(ReportReason::RatTactics),
            "afk-griefing" => Some(ReportReason::AfkGriefing),
            "verbal-abuse" => Some(ReportReason::VerbalAbuse),
            "cheating-exploiting" => Some(ReportReason::CheatingExploiting),
            "offensive-name" => Some(ReportReason::OffensiveName),
            "comment" => Some(ReportReason::Comment),
            _ => None,
        }
    }

    /// Human-facing label for charts and feeds.
    pub fn label(self) -> &'static str {
        match self {
            ReportReason::Betrayal => "Betrayal",
            ReportReason::RatTactics => "Rat Tactics",
            ReportReason::AfkGriefing => "AFK / Griefing",
            ReportReason::VerbalAbuse => "Verbal Abuse",
            ReportReason::CheatingExploiting => "Cheating / Exploiting",
            ReportReason::OffensiveName => "Offensive Name",
            ReportReason::Comment => "Comment",
        }
    }

    /// Series color for charts.
    pub fn color(self) -> &'static str {
        match self {
            ReportReason::Betrayal => "#e74c3c",
            ReportReason::RatTactics => "#b3742d",
            ReportReason::AfkGriefing => "#f1c40f",
            ReportReason::VerbalAbuse => "#9b59b6",
            ReportReason::CheatingExploiting => "#e67e22",
            ReportReason::OffensiveName => "#3498db",
            ReportReason::Comment => "#95a5a6",
        }
    }

    pub fn is_comment(self) -> bool {
        self == ReportReason::Comment
    }
}
