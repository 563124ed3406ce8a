//! Comment feed and vote-transition rules.
//!
//! Comments are report rows with the `comment` sentinel reason; their vote
//! pair is the only mutable state in the engine. The transition table trusts
//! the caller's self-reported previous vote — the engine holds no per-voter
//! identity and cannot enforce one vote per user. That trust boundary is
//! deliberate and documented, not a bug to patch here.

use serde::{Deserialize, Serialize};

use crate::types::ReportId;

/// Limit clamp for the comment feed.
pub const DEFAULT_LIMIT: usize = 200;
pub const MAX_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Up,
    Down,
}

/// The caller's previous vote state on a comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrevVote {
    #[default]
    None,
    Up,
    Down,
}

/// Comment feed ordering. `Top` ranks by raw upvotes (not net score) —
/// the historical behavior, kept on purpose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentSort {
    #[default]
    Top,
    Recent,
}

/// A comment's vote counters. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VotePair {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl VotePair {
    pub fn score(self) -> i64 {
        self.upvotes - self.downvotes
    }
}

/// One entry of the comment feed.
#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    pub id: ReportId,
    pub body: String,
    pub reporter_label: Option<String>,
    pub created_at: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub score: i64,
}

/// Apply one vote transition.
///
/// Re-clicking the same vote is a no-op (a guard against double-counting
/// repeated clicks, not a toggle-off). Switching sides moves one count
/// across, flooring the decremented side at zero. A first vote only
/// increments.
pub fn apply_transition(current: VotePair, vote: Vote, prev: PrevVote) -> VotePair {
    match (vote, prev) {
        (Vote::Up, PrevVote::Up) | (Vote::Down, PrevVote::Down) => current,
        (Vote::Up, PrevVote::Down) => VotePair {
            upvotes: current.upvotes + 1,
            downvotes: (current.downvotes - 1).max(0),
        },
        (Vote::Down, PrevVote::Up) => VotePair {
            upvotes: (current.upvotes - 1).max(0),
            downvotes: current.downvotes + 1,
        },
        (Vote::Up, PrevVote::None) => VotePair {
            upvotes: current.upvotes + 1,
            ..current
        },
        (Vote::Down, PrevVote::None) => VotePair {
            downvotes: current.downvotes + 1,
            ..current
        },
    }
}

/// Clamp a caller-supplied feed limit to `[1, MAX_LIMIT]`, defaulting to
/// `DEFAULT_LIMIT` when absent.
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
