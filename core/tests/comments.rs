//! Comment/vote ledger tests.
//!
//! Tests cover: the vote transition table, idempotent re-clicks, the zero
//! floor, feed sorting (top ranks by raw upvotes), limit clamping, and
//! comment validation through the engine.

use raidwatch_core::comments::{
    apply_transition, clamp_limit, CommentSort, PrevVote, Vote, VotePair,
};
use raidwatch_core::config::EngineConfig;
use raidwatch_core::engine::ReportEngine;
use raidwatch_core::error::{EngineError, EngineResult};
use raidwatch_core::evidence::EvidenceStore;
use raidwatch_core::report::NewReport;
use raidwatch_core::store::ReportStore;

struct NullEvidenceStore;

impl EvidenceStore for NullEvidenceStore {
    fn store(&self, _bytes: &[u8], _content_type: &str) -> EngineResult<String> {
        Ok("about:blank".to_string())
    }
}

fn build_engine() -> ReportEngine {
    let store = ReportStore::in_memory().expect("in-memory store");
    store.migrate().expect("migrate");
    ReportEngine::new(store, Box::new(NullEvidenceStore), EngineConfig::default())
}

fn pair(upvotes: i64, downvotes: i64) -> VotePair {
    VotePair { upvotes, downvotes }
}

// ── Transition table ─────────────────────────────────────────────

/// Counters (3,1), vote down with previous up: one count moves across,
/// giving (2,2).
#[test]
fn switching_sides_moves_one_count() {
    assert_eq!(apply_transition(pair(3, 1), Vote::Down, PrevVote::Up), pair(2, 2));
    assert_eq!(apply_transition(pair(3, 1), Vote::Up, PrevVote::Down), pair(4, 0));
}

/// Re-clicking the same vote is a no-op, however often it repeats.
#[test]
fn repeated_votes_are_idempotent() {
    let mut votes = pair(3, 1);
    for _ in 0..5 {
        votes = apply_transition(votes, Vote::Up, PrevVote::Up);
    }
    assert_eq!(votes, pair(3, 1));
    assert_eq!(apply_transition(pair(0, 0), Vote::Down, PrevVote::Down), pair(0, 0));
}

#[test]
fn first_votes_only_increment() {
    assert_eq!(apply_transition(pair(0, 0), Vote::Up, PrevVote::None), pair(1, 0));
    assert_eq!(apply_transition(pair(2, 7), Vote::Down, PrevVote::None), pair(2, 8));
}

/// Decrements floor at zero — a lying `prev_vote` can't drive a counter
/// negative.
#[test]
fn decrement_floors_at_zero() {
    assert_eq!(apply_transition(pair(0, 0), Vote::Down, PrevVote::Up), pair(0, 1));
    assert_eq!(apply_transition(pair(0, 0), Vote::Up, PrevVote::Down), pair(1, 0));
}

#[test]
fn limit_clamps() {
    assert_eq!(clamp_limit(None), 200);
    assert_eq!(clamp_limit(Some(0)), 1);
    assert_eq!(clamp_limit(Some(50)), 50);
    assert_eq!(clamp_limit(Some(9_999)), 500);
}

// ── Engine-level behavior ────────────────────────────────────────

#[test]
fn comment_requires_a_body() {
    let engine = build_engine();
    engine
        .submit_report(NewReport {
            tag: "Lurker#0007".to_string(),
            reason: "betrayal".to_string(),
            ..Default::default()
        })
        .unwrap();

    for body in ["", "   ", "\n\t"] {
        let err = engine.add_comment("Lurker#0007", body, None).unwrap_err();
        assert!(
            matches!(err, EngineError::Validation(_)),
            "expected Validation for body {body:?}, got {err:?}"
        );
    }
}

#[test]
fn comment_on_unknown_raider_is_not_found() {
    let engine = build_engine();
    let err = engine.add_comment("Nobody#0000", "hello", None).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));

    let err = engine.add_comment("not a tag", "hello", None).unwrap_err();
    assert!(matches!(err, EngineError::InvalidIdentity { .. }));
}

/// "Top" ranks by raw upvotes, not net score: a 5-up/5-down comment
/// outranks a 3-up/0-down one even though its net score is lower.
#[test]
fn top_sort_ranks_by_raw_upvotes() {
    let engine = build_engine();
    engine
        .submit_report(NewReport {
            tag: "RatKing#0420".to_string(),
            reason: "rat-tactics".to_string(),
            ..Default::default()
        })
        .unwrap();

    let controversial = engine
        .add_comment("RatKing#0420", "took the whole stash", None)
        .unwrap();
    let liked = engine
        .add_comment("RatKing#0420", "confirmed, avoid", None)
        .unwrap();
    engine
        .store()
        .set_comment_votes(&controversial.id, VotePair { upvotes: 5, downvotes: 5 })
        .unwrap();
    engine
        .store()
        .set_comment_votes(&liked.id, VotePair { upvotes: 3, downvotes: 0 })
        .unwrap();

    let feed = engine
        .comments("ratking-0420", CommentSort::Top, None)
        .unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].id, controversial.id);
    assert_eq!(feed[0].score, 0, "net score is derived but not the sort key");
    assert_eq!(feed[1].id, liked.id);
    assert_eq!(feed[1].score, 3);
}

#[test]
fn recent_sort_is_newest_first() {
    let engine = build_engine();
    engine
        .submit_report(NewReport {
            tag: "Lurker#0007".to_string(),
            reason: "afk-griefing".to_string(),
            ..Default::default()
        })
        .unwrap();

    let first = engine.add_comment("Lurker#0007", "first", None).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = engine.add_comment("Lurker#0007", "second", None).unwrap();

    let feed = engine
        .comments("lurker-0007", CommentSort::Recent, None)
        .unwrap();
    assert_eq!(feed[0].id, second.id);
    assert_eq!(feed[1].id, first.id);
}

#[test]
fn vote_round_trip_through_the_engine() {
    let engine = build_engine();
    engine
        .submit_report(NewReport {
            tag: "Lurker#0007".to_string(),
            reason: "verbal-abuse".to_string(),
            ..Default::default()
        })
        .unwrap();
    let comment = engine.add_comment("Lurker#0007", "mic spam", None).unwrap();

    let outcome = engine
        .apply_vote(&comment.id, Vote::Up, PrevVote::None)
        .unwrap();
    assert_eq!((outcome.upvotes, outcome.downvotes, outcome.score), (1, 0, 1));

    // Idempotent re-click.
    let outcome = engine
        .apply_vote(&comment.id, Vote::Up, PrevVote::Up)
        .unwrap();
    assert_eq!((outcome.upvotes, outcome.downvotes), (1, 0));

    // Switch sides.
    let outcome = engine
        .apply_vote(&comment.id, Vote::Down, PrevVote::Up)
        .unwrap();
    assert_eq!((outcome.upvotes, outcome.downvotes, outcome.score), (0, 1, -1));
}

/// Voting needs a real comment id: unknown ids and non-comment report rows
/// both read as NotFound.
#[test]
fn vote_targets_must_be_comments() {
    let engine = build_engine();
    let report = engine
        .submit_report(NewReport {
            tag: "Lurker#0007".to_string(),
            reason: "cheating-exploiting".to_string(),
            ..Default::default()
        })
        .unwrap();

    let err = engine
        .apply_vote("no-such-id", Vote::Up, PrevVote::None)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));

    let err = engine
        .apply_vote(&report.id, Vote::Up, PrevVote::None)
        .unwrap_err();
    assert!(
        matches!(err, EngineError::NotFound { .. }),
        "plain reports have no vote surface"
    );
}
