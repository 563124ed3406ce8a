//! Reputation scorer tests.
//!
//! Tests cover: decay weights by age band, tier thresholds, monotonicity,
//! order invariance, and malformed-timestamp tolerance.

use chrono::{DateTime, Duration, Utc};
use raidwatch_core::report::{format_timestamp, ReportRecord};
use raidwatch_core::reputation::{decay_weight, score_reports, tier_for, Tier};

fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-10T12:00:00.000Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn report_aged(now: DateTime<Utc>, days: i64) -> ReportRecord {
    ReportRecord {
        id: format!("r-{days}"),
        raider_id: "raider-1".to_string(),
        reason: "betrayal".to_string(),
        comments: None,
        created_at: format_timestamp(now - Duration::days(days)),
        evidence_urls: Vec::new(),
        upvotes: 0,
        downvotes: 0,
        reporter_label: None,
    }
}

#[test]
fn decay_weight_bands() {
    assert_eq!(decay_weight(0), 1.0);
    assert_eq!(decay_weight(7), 1.0);
    assert_eq!(decay_weight(8), 0.5);
    assert_eq!(decay_weight(30), 0.5);
    assert_eq!(decay_weight(31), 0.2);
    assert_eq!(decay_weight(365), 0.2);
}

/// Reports aged {1, 10, 40} days weigh {1.0, 0.5, 0.2}: score 1.70,
/// tier Suspicious.
#[test]
fn mixed_ages_score_example() {
    let now = fixed_now();
    let reports = vec![
        report_aged(now, 1),
        report_aged(now, 10),
        report_aged(now, 40),
    ];
    let summary = score_reports(now, &reports);
    assert_eq!(summary.score, 1.7, "display score should round to 1.70");
    assert_eq!(summary.tier, Tier::Suspicious);
    assert_eq!(summary.total_reports, 3);
}

/// Zero non-comment reports: score 0.00, tier Friendly.
#[test]
fn empty_history_is_friendly() {
    let summary = score_reports(fixed_now(), &[]);
    assert_eq!(summary.score, 0.0);
    assert_eq!(summary.tier, Tier::Friendly);
    assert_eq!(summary.total_reports, 0);
}

/// Tier bands are closed on the right: 1.5 is still Neutral, 3.0 still
/// Suspicious, 5.0 still Hostile.
#[test]
fn tier_thresholds() {
    assert_eq!(tier_for(0.0), Tier::Friendly);
    assert_eq!(tier_for(0.2), Tier::Neutral);
    assert_eq!(tier_for(1.5), Tier::Neutral);
    assert_eq!(tier_for(1.6), Tier::Suspicious);
    assert_eq!(tier_for(3.0), Tier::Suspicious);
    assert_eq!(tier_for(3.1), Tier::Hostile);
    assert_eq!(tier_for(5.0), Tier::Hostile);
    assert_eq!(tier_for(5.1), Tier::Kos);
}

/// Adding a report of any age never lowers the score.
#[test]
fn score_is_monotone_in_reports() {
    let now = fixed_now();
    let mut reports = Vec::new();
    let mut previous = 0.0;
    for days in [45, 3, 20, 0, 90, 8, 7] {
        reports.push(report_aged(now, days));
        let summary = score_reports(now, &reports);
        assert!(
            summary.score >= previous,
            "score dropped from {previous} to {} after adding a {days}-day-old report",
            summary.score
        );
        previous = summary.score;
    }
}

/// The score is a sum: report order never matters.
#[test]
fn score_is_order_invariant() {
    let now = fixed_now();
    let forward: Vec<_> = [2, 9, 33, 5, 61]
        .iter()
        .map(|&d| report_aged(now, d))
        .collect();
    let mut reversed = forward.clone();
    reversed.reverse();
    assert_eq!(score_reports(now, &forward), score_reports(now, &reversed));
}

/// A malformed stored timestamp counts as fresh instead of failing the read.
#[test]
fn malformed_timestamp_counts_as_fresh() {
    let now = fixed_now();
    let mut report = report_aged(now, 40);
    report.created_at = "not-a-timestamp".to_string();
    let summary = score_reports(now, &[report]);
    assert_eq!(summary.score, 1.0);
    assert_eq!(summary.tier, Tier::Neutral);
}

/// A report dated in the future clamps to age zero.
#[test]
fn future_timestamp_counts_as_fresh() {
    let now = fixed_now();
    let report = report_aged(now, -3);
    let summary = score_reports(now, &[report]);
    assert_eq!(summary.score, 1.0);
}
