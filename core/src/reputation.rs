//! Reputation scoring.
//!
//! Consumes the full non-comment report history for one raider and produces
//! a decayed score plus a discrete tier. Each report contributes a weight by
//! whole-day age: fresh (<= 7 days) counts 1.0, recent (8..=30) counts 0.5,
//! old (> 30) counts 0.2. Tiers compare the full-precision sum; the score is
//! rounded to two decimals for display only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::ReportRecord;

pub const FRESH_WEIGHT: f64 = 1.0;
pub const RECENT_WEIGHT: f64 = 0.5;
pub const OLD_WEIGHT: f64 = 0.2;

/// Reputation tier, worst last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Friendly,
    Neutral,
    Suspicious,
    Hostile,
    #[serde(rename = "KOS")]
    Kos,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::Friendly => "Friendly",
            Tier::Neutral => "Neutral",
            Tier::Suspicious => "Suspicious",
            Tier::Hostile => "Hostile",
            Tier::Kos => "KOS",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationSummary {
    pub tier: Tier,
    pub score: f64,
    pub total_reports: i64,
}

/// Decay weight for a report aged `age_days` whole days.
pub fn decay_weight(age_days: i64) -> f64 {
    if age_days <= 7 {
        FRESH_WEIGHT
    } else if age_days <= 30 {
        RECENT_WEIGHT
    } else {
        OLD_WEIGHT
    }
}

/// Tier for a full-precision score. Bands are non-overlapping and ordered;
/// a score of exactly zero is Friendly.
pub fn tier_for(score: f64) -> Tier {
    if score <= 0.0 {
        Tier::Friendly
    } else if score <= 1.5 {
        Tier::Neutral
    } else if score <= 3.0 {
        Tier::Suspicious
    } else if score <= 5.0 {
        Tier::Hostile
    } else {
        Tier::Kos
    }
}

/// Score a raider's non-comment report history at instant `now`.
///
/// A malformed stored timestamp counts as age zero (fresh) rather than
/// failing the whole read. Order-invariant: the result is a sum.
pub fn score_reports(now: DateTime<Utc>, reports: &[ReportRecord]) -> ReputationSummary {
    let mut score = 0.0f64;
    for report in reports {
        let age_days = report
            .created_at_utc()
            .map(|t| (now - t).num_days().max(0))
            .unwrap_or(0);
        score += decay_weight(age_days);
    }
    ReputationSummary {
        tier: tier_for(score),
        score: (score * 100.0).round() / 100.0,
        total_reports: reports.len() as i64,
    }
}
