//! Deterministic demo-data seeder.
//!
//! RULE: nothing here calls a platform RNG. All randomness flows from the
//! single master seed, so two runs with the same seed produce the same
//! board — including report ids, which are drawn from the stream.

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

use raidwatch_core::{
    category::ReportReason,
    engine::ReportEngine,
    identity,
    report::{format_timestamp, ReportRecord},
};

pub struct DemoSummary {
    pub raiders: usize,
    pub reports: usize,
    pub comments: usize,
}

struct SeedRng {
    inner: Pcg64Mcg,
}

impl SeedRng {
    fn new(master_seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(master_seed),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        let bits = self.next_u64();
        ((bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)) < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

const NAME_STEMS: &[&str] = &[
    "Shadow", "Toxic", "Silent", "Rusty", "Feral", "Grim", "Hollow", "Vile",
    "Night", "Scrap", "Dust", "Ash", "Iron", "Bone", "Crow", "Mire",
];

const NAME_TAILS: &[&str] = &[
    "Wolf", "Reaper", "Rat", "Viper", "Jackal", "Hyena", "Bandit", "Ghost",
    "Vulture", "Raider", "Smoke", "Fang", "Hound", "Widow", "Creep", "Lurker",
];

const COMMENT_BODIES: &[&str] = &[
    "Shot me off the ladder mid-climb. Avoid.",
    "Camped our base exit for an hour straight.",
    "Actually gave my loot back. Decent?",
    "Teamkilled at extraction, twice.",
    "Mic spam the entire round.",
    "Watched them clip through a wall. Clip saved.",
];

/// Populate the store with a reproducible demo board: `raider_count`
/// identities, each with 1-11 reports spread over the trailing ~60 days,
/// and a comment feed with pre-rolled votes on some of them.
pub fn seed_demo(
    engine: &ReportEngine,
    raider_count: usize,
    master_seed: u64,
) -> Result<DemoSummary> {
    let mut rng = SeedRng::new(master_seed);
    let now = Utc::now();
    let store = engine.store();
    let mut reports = 0usize;
    let mut comments = 0usize;

    for _ in 0..raider_count {
        let display = format!(
            "{}{}#{:04}",
            rng.pick(NAME_STEMS),
            rng.pick(NAME_TAILS),
            rng.next_u64_below(10_000)
        );
        let tag = identity::normalize_tag(&display)?;
        let raider = store.upsert_raider(&tag, &display, &format_timestamp(now))?;

        let report_count = 1 + rng.next_u64_below(11) as usize;
        for _ in 0..report_count {
            let age_days = rng.next_u64_below(60) as i64;
            let minutes = rng.next_u64_below(24 * 60) as i64;
            let created = now - Duration::days(age_days) - Duration::minutes(minutes);
            let reason = *rng.pick(&ReportReason::CHARTABLE);
            store.insert_report(&ReportRecord {
                id: format!("seed-{:016x}", rng.next_u64()),
                raider_id: raider.id.clone(),
                reason: reason.as_str().to_string(),
                comments: None,
                created_at: format_timestamp(created),
                evidence_urls: Vec::new(),
                upvotes: 0,
                downvotes: 0,
                reporter_label: None,
            })?;
            reports += 1;
        }

        if rng.chance(0.6) {
            let comment_count = 1 + rng.next_u64_below(3);
            for _ in 0..comment_count {
                let age_days = rng.next_u64_below(30) as i64;
                let created = now - Duration::days(age_days);
                store.insert_report(&ReportRecord {
                    id: format!("seed-{:016x}", rng.next_u64()),
                    raider_id: raider.id.clone(),
                    reason: ReportReason::Comment.as_str().to_string(),
                    comments: Some((*rng.pick(COMMENT_BODIES)).to_string()),
                    created_at: format_timestamp(created),
                    evidence_urls: Vec::new(),
                    upvotes: rng.next_u64_below(12) as i64,
                    downvotes: rng.next_u64_below(5) as i64,
                    reporter_label: None,
                })?;
                comments += 1;
            }
        }
    }

    // Random tags can collide; report the distinct row count.
    let raiders = store.raider_count()? as usize;
    log::info!("seeded {raiders} raiders, {reports} reports, {comments} comments");
    Ok(DemoSummary {
        raiders,
        reports,
        comments,
    })
}
