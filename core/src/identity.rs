//! Identity canonicalization.
//!
//! A raider is addressed by a tag (`name#NNNN`) everywhere a human types it,
//! and by a slug (`name-NNNN`) everywhere a URL carries it. The canonical
//! form is the lowercase tag; one raider row exists per canonical tag.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::{
    error::{EngineError, EngineResult},
    types::{RaiderId, Slug, Tag},
};

/// A stored raider identity. `tag` is canonical lowercase; `display_tag`
/// keeps the casing from the submission that created the row.
#[derive(Debug, Clone, Serialize)]
pub struct RaiderRecord {
    pub id: RaiderId,
    pub tag: Tag,
    pub display_tag: String,
    pub created_at: String,
}

fn tag_grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+#\d{4}$").expect("tag grammar"))
}

fn slug_grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy prefix: the LAST hyphen-plus-4-digits group is the suffix,
    // so names that themselves end in digits or hyphens still parse.
    RE.get_or_init(|| Regex::new(r"^(.*)-(\d{4})$").expect("slug grammar"))
}

/// Trim and validate a user-supplied tag, returning its canonical
/// lowercase form.
pub fn normalize_tag(raw: &str) -> EngineResult<Tag> {
    let trimmed = raw.trim();
    if !tag_grammar().is_match(trimmed) {
        return Err(EngineError::InvalidIdentity {
            raw: raw.to_string(),
        });
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// URL-safe slug for a canonical tag: `#` becomes `-`.
pub fn slugify(tag: &str) -> Slug {
    tag.replace('#', "-")
}

/// Recover the canonical tag from a slug. URL-decodes first, then matches
/// the trailing `-NNNN` group and reassembles `name#NNNN`.
pub fn deslugify(slug: &str) -> EngineResult<Tag> {
    let invalid = || EngineError::InvalidSlug {
        raw: slug.to_string(),
    };
    let decoded = urlencoding::decode(slug).map_err(|_| invalid())?;
    let caps = slug_grammar()
        .captures(decoded.trim())
        .ok_or_else(invalid)?;
    let name = &caps[1];
    let digits = &caps[2];
    if name.is_empty() {
        return Err(invalid());
    }
    normalize_tag(&format!("{name}#{digits}")).map_err(|_| invalid())
}
