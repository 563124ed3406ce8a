//! Identity canonicalization tests.
//!
//! Tests cover: tag grammar, lowercase canonical form, slug round trips,
//! and malformed-slug rejection.

use raidwatch_core::error::EngineError;
use raidwatch_core::identity::{deslugify, normalize_tag, slugify};

/// Valid tags canonicalize to their trimmed lowercase form.
#[test]
fn normalize_lowercases_and_trims() {
    let tag = normalize_tag("  ShadowWolf#1337  ").unwrap();
    assert_eq!(tag, "shadowwolf#1337");

    let tag = normalize_tag("xX-Slayer_99#0001").unwrap();
    assert_eq!(tag, "xx-slayer_99#0001");
}

#[test]
fn normalize_rejects_malformed_tags() {
    let bad = [
        "",
        "noSuffix",
        "name#123",     // 3 digits
        "name#12345",   // 5 digits
        "#1234",        // empty name
        "na me#1234",   // space in name
        "name#12a4",    // non-digit suffix
        "name1234",     // missing separator
    ];
    for raw in bad {
        let err = normalize_tag(raw).unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidIdentity { .. }),
            "expected InvalidIdentity for {raw:?}, got {err:?}"
        );
    }
}

/// For every valid tag, deslugify(slugify(t)) == canonical(t).
#[test]
fn slug_round_trip() {
    let tags = [
        "ShadowWolf#1337",
        "rat-king#0420",
        "ak-47-enjoyer#0001",
        "agent007#9999",
        "x#0000",
    ];
    for raw in tags {
        let canonical = normalize_tag(raw).unwrap();
        let slug = slugify(&canonical);
        assert_eq!(
            deslugify(&slug).unwrap(),
            canonical,
            "round trip failed for {raw:?} via {slug:?}"
        );
    }
}

/// Names may themselves contain hyphens and trailing digits: the LAST
/// hyphen-plus-4-digits group is always the suffix.
#[test]
fn deslugify_is_greedy_on_the_prefix() {
    assert_eq!(deslugify("ak-47-0001").unwrap(), "ak-47#0001");
    assert_eq!(deslugify("agent007-1337").unwrap(), "agent007#1337");
    assert_eq!(deslugify("a-b-c-0042").unwrap(), "a-b-c#0042");
}

#[test]
fn deslugify_url_decodes_before_matching() {
    // %57 = 'W': decodes to a valid slug.
    assert_eq!(deslugify("Shadow%57olf-1337").unwrap(), "shadowwolf#1337");
}

/// Malformed slugs signal InvalidSlug — never any other error, never a panic.
#[test]
fn deslugify_rejects_malformed_slugs() {
    let bad = [
        "",
        "nodigits",
        "short-123",      // 3-digit suffix
        "long-12345",     // 5-digit suffix: no 4-digit group at the end
        "-1234",          // empty prefix
        "sneaky%20rat-0001", // decodes to a space in the name
        "name#1234",      // a tag is not a slug
    ];
    for raw in bad {
        let err = deslugify(raw).unwrap_err();
        assert!(
            matches!(err, EngineError::InvalidSlug { .. }),
            "expected InvalidSlug for {raw:?}, got {err:?}"
        );
    }
}
