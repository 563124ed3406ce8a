//! Shared primitive types used across the entire engine.

/// Canonical lowercase raider tag (`name#NNNN`).
pub type Tag = String;

/// URL-safe slug form of a tag (`name-NNNN`).
pub type Slug = String;

/// Primary key of a raider row.
pub type RaiderId = String;

/// Primary key of a report row (comments included).
pub type ReportId = String;
