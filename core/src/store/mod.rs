//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! Engine components call store methods — they never execute SQL directly.

mod comment;
mod report;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::{
    error::{EngineError, EngineResult},
    identity::RaiderRecord,
};

pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open (or create) the report database at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        if path == ":memory:" {
            return Self::in_memory();
        }
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| EngineError::StoreUnavailable(e.to_string()))?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (tests and demo seeding).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| EngineError::StoreUnavailable(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Raider ─────────────────────────────────────────────────

    /// Insert-or-fetch a raider by canonical tag. The submission that
    /// creates the row wins the display casing; later submissions with
    /// different casing hit the conflict path and change nothing.
    pub fn upsert_raider(
        &self,
        tag: &str,
        display_tag: &str,
        now: &str,
    ) -> EngineResult<RaiderRecord> {
        self.conn.execute(
            "INSERT INTO raiders (id, tag, display_tag, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(tag) DO NOTHING",
            params![Uuid::new_v4().to_string(), tag, display_tag, now],
        )?;
        self.raider_by_tag(tag)?.ok_or_else(|| EngineError::NotFound {
            entity: "raider",
            key: tag.to_string(),
        })
    }

    pub fn raider_by_tag(&self, tag: &str) -> EngineResult<Option<RaiderRecord>> {
        self.conn
            .query_row(
                "SELECT id, tag, display_tag, created_at FROM raiders WHERE tag = ?1",
                params![tag],
                |row| {
                    Ok(RaiderRecord {
                        id: row.get(0)?,
                        tag: row.get(1)?,
                        display_tag: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    // ── Test / summary helpers ─────────────────────────────────

    pub fn raider_count(&self) -> EngineResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM raiders", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
