//! SQLite run log.
//!
//! RULE: Only store.rs talks to the database.
//! The runner calls store methods; it never executes SQL directly.

use crate::{error::ChoreoResult, event::EventLogEntry, types::Tick};
use rusqlite::{params, Connection, OptionalExtension};

pub struct ChoreoStore {
    conn: Connection,
}

impl ChoreoStore {
    /// Open (or create) the run log at `path`. Accepts SQLite URIs.
    pub fn open(path: &str) -> ChoreoResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // :memory: answers "memory" here and keeps going.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ChoreoResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ChoreoResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(
        &self,
        run_id: &str,
        choreography: &str,
        num_bots: usize,
        version: &str,
    ) -> ChoreoResult<()> {
        let started_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO run (run_id, choreography, num_bots, version, started_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![run_id, choreography, num_bots as i64, version, started_at],
        )?;
        Ok(())
    }

    pub fn run_choreography(&self, run_id: &str) -> ChoreoResult<Option<String>> {
        let name = self
            .conn
            .query_row(
                "SELECT choreography FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> ChoreoResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, tick, step, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.run_id,
                entry.tick as i64,
                entry.step,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_tick(&self, run_id: &str, tick: Tick) -> ChoreoResult<Vec<EventLogEntry>> {
        self.query_events(
            "SELECT id, run_id, tick, step, event_type, payload
             FROM event_log WHERE run_id = ?1 AND tick = ?2
             ORDER BY id ASC",
            params![run_id, tick as i64],
        )
    }

    pub fn events_of_type(&self, run_id: &str, event_type: &str) -> ChoreoResult<Vec<EventLogEntry>> {
        self.query_events(
            "SELECT id, run_id, tick, step, event_type, payload
             FROM event_log WHERE run_id = ?1 AND event_type = ?2
             ORDER BY id ASC",
            params![run_id, event_type],
        )
    }

    pub fn all_events(&self, run_id: &str) -> ChoreoResult<Vec<EventLogEntry>> {
        self.query_events(
            "SELECT id, run_id, tick, step, event_type, payload
             FROM event_log WHERE run_id = ?1
             ORDER BY id ASC",
            params![run_id],
        )
    }

    fn query_events(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
    ) -> ChoreoResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt
            .query_map(args, |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    run_id:     row.get(1)?,
                    tick:       row.get::<_, i64>(2)? as u64,
                    step:       row.get(3)?,
                    event_type: row.get(4)?,
                    payload:    row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(run_id: &str, tick: Tick) -> EventLogEntry {
        EventLogEntry {
            id:         None,
            run_id:     run_id.to_string(),
            tick,
            step:       "hide_ball".to_string(),
            event_type: "step_started".to_string(),
            payload:    "{}".to_string(),
        }
    }

    #[test]
    fn open_memory_path_migrates_and_logs() {
        let store = ChoreoStore::open(":memory:").unwrap();
        store.migrate().unwrap();
        store.insert_run("run-1", "crossing_squares", 32, "0.1.0").unwrap();
        store.append_event(&entry("run-1", 3)).unwrap();

        assert_eq!(
            store.run_choreography("run-1").unwrap().as_deref(),
            Some("crossing_squares")
        );
        let events = store.events_for_tick("run-1", 3).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].id.is_some());
        assert!(store.events_for_tick("run-1", 4).unwrap().is_empty());
    }

    #[test]
    fn events_need_a_known_run() {
        let store = ChoreoStore::open(":memory:").unwrap();
        store.migrate().unwrap();
        assert!(store.append_event(&entry("no-such-run", 0)).is_err());
    }
}
