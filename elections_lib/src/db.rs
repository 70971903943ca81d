//! SQLite storage for results, desk calls and race meta.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use elections_model::types::{Call, RaceMeta, RawResult};
use elections_model::{Query, ResultQuery};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::config::{CalendarRow, RaceConfig};

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// `ingest_meta` key holding the RFC 3339 time of the last results load.
pub const LAST_LOADED_AT: &str = "last_loaded_at";

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, e)| DbError::from(e))
    }

    /// Get a reference to the underlying connection (for tests).
    #[doc(hidden)]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn init(&self) -> Result<(), DbError> {
        // Check schema version before applying DDL so migrations can add
        // columns to tables created by older releases.
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.migrate_v1()?;
            self.conn.pragma_update(None, "user_version", 1)?;
        }

        let schema = include_str!("../../schema/sqlite.sql");
        self.conn.execute_batch(schema)?;

        Ok(())
    }

    /// Race meta predating incumbency tracking lacks `current_party`,
    /// `race_type` and `race_order`.
    fn migrate_v1(&self) -> Result<(), DbError> {
        for sql in &[
            "ALTER TABLE race_meta ADD COLUMN current_party TEXT",
            "ALTER TABLE race_meta ADD COLUMN race_type TEXT",
            "ALTER TABLE race_meta ADD COLUMN race_order INTEGER",
        ] {
            match self.conn.execute(sql, []) {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(_, Some(ref msg)))
                    if msg.contains("duplicate column name")
                        || msg.contains("no such table") => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn get_meta(&self, key: &str) -> Result<Option<String>, DbError> {
        self.conn
            .query_row(
                "SELECT value FROM ingest_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn set_meta(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO ingest_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn result_count(&self) -> Result<i64, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(1) FROM results", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Replace every stored result with `results`, in one transaction.
    /// Insertion order becomes the select order.
    pub fn replace_results(&mut self, results: &[RawResult]) -> Result<usize, DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM results", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO results (
                   id, raceid, level, officename, statepostal, last, is_ballot_measure, payload
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for result in results {
                let payload = serde_json::to_string(result)?;
                stmt.execute(params![
                    result.id,
                    result.raceid,
                    result.level.map(|l| l.as_str()),
                    result.officename,
                    result.statepostal,
                    result.last,
                    result.is_ballot_measure(),
                    payload,
                ])?;
            }
        }
        tx.commit()?;
        Ok(results.len())
    }

    /// Seed a default call for every callable result that lacks one.
    /// Existing calls, including desk edits, are left untouched.
    pub fn create_calls(&mut self) -> Result<usize, DbError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO calls (result_id, accept_ap, override_winner)
             SELECT id, 1, 0 FROM results
             WHERE level IS NULL OR level NOT IN ('county', 'township')",
            [],
        )?;
        Ok(inserted)
    }

    /// Rebuild race meta for every callable result from the poll calendar
    /// (keyed by state postal) and per-race configuration (keyed by race id).
    /// Results matched by neither get no meta row.
    pub fn seed_race_meta(
        &mut self,
        calendar: &[CalendarRow],
        races: &BTreeMap<String, RaceConfig>,
    ) -> Result<usize, DbError> {
        let by_state: HashMap<&str, &CalendarRow> =
            calendar.iter().map(|row| (row.key.as_str(), row)).collect();

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM race_meta", [])?;
        let mut inserted = 0;
        {
            let mut select = tx.prepare(
                "SELECT id, raceid, statepostal FROM results
                 WHERE level IS NULL OR level NOT IN ('county', 'township')
                 ORDER BY rowid",
            )?;
            let targets: Vec<(String, Option<String>, String)> = select
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
                .collect::<Result<_, _>>()?;

            let mut insert = tx.prepare(
                "INSERT INTO race_meta (
                   result_id, poll_closing, first_results, current_party, race_type, race_order
                 )
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (id, raceid, statepostal) in targets {
                let poll = by_state.get(statepostal.as_str());
                let race = raceid.as_ref().and_then(|r| races.get(r));
                if poll.is_none() && race.is_none() {
                    continue;
                }
                insert.execute(params![
                    id,
                    poll.map(|p| p.time_est.as_str()),
                    poll.map(|p| p.first_results_est.as_str()),
                    race.and_then(|r| r.current_party.as_deref()),
                    race.and_then(|r| r.race_type.as_deref()),
                    race.and_then(|r| r.order),
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Update one result's call. Returns false if the result has no call row.
    pub fn set_call(
        &self,
        result_id: &str,
        accept_ap: Option<bool>,
        override_winner: Option<bool>,
    ) -> Result<bool, DbError> {
        let updated = self.conn.execute(
            "UPDATE calls SET
               accept_ap = COALESCE(?2, accept_ap),
               override_winner = COALESCE(?3, override_winner)
             WHERE result_id = ?1",
            params![result_id, accept_ap, override_winner],
        )?;
        Ok(updated > 0)
    }

    /// Set `accept_ap` on every call belonging to a race.
    pub fn set_race_accept_ap(&self, race_id: &str, accept_ap: bool) -> Result<usize, DbError> {
        let updated = self.conn.execute(
            "UPDATE calls SET accept_ap = ?2
             WHERE result_id IN (SELECT id FROM results WHERE raceid = ?1)",
            params![race_id, accept_ap],
        )?;
        Ok(updated)
    }

    /// Select results matching `query`, in ingestion order.
    pub fn select_results(&self, query: &ResultQuery) -> Result<Vec<RawResult>, DbError> {
        let mut sql = String::from("SELECT payload FROM results WHERE 1=1");
        let mut params_vec: Vec<String> = Vec::new();
        query.add_to_sql(&mut sql, &mut params_vec);
        sql.push_str(" ORDER BY rowid");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params_vec.iter()), |row| {
            row.get::<_, String>(0)
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(serde_json::from_str(&row?)?);
        }
        Ok(results)
    }

    pub fn distinct_states(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT statepostal FROM results ORDER BY statepostal")?;
        let states = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(states)
    }

    pub fn calls(&self) -> Result<HashMap<String, Call>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT result_id, accept_ap, override_winner FROM calls")?;
        let rows = stmt.query_map([], |row| {
            Ok(Call {
                result_id: row.get(0)?,
                accept_ap: row.get(1)?,
                override_winner: row.get(2)?,
            })
        })?;
        let mut calls = HashMap::new();
        for row in rows {
            let call = row?;
            calls.insert(call.result_id.clone(), call);
        }
        Ok(calls)
    }

    pub fn race_metas(&self) -> Result<HashMap<String, RaceMeta>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT result_id, poll_closing, first_results, current_party, race_type, race_order
             FROM race_meta",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RaceMeta {
                result_id: row.get(0)?,
                poll_closing: row.get(1)?,
                first_results: row.get(2)?,
                current_party: row.get(3)?,
                race_type: row.get(4)?,
                order: row.get(5)?,
            })
        })?;
        let mut metas = HashMap::new();
        for row in rows {
            let meta = row?;
            metas.insert(meta.result_id.clone(), meta);
        }
        Ok(metas)
    }
}
