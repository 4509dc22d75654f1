//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `agent_records` and `census`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentRow, CensusRow, OutputResult};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_records (
                 tick         INTEGER NOT NULL,
                 agent_id     INTEGER NOT NULL,
                 agent        TEXT    NOT NULL,
                 x            REAL    NOT NULL,
                 y            REAL    NOT NULL,
                 age          INTEGER NOT NULL,
                 max_lifespan INTEGER NOT NULL,
                 energy       INTEGER NOT NULL,
                 reproduced   INTEGER NOT NULL,
                 ate          INTEGER NOT NULL,
                 death        TEXT
             );
             CREATE TABLE IF NOT EXISTS census (
                 tick            INTEGER PRIMARY KEY,
                 elapsed_secs    REAL    NOT NULL,
                 foxes           INTEGER NOT NULL,
                 rabbits         INTEGER NOT NULL,
                 scents          INTEGER NOT NULL,
                 grass_available INTEGER NOT NULL,
                 grass_regrowing INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_records \
                 (tick, agent_id, agent, x, y, age, max_lifespan, energy, reproduced, ate, death) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.agent_id,
                    row.label,
                    row.x,
                    row.y,
                    row.age,
                    row.max_lifespan,
                    row.energy,
                    row.reproduced as i64,
                    row.ate as i64,
                    row.death,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO census \
             (tick, elapsed_secs, foxes, rabbits, scents, grass_available, grass_regrowing) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick,
                row.elapsed_secs,
                row.foxes,
                row.rabbits,
                row.scents,
                row.grass_available,
                row.grass_regrowing,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
