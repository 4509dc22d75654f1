//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use eco_agent::Census;
use eco_core::{SimConfig, Tick};
use eco_sim::{AgentRecord, SimObserver};
use tracing::warn;

use crate::row::{AgentRow, CensusRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent records and census rows to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Rows are written on output ticks only.  Errors from the writer are stored
/// internally because `SimObserver` methods have no return value.  After
/// `sim.run()` returns, check for errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    ticks_per_second: u32,
    rows:             Vec<AgentRow>,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert ticks
    /// to simulated seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            ticks_per_second: config.ticks_per_second.max(1),
            rows:             Vec::new(),
            last_error:       None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn elapsed_secs(&self, tick: Tick) -> f64 {
        tick.0 as f64 / self.ticks_per_second as f64
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, records: &[AgentRecord], census: &Census) {
        self.rows.clear();
        self.rows.extend(records.iter().map(AgentRow::from));
        if !self.rows.is_empty() {
            let result = self.writer.write_agents(&self.rows);
            self.store_err(result);
        }

        let row = CensusRow::new(tick.0, self.elapsed_secs(tick), census);
        let result = self.writer.write_census(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _census: &Census) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
