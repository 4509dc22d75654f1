//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_records.csv`
//! - `census.csv`
//!
//! Flags are written as `0`/`1`; `death` is empty for survivors.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentRow, CensusRow, OutputResult};

pub const AGENT_HEADER: [&str; 11] = [
    "tick", "agent_id", "agent", "x", "y", "age", "max_lifespan", "energy", "reproduced", "ate", "death",
];

pub const CENSUS_HEADER: [&str; 7] = [
    "tick", "elapsed_secs", "foxes", "rabbits", "scents", "grass_available", "grass_regrowing",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    agents:   Writer<File>,
    census:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut agents = Writer::from_path(dir.join("agent_records.csv"))?;
        agents.write_record(AGENT_HEADER)?;

        let mut census = Writer::from_path(dir.join("census.csv"))?;
        census.write_record(CENSUS_HEADER)?;

        Ok(Self { agents, census, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.label.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.age.to_string(),
                row.max_lifespan.to_string(),
                row.energy.to_string(),
                (row.reproduced as u8).to_string(),
                (row.ate as u8).to_string(),
                row.death.unwrap_or_default().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()> {
        self.census.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.foxes.to_string(),
            row.rabbits.to_string(),
            row.scents.to_string(),
            row.grass_available.to_string(),
            row.grass_regrowing.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.census.flush()?;
        Ok(())
    }
}
