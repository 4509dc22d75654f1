//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `agent_records.parquet`
//! - `census.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{AgentRow, CensusRow, OutputResult};

fn agent_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",         DataType::UInt64,  false),
        Field::new("agent_id",     DataType::UInt64,  false),
        Field::new("agent",        DataType::Utf8,    false),
        Field::new("x",            DataType::Float64, false),
        Field::new("y",            DataType::Float64, false),
        Field::new("age",          DataType::UInt32,  false),
        Field::new("max_lifespan", DataType::UInt32,  false),
        Field::new("energy",       DataType::UInt32,  false),
        Field::new("reproduced",   DataType::Boolean, false),
        Field::new("ate",          DataType::Boolean, false),
        Field::new("death",        DataType::Utf8,    true),
    ]))
}

fn census_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",            DataType::UInt64,  false),
        Field::new("elapsed_secs",    DataType::Float64, false),
        Field::new("foxes",           DataType::UInt64,  false),
        Field::new("rabbits",         DataType::UInt64,  false),
        Field::new("scents",          DataType::UInt64,  false),
        Field::new("grass_available", DataType::UInt64,  false),
        Field::new("grass_regrowing", DataType::UInt64,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// Census rows are small and buffered until `finish()`, which **must** be
/// called: it writes them and the Parquet footers.  Files written without
/// calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    agents:        Option<ArrowWriter<File>>,
    census:        Option<ArrowWriter<File>>,
    agent_schema:  Arc<Schema>,
    census_schema: Arc<Schema>,
    census_rows:   Vec<CensusRow>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let agent_schema = agent_schema();
        let census_schema = census_schema();

        let agent_file = File::create(dir.join("agent_records.parquet"))?;
        let agents = ArrowWriter::try_new(agent_file, Arc::clone(&agent_schema), Some(snappy_props()))?;

        let census_file = File::create(dir.join("census.parquet"))?;
        let census = ArrowWriter::try_new(census_file, Arc::clone(&census_schema), Some(snappy_props()))?;

        Ok(Self {
            agents: Some(agents),
            census: Some(census),
            agent_schema,
            census_schema,
            census_rows: Vec::new(),
        })
    }

    fn census_batch(&self) -> OutputResult<RecordBatch> {
        let mut ticks     = UInt64Builder::new();
        let mut elapsed   = Float64Builder::new();
        let mut foxes     = UInt64Builder::new();
        let mut rabbits   = UInt64Builder::new();
        let mut scents    = UInt64Builder::new();
        let mut available = UInt64Builder::new();
        let mut regrowing = UInt64Builder::new();

        for row in &self.census_rows {
            ticks.append_value(row.tick);
            elapsed.append_value(row.elapsed_secs);
            foxes.append_value(row.foxes);
            rabbits.append_value(row.rabbits);
            scents.append_value(row.scents);
            available.append_value(row.grass_available);
            regrowing.append_value(row.grass_regrowing);
        }

        Ok(RecordBatch::try_new(
            Arc::clone(&self.census_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(elapsed.finish()),
                Arc::new(foxes.finish()),
                Arc::new(rabbits.finish()),
                Arc::new(scents.finish()),
                Arc::new(available.finish()),
                Arc::new(regrowing.finish()),
            ],
        )?)
    }
}

impl OutputWriter for ParquetWriter {
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.agents.as_mut() else {
            return Ok(());
        };

        let mut ticks        = UInt64Builder::new();
        let mut agent_ids    = UInt64Builder::new();
        let mut labels       = StringBuilder::new();
        let mut xs           = Float64Builder::new();
        let mut ys           = Float64Builder::new();
        let mut ages         = UInt32Builder::new();
        let mut lifespans    = UInt32Builder::new();
        let mut energies     = UInt32Builder::new();
        let mut reproduced   = BooleanBuilder::new();
        let mut ate          = BooleanBuilder::new();
        let mut deaths       = StringBuilder::new();

        for row in rows {
            ticks.append_value(row.tick);
            agent_ids.append_value(row.agent_id);
            labels.append_value(row.label);
            xs.append_value(row.x);
            ys.append_value(row.y);
            ages.append_value(row.age);
            lifespans.append_value(row.max_lifespan);
            energies.append_value(row.energy);
            reproduced.append_value(row.reproduced);
            ate.append_value(row.ate);
            deaths.append_option(row.death);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.agent_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(agent_ids.finish()),
                Arc::new(labels.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(ages.finish()),
                Arc::new(lifespans.finish()),
                Arc::new(energies.finish()),
                Arc::new(reproduced.finish()),
                Arc::new(ate.finish()),
                Arc::new(deaths.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_census(&mut self, row: &CensusRow) -> OutputResult<()> {
        if self.census.is_some() {
            self.census_rows.push(*row);
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.agents.take() {
            w.close()?;
        }
        if self.census.is_some() && !self.census_rows.is_empty() {
            let batch = self.census_batch()?;
            if let Some(w) = self.census.as_mut() {
                w.write(&batch)?;
            }
            self.census_rows.clear();
        }
        if let Some(w) = self.census.take() {
            w.close()?;
        }
        Ok(())
    }
}
