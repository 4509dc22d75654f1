//! sweep — a seed × parameter grid of independent ecosystem runs.
//!
//! Every run is built from the same base configuration with one combination
//! of swept values applied, then all runs execute on Rayon's thread pool
//! (`RAYON_NUM_THREADS` caps it).  Prints one line per run and writes a JSON
//! summary to the path given as the first argument (default
//! `sweep_summary.json`).

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use eco_agent::Census;
use eco_core::{EcosystemConfig, SimConfig, Tick};
use eco_sim::{run_batch, Param, ParamGrid, RunSpec, SimObserver};

const SEEDS:   [u64; 4] = [1, 2, 3, 4];
const MINUTES: u64      = 10;

/// Remembers when each creature population first hit zero.
#[derive(Default)]
struct Extinction {
    rabbits: Option<Tick>,
    foxes:   Option<Tick>,
}

impl SimObserver for Extinction {
    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        if census.rabbits == 0 && self.rabbits.is_none() {
            self.rabbits = Some(tick);
        }
        if census.foxes == 0 && self.foxes.is_none() {
            self.foxes = Some(tick);
        }
    }
}

#[derive(Serialize)]
struct RunSummary {
    run:                usize,
    seed:               u64,
    values:             Vec<(Param, f64)>,
    foxes:              usize,
    rabbits:            usize,
    scents:             usize,
    grass_available:    usize,
    rabbits_extinct_at: Option<u64>,
    foxes_extinct_at:   Option<u64>,
}

fn describe(spec: &RunSpec) -> String {
    spec.values
        .iter()
        .map(|(p, v)| format!("{p:?}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let summary_path = std::env::args().nth(1).unwrap_or_else(|| "sweep_summary.json".to_owned());

    let base_sim = SimConfig::default();
    let sim = SimConfig {
        duration_ticks:        base_sim.make_clock().ticks_for_minutes(MINUTES),
        output_interval_ticks: 0,
        ..base_sim
    };

    let grid = ParamGrid::new(sim, EcosystemConfig::default())
        .seeds(SEEDS)
        .axis(Param::ScentInterval, [15.0, 30.0, 60.0])
        .axis(Param::TrackSpeed, [1.2, 1.5]);

    println!("=== sweep ===");
    println!("{} runs of {MINUTES} simulated minutes", grid.len());
    info!(runs = grid.len(), "sweep starting");

    let t0 = Instant::now();
    let results = run_batch(grid.runs(), |_| Extinction::default());
    let elapsed = t0.elapsed();

    let mut summaries = Vec::with_capacity(results.len());
    for result in results {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "run failed");
                continue;
            }
        };
        let c = outcome.census;
        println!(
            "  run {:>2}  seed {}  {:<32}  foxes={:>3}  rabbits={:>3}  scents={:>3}",
            outcome.spec.id,
            outcome.spec.sim.seed,
            describe(&outcome.spec),
            c.foxes,
            c.rabbits,
            c.scents,
        );
        summaries.push(RunSummary {
            run:                outcome.spec.id,
            seed:               outcome.spec.sim.seed,
            values:             outcome.spec.values,
            foxes:              c.foxes,
            rabbits:            c.rabbits,
            scents:             c.scents,
            grass_available:    c.grass_available,
            rabbits_extinct_at: outcome.observer.rabbits.map(|t| t.0),
            foxes_extinct_at:   outcome.observer.foxes.map(|t| t.0),
        });
    }

    let file = File::create(&summary_path).with_context(|| format!("creating {summary_path}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &summaries)?;

    println!();
    println!("{} of {} runs finished in {:.2?}", summaries.len(), grid.len(), elapsed);
    println!("Summary: {summary_path}");
    Ok(())
}
