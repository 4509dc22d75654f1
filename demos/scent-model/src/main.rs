//! scent-model — one run of the fox / rabbit / grass ecosystem with scent
//! trails.
//!
//! ```text
//! scent-model [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! Without a config file the run uses the default ecosystem (20 foxes, 20
//! rabbits, 60 grass patches on a 750 × 750 world) for 30 simulated minutes,
//! recording every simulated second.  Any field of the JSON file may be
//! omitted; missing fields keep their defaults:
//!
//! ```json
//! { "sim": { "seed": 7 }, "ecosystem": { "scent": null }, "obstacles": [] }
//! ```
//!
//! Set `RUST_LOG=debug` to see the census at every output tick.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use eco_agent::Census;
use eco_core::{EcosystemConfig, Rect, SimConfig, Tick};
use eco_output::{CsvWriter, SimOutputObserver};
use eco_sim::{AgentRecord, SimBuilder, SimObserver};

const DEFAULT_MINUTES: u64 = 30;

#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:       SimConfig,
    ecosystem: EcosystemConfig,
    obstacles: Vec<Rect>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let base = SimConfig::default();
        let clock = base.make_clock();
        Self {
            sim: SimConfig {
                duration_ticks:        clock.ticks_for_minutes(DEFAULT_MINUTES),
                output_interval_ticks: clock.ticks_for_secs(1),
                ..base
            },
            ecosystem: EcosystemConfig::default(),
            obstacles: Vec::new(),
        }
    }
}

// ── Progress printer ──────────────────────────────────────────────────────────

/// Forwards to the CSV observer and prints a census line every simulated
/// minute.
struct Progress<W: eco_output::OutputWriter> {
    inner:          SimOutputObserver<W>,
    ticks_per_line: u64,
    ticks_per_sec:  f64,
    peak:           Census,
}

impl<W: eco_output::OutputWriter> SimObserver for Progress<W> {
    fn on_snapshot(&mut self, tick: Tick, records: &[AgentRecord], census: &Census) {
        self.inner.on_snapshot(tick, records, census);
    }

    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        self.peak.foxes = self.peak.foxes.max(census.foxes);
        self.peak.rabbits = self.peak.rabbits.max(census.rabbits);
        self.peak.scents = self.peak.scents.max(census.scents);
        if self.ticks_per_line > 0 && tick.0.is_multiple_of(self.ticks_per_line) {
            println!(
                "  t={:>7.0}s  foxes={:>4}  rabbits={:>4}  scents={:>4}  grass={:>3}/{:<3}",
                tick.0 as f64 / self.ticks_per_sec,
                census.foxes,
                census.rabbits,
                census.scents,
                census.grass_available,
                census.grass(),
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, census: &Census) {
        self.inner.on_sim_end(final_tick, census);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
            serde_json::from_reader::<_, DemoConfig>(BufReader::new(file))
                .with_context(|| format!("parsing config {path}"))?
        }
        None => DemoConfig::default(),
    };
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "output".to_owned()));
    fs::create_dir_all(&output_dir).with_context(|| format!("creating {}", output_dir.display()))?;

    println!("=== scent-model ===");
    println!(
        "Seed: {}  |  Ticks: {}  |  Scent trail: {}",
        config.sim.seed,
        config.sim.duration_ticks,
        match &config.ecosystem.scent {
            Some(s) => format!("every {} ticks, lasting {}", s.interval, s.lifetime),
            None => "off".to_owned(),
        },
    );

    let mut sim = SimBuilder::new(config.sim.clone(), config.ecosystem)
        .obstacles(config.obstacles)
        .build()?;
    let start = sim.census();
    println!(
        "Initial: {} foxes, {} rabbits, {} grass",
        start.foxes,
        start.rabbits,
        start.grass()
    );

    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = Progress {
        inner:          SimOutputObserver::new(writer, &config.sim),
        ticks_per_line: config.sim.make_clock().ticks_for_minutes(1),
        ticks_per_sec:  config.sim.ticks_per_second.max(1) as f64,
        peak:           start,
    };

    let t0 = Instant::now();
    let end = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        anyhow::bail!("output error: {e}");
    }

    println!();
    println!("Finished in {:.2?}", elapsed);
    println!(
        "Final:   {} foxes, {} rabbits, {} scents, grass {} available / {} regrowing",
        end.foxes, end.rabbits, end.scents, end.grass_available, end.grass_regrowing
    );
    println!(
        "Peak:    {} foxes, {} rabbits, {} scents",
        obs.peak.foxes, obs.peak.rabbits, obs.peak.scents
    );
    println!("Output:  {}", output_dir.display());
    Ok(())
}
