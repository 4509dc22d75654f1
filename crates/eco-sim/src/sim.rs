//! The `Sim` struct and its tick loop.

use eco_agent::{AgentStore, Census};
use eco_behavior::{BehaviorModel, SpawnQueue, TickContext};
use eco_core::{AgentId, EcosystemConfig, RunRngs, SimClock, SimConfig, Tick};
use eco_spatial::{Landscape, NeighborIndex, RTreeIndex};
use tracing::{debug, info};

use crate::{AgentRecord, SimError, SimObserver, SimResult};

/// Most agents the arena can hold at once; slot indices are 32-bit.
const MAX_LIVE: usize = u32::MAX as usize - 1;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B, I>` holds all state of one run and drives the tick loop:
///
/// 1. **Index**: rebuild the neighbor index from tick-start positions.
/// 2. **Decide**: call [`BehaviorModel::decide`] for every agent live at tick
///    start, in ascending `AgentId` order, skipping agents killed earlier in
///    the tick.
/// 3. **Move**: call [`BehaviorModel::step`] for the same agents, with the
///    same skip rule.
/// 4. **Record**: on output ticks, capture one [`AgentRecord`] per tick-start
///    agent (dead ones included).
/// 5. **Reap**: drop the state of agents killed this tick, freeing their
///    slots for reuse under new ids.
/// 6. **Births**: insert offspring and scent markers queued during the tick.
/// 7. **Advance** the clock.
///
/// Kills are visible to every later callback in the same tick; births only
/// from the next tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel, I: NeighborIndex = RTreeIndex> {
    /// Run length, seed and output cadence.
    pub config: SimConfig,

    /// Species and world parameters, validated at build time.
    pub ecosystem: EcosystemConfig,

    /// Simulation clock.
    pub clock: SimClock,

    /// The population (generational SoA arena).
    pub agents: AgentStore,

    /// Movement and chance streams, both derived from `config.seed`.
    pub rngs: RunRngs,

    /// World bounds and obstacles.
    pub landscape: Landscape,

    /// The behavior model.  Called once per live agent per phase per tick.
    pub behavior: B,

    /// Neighbor index, rebuilt at the start of every tick.
    pub index: I,

    spawns:     SpawnQueue,
    /// Agents live at tick start, reused across ticks.
    tick_start: Vec<AgentId>,
    records:    Vec<AgentRecord>,
}

impl<B: BehaviorModel, I: NeighborIndex> Sim<B, I> {
    pub(crate) fn new(
        config:    SimConfig,
        ecosystem: EcosystemConfig,
        agents:    AgentStore,
        rngs:      RunRngs,
        landscape: Landscape,
        behavior:  B,
        index:     I,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            ecosystem,
            agents,
            rngs,
            landscape,
            behavior,
            index,
            spawns: SpawnQueue::new(),
            tick_start: Vec::new(),
            records: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// The tick about to be processed.
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Live population counts.
    pub fn census(&self) -> Census {
        self.agents.census()
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Returns the final census.  Use [`NoopObserver`][crate::NoopObserver]
    /// if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Census> {
        while self.now() < self.config.end_tick() {
            self.advance(observer)?;
        }
        let census = self.census();
        info!(
            tick = self.now().0,
            foxes = census.foxes,
            rabbits = census.rabbits,
            scents = census.scents,
            grass_available = census.grass_available,
            "simulation finished"
        );
        observer.on_sim_end(self.now(), &census);
        Ok(census)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.advance(observer)?;
        }
        Ok(())
    }

    fn advance<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        observer.on_tick_start(now);
        let census = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &census);
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<Census> {
        self.agents.clear_flags();
        self.index.rebuild(&self.agents);
        self.tick_start.clear();
        self.tick_start.extend(self.agents.live_ids());

        {
            let mut ctx = TickContext::new(
                now,
                &mut self.agents,
                &self.index,
                &self.landscape,
                &mut self.rngs,
                &mut self.spawns,
                &self.ecosystem,
            );
            for &agent in &self.tick_start {
                if ctx.store.is_live(agent) {
                    self.behavior.decide(agent, &mut ctx);
                }
            }
            for &agent in &self.tick_start {
                if ctx.store.is_live(agent) {
                    self.behavior.step(agent, &mut ctx);
                }
            }
        }

        // Records must be taken before reaped slots are handed to newborns.
        let output_tick = self.config.is_output_tick(now);
        if output_tick {
            self.records.clear();
            let agents = &self.agents;
            self.records.extend(self.tick_start.iter().map(|&id| AgentRecord::capture(agents, id, now)));
        }

        self.agents.reap();
        if self.agents.live_count() + self.spawns.len() > MAX_LIVE {
            return Err(SimError::PopulationOverflow {
                live:    self.agents.live_count(),
                pending: self.spawns.len(),
            });
        }
        self.spawns.materialize(&mut self.agents);

        let census = self.census();
        if output_tick {
            debug!(
                tick = now.0,
                foxes = census.foxes,
                rabbits = census.rabbits,
                scents = census.scents,
                grass_available = census.grass_available,
                grass_regrowing = census.grass_regrowing,
                "census"
            );
            observer.on_snapshot(now, &self.records, &census);
        }
        Ok(census)
    }
}
