//! Mutable per-tick simulation state passed to every behavior callback.

use eco_agent::{Agent, AgentStore, Census, DeathCause, Kind, RabbitMode, Species};
use eco_core::{AgentId, EcosystemConfig, RunRngs, Tick};
use eco_spatial::{Landscape, NeighborIndex, NeighborQuery};
use tracing::trace;

use crate::SpawnQueue;

/// Everything a behavior may read or mutate during one tick.
///
/// Built once per tick by eco-sim.  The driver calls behaviors one agent at a
/// time, so every mutation is visible to the next callback: kills take effect
/// immediately, while births wait in `spawns` until the tick ends.
///
/// # Lifetimes
///
/// All borrows live for one tick.  The neighbor index was rebuilt at tick
/// start and is not updated as agents move.
pub struct TickContext<'a> {
    pub tick:      Tick,
    pub store:     &'a mut AgentStore,
    pub index:     &'a dyn NeighborIndex,
    pub landscape: &'a Landscape,
    pub rngs:      &'a mut RunRngs,
    pub spawns:    &'a mut SpawnQueue,
    pub config:    &'a EcosystemConfig,
    /// Live counts, kept current as agents are killed.  Grass is never
    /// killed and its phase changes are not tracked here.
    live:          Census,
}

impl<'a> TickContext<'a> {
    pub fn new(
        tick:      Tick,
        store:     &'a mut AgentStore,
        index:     &'a dyn NeighborIndex,
        landscape: &'a Landscape,
        rngs:      &'a mut RunRngs,
        spawns:    &'a mut SpawnQueue,
        config:    &'a EcosystemConfig,
    ) -> Self {
        let live = store.census();
        Self { tick, store, index, landscape, rngs, spawns, config, live }
    }

    /// Neighbors of `agent` within the configured proximity radius.
    pub fn neighbors(&self, agent: AgentId) -> NeighborQuery<'_> {
        NeighborQuery::around(&*self.store, self.index, agent, self.config.world.proximity_radius)
    }

    /// Remove `agent` from the population now.
    pub fn kill(&mut self, agent: AgentId, cause: DeathCause) {
        let species = &self.store.species[agent];
        match species {
            Species::Fox(_) => self.live.foxes -= 1,
            Species::Rabbit(RabbitMode::Active(_)) => self.live.rabbits -= 1,
            Species::Rabbit(RabbitMode::Scent(_)) => self.live.scents -= 1,
            Species::Grass(_) => {}
        }
        trace!(tick = self.tick.0, ?agent, kind = ?species.kind(), ?cause, "death");
        self.store.kill(agent, cause);
    }

    /// Queue `agent` for insertion at the end of the tick.
    pub fn spawn(&mut self, agent: Agent) {
        trace!(tick = self.tick.0, kind = ?agent.kind(), x = agent.pos.x, y = agent.pos.y, "birth");
        self.spawns.push(agent);
    }

    /// Live creatures of `kind` now plus those queued to be born this tick.
    /// Scent markers are not counted as rabbits.
    pub fn projected_population(&self, kind: Kind) -> usize {
        let pending = self.spawns.pending();
        match kind {
            Kind::Fox => self.live.foxes + pending.foxes,
            Kind::Rabbit => self.live.rabbits + pending.rabbits,
            Kind::Grass => self.live.grass() + pending.grass(),
        }
    }
}
