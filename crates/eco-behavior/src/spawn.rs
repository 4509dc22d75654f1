//! Births queued during a tick, materialized after it ends.

use eco_agent::{Agent, AgentStore, Census};
use eco_core::AgentId;

/// Agents created during the current tick.
///
/// Offspring and scent markers are not visible to neighbor queries until the
/// next tick, so they wait here until the driver calls
/// [`materialize`](Self::materialize).  Insertion order is creation order.
#[derive(Debug, Default)]
pub struct SpawnQueue {
    agents:  Vec<Agent>,
    pending: Census,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, agent: Agent) {
        self.pending.count(&agent.species);
        self.agents.push(agent);
    }

    /// Queued counts per kind and mode.
    pub fn pending(&self) -> Census {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Insert every queued agent into `store`, emptying the queue.
    pub fn materialize(&mut self, store: &mut AgentStore) -> Vec<AgentId> {
        self.pending = Census::default();
        self.agents.drain(..).map(|a| store.insert(a)).collect()
    }
}
