//! Fluent builder for an initial `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use eco_agent::{Agent, AgentStoreBuilder, Grass, GrassPhase, Motion, Species, Vitals};
//! use eco_core::Vec2;
//!
//! let patch = Agent {
//!     pos:     Vec2::new(10.0, 10.0),
//!     motion:  Motion::default(),
//!     vitals:  Vitals::INERT,
//!     species: Species::Grass(Grass { regrow_delay: 240, phase: GrassPhase::Available }),
//! };
//!
//! let store = AgentStoreBuilder::with_capacity(60)
//!     .extend(std::iter::repeat(patch).take(60))
//!     .build();
//!
//! assert_eq!(store.live_count(), 60);
//! ```

use eco_core::AgentId;

use crate::{Agent, AgentStore};

/// Collects agents and inserts them in push order.  In a fresh store that is
/// also slot order, so ids from one build sort the way they were pushed.
#[derive(Default)]
pub struct AgentStoreBuilder {
    agents: Vec<Agent>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { agents: Vec::with_capacity(capacity) }
    }

    pub fn push(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn extend(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn build(self) -> AgentStore {
        self.build_with_ids().0
    }

    /// Like [`build`](Self::build), also returning each agent's id in push
    /// order.
    pub fn build_with_ids(self) -> (AgentStore, Vec<AgentId>) {
        let mut store = AgentStore::with_capacity(self.agents.len());
        let ids = self.agents.into_iter().map(|a| store.insert(a)).collect();
        (store, ids)
    }
}
