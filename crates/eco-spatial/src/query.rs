//! Filtered neighbor result sets.

use eco_agent::{AgentStore, Kind, Species};
use eco_core::AgentId;

use crate::NeighborIndex;

/// The agents near a subject, in ascending id order.
///
/// Index snapshots are taken at tick start, so construction drops every
/// candidate the store no longer reports live.  While a query exists it
/// borrows the store, so nothing can be killed underneath it; take the ids
/// you need out with [`first`](Self::first) or [`ids`](Self::ids) before
/// mutating.
///
/// ```ignore
/// let grass = NeighborQuery::around(store, index, me, radius)
///     .filter_kind(Kind::Grass)
///     .filter_species(Species::is_available_grass)
///     .first();
/// ```
pub struct NeighborQuery<'a> {
    store: &'a AgentStore,
    ids:   Vec<AgentId>,
}

impl<'a> NeighborQuery<'a> {
    /// Live agents within `radius` of `subject`'s position, excluding
    /// `subject` itself.
    pub fn around<I: NeighborIndex + ?Sized>(
        store:   &'a AgentStore,
        index:   &I,
        subject: AgentId,
        radius:  f64,
    ) -> Self {
        let mut ids = Vec::new();
        index.within(store.pos[subject], radius, &mut ids);
        ids.retain(|&id| id != subject && store.is_live(id));
        Self { store, ids }
    }

    pub fn filter_kind(mut self, kind: Kind) -> Self {
        let store = self.store;
        self.ids.retain(|&id| store.kind(id) == kind);
        self
    }

    pub fn filter_species(mut self, pred: impl Fn(&Species) -> bool) -> Self {
        let store = self.store;
        self.ids.retain(|&id| pred(&store.species[id]));
        self
    }

    /// General predicate over the candidate's id and the whole store.
    pub fn filter(mut self, pred: impl Fn(AgentId, &AgentStore) -> bool) -> Self {
        let store = self.store;
        self.ids.retain(|&id| pred(id, store));
        self
    }

    /// The lowest-id match.  Arbitrary with respect to distance.
    pub fn first(&self) -> Option<AgentId> {
        self.ids.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.ids.iter().copied()
    }

    pub fn ids(&self) -> &[AgentId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<AgentId> {
        self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
