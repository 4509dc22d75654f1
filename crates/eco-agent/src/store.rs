//! Generational Structure-of-Arrays agent arena.
//!
//! # Agent lifecycle
//!
//! ```text
//!   insert ──► live ──kill──► dead (id stops resolving, columns still readable)
//!                                 │
//!                               reap (end of tick)
//!                                 ▼
//!                           slot recycled by a later insert under a new id
//! ```
//!
//! Liveness and slot versions live in a `SlotMap`; per-agent state lives in
//! `SecondaryMap` columns keyed by the same [`AgentId`].  A killed agent
//! keeps its column entries until the end-of-tick reap so that the tick's
//! records can still report it.

use eco_core::{AgentId, Vec2};
use slotmap::{SecondaryMap, SlotMap};

use crate::{Agent, Census, DeathCause, Kind, Motion, Species, TickFlags, Vitals};

/// Per-agent column keyed by [`AgentId`].
pub type AgentColumn<T> = SecondaryMap<AgentId, T>;

/// Structure-of-Arrays storage for the population.
///
/// Each public column is indexed directly by id:
///
/// ```ignore
/// let pos = store.pos[agent];
/// ```
///
/// Indexing with the id of an agent that has been reaped panics; callers
/// check [`is_live`](Self::is_live) first.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    pub pos:     AgentColumn<Vec2>,
    pub motion:  AgentColumn<Motion>,
    pub vitals:  AgentColumn<Vitals>,
    pub species: AgentColumn<Species>,
    /// What happened to each agent this tick.
    pub flags:   AgentColumn<TickFlags>,

    /// Live agents only.  Killing removes the key, which retires the id.
    live:        SlotMap<AgentId, ()>,
    /// Insertion number of each agent, unique for the whole run.
    serial:      AgentColumn<u64>,
    next_serial: u64,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pos:         SecondaryMap::with_capacity(capacity),
            motion:      SecondaryMap::with_capacity(capacity),
            vitals:      SecondaryMap::with_capacity(capacity),
            species:     SecondaryMap::with_capacity(capacity),
            flags:       SecondaryMap::with_capacity(capacity),
            live:        SlotMap::with_capacity_and_key(capacity),
            serial:      SecondaryMap::with_capacity(capacity),
            next_serial: 0,
        }
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    // ── Insertion / removal ───────────────────────────────────────────────

    /// Add `agent` to the live population and return its id.
    pub fn insert(&mut self, agent: Agent) -> AgentId {
        let Agent { pos, motion, vitals, species } = agent;
        let id = self.live.insert(());
        self.pos.insert(id, pos);
        self.motion.insert(id, motion);
        self.vitals.insert(id, vitals);
        self.species.insert(id, species);
        self.flags.insert(id, TickFlags::default());
        self.serial.insert(id, self.next_serial);
        self.next_serial += 1;
        id
    }

    /// Remove `id` from the live population, recording `cause`.
    ///
    /// The id stops resolving immediately; its columns stay readable until
    /// [`reap`](Self::reap).
    ///
    /// # Panics
    ///
    /// If `id` is not live.  Killing twice is a logic error in the caller.
    pub fn kill(&mut self, id: AgentId, cause: DeathCause) {
        assert!(self.live.remove(id).is_some(), "kill of non-live agent {id:?}");
        self.flags[id].death = Some(cause);
    }

    /// Drop the column entries of every agent killed since the last reap.
    /// Returns how many.
    pub fn reap(&mut self) -> usize {
        let Self { pos, motion, vitals, species, flags, live, serial, .. } = self;
        let before = serial.len();
        serial.retain(|id, _| live.contains_key(id));
        pos.retain(|id, _| live.contains_key(id));
        motion.retain(|id, _| live.contains_key(id));
        vitals.retain(|id, _| live.contains_key(id));
        species.retain(|id, _| live.contains_key(id));
        flags.retain(|id, _| live.contains_key(id));
        before - serial.len()
    }

    // ── Liveness ──────────────────────────────────────────────────────────

    /// `true` if `id` still names the agent it was issued for and that agent
    /// has not been killed.
    #[inline]
    pub fn is_live(&self, id: AgentId) -> bool {
        self.live.contains_key(id)
    }

    /// Live agent ids in slot order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.live.keys()
    }

    // ── Per-agent access ──────────────────────────────────────────────────

    #[inline]
    pub fn kind(&self, id: AgentId) -> Kind {
        self.species[id].kind()
    }

    /// Insertion number of `id`, stable for the agent's whole life.  Readable
    /// until the agent is reaped.
    #[inline]
    pub fn serial(&self, id: AgentId) -> u64 {
        self.serial[id]
    }

    /// Owned copy of one live agent's state.
    pub fn get(&self, id: AgentId) -> Option<Agent> {
        if !self.is_live(id) {
            return None;
        }
        Some(Agent {
            pos:     self.pos[id],
            motion:  self.motion[id].clone(),
            vitals:  self.vitals[id].clone(),
            species: self.species[id].clone(),
        })
    }

    /// Reset every agent's per-tick flags.
    pub fn clear_flags(&mut self) {
        for flags in self.flags.values_mut() {
            *flags = TickFlags::default();
        }
    }

    /// Live counts per kind and mode.
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for id in self.live_ids() {
            census.count(&self.species[id]);
        }
        census
    }
}
