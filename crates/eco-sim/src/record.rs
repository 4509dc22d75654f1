//! Per-agent output records.

use std::fmt;

use eco_agent::{AgentStore, DeathCause, GrassPhase, RabbitMode, Species};
use eco_core::{AgentId, Tick};

/// What an agent was when its record was taken.
///
/// Grass is split by phase so the two grass curves can be plotted from
/// labels alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecordLabel {
    Fox,
    Rabbit,
    Scent,
    Grass,
    DeadGrass,
}

impl RecordLabel {
    pub fn of(species: &Species) -> Self {
        match species {
            Species::Fox(_) => RecordLabel::Fox,
            Species::Rabbit(RabbitMode::Active(_)) => RecordLabel::Rabbit,
            Species::Rabbit(RabbitMode::Scent(_)) => RecordLabel::Scent,
            Species::Grass(g) => match g.phase {
                GrassPhase::Available => RecordLabel::Grass,
                GrassPhase::Regrowing { .. } => RecordLabel::DeadGrass,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordLabel::Fox => "fox",
            RecordLabel::Rabbit => "rabbit",
            RecordLabel::Scent => "scent",
            RecordLabel::Grass => "grass",
            RecordLabel::DeadGrass => "dead_grass",
        }
    }
}

impl fmt::Display for RecordLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One agent's state at the end of a tick.
///
/// Agents killed during the tick are still recorded, with `death` set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub tick:         Tick,
    pub agent:        AgentId,
    /// Run-unique insertion number; never shared by two agents.
    pub serial:       u64,
    pub label:        RecordLabel,
    pub x:            f64,
    pub y:            f64,
    pub age:          u32,
    pub max_lifespan: u32,
    pub energy:       u32,
    pub reproduced:   bool,
    pub ate:          bool,
    pub death:        Option<DeathCause>,
}

impl AgentRecord {
    /// Read agent `id` from `store`.  It may be dead but must not have been
    /// reaped yet.
    pub fn capture(store: &AgentStore, id: AgentId, tick: Tick) -> Self {
        let pos = store.pos[id];
        let vitals = &store.vitals[id];
        let flags = &store.flags[id];
        Self {
            tick,
            agent: id,
            serial: store.serial(id),
            label: RecordLabel::of(&store.species[id]),
            x: pos.x,
            y: pos.y,
            age: vitals.age,
            max_lifespan: vitals.lifespan,
            energy: vitals.energy,
            reproduced: flags.reproduced,
            ate: flags.ate,
            death: flags.death,
        }
    }
}
