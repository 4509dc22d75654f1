//! Per-agent state shared by every species.

use eco_core::Vec2;

use crate::{Kind, Species};

/// Energy and ageing state.
///
/// Grass and scent markers carry [`Vitals::INERT`]: they neither age nor
/// spend energy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    /// Ticks lived.  Incremented exactly once per tick while alive.
    pub age:              u32,
    /// Never exceeds `max_energy`; reaching 0 is death.
    pub energy:           u32,
    pub max_energy:       u32,
    /// Below: look for food.  Above: look for a mate.
    pub hunger_threshold: u32,
    /// Age at which the agent dies, sampled once at creation.
    pub lifespan:         u32,
    pub p_reproduce:      f64,
}

impl Vitals {
    pub const INERT: Vitals = Vitals {
        age:              0,
        energy:           0,
        max_energy:       0,
        hunger_threshold: 0,
        lifespan:         0,
        p_reproduce:      0.0,
    };

    #[inline]
    pub fn is_hungry(&self) -> bool {
        self.energy < self.hunger_threshold
    }

    #[inline]
    pub fn is_well_fed(&self) -> bool {
        self.energy > self.hunger_threshold
    }
}

/// Heading and obstacle-escape state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Motion {
    /// Displacement applied to the position each movement step; may be zero.
    pub heading: Vec2,
    /// Set after the 180° turn on hitting an obstacle; cleared once clear of
    /// it.  Suppresses repeated reversals while still overlapping.
    pub stuck:   bool,
}

impl Motion {
    pub fn new(heading: Vec2) -> Self {
        Self { heading, stuck: false }
    }
}

/// Why an agent left the population.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathCause {
    OldAge,
    Starvation,
    Eaten,
    ScentExpired,
    /// A scent marker whose emitting rabbit is no longer alive.
    SourceGone,
}

impl DeathCause {
    pub fn as_str(self) -> &'static str {
        match self {
            DeathCause::OldAge => "old_age",
            DeathCause::Starvation => "starvation",
            DeathCause::Eaten => "eaten",
            DeathCause::ScentExpired => "scent_expired",
            DeathCause::SourceGone => "source_gone",
        }
    }
}

/// What happened to an agent during the current tick.  Reset at tick start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickFlags {
    pub ate:        bool,
    pub reproduced: bool,
    /// Grass only: eaten this tick.  Holds its regrowth countdown until the
    /// next tick regardless of processing order.
    pub consumed:   bool,
    pub death:      Option<DeathCause>,
}

/// One agent's complete state, used to insert into and copy out of the arena.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub pos:     Vec2,
    pub motion:  Motion,
    pub vitals:  Vitals,
    pub species: Species,
}

impl Agent {
    #[inline]
    pub fn kind(&self) -> Kind {
        self.species.kind()
    }
}
