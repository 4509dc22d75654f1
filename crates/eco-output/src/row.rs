//! Plain data row types written by output backends.

use eco_agent::Census;
use eco_sim::AgentRecord;

/// One agent at the end of an output tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentRow {
    pub tick:         u64,
    /// Run-unique agent serial; a recycled slot never repeats one.
    pub agent_id:     u64,
    /// `fox`, `rabbit`, `scent`, `grass` or `dead_grass`.
    pub label:        &'static str,
    pub x:            f64,
    pub y:            f64,
    pub age:          u32,
    pub max_lifespan: u32,
    pub energy:       u32,
    pub reproduced:   bool,
    pub ate:          bool,
    /// Set only on the tick the agent died.
    pub death:        Option<&'static str>,
}

impl From<&AgentRecord> for AgentRow {
    fn from(r: &AgentRecord) -> Self {
        Self {
            tick:         r.tick.0,
            agent_id:     r.serial,
            label:        r.label.as_str(),
            x:            r.x,
            y:            r.y,
            age:          r.age,
            max_lifespan: r.max_lifespan,
            energy:       r.energy,
            reproduced:   r.reproduced,
            ate:          r.ate,
            death:        r.death.map(|d| d.as_str()),
        }
    }
}

/// Population counts for one output tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CensusRow {
    pub tick:            u64,
    pub elapsed_secs:    f64,
    pub foxes:           u64,
    pub rabbits:         u64,
    pub scents:          u64,
    pub grass_available: u64,
    pub grass_regrowing: u64,
}

impl CensusRow {
    pub fn new(tick: u64, elapsed_secs: f64, census: &Census) -> Self {
        Self {
            tick,
            elapsed_secs,
            foxes:           census.foxes as u64,
            rabbits:         census.rabbits as u64,
            scents:          census.scents as u64,
            grass_available: census.grass_available as u64,
            grass_regrowing: census.grass_regrowing as u64,
        }
    }
}
