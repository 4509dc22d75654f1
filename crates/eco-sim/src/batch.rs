//! Parameter sweeps: many independent runs over a grid of configurations.
//!
//! Runs share no mutable state, so with the `parallel` feature they are
//! spread over Rayon's thread pool.  Results come back in grid order either
//! way.

use eco_agent::Census;
use eco_core::{EcosystemConfig, ScentParams, SimConfig};
use tracing::debug;

use crate::{SimBuilder, SimObserver, SimResult};

/// A sweepable parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Param {
    ProximityRadius,
    MovementSpeed,
    GrassRegrowDelay,
    RabbitMaxEnergy,
    RabbitHungerThreshold,
    GrassNutrition,
    RabbitLifespan,
    RabbitReproduce,
    FoxMaxEnergy,
    FoxHungerThreshold,
    RabbitNutrition,
    FoxLifespan,
    FoxReproduce,
    HuntSpeed,
    TrackSpeed,
    /// Enables trails with default interval if the base config has none.
    ScentLifetime,
    /// Enables trails with default lifetime if the base config has none.
    ScentInterval,
}

impl Param {
    /// Write `value` into `config`.  Integer parameters are truncated.
    pub fn apply(self, config: &mut EcosystemConfig, value: f64) {
        let whole = value as u32;
        match self {
            Param::ProximityRadius => config.world.proximity_radius = value,
            Param::MovementSpeed => config.world.movement_speed = value,
            Param::GrassRegrowDelay => config.grass.regrow_delay = whole,
            Param::RabbitMaxEnergy => config.rabbit.max_energy = whole,
            Param::RabbitHungerThreshold => config.rabbit.hunger_threshold = whole,
            Param::GrassNutrition => config.rabbit.nutrition = whole,
            Param::RabbitLifespan => config.rabbit.lifespan = whole,
            Param::RabbitReproduce => config.rabbit.p_reproduce = value,
            Param::FoxMaxEnergy => config.fox.max_energy = whole,
            Param::FoxHungerThreshold => config.fox.hunger_threshold = whole,
            Param::RabbitNutrition => config.fox.nutrition = whole,
            Param::FoxLifespan => config.fox.lifespan = whole,
            Param::FoxReproduce => config.fox.p_reproduce = value,
            Param::HuntSpeed => config.fox.hunt_speed = value,
            Param::TrackSpeed => config.fox.track_speed = value,
            Param::ScentLifetime => config.scent.get_or_insert_with(ScentParams::default).lifetime = whole,
            Param::ScentInterval => config.scent.get_or_insert_with(ScentParams::default).interval = whole,
        }
    }
}

/// One concrete run produced by a [`ParamGrid`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSpec {
    /// Position in grid order.
    pub id:        usize,
    pub sim:       SimConfig,
    pub ecosystem: EcosystemConfig,
    /// The swept values that distinguish this run.
    pub values:    Vec<(Param, f64)>,
}

/// Cartesian product of seeds and parameter values over a base
/// configuration.
///
/// Expansion order: seeds vary slowest, then axes in the order they were
/// added, the last axis fastest.
#[derive(Clone, Debug)]
pub struct ParamGrid {
    base_sim:  SimConfig,
    base:      EcosystemConfig,
    seeds:     Vec<u64>,
    axes:      Vec<(Param, Vec<f64>)>,
}

impl ParamGrid {
    /// A grid with one run: the base configuration under its own seed.
    pub fn new(base_sim: SimConfig, base: EcosystemConfig) -> Self {
        let seeds = vec![base_sim.seed];
        Self { base_sim, base, seeds, axes: Vec::new() }
    }

    pub fn seeds(mut self, seeds: impl IntoIterator<Item = u64>) -> Self {
        self.seeds = seeds.into_iter().collect();
        self
    }

    /// Sweep `param` over `values`.  Adding the same parameter twice keeps
    /// the later list.
    pub fn axis(mut self, param: Param, values: impl IntoIterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.into_iter().collect();
        match self.axes.iter_mut().find(|(p, _)| *p == param) {
            Some((_, v)) => *v = values,
            None => self.axes.push((param, values)),
        }
        self
    }

    /// Number of runs [`runs`](Self::runs) will produce.
    pub fn len(&self) -> usize {
        self.seeds.len() * self.axes.iter().map(|(_, v)| v.len()).product::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand into concrete runs.
    pub fn runs(&self) -> Vec<RunSpec> {
        let mut combos: Vec<Vec<(Param, f64)>> = vec![Vec::new()];
        for (param, values) in &self.axes {
            combos = combos
                .into_iter()
                .flat_map(|prefix| {
                    values.iter().map(move |&v| {
                        let mut next = prefix.clone();
                        next.push((*param, v));
                        next
                    })
                })
                .collect();
        }

        let mut runs = Vec::with_capacity(self.len());
        for &seed in &self.seeds {
            for values in &combos {
                let mut ecosystem = self.base.clone();
                for &(param, v) in values {
                    param.apply(&mut ecosystem, v);
                }
                let sim = SimConfig { seed, ..self.base_sim.clone() };
                runs.push(RunSpec { id: runs.len(), sim, ecosystem, values: values.clone() });
            }
        }
        runs
    }
}

/// The result of one batch run.
#[derive(Debug)]
pub struct RunOutcome<O> {
    pub spec:     RunSpec,
    pub census:   Census,
    pub observer: O,
}

/// Build and run every spec with the default ecosystem model, returning
/// results in input order.
///
/// `make_observer` is called once per run.  An invalid configuration fails
/// only its own run.
pub fn run_batch<O, F>(runs: Vec<RunSpec>, make_observer: F) -> Vec<SimResult<RunOutcome<O>>>
where
    O: SimObserver + Send,
    F: Fn(&RunSpec) -> O + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        runs.into_iter().map(|spec| run_one(spec, &make_observer)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        runs.into_par_iter().map(|spec| run_one(spec, &make_observer)).collect()
    }
}

fn run_one<O, F>(spec: RunSpec, make_observer: &F) -> SimResult<RunOutcome<O>>
where
    O: SimObserver,
    F: Fn(&RunSpec) -> O,
{
    debug!(run = spec.id, seed = spec.sim.seed, "batch run starting");
    let mut observer = make_observer(&spec);
    let mut sim = SimBuilder::new(spec.sim.clone(), spec.ecosystem.clone()).build()?;
    let census = sim.run(&mut observer)?;
    debug!(run = spec.id, foxes = census.foxes, rabbits = census.rabbits, "batch run finished");
    Ok(RunOutcome { spec, census, observer })
}
