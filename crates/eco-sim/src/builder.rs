//! Fluent builder for constructing a [`Sim`].

use eco_agent::{AgentStore, AgentStoreBuilder};
use eco_behavior::{fox, grass, rabbit, BehaviorModel, EcosystemModel};
use eco_core::{EcosystemConfig, Rect, RunRngs, SimConfig};
use eco_spatial::{Landscape, NeighborIndex, RTreeIndex};
use tracing::info;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<B, I>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: run length, seed, output cadence
/// - [`EcosystemConfig`]: world and species parameters
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `.behavior(b)`    | [`EcosystemModel`]                               |
/// | `.index(i)`       | [`RTreeIndex`]                                   |
/// | `.obstacles(v)`   | none                                             |
/// | `.population(s)`  | batch spawn from `ecosystem.population`          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default(), EcosystemConfig::default())
///     .obstacles(vec![Rect::new(Vec2::new(300.0, 300.0), Vec2::new(450.0, 450.0))])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel = EcosystemModel, I: NeighborIndex = RTreeIndex> {
    config:     SimConfig,
    ecosystem:  EcosystemConfig,
    behavior:   B,
    index:      I,
    obstacles:  Vec<Rect>,
    population: Option<AgentStore>,
}

impl SimBuilder {
    /// Create a builder for the fox / rabbit / grass ecosystem.
    pub fn new(config: SimConfig, ecosystem: EcosystemConfig) -> Self {
        Self {
            config,
            ecosystem,
            behavior:   EcosystemModel,
            index:      RTreeIndex::new(),
            obstacles:  Vec::new(),
            population: None,
        }
    }
}

impl<B: BehaviorModel, I: NeighborIndex> SimBuilder<B, I> {
    /// Swap in a different behavior model.
    pub fn behavior<B2: BehaviorModel>(self, behavior: B2) -> SimBuilder<B2, I> {
        SimBuilder {
            config:     self.config,
            ecosystem:  self.ecosystem,
            behavior,
            index:      self.index,
            obstacles:  self.obstacles,
            population: self.population,
        }
    }

    /// Swap in a different neighbor index.
    pub fn index<I2: NeighborIndex>(self, index: I2) -> SimBuilder<B, I2> {
        SimBuilder {
            config:     self.config,
            ecosystem:  self.ecosystem,
            behavior:   self.behavior,
            index,
            obstacles:  self.obstacles,
            population: self.population,
        }
    }

    /// Rectangles wandering creatures turn back from.
    pub fn obstacles(mut self, obstacles: Vec<Rect>) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Start from `store` instead of batch-spawning
    /// `ecosystem.population`.
    pub fn population(mut self, store: AgentStore) -> Self {
        self.population = Some(store);
        self
    }

    /// Validate inputs, spawn the initial population and return a
    /// ready-to-run [`Sim`].
    ///
    /// Batch spawn places foxes, then rabbits, then grass, so ids follow that
    /// order.  Positions and creation noise come from the chance stream.
    pub fn build(self) -> SimResult<Sim<B, I>> {
        self.ecosystem.validate()?;
        let landscape = Landscape::new(self.ecosystem.world.bounds())?.with_obstacles(self.obstacles)?;
        let mut rngs = RunRngs::new(self.config.seed);

        let agents = match self.population {
            Some(store) => store,
            None => batch_spawn(&self.ecosystem, &mut rngs),
        };

        let census = agents.census();
        info!(
            seed = self.config.seed,
            foxes = census.foxes,
            rabbits = census.rabbits,
            grass = census.grass(),
            scent = self.ecosystem.scent.is_some(),
            "simulation built"
        );

        Ok(Sim::new(self.config, self.ecosystem, agents, rngs, landscape, self.behavior, self.index))
    }
}

/// Spawn the initial population described by `ecosystem.population`.
pub fn batch_spawn(ecosystem: &EcosystemConfig, rngs: &mut RunRngs) -> AgentStore {
    let n = &ecosystem.population;
    let bounds = ecosystem.world.bounds();
    let planting = ecosystem.world.planting_area();
    let rng = &mut rngs.chance;

    let mut builder = AgentStoreBuilder::with_capacity(n.foxes + n.rabbits + n.grass);
    for _ in 0..n.foxes {
        let pos = rng.point_in(bounds);
        builder = builder.push(fox::create(ecosystem, rng, pos));
    }
    for _ in 0..n.rabbits {
        let pos = rng.point_in(bounds);
        builder = builder.push(rabbit::create(ecosystem, rng, pos));
    }
    for _ in 0..n.grass {
        let pos = rng.point_in(planting);
        builder = builder.push(grass::create(&ecosystem.grass, rng, pos));
    }
    builder.build()
}
