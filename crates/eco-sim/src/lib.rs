//! `eco-sim` — tick driver for the ecosystem simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.duration_ticks:
//!   ① Index    — rebuild the neighbor index from tick-start positions.
//!   ② Decide   — BehaviorModel::decide for each tick-start agent still live,
//!                ascending AgentId (lifecycle, eat, breed, emit, decay).
//!   ③ Move     — BehaviorModel::step, same agents, same order (wander,
//!                hunt, capture).
//!   ④ Record   — on output ticks, one AgentRecord per tick-start agent.
//!   ⑤ Reap     — free slots of agents killed this tick.
//!   ⑥ Births   — insert queued offspring and scent markers.
//!   ⑦ Advance  — clock += 1.
//! ```
//!
//! A single run is sequential: every callback sees the mutations of the ones
//! before it.  Independent runs are parallelised by [`batch::run_batch`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs batch configurations on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on records and specs.|
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use eco_core::{EcosystemConfig, SimConfig};
//! use eco_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), EcosystemConfig::default()).build()?;
//! let census = sim.run(&mut NoopObserver)?;
//! println!("{} foxes, {} rabbits", census.foxes, census.rabbits);
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod record;
pub mod sim;

#[cfg(test)]
mod tests;

pub use batch::{run_batch, Param, ParamGrid, RunOutcome, RunSpec};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use record::{AgentRecord, RecordLabel};
pub use sim::Sim;
