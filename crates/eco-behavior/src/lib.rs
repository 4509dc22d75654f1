//! `eco-behavior` — the per-tick decision engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`context`]   | `TickContext<'a>` — mutable tick state handed to behaviors     |
//! | [`spawn`]     | `SpawnQueue` — births deferred to end of tick                  |
//! | [`lifecycle`] | metabolism, death, newborn vitals, reproduction                |
//! | [`grass`]     | patch creation, consumption and regrowth                       |
//! | [`rabbit`]    | foraging, breeding, scent emission, wander                     |
//! | [`scent`]     | marker decay and the scent gradient                            |
//! | [`fox`]       | breeding, nearest-rabbit hunting, scent tracking               |
//! | [`movement`]  | wander draws, obstacle avoidance, world wrap                   |
//! | [`model`]     | `BehaviorModel` trait, `EcosystemModel` dispatch               |
//! | [`noop`]      | `NoopBehavior` — agents that do nothing                        |
//!
//! # Tick discipline
//!
//! The driver runs every decision step, then every movement step.  Each
//! callback sees all mutations made before it: an agent killed by an
//! earlier callback is skipped and excluded from later neighbor queries.
//! Births are queued and appear only after the tick ends.

pub mod context;
pub mod fox;
pub mod grass;
pub mod lifecycle;
pub mod model;
pub mod movement;
pub mod noop;
pub mod rabbit;
pub mod scent;
pub mod spawn;


pub use context::TickContext;
pub use model::{BehaviorModel, EcosystemModel};
pub use movement::WanderDraws;
pub use noop::NoopBehavior;
pub use spawn::SpawnQueue;
