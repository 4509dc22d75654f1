//! `eco-agent` — Structure-of-Arrays agent arena for the ecosystem simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`species`]     | `Kind`, `Species` tagged variants, per-species state      |
//! | [`state`]       | `Vitals`, `Motion`, `TickFlags`, `DeathCause`, `Agent`    |
//! | [`store`]       | `AgentStore` (generational SoA arena)                     |
//! | [`census`]      | `Census` — live counts per kind                           |
//! | [`builder`]     | `AgentStoreBuilder` (fluent construction)                 |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod builder;
pub mod census;
pub mod species;
pub mod state;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use census::Census;
pub use species::{Forager, Fox, Grass, GrassPhase, HuntMode, Kind, RabbitMode, ScentMarker, Species};
pub use state::{Agent, DeathCause, Motion, TickFlags, Vitals};
pub use store::AgentStore;
