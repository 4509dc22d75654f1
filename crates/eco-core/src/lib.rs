//! `eco-core` — foundational types for the ecosystem simulator.
//!
//! This crate is a dependency of every other `eco-*` crate.  It intentionally
//! has no `eco-*` dependencies and minimal external ones (`rand`,
//! `rand_distr`, `slotmap` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId` (generational slot-map key)                 |
//! | [`geo`]         | `Vec2`, `Rect`                                        |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng`, `RunRngs` (movement + chance streams)       |
//! | [`params`]      | Species/world parameter records, `EcosystemConfig`    |
//! | [`error`]       | `EcoError`, `EcoResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry and params.|

pub mod error;
pub mod geo;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EcoError, EcoResult};
pub use geo::{Rect, Vec2};
pub use ids::AgentId;
pub use params::{
    EcosystemConfig, FoxParams, GrassParams, InitialPopulation, RabbitParams, ScentParams,
    WorldParams,
};
pub use rng::{RunRngs, SimRng};
pub use time::{SimClock, SimConfig, Tick};
