//! `eco-spatial` — neighbor indexing, proximity queries and world geometry.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`index`]     | `NeighborIndex` trait, `RTreeIndex`, `ScanIndex`           |
//! | [`query`]     | `NeighborQuery` — filtered, liveness-checked result set    |
//! | [`landscape`] | `Landscape` (bounds, toroidal wrap, obstacles)             |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Ordering
//!
//! Indexes return candidates in ascending `AgentId` order, never by
//! distance.  Callers that need the nearest match compare distances
//! themselves.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod index;
pub mod landscape;
pub mod query;


pub use error::{SpatialError, SpatialResult};
pub use index::{NeighborIndex, RTreeIndex, ScanIndex};
pub use landscape::Landscape;
pub use query::NeighborQuery;
