//! `rr-spatial` — map graph, spatial indexing, cost profiles, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `MapGraph` (CSR + R-tree + id index), `MapGraphBuilder`     |
//! | [`records`] | `GraphRecord`, `EdgeRecord` — the data pack's graph shape   |
//! | [`profile`] | `CostProfile`, `EdgeKey` — learned per-map adjustments      |
//! | [`cost`]    | `RouterConfig`, `CostModel` — effective edge costs          |
//! | [`router`]  | `Router` trait, `PathSegment`, `DijkstraRouter`             |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod cost;
pub mod error;
pub mod network;
pub mod profile;
pub mod records;
pub mod router;

#[cfg(test)]
mod tests;

pub use cost::{CostModel, RouterConfig};
pub use error::{SpatialError, SpatialResult};
pub use network::{MapGraph, MapGraphBuilder};
pub use profile::{CostProfile, EdgeKey};
pub use records::{EdgeRecord, GraphRecord};
pub use router::{DijkstraRouter, PathSegment, Router};
