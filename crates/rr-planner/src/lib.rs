//! `rr-planner` — plan one route from a spawn node through several targets.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`request`]  | `RouteRequest`, `RouteResult`, `PlannerConfig`, `Strategy`      |
//! | [`planner`]  | `RoutePlanner<R>` — resolves ids, applies the profile, hydrates |
//! | [`strategy`] | Greedy nearest-next and exact (Held-Karp) target sequencing      |
//! | [`error`]    | `PlanError`, `PlanResult<T>`                                    |
//!
//! # Sequencing model
//!
//! Visiting every target at least cost is a travelling-salesman variant.
//! Requests usually carry one to five targets, so the default
//! [`Strategy::Greedy`] repeatedly walks to the cheapest remaining target.
//! It is fast and usually good, but not globally optimal.
//! [`Strategy::Exact`] solves small requests optimally by dynamic
//! programming over target subsets and falls back to greedy above
//! [`PlannerConfig::exact_max_targets`].
//!
//! Targets that cannot be reached are dropped and listed in
//! [`RouteResult::unreached`]; a result with any such target is *partial*.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Exact strategy computes pairwise legs with Rayon.           |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.          |

pub mod error;
pub mod planner;
pub mod request;
pub mod strategy;


pub use error::{NoRouteReason, PlanError, PlanResult};
pub use planner::RoutePlanner;
pub use request::{PlannerConfig, RouteRequest, RouteResult, Strategy};
