use rr_spatial::SpatialError;
use thiserror::Error;

/// Why no route could be built at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRouteReason {
    /// The start node is not in the graph.
    UnknownStart,
    /// None of the requested targets is reachable from the start.
    NothingReachable,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("could not plan a route from {start:?}: {reason:?}")]
    NoRoute { start: String, reason: NoRouteReason },

    #[error("routing failed: {0}")]
    Routing(#[from] SpatialError),
}

pub type PlanResult<T> = Result<T, PlanError>;
