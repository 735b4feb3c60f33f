//! Spatial-subsystem error type.

use thiserror::Error;

use rr_core::{CoreError, NodeId};

/// Errors produced by `rr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The goal never received a finite cost before the frontier emptied.
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("invalid edge key {0:?}: expected \"from|to\"")]
    InvalidEdgeKey(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
