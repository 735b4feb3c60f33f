//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The planner calls routing via the [`Router`] trait, so a different
//! shortest-path engine (A*, bidirectional search) can be swapped in without
//! touching the sequencing code.
//!
//! # Cost units
//!
//! Costs are whatever unit the graph's base weights use.  Every edge cost is
//! taken from [`CostModel::effective_cost`], so it is never below the
//! configured floor and never negative.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rr_core::{EdgeId, NodeId};

use crate::{CostModel, MapGraph, SpatialError, SpatialResult};

// ── PathSegment ───────────────────────────────────────────────────────────────

/// The result of a single shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    /// Nodes from source to destination, both inclusive.
    pub nodes: Vec<NodeId>,
    /// Sum of effective edge costs along `nodes`.
    pub cost: f64,
}

impl PathSegment {
    /// The zero-length path that starts and ends at `node`.
    pub fn trivial(node: NodeId) -> Self {
        Self { nodes: vec![node], cost: 0.0 }
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve requests
/// from several worker threads; inputs are all shared references.
pub trait Router: Send + Sync {
    /// Compute the cheapest path from `from` to `to` under `costs`.
    ///
    /// `from == to` yields a trivial path.  Returns
    /// [`SpatialError::NoPath`] if `to` is unreachable and
    /// [`SpatialError::NodeNotFound`] if either id is out of range.
    fn route(
        &self,
        graph: &MapGraph,
        costs: &CostModel,
        from:  NodeId,
        to:    NodeId,
    ) -> SpatialResult<PathSegment>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Single-source Dijkstra over the CSR graph, stopping as soon as the goal is
/// settled.
///
/// Frontier ties are broken by lower `NodeId`, so results are reproducible
/// for a given graph.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &MapGraph,
        costs: &CostModel,
        from:  NodeId,
        to:    NodeId,
    ) -> SpatialResult<PathSegment> {
        dijkstra(graph, costs, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Eq for State {}

impl Ord for State {
    /// Reversed so `BinaryHeap` (a max-heap) pops the cheapest state first,
    /// then the lowest `NodeId` among equal costs.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(
    graph: &MapGraph,
    costs: &CostModel,
    from:  NodeId,
    to:    NodeId,
) -> SpatialResult<PathSegment> {
    for node in [from, to] {
        if !graph.contains(node) {
            return Err(SpatialError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(PathSegment::trivial(from));
    }

    let n = graph.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: from });

    while let Some(State { cost, node }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + costs.effective_cost(graph, edge);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(State { cost: new_cost, node: neighbor });
            }
        }
    }

    Err(SpatialError::NoPath { from, to })
}

fn reconstruct(
    graph:     &MapGraph,
    prev_edge: &[EdgeId],
    from:      NodeId,
    to:        NodeId,
    cost:      f64,
) -> PathSegment {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = graph.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    PathSegment { nodes, cost }
}
