//! Effective edge costs.
//!
//! ```text
//! effective(from → to) = max(floor, weight + penalty(to) - bonus(to) + edge_penalty(from, to))
//! ```
//!
//! Dijkstra is only correct over non-negative costs, and a profile with a
//! large bonus can push `weight + modifiers` below zero.  The floor is
//! applied here, when the profile is resolved against a graph, so every
//! router sees the same clamped value and path costs are sums of it.

use rustc_hash::FxHashMap;

use rr_core::{EdgeId, NodeId};

use crate::{CostProfile, MapGraph};

// ── RouterConfig ──────────────────────────────────────────────────────────────

/// Routing configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Lowest cost any single edge may have after profile adjustment.
    /// Negative or non-finite values are treated as `0.0`.
    pub cost_floor: f64,
}

impl RouterConfig {
    /// The floor actually applied.
    pub fn effective_floor(&self) -> f64 {
        if self.cost_floor.is_finite() && self.cost_floor > 0.0 {
            self.cost_floor
        } else {
            0.0
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { cost_floor: 0.0 }
    }
}

// ── CostModel ─────────────────────────────────────────────────────────────────

/// A [`CostProfile`] resolved against one [`MapGraph`].
///
/// String keys are looked up once here; the router's inner loop only indexes
/// a `Vec` and probes one hash map.  Profile entries naming nodes that are not
/// in the graph are ignored.
#[derive(Clone, Debug)]
pub struct CostModel {
    /// `penalty - bonus` for arriving at each node.  Indexed by `NodeId`.
    node_adjust: Vec<f64>,
    edge_penalty: FxHashMap<(NodeId, NodeId), f64>,
    floor: f64,
}

impl CostModel {
    /// Base weights only, clamped to the configured floor.
    pub fn unmodified(graph: &MapGraph, config: &RouterConfig) -> Self {
        Self {
            node_adjust: vec![0.0; graph.node_count()],
            edge_penalty: FxHashMap::default(),
            floor: config.effective_floor(),
        }
    }

    /// Resolve `profile` (if any) against `graph`.
    pub fn new(graph: &MapGraph, profile: Option<&CostProfile>, config: &RouterConfig) -> Self {
        let mut model = Self::unmodified(graph, config);
        let Some(profile) = profile else {
            return model;
        };

        for (key, &penalty) in &profile.node_penalties {
            match graph.node_id(key) {
                Some(n) => model.node_adjust[n.index()] += penalty,
                None => log::debug!("profile penalty for unknown node {key:?} ignored"),
            }
        }
        for (key, &bonus) in &profile.node_bonuses {
            match graph.node_id(key) {
                Some(n) => model.node_adjust[n.index()] -= bonus,
                None => log::debug!("profile bonus for unknown node {key:?} ignored"),
            }
        }
        for (key, &penalty) in &profile.edge_penalties {
            match (graph.node_id(&key.from), graph.node_id(&key.to)) {
                (Some(f), Some(t)) => {
                    *model.edge_penalty.entry((f, t)).or_insert(0.0) += penalty;
                }
                _ => log::debug!("profile penalty for unknown edge {key} ignored"),
            }
        }
        model
    }

    #[inline]
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Net profile adjustment for traversing `from → to`, before clamping.
    #[inline]
    pub fn modifier(&self, from: NodeId, to: NodeId) -> f64 {
        let node = self.node_adjust.get(to.index()).copied().unwrap_or(0.0);
        let edge = if self.edge_penalty.is_empty() {
            0.0
        } else {
            self.edge_penalty.get(&(from, to)).copied().unwrap_or(0.0)
        };
        node + edge
    }

    /// Clamped cost of traversing `edge`.
    #[inline]
    pub fn effective_cost(&self, graph: &MapGraph, edge: EdgeId) -> f64 {
        let from = graph.edge_from[edge.index()];
        let to   = graph.edge_to[edge.index()];
        let raw  = graph.edge_weight[edge.index()] + self.modifier(from, to);
        if raw < self.floor {
            log::trace!("clamping cost of {from} -> {to} from {raw} to {}", self.floor);
        }
        // `f64::max` also maps a NaN sum to the floor.
        raw.max(self.floor)
    }

    /// Cost of walking `nodes` in order, taking the cheapest edge between
    /// each consecutive pair.  `None` if some pair is not connected.
    pub fn path_cost(&self, graph: &MapGraph, nodes: &[NodeId]) -> Option<f64> {
        let mut total = 0.0;
        for pair in nodes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if !graph.contains(from) {
                return None;
            }
            let step = graph
                .out_edges(from)
                .filter(|e| graph.edge_to[e.index()] == to)
                .map(|e| self.effective_cost(graph, e))
                .min_by(f64::total_cmp)?;
            total += step;
        }
        Some(total)
    }
}
