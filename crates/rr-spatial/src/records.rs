//! Flat graph records as shipped in a map data pack.
//!
//! ```json
//! {
//!   "nodes": [{ "id": "a", "lat": 0.1, "lng": 0.2, "category": "spawn" }],
//!   "edges": [{ "fromId": "a", "toId": "b", "weight": 12.5 }]
//! }
//! ```
//!
//! Decoding the file is the caller's job; these types only give it a shape
//! and turn it into a [`MapGraph`].

use rr_core::MapNode;

use crate::{MapGraph, MapGraphBuilder};

/// One directed edge between two string node ids.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EdgeRecord {
    pub from_id: String,
    pub to_id:   String,
    pub weight:  f64,
}

impl EdgeRecord {
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>, weight: f64) -> Self {
        Self { from_id: from_id.into(), to_id: to_id.into(), weight }
    }
}

/// Nodes and edges of exactly one map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphRecord {
    pub nodes: Vec<MapNode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<EdgeRecord>,
}

impl GraphRecord {
    /// Build the routable graph.
    ///
    /// Nodes with non-finite coordinates, edges referencing unknown node ids,
    /// and edges with non-finite weights are skipped.
    pub fn into_graph(self) -> MapGraph {
        let mut b = MapGraphBuilder::with_capacity(self.nodes.len(), self.edges.len());
        for node in self.nodes {
            let id = node.id.clone();
            if let Err(e) = b.add_node(node) {
                log::warn!("skipping node {id:?}: {e}");
            }
        }
        let total = self.edges.len();
        let mut kept = 0;
        for e in &self.edges {
            if b.add_edge_by_key(&e.from_id, &e.to_id, e.weight) {
                kept += 1;
            }
        }
        if kept < total {
            log::warn!("{} of {total} edges skipped while building graph", total - kept);
        }
        b.build()
    }
}
