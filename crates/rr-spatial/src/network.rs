//! Map graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_weight`) are sorted by
//! source node and indexed by `EdgeId`.
//!
//! Edges are **directed**.  Data-pack graphs are generated by connecting each
//! node to its k nearest neighbours, so `A → B` never implies `B → A`.
//!
//! # Node ids
//!
//! Nodes carry opaque string ids.  The builder interns them into dense
//! `NodeId`s in insertion order; [`MapGraph::node_id`] maps back.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lng)` to the nearest `NodeId`.  Used
//! to resolve a tapped or unprojected position to a routable node.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use rr_core::{EdgeId, GeoPoint, MapNode, NodeId};

use crate::SpatialResult;

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a `[lat, lng]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lng space.  Game maps are small and
    /// roughly planar, so this orders neighbours correctly.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlng = self.point[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

fn spatial_index(nodes: &[MapNode]) -> RTree<NodeEntry> {
    let entries: Vec<NodeEntry> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| NodeEntry {
            point: [n.lat, n.lng],
            id: NodeId::from_index(i),
        })
        .collect();
    RTree::bulk_load(entries)
}

// ── MapGraph ──────────────────────────────────────────────────────────────────

/// Directed, weighted graph of one map in CSR format, plus a string-id index
/// and a spatial index for node snapping.
///
/// Immutable once built; share it by reference across route requests.  Do not
/// construct directly; use [`MapGraphBuilder`].
pub struct MapGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Node records.  Indexed by `NodeId`.
    pub nodes: Vec<MapNode>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Needed to trace `prev_edge` back during
    /// path reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Base weight of each edge, before any profile adjustment.
    pub edge_weight: Vec<f64>,

    // ── Lookups ───────────────────────────────────────────────────────────
    index: FxHashMap<String, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl MapGraph {
    /// A graph with no nodes or edges.  Every routing request against it
    /// fails with [`SpatialError::NodeNotFound`](crate::SpatialError::NodeNotFound).
    pub fn empty() -> Self {
        MapGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    // ── Id mapping ────────────────────────────────────────────────────────

    /// Resolve an external string id.
    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// The node record for `node`, if it exists.
    pub fn node(&self, node: NodeId) -> Option<&MapNode> {
        self.nodes.get(node.index())
    }

    /// External string id of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    #[inline]
    pub fn key(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].id
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId::from_index(i))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// First edge `from → to`, if any.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if !self.contains(from) {
            return None;
        }
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lng])
            .map(|e| e.id)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lng])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    /// Pick up to `k` nodes spread across the map by farthest-point
    /// sampling, starting from `NodeId(0)`.  Good calibration anchors are far
    /// apart and not collinear; this is a cheap way to propose some.
    pub fn spread_nodes(&self, k: usize) -> Vec<NodeId> {
        let n = self.node_count();
        let k = k.min(n);
        if k == 0 {
            return Vec::new();
        }

        let mut picked = Vec::with_capacity(k);
        let mut nearest = vec![f64::INFINITY; n];
        let mut next = NodeId(0);

        while picked.len() < k {
            picked.push(next);
            let anchor = self.nodes[next.index()].pos();
            for (i, node) in self.nodes.iter().enumerate() {
                let d = node.pos().planar_distance_2(anchor);
                if d < nearest[i] {
                    nearest[i] = d;
                }
            }
            // Strict `>` keeps the lowest index on ties.
            let mut best = (f64::NEG_INFINITY, NodeId::INVALID);
            for (i, &d) in nearest.iter().enumerate() {
                if d > best.0 {
                    best = (d, NodeId::from_index(i));
                }
            }
            if best.0 <= 0.0 {
                // Every remaining node coincides with a picked one.
                break;
            }
            next = best.1;
        }
        picked
    }
}

// ── MapGraphBuilder ───────────────────────────────────────────────────────────

/// Construct a [`MapGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rr_core::MapNode;
/// use rr_spatial::MapGraphBuilder;
///
/// let mut b = MapGraphBuilder::new();
/// let a = b.add_node(MapNode::new("a", 0.10, 0.20)).unwrap();
/// let c = b.add_node(MapNode::new("c", 0.15, 0.25)).unwrap();
/// b.add_directed_edge(a, c, 12.0);
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct MapGraphBuilder {
    nodes:     Vec<MapNode>,
    index:     FxHashMap<String, NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:   NodeId,
    to:     NodeId,
    weight: f64,
}

impl MapGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            index:     FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(nodes);
        Self {
            nodes: Vec::with_capacity(nodes),
            index,
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    ///
    /// A repeated string id keeps the first record and returns its id.
    /// Non-finite coordinates are rejected.
    pub fn add_node(&mut self, node: MapNode) -> SpatialResult<NodeId> {
        GeoPoint::checked(node.lat, node.lng)?;
        if let Some(&existing) = self.index.get(&node.id) {
            log::debug!("duplicate node id {:?}; keeping first record", node.id);
            return Ok(existing);
        }
        let id = NodeId::from_index(self.nodes.len());
        self.index.insert(node.id.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.raw_edges.push(RawEdge { from, to, weight });
    }

    /// Add a directed edge between two string ids.
    ///
    /// Returns `false` (and adds nothing) if either endpoint is unknown or the
    /// weight is not finite.  Dangling edges are unusable, not fatal.
    pub fn add_edge_by_key(&mut self, from: &str, to: &str, weight: f64) -> bool {
        let (Some(f), Some(t)) = (self.node_id(from), self.node_id(to)) else {
            log::debug!("skipping edge {from:?} -> {to:?}: unknown endpoint");
            return false;
        };
        if !weight.is_finite() {
            log::warn!("skipping edge {from:?} -> {to:?}: non-finite weight {weight}");
            return false;
        }
        self.add_directed_edge(f, t, weight);
        true
    }

    /// Convenience: add edges in **both directions**.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, weight: f64) {
        self.add_directed_edge(a, b, weight);
        self.add_directed_edge(b, a, weight);
    }

    /// Connect every node to its `k` nearest other nodes with directed edges
    /// weighted by haversine distance in metres.  Returns the number of edges
    /// added.
    ///
    /// Nearness is not symmetric, so the result generally has one-way edges.
    pub fn connect_k_nearest(&mut self, k: usize) -> usize {
        if k == 0 || self.nodes.len() < 2 {
            return 0;
        }
        let tree = spatial_index(&self.nodes);
        let mut added = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            let from = NodeId::from_index(i);
            let neighbours = tree
                .nearest_neighbor_iter(&[node.lat, node.lng])
                .filter(|e| e.id != from)
                .take(k);
            for entry in neighbours {
                let weight = node.pos().distance_m(self.nodes[entry.id.index()].pos());
                self.raw_edges.push(RawEdge { from, to: entry.id, weight });
                added += 1;
            }
        }
        added
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`MapGraph`].
    ///
    /// Edges whose endpoints are out of range are dropped here.
    pub fn build(self) -> MapGraph {
        let node_count = self.nodes.len();

        let mut raw: Vec<RawEdge> = self
            .raw_edges
            .into_iter()
            .filter(|e| {
                let ok = e.from.index() < node_count && e.to.index() < node_count;
                if !ok {
                    log::debug!("dropping edge {} -> {}: endpoint out of range", e.from, e.to);
                }
                ok
            })
            .collect();
        // Stable sort keeps insertion order within a source node.
        raw.sort_by_key(|e| e.from.0);
        let edge_count = raw.len();

        let edge_from:   Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:     Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_weight: Vec<f64>    = raw.iter().map(|e| e.weight).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let spatial_idx = spatial_index(&self.nodes);

        MapGraph {
            nodes: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            index: self.index,
            spatial_idx,
        }
    }
}

impl Default for MapGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
