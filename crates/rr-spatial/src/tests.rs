//! Unit tests for rr-spatial.
//!
//! All tests use hand-crafted graphs; no data pack is needed.

#[cfg(test)]
mod helpers {
    use rr_core::{MapNode, NodeId};
    use crate::{MapGraph, MapGraphBuilder};

    /// Four nodes on a line, directed edges:
    ///
    /// ```text
    /// A →1→ B →1→ C →1→ D
    /// A ─────5────→ C
    /// ```
    pub fn abcd() -> (MapGraph, [NodeId; 4]) {
        let mut b = MapGraphBuilder::new();
        let a = b.add_node(MapNode::new("A", 0.0, 0.0)).unwrap();
        let bb = b.add_node(MapNode::new("B", 0.0, 1.0)).unwrap();
        let c = b.add_node(MapNode::new("C", 0.0, 2.0)).unwrap();
        let d = b.add_node(MapNode::new("D", 0.0, 3.0)).unwrap();
        b.add_directed_edge(a, bb, 1.0);
        b.add_directed_edge(bb, c, 1.0);
        b.add_directed_edge(a, c, 5.0);
        b.add_directed_edge(c, d, 1.0);
        (b.build(), [a, bb, c, d])
    }

    /// Small grid, bidirectional:
    ///
    /// ```text
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    /// ```
    ///
    /// 0→1→2→4 costs 30, 0→3→4 costs 60.
    pub fn grid() -> (MapGraph, [NodeId; 5]) {
        let mut b = MapGraphBuilder::new();
        let n0 = b.add_node(MapNode::new("n0", 0.0, 0.0)).unwrap();
        let n1 = b.add_node(MapNode::new("n1", 0.0, 1.0)).unwrap();
        let n2 = b.add_node(MapNode::new("n2", 0.0, 2.0)).unwrap();
        let n3 = b.add_node(MapNode::new("n3", 1.0, 0.0)).unwrap();
        let n4 = b.add_node(MapNode::new("n4", 1.0, 2.0)).unwrap();
        b.add_road(n0, n1, 10.0);
        b.add_road(n1, n2, 10.0);
        b.add_road(n2, n4, 10.0);
        b.add_road(n0, n3, 50.0);
        b.add_road(n3, n4, 10.0);
        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rr_core::{MapNode, NodeId};
    use crate::{MapGraphBuilder, SpatialError};

    #[test]
    fn empty_build() {
        let g = MapGraphBuilder::new().build();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn ids_are_sequential_and_resolvable() {
        let (g, [a, b, c, d]) = super::helpers::abcd();
        assert_eq!([a, b, c, d], [NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(g.node_id("C"), Some(c));
        assert_eq!(g.key(d), "D");
        assert_eq!(g.node_id("Z"), None);
        assert!(g.node(NodeId(9)).is_none());
    }

    #[test]
    fn duplicate_id_keeps_first() {
        let mut b = MapGraphBuilder::new();
        let first = b.add_node(MapNode::new("x", 1.0, 1.0)).unwrap();
        let again = b.add_node(MapNode::new("x", 5.0, 5.0)).unwrap();
        assert_eq!(first, again);
        let g = b.build();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.nodes[0].lat, 1.0);
    }

    #[test]
    fn non_finite_coordinates_rejected() {
        let mut b = MapGraphBuilder::new();
        let err = b.add_node(MapNode::new("bad", f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, SpatialError::Core(_)));
        assert_eq!(b.node_count(), 0);
    }

    #[test]
    fn csr_out_edges() {
        let (g, [a, b, c, d]) = super::helpers::abcd();
        assert_eq!(g.out_degree(a), 2);
        assert_eq!(g.out_degree(b), 1);
        assert_eq!(g.out_degree(c), 1);
        assert_eq!(g.out_degree(d), 0);
        for e in g.out_edges(a) {
            assert_eq!(g.edge_from[e.index()], a);
        }
    }

    #[test]
    fn edges_are_directed() {
        let (g, [a, b, ..]) = super::helpers::abcd();
        assert!(g.find_edge(a, b).is_some());
        assert!(g.find_edge(b, a).is_none());
    }

    #[test]
    fn edge_by_unknown_key_is_skipped() {
        let mut b = MapGraphBuilder::new();
        b.add_node(MapNode::new("a", 0.0, 0.0)).unwrap();
        b.add_node(MapNode::new("b", 0.0, 1.0)).unwrap();
        assert!(b.add_edge_by_key("a", "b", 2.0));
        assert!(!b.add_edge_by_key("a", "ghost", 2.0));
        assert!(!b.add_edge_by_key("a", "b", f64::INFINITY));
        assert_eq!(b.build().edge_count(), 1);
    }

    #[test]
    fn out_of_range_edge_dropped_at_build() {
        let mut b = MapGraphBuilder::new();
        let a = b.add_node(MapNode::new("a", 0.0, 0.0)).unwrap();
        b.add_directed_edge(a, NodeId(42), 1.0);
        let g = b.build();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.out_degree(a), 0);
    }

    #[test]
    fn connect_k_nearest_is_directed() {
        // Three nodes: two close together, one far away.  The far node's
        // nearest neighbour is `mid`, but nobody's nearest is `far`.
        let mut b = MapGraphBuilder::new();
        let near = b.add_node(MapNode::new("near", 0.0, 0.0)).unwrap();
        let mid  = b.add_node(MapNode::new("mid", 0.0, 0.001)).unwrap();
        let far  = b.add_node(MapNode::new("far", 0.0, 0.01)).unwrap();
        assert_eq!(b.connect_k_nearest(1), 3);
        let g = b.build();

        assert!(g.find_edge(near, mid).is_some());
        assert!(g.find_edge(mid, near).is_some());
        assert!(g.find_edge(far, mid).is_some());
        assert!(g.find_edge(mid, far).is_none());

        let e = g.find_edge(near, mid).unwrap();
        // 0.001° of longitude at the equator ≈ 111 m.
        assert!((g.edge_weight[e.index()] - 111.2).abs() < 1.0);
    }
}

// ── Graph records ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod records {
    use rr_core::MapNode;
    use crate::{EdgeRecord, GraphRecord};

    #[test]
    fn dangling_edges_tolerated() {
        let rec = GraphRecord {
            nodes: vec![MapNode::new("a", 0.0, 0.0), MapNode::new("b", 0.0, 1.0)],
            edges: vec![
                EdgeRecord::new("a", "b", 3.0),
                EdgeRecord::new("b", "missing", 1.0),
                EdgeRecord::new("missing", "a", 1.0),
            ],
        };
        let g = rec.into_graph();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn non_finite_node_skipped() {
        let rec = GraphRecord {
            nodes: vec![
                MapNode::new("a", 0.0, 0.0),
                MapNode::new("bad", f64::NAN, 1.0),
                MapNode::new("b", 0.0, f64::INFINITY),
                MapNode::new("c", 0.0, 2.0),
            ],
            edges: vec![
                EdgeRecord::new("a", "bad", 1.0),
                EdgeRecord::new("bad", "c", 1.0),
                EdgeRecord::new("a", "c", 2.0),
            ],
        };
        let g = rec.into_graph();
        assert_eq!(g.node_count(), 2);
        assert!(g.node_id("bad").is_none());
        assert!(g.node_id("b").is_none());
        assert_eq!(g.edge_count(), 1);
        let (a, c) = (g.node_id("a").unwrap(), g.node_id("c").unwrap());
        assert!(g.find_edge(a, c).is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parse_data_pack_json() {
        let json = r#"{
            "nodes": [
                {"id": "a", "lat": 0.0, "lng": 0.0, "category": "spawn"},
                {"id": "b", "lat": 0.0, "lng": 1.0}
            ],
            "edges": [{"fromId": "a", "toId": "b", "weight": 4.5}]
        }"#;
        let rec: GraphRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.edges[0], EdgeRecord::new("a", "b", 4.5));
        let g = rec.into_graph();
        let a = g.node_id("a").unwrap();
        assert_eq!(g.out_degree(a), 1);
        assert_eq!(g.node(a).unwrap().display_text(), "spawn");
    }
}

// ── Profiles & cost model ─────────────────────────────────────────────────────

#[cfg(test)]
mod costs {
    use crate::{CostModel, CostProfile, EdgeKey, RouterConfig, SpatialError};

    #[test]
    fn edge_key_parse_and_display() {
        let k: EdgeKey = "B|C".parse().unwrap();
        assert_eq!(k, EdgeKey::new("B", "C"));
        assert_eq!(k.to_string(), "B|C");
        assert!(matches!("BC".parse::<EdgeKey>(), Err(SpatialError::InvalidEdgeKey(_))));
        assert!("|C".parse::<EdgeKey>().is_err());
    }

    #[test]
    fn profile_lookups_default_to_zero() {
        let p = CostProfile::for_map("dam")
            .with_node_bonus("A", 2.0)
            .with_node_penalty("B", 3.0)
            .with_edge_penalty("B", "C", 10.0);
        assert_eq!(p.node_bonus("A"), 2.0);
        assert_eq!(p.node_bonus("B"), 0.0);
        assert_eq!(p.node_penalty("B"), 3.0);
        assert_eq!(p.edge_penalty("B", "C"), 10.0);
        assert_eq!(p.edge_penalty("C", "B"), 0.0);
        assert!(!p.is_empty());
        assert!(CostProfile::new().is_empty());
    }

    #[test]
    fn modifiers_apply_to_arrival_node_and_exact_edge() {
        let (g, [a, b, c, _]) = super::helpers::abcd();
        let p = CostProfile::new()
            .with_node_penalty("B", 3.0)
            .with_node_bonus("B", 1.0)
            .with_edge_penalty("B", "C", 10.0);
        let m = CostModel::new(&g, Some(&p), &RouterConfig::default());

        let ab = g.find_edge(a, b).unwrap();
        let bc = g.find_edge(b, c).unwrap();
        let ac = g.find_edge(a, c).unwrap();
        assert_eq!(m.effective_cost(&g, ab), 1.0 + 3.0 - 1.0);
        assert_eq!(m.effective_cost(&g, bc), 1.0 + 10.0);
        assert_eq!(m.effective_cost(&g, ac), 5.0);
    }

    #[test]
    fn negative_effective_cost_is_clamped() {
        let (g, [a, b, ..]) = super::helpers::abcd();
        let p = CostProfile::new().with_node_bonus("B", 50.0);
        let ab = g.find_edge(a, b).unwrap();

        let zero = CostModel::new(&g, Some(&p), &RouterConfig::default());
        assert_eq!(zero.modifier(a, b), -50.0);
        assert_eq!(zero.effective_cost(&g, ab), 0.0);

        let eps = CostModel::new(&g, Some(&p), &RouterConfig { cost_floor: 0.25 });
        assert_eq!(eps.effective_cost(&g, ab), 0.25);

        let bogus = RouterConfig { cost_floor: -3.0 };
        assert_eq!(bogus.effective_floor(), 0.0);
    }

    #[test]
    fn unknown_profile_keys_ignored() {
        let (g, [a, b, ..]) = super::helpers::abcd();
        let p = CostProfile::new()
            .with_node_penalty("ghost", 99.0)
            .with_edge_penalty("A", "ghost", 99.0);
        let m = CostModel::new(&g, Some(&p), &RouterConfig::default());
        assert_eq!(m.modifier(a, b), 0.0);
    }

    #[test]
    fn path_cost_sums_effective_costs() {
        let (g, [a, b, c, d]) = super::helpers::abcd();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        assert_eq!(m.path_cost(&g, &[a, b, c, d]), Some(3.0));
        assert_eq!(m.path_cost(&g, &[a]), Some(0.0));
        assert_eq!(m.path_cost(&g, &[d, c]), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn profile_json_uses_pipe_keys() {
        let json = r#"{
            "mapID": "dam",
            "nodeBonuses": {"A": 1.5},
            "edgePenalties": {"B|C": 10.0}
        }"#;
        let p: CostProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.map_id.as_deref(), Some("dam"));
        assert_eq!(p.edge_penalty("B", "C"), 10.0);
        assert!(p.node_penalties.is_empty());

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["edgePenalties"]["B|C"], 10.0);

        let bad = r#"{"edgePenalties": {"BC": 1.0}}"#;
        assert!(serde_json::from_str::<CostProfile>(bad).is_err());
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use rr_core::GeoPoint;
    use crate::MapGraphBuilder;

    #[test]
    fn snap_exact_and_nearest() {
        let (g, [n0, n1, ..]) = super::helpers::grid();
        assert_eq!(g.snap_to_node(GeoPoint::new(0.0, 0.0)), Some(n0));
        assert_eq!(g.snap_to_node(GeoPoint::new(0.0, 0.4)), Some(n0));
        assert_eq!(g.snap_to_node(GeoPoint::new(0.0, 0.6)), Some(n1));
    }

    #[test]
    fn empty_graph_returns_none() {
        let g = MapGraphBuilder::new().build();
        assert!(g.snap_to_node(GeoPoint::new(0.0, 0.0)).is_none());
        assert!(g.spread_nodes(3).is_empty());
    }

    #[test]
    fn k_nearest_order() {
        let (g, nodes) = super::helpers::grid();
        let nearest = g.k_nearest_nodes(GeoPoint::new(0.0, 0.0), 2);
        assert_eq!(nearest[0], nodes[0]);
        // n1 and n3 are equidistant; either is valid.
        assert!(nearest[1] == nodes[1] || nearest[1] == nodes[3]);
    }

    #[test]
    fn spread_nodes_picks_far_corners() {
        let (g, [n0, n1, _, _, n4]) = super::helpers::grid();
        let picked = g.spread_nodes(3);
        assert_eq!(picked[0], n0);
        // Farthest from n0 is n4 (distance² = 5).
        assert_eq!(picked[1], n4);
        // n1, n2 and n3 are now all at distance² 1 from a pick; lowest id wins.
        assert_eq!(picked[2], n1);
        assert_eq!(g.spread_nodes(99).len(), 5);
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rr_core::{MapNode, NodeId};
    use crate::{
        CostModel, CostProfile, DijkstraRouter, MapGraphBuilder, Router, RouterConfig,
        SpatialError,
    };

    #[test]
    fn trivial_same_node() {
        let (g, [a, ..]) = super::helpers::abcd();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        let r = DijkstraRouter.route(&g, &m, a, a).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![a]);
        assert_eq!(r.cost, 0.0);
    }

    #[test]
    fn detour_beats_direct_edge() {
        let (g, [a, b, c, d]) = super::helpers::abcd();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        let r = DijkstraRouter.route(&g, &m, a, d).unwrap();
        assert_eq!(r.nodes, vec![a, b, c, d]);
        assert_eq!(r.cost, 3.0);
        assert_eq!(r.source(), Some(a));
        assert_eq!(r.destination(), Some(d));
        assert_eq!(r.edge_count(), 3);
    }

    #[test]
    fn edge_penalty_reroutes() {
        let (g, [a, _, c, d]) = super::helpers::abcd();
        let p = CostProfile::new().with_edge_penalty("B", "C", 10.0);
        let m = CostModel::new(&g, Some(&p), &RouterConfig::default());
        let r = DijkstraRouter.route(&g, &m, a, d).unwrap();
        assert_eq!(r.nodes, vec![a, c, d]);
        assert_eq!(r.cost, 6.0);
    }

    #[test]
    fn node_bonus_attracts_route() {
        let (g, [n0, _, _, n3, n4]) = super::helpers::grid();
        // Without a profile 0→1→2→4 (30) wins; a bonus of 45 at n3 makes
        // 0→3→4 cost 5 + 10 = 15.
        let p = CostProfile::new().with_node_bonus("n3", 45.0);
        let m = CostModel::new(&g, Some(&p), &RouterConfig::default());
        let r = DijkstraRouter.route(&g, &m, n0, n4).unwrap();
        assert_eq!(r.nodes, vec![n0, n3, n4]);
        assert_eq!(r.cost, 15.0);
    }

    #[test]
    fn clamped_cost_is_accumulated() {
        let (g, [a, b, c, d]) = super::helpers::abcd();
        // A→B would be 1 - 100; clamped to 0.
        let p = CostProfile::new().with_node_bonus("B", 100.0);
        let m = CostModel::new(&g, Some(&p), &RouterConfig::default());
        let r = DijkstraRouter.route(&g, &m, a, d).unwrap();
        assert_eq!(r.nodes, vec![a, b, c, d]);
        assert_eq!(r.cost, 2.0);
        assert_eq!(m.path_cost(&g, &r.nodes), Some(r.cost));
    }

    #[test]
    fn no_path_against_edge_direction() {
        let (g, [a, _, _, d]) = super::helpers::abcd();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        let err = DijkstraRouter.route(&g, &m, d, a).unwrap_err();
        assert!(matches!(err, SpatialError::NoPath { from, to } if from == d && to == a));
    }

    #[test]
    fn disconnected_nodes() {
        let mut b = MapGraphBuilder::new();
        let x = b.add_node(MapNode::new("x", 0.0, 0.0)).unwrap();
        let y = b.add_node(MapNode::new("y", 1.0, 0.0)).unwrap();
        let g = b.build();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        assert!(matches!(DijkstraRouter.route(&g, &m, x, y), Err(SpatialError::NoPath { .. })));
    }

    #[test]
    fn out_of_range_node() {
        let (g, [a, ..]) = super::helpers::abcd();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        let err = DijkstraRouter.route(&g, &m, a, NodeId(77)).unwrap_err();
        assert!(matches!(err, SpatialError::NodeNotFound(NodeId(77))));
    }

    #[test]
    fn equal_cost_tie_prefers_lower_node_id() {
        // s → l → t and s → h → t both cost 2; `l` was inserted first.
        let mut b = MapGraphBuilder::new();
        let s = b.add_node(MapNode::new("s", 0.0, 0.0)).unwrap();
        let l = b.add_node(MapNode::new("l", 0.0, 1.0)).unwrap();
        let h = b.add_node(MapNode::new("h", 1.0, 0.0)).unwrap();
        let t = b.add_node(MapNode::new("t", 1.0, 1.0)).unwrap();
        b.add_directed_edge(s, h, 1.0);
        b.add_directed_edge(s, l, 1.0);
        b.add_directed_edge(h, t, 1.0);
        b.add_directed_edge(l, t, 1.0);
        let g = b.build();
        let m = CostModel::unmodified(&g, &RouterConfig::default());
        for _ in 0..3 {
            let r = DijkstraRouter.route(&g, &m, s, t).unwrap();
            assert_eq!(r.nodes, vec![s, l, t]);
        }
    }
}

// ── Randomised optimality ─────────────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rr_core::{MapNode, NodeId};
    use crate::{
        CostModel, CostProfile, DijkstraRouter, MapGraph, MapGraphBuilder, Router, RouterConfig,
    };

    fn random_graph(rng: &mut SmallRng, n: usize, m: usize) -> (MapGraph, CostProfile) {
        let mut b = MapGraphBuilder::new();
        for i in 0..n {
            b.add_node(MapNode::new(format!("n{i}"), rng.r#gen::<f64>(), rng.r#gen::<f64>()))
                .unwrap();
        }
        for _ in 0..m {
            let f = NodeId(rng.gen_range(0..n as u32));
            let t = NodeId(rng.gen_range(0..n as u32));
            b.add_directed_edge(f, t, rng.gen_range(0.0..10.0));
        }
        let mut p = CostProfile::new();
        for _ in 0..n / 3 {
            let id = format!("n{}", rng.gen_range(0..n));
            p = p.with_node_bonus(id, rng.gen_range(0.0..8.0));
        }
        for _ in 0..n / 3 {
            let (f, t) = (rng.gen_range(0..n), rng.gen_range(0..n));
            p = p.with_edge_penalty(format!("n{f}"), format!("n{t}"), rng.gen_range(0.0..5.0));
        }
        (b.build(), p)
    }

    /// Bellman-Ford distances from `src` over the clamped costs.
    fn reference(graph: &MapGraph, costs: &CostModel, src: NodeId) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; graph.node_count()];
        dist[src.index()] = 0.0;
        for _ in 0..graph.node_count() {
            for e in 0..graph.edge_count() {
                let e = rr_core::EdgeId::from_index(e);
                let (f, t) = (graph.edge_from[e.index()], graph.edge_to[e.index()]);
                let cand = dist[f.index()] + costs.effective_cost(graph, e);
                if cand < dist[t.index()] {
                    dist[t.index()] = cand;
                }
            }
        }
        dist
    }

    #[test]
    fn matches_bellman_ford_and_reports_consistent_cost() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..25 {
            let (g, p) = random_graph(&mut rng, 12, 30);
            let m = CostModel::new(&g, Some(&p), &RouterConfig::default());
            let src = NodeId(0);
            let expected = reference(&g, &m, src);
            for goal in 0..g.node_count() {
                let goal = NodeId(goal as u32);
                match DijkstraRouter.route(&g, &m, src, goal) {
                    Ok(seg) => {
                        assert_eq!(seg.source(), Some(src));
                        assert_eq!(seg.destination(), Some(goal));
                        assert!((seg.cost - expected[goal.index()]).abs() < 1e-9);
                        let walked = m.path_cost(&g, &seg.nodes).unwrap();
                        assert!((walked - seg.cost).abs() < 1e-9);
                    }
                    Err(_) => assert!(expected[goal.index()].is_infinite()),
                }
            }
        }
    }
}
