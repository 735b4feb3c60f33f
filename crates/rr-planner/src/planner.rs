//! `RoutePlanner` — the public entry point for multi-target routing.

use rr_core::NodeId;
use rr_spatial::{CostModel, MapGraph, Router};

use crate::strategy::{self, EXACT_TARGET_LIMIT, Sequence};
use crate::{NoRouteReason, PlanError, PlanResult, PlannerConfig, RouteRequest, RouteResult, Strategy};

/// Wraps a [`Router`] and a [`PlannerConfig`].
///
/// # Type parameter
///
/// `R` must implement [`Router`] (e.g. [`rr_spatial::DijkstraRouter`]).
///
/// The planner holds no per-request state, so one instance can serve
/// concurrent requests against any number of graphs.
pub struct RoutePlanner<R: Router> {
    pub router: R,
    pub config: PlannerConfig,
}

impl<R: Router> RoutePlanner<R> {
    pub fn new(router: R) -> Self {
        Self { router, config: PlannerConfig::default() }
    }

    pub fn with_config(router: R, config: PlannerConfig) -> Self {
        Self { router, config }
    }

    /// Plan a route through every target in `request` over `graph`.
    ///
    /// - No targets (or only targets absent from the graph): the start alone,
    ///   cost 0.
    /// - Start not in the graph: [`PlanError::NoRoute`] with
    ///   [`NoRouteReason::UnknownStart`].
    /// - Targets in the graph but unreachable: dropped and listed in
    ///   [`RouteResult::unreached`].  If none was reached at all:
    ///   [`NoRouteReason::NothingReachable`].
    pub fn plan(&self, graph: &MapGraph, request: &RouteRequest) -> PlanResult<RouteResult> {
        let Some(start) = graph.node_id(&request.start) else {
            return Err(PlanError::NoRoute {
                start:  request.start.clone(),
                reason: NoRouteReason::UnknownStart,
            });
        };

        let profile = request.profile.as_ref().filter(|p| match &p.map_id {
            Some(id) if *id != request.map_id => {
                log::warn!("ignoring profile for map {id:?} on request for {:?}", request.map_id);
                false
            }
            _ => true,
        });
        let costs = CostModel::new(graph, profile, &self.config.router);

        let mut targets: Vec<NodeId> = Vec::new();
        let mut unreached: Vec<String> = Vec::new();
        for key in request.distinct_targets() {
            match graph.node_id(key) {
                Some(id) if !targets.contains(&id) => targets.push(id),
                Some(_) => {}
                None => {
                    log::warn!("target {key:?} is not on map {:?}; dropping", request.map_id);
                    unreached.push(key.to_owned());
                }
            }
        }

        let seq = if targets.is_empty() {
            Sequence { nodes: vec![start], cost: 0.0, unreached: Vec::new() }
        } else if self.use_exact(targets.len()) {
            strategy::exact(&self.router, graph, &costs, start, &targets)?
        } else {
            strategy::greedy(&self.router, graph, &costs, start, &targets)?
        };

        if seq.nodes.is_empty() {
            return Err(PlanError::NoRoute {
                start:  request.start.clone(),
                reason: NoRouteReason::NothingReachable,
            });
        }

        for &id in &seq.unreached {
            log::warn!("target {:?} unreachable; route is partial", graph.key(id));
        }
        unreached.extend(seq.unreached.iter().map(|&id| graph.key(id).to_owned()));
        // Report in request order regardless of which pass dropped a target.
        let order = request.distinct_targets();
        unreached.sort_by_key(|k| order.iter().position(|t| *t == k.as_str()));

        Ok(RouteResult {
            map_id:     request.map_id.clone(),
            path_ids:   seq.nodes.iter().map(|&id| graph.key(id).to_owned()).collect(),
            steps:      seq.nodes.iter().map(|&id| graph.nodes[id.index()].clone()).collect(),
            total_cost: seq.cost,
            unreached,
        })
    }

    fn use_exact(&self, target_count: usize) -> bool {
        self.config.strategy == Strategy::Exact
            && target_count <= self.config.exact_max_targets.min(EXACT_TARGET_LIMIT)
    }
}
