//! Route request, result, and planner configuration.

use rr_core::MapNode;
use rr_spatial::{CostProfile, RouterConfig};

// ── Configuration ─────────────────────────────────────────────────────────────

/// How targets are ordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Always walk to the cheapest remaining target next.
    #[default]
    Greedy,
    /// Optimal order over target subsets for small requests.
    Exact,
}

/// Planner configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub strategy: Strategy,
    /// Largest distinct target count [`Strategy::Exact`] handles before
    /// falling back to greedy.  Capped at
    /// [`EXACT_TARGET_LIMIT`](crate::strategy::EXACT_TARGET_LIMIT).
    pub exact_max_targets: usize,
    pub router: RouterConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy:          Strategy::Greedy,
            exact_max_targets: 8,
            router:            RouterConfig::default(),
        }
    }
}

// ── RouteRequest ──────────────────────────────────────────────────────────────

/// A request to route from `start` through every id in `targets`.
///
/// Target order is not significant and duplicates count once.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    pub map_id:  String,
    pub start:   String,
    pub targets: Vec<String>,
    pub profile: Option<CostProfile>,
}

impl RouteRequest {
    pub fn new(map_id: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            map_id:  map_id.into(),
            start:   start.into(),
            targets: Vec::new(),
            profile: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn with_profile(mut self, profile: CostProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Targets with duplicates removed, first occurrence kept.
    pub fn distinct_targets(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.targets
            .iter()
            .map(String::as_str)
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

// ── RouteResult ───────────────────────────────────────────────────────────────

/// A continuous path from the start through every reached target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    pub map_id: String,
    /// Node ids in travel order, start first.  Consecutive duplicates never
    /// occur at segment joins.
    pub path_ids: Vec<String>,
    /// Node records matching `path_ids`, for display.
    pub steps: Vec<MapNode>,
    /// Sum of effective edge costs along `path_ids`.
    pub total_cost: f64,
    /// Requested targets the route does not visit, in request order.
    pub unreached: Vec<String>,
}

impl RouteResult {
    /// `true` if some requested target was dropped.
    pub fn is_partial(&self) -> bool {
        !self.unreached.is_empty()
    }

    /// `true` if the route never leaves the start node.
    pub fn is_trivial(&self) -> bool {
        self.path_ids.len() <= 1
    }
}
