//! Target sequencing strategies.
//!
//! Both strategies take the start and the distinct in-graph targets as
//! `NodeId`s and return one stitched node sequence.  Each leg comes from the
//! [`Router`], so the sequence cost is a sum of the same effective costs the
//! router minimised.

use rr_core::NodeId;
use rr_spatial::{CostModel, MapGraph, PathSegment, Router, SpatialError};

use crate::PlanResult;

/// Hard cap on exact sequencing; the DP table has `2^k · k` cells.
pub const EXACT_TARGET_LIMIT: usize = 16;

/// Output of a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Stitched node sequence; empty if no target was reached.
    pub nodes: Vec<NodeId>,
    pub cost: f64,
    /// Targets left out, in input order.
    pub unreached: Vec<NodeId>,
}

/// Append `segment` to `path`, dropping its first node when it repeats the
/// junction.
fn stitch(path: &mut Vec<NodeId>, segment: &[NodeId]) {
    if path.is_empty() {
        path.extend_from_slice(segment);
    } else {
        path.extend_from_slice(segment.get(1..).unwrap_or_default());
    }
}

/// `Ok(None)` for an unreachable leg; other router errors propagate.
fn leg<R: Router>(
    router: &R,
    graph:  &MapGraph,
    costs:  &CostModel,
    from:   NodeId,
    to:     NodeId,
) -> PlanResult<Option<PathSegment>> {
    match router.route(graph, costs, from, to) {
        Ok(seg) => Ok(Some(seg)),
        Err(SpatialError::NoPath { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Greedy ────────────────────────────────────────────────────────────────────

/// Greedy nearest-next: from the current node, route to every remaining
/// target and walk to the cheapest.  Stops early when nothing remaining is
/// reachable.
///
/// Exact cost ties go to the target listed first.
pub fn greedy<R: Router>(
    router:  &R,
    graph:   &MapGraph,
    costs:   &CostModel,
    start:   NodeId,
    targets: &[NodeId],
) -> PlanResult<Sequence> {
    let mut current   = start;
    let mut remaining = targets.to_vec();
    let mut path      = Vec::new();
    let mut cost      = 0.0;

    while !remaining.is_empty() {
        let mut best: Option<(usize, PathSegment)> = None;
        for (i, &target) in remaining.iter().enumerate() {
            if let Some(seg) = leg(router, graph, costs, current, target)? {
                if best.as_ref().is_none_or(|(_, b)| seg.cost < b.cost) {
                    best = Some((i, seg));
                }
            }
        }

        let Some((i, seg)) = best else {
            break;
        };
        log::debug!(
            "greedy leg {} -> {} cost {}",
            graph.key(current),
            graph.key(remaining[i]),
            seg.cost
        );
        stitch(&mut path, &seg.nodes);
        cost += seg.cost;
        current = remaining.remove(i);
    }

    Ok(Sequence { nodes: path, cost, unreached: remaining })
}

// ── Exact ─────────────────────────────────────────────────────────────────────

type LegMatrix = Vec<Vec<Option<PathSegment>>>;

/// Shortest legs between every ordered pair of `points`.  Row/column 0 is the
/// start; nothing routes back into it.
fn leg_matrix<R: Router>(
    router: &R,
    graph:  &MapGraph,
    costs:  &CostModel,
    points: &[NodeId],
) -> PlanResult<LegMatrix> {
    let row = |i: usize| -> PlanResult<Vec<Option<PathSegment>>> {
        points
            .iter()
            .enumerate()
            .map(|(j, &to)| {
                if j == 0 || i == j {
                    Ok(None)
                } else {
                    leg(router, graph, costs, points[i], to)
                }
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let rows: PlanResult<LegMatrix> = {
        use rayon::prelude::*;
        (0..points.len()).into_par_iter().map(row).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let rows: PlanResult<LegMatrix> = (0..points.len()).map(row).collect();

    rows
}

/// Held-Karp dynamic programming over target subsets.
///
/// Chooses the order that visits the **most** targets and, among those, has
/// the lowest cost.  With a directed graph two targets can both be reachable
/// from the start while neither reaches the other; the route then covers as
/// many as possible and reports the rest as unreached.
///
/// Callers must keep `targets.len() <= EXACT_TARGET_LIMIT`.
pub fn exact<R: Router>(
    router:  &R,
    graph:   &MapGraph,
    costs:   &CostModel,
    start:   NodeId,
    targets: &[NodeId],
) -> PlanResult<Sequence> {
    let k = targets.len();
    debug_assert!(k <= EXACT_TARGET_LIMIT);
    if k == 0 {
        return Ok(Sequence { nodes: vec![start], cost: 0.0, unreached: Vec::new() });
    }

    let mut points = Vec::with_capacity(k + 1);
    points.push(start);
    points.extend_from_slice(targets);
    let legs = leg_matrix(router, graph, costs, &points)?;
    // Cost of the leg into target `j` from point `i` (0 = start).
    let leg_cost = |i: usize, j: usize| legs[i][j + 1].as_ref().map(|s| s.cost);

    let full = 1usize << k;
    let mut dp     = vec![f64::INFINITY; full * k];
    let mut parent = vec![usize::MAX; full * k];
    let cell = |mask: usize, last: usize| mask * k + last;

    for j in 0..k {
        if let Some(c) = leg_cost(0, j) {
            dp[cell(1 << j, j)] = c;
        }
    }

    for mask in 1..full {
        for last in 0..k {
            let here = dp[cell(mask, last)];
            if mask & (1 << last) == 0 || here.is_infinite() {
                continue;
            }
            for next in 0..k {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let Some(c) = leg_cost(last + 1, next) else {
                    continue;
                };
                let to = cell(mask | (1 << next), next);
                if here + c < dp[to] {
                    dp[to] = here + c;
                    parent[to] = last;
                }
            }
        }
    }

    // Most targets first, then cheapest; strict comparisons keep the first
    // (lowest mask, lowest last) on ties.
    let mut best: Option<(u32, f64, usize, usize)> = None;
    for mask in 1..full {
        for last in 0..k {
            let c = dp[cell(mask, last)];
            if c.is_infinite() {
                continue;
            }
            let visited = mask.count_ones();
            let better = match best {
                None => true,
                Some((v, bc, _, _)) => visited > v || (visited == v && c < bc),
            };
            if better {
                best = Some((visited, c, mask, last));
            }
        }
    }

    let Some((_, cost, mask, last)) = best else {
        return Ok(Sequence { nodes: Vec::new(), cost: 0.0, unreached: targets.to_vec() });
    };

    // Walk parents back to recover the visiting order.
    let mut order = Vec::with_capacity(k);
    let (mut m, mut cur) = (mask, last);
    loop {
        order.push(cur);
        let prev = parent[cell(m, cur)];
        m &= !(1 << cur);
        if prev == usize::MAX {
            break;
        }
        cur = prev;
    }
    order.reverse();

    let mut nodes = Vec::new();
    let mut from = 0;
    for &j in &order {
        if let Some(seg) = &legs[from][j + 1] {
            stitch(&mut nodes, &seg.nodes);
        }
        from = j + 1;
    }

    let unreached = (0..k)
        .filter(|j| mask & (1 << j) == 0)
        .map(|j| targets[j])
        .collect();

    Ok(Sequence { nodes, cost, unreached })
}
