//! quickstart — plan a multi-stop route and draw it on a calibrated map.
//!
//! Loads an embedded six-node map, plans a route from the northern spawn
//! through three targets with both sequencing strategies, then fits the map
//! image from pinned anchors and projects every step to pixels.
//!
//! Set `RUST_LOG=debug` to see individual greedy legs.

mod map;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use rr_calib::{AnchorSet, CalibConfig, Calibration, PixelPoint, Size, fit, image_to_view};
use rr_planner::{PlannerConfig, RoutePlanner, RouteRequest, RouteResult, Strategy};
use rr_spatial::DijkstraRouter;

use map::{MAP_ID, learned_profile, load_anchors, load_graph};

// ── Constants ─────────────────────────────────────────────────────────────────

const START:   &str      = "spawn_north";
const TARGETS: [&str; 4] = ["extraction", "pumping_station", "loot_cache", "vault"]; // "vault" is not on this map

const IMAGE: Size = Size { width: 1024.0, height: 1024.0 };
const VIEW:  Size = Size { width: 390.0,  height: 844.0 };

// ── Output ────────────────────────────────────────────────────────────────────

fn print_route(label: &str, route: &RouteResult) {
    println!("{label}: {} stops, cost {:.1}", route.path_ids.len(), route.total_cost);
    println!("  {}", route.path_ids.join(" → "));
    if route.is_partial() {
        println!("  unreached: {}", route.unreached.join(", "));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== quickstart — raider_route ===");
    println!();

    // 1. Graph.
    let graph = load_graph()?;
    println!("Map {MAP_ID}: {} nodes, {} edges", graph.node_count(), graph.edge_count());
    println!();

    // 2. Plan with the learned profile, greedy then exact.
    let request = RouteRequest::new(MAP_ID, START)
        .with_targets(TARGETS)
        .with_profile(learned_profile());

    let greedy = RoutePlanner::new(DijkstraRouter).plan(&graph, &request)?;
    print_route("greedy", &greedy);

    let exact_config = PlannerConfig { strategy: Strategy::Exact, ..PlannerConfig::default() };
    let exact = RoutePlanner::with_config(DijkstraRouter, exact_config).plan(&graph, &request)?;
    print_route("exact ", &exact);

    let plain = RoutePlanner::new(DijkstraRouter)
        .plan(&graph, &RouteRequest::new(MAP_ID, START).with_targets(TARGETS))?;
    print_route("no profile", &plain);
    println!();

    // 3. Calibrate the map image.
    let anchors: AnchorSet = load_anchors()?.into_iter().collect();
    let diagnostics = fit(anchors.anchors(), &CalibConfig::default())?;
    if diagnostics.is_degenerate() {
        log::warn!("anchors are collinear; projected positions are meaningless");
    }
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let calibration = Calibration::solve(MAP_ID, anchors)?.created_at(now);
    println!(
        "Calibrated {} from {} anchors, rms error {:.2} px",
        calibration.image_filename,
        calibration.anchors.len(),
        diagnostics.rms_error_px
    );
    println!("{}", serde_json::to_string_pretty(&calibration.transform)?);
    println!();

    // 4. Project the chosen route.
    println!("{:<18} {:<20} {:>12} {:>12}", "Node", "Label", "Image px", "View pt");
    println!("{}", "-".repeat(65));
    for step in &exact.steps {
        let px = calibration.transform.project(step.pos());
        let pt = image_to_view(px, VIEW, IMAGE).unwrap_or(PixelPoint::ZERO);
        println!(
            "{:<18} {:<20} {:>12} {:>12}",
            step.id,
            step.display_text(),
            format!("{:.0},{:.0}", px.x, px.y),
            format!("{:.0},{:.0}", pt.x, pt.y),
        );
    }

    Ok(())
}
