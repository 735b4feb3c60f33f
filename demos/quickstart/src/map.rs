//! Embedded "dam" map: a small graph as a data pack would ship it, plus the
//! anchors a user pinned on the map image.

use rr_calib::{CalibResult, CalibrationAnchor, load_anchors_reader};
use rr_spatial::{CostProfile, GraphRecord, MapGraph};

pub const MAP_ID: &str = "dam";

// Coordinates are normalised game-world units, not real degrees.
//
//   spawn_north ── checkpoint ── pumping_station
//        │             │               │
//   loot_cache ──── tower ────── extraction
const GRAPH_JSON: &str = r#"{
  "nodes": [
    { "id": "spawn_north",     "mapID": "dam", "lat": 0.10, "lng": 0.20, "category": "spawn" },
    { "id": "checkpoint",      "mapID": "dam", "lat": 0.30, "lng": 0.35, "category": "landmark", "instanceName": "Security Checkpoint" },
    { "id": "pumping_station", "mapID": "dam", "lat": 0.40, "lng": 0.80, "category": "landmark", "subcategory": "Pumping Station" },
    { "id": "loot_cache",      "mapID": "dam", "lat": 0.70, "lng": 0.30, "category": "container" },
    { "id": "tower",           "mapID": "dam", "lat": 0.55, "lng": 0.61, "category": "landmark", "instanceName": "Control Tower" },
    { "id": "extraction",      "mapID": "dam", "lat": 0.85, "lng": 0.75, "category": "extraction" }
  ],
  "edges": [
    { "fromId": "spawn_north",     "toId": "checkpoint",      "weight": 20 },
    { "fromId": "checkpoint",      "toId": "spawn_north",     "weight": 20 },
    { "fromId": "checkpoint",      "toId": "pumping_station", "weight": 45 },
    { "fromId": "pumping_station", "toId": "checkpoint",      "weight": 45 },
    { "fromId": "spawn_north",     "toId": "loot_cache",      "weight": 60 },
    { "fromId": "loot_cache",      "toId": "spawn_north",     "weight": 60 },
    { "fromId": "checkpoint",      "toId": "tower",           "weight": 35 },
    { "fromId": "tower",           "toId": "checkpoint",      "weight": 35 },
    { "fromId": "loot_cache",      "toId": "tower",           "weight": 35 },
    { "fromId": "tower",           "toId": "loot_cache",      "weight": 35 },
    { "fromId": "pumping_station", "toId": "extraction",      "weight": 45 },
    { "fromId": "tower",           "toId": "extraction",      "weight": 30 },
    { "fromId": "extraction",      "toId": "tower",           "weight": 30 }
  ]
}"#;

// Pinned on a 1024x1024 map image.  Pixel y grows downwards.
const ANCHORS_CSV: &str = "\
node_id,lat,lng,x,y
spawn_north,0.10,0.20,281.5,858.0
tower,0.55,0.61,771.0,456.5
extraction,0.85,0.75,941.0,184.0
loot_cache,0.70,0.30,400.5,320.0
";

pub fn load_graph() -> anyhow::Result<MapGraph> {
    let record: GraphRecord = serde_json::from_str(GRAPH_JSON)?;
    Ok(record.into_graph())
}

pub fn load_anchors() -> CalibResult<Vec<CalibrationAnchor>> {
    load_anchors_reader(ANCHORS_CSV.as_bytes())
}

/// Learned from past runs: the checkpoint is usually camped, the loot cache
/// is worth a detour, and the pumping station stairs are slow going up.
pub fn learned_profile() -> CostProfile {
    CostProfile::for_map(MAP_ID)
        .with_node_penalty("checkpoint", 25.0)
        .with_node_bonus("loot_cache", 15.0)
        .with_edge_penalty("pumping_station", "extraction", 10.0)
}
