//! CSV anchor loader.
//!
//! # CSV format
//!
//! One row per anchor:
//!
//! ```csv
//! node_id,lat,lng,x,y
//! dam_spawn_01,0.12,0.40,118.5,902.0
//! dam_tower,0.55,0.61,640.0,410.25
//! ```
//!
//! Rows are returned in file order.  Repeated `node_id`s are kept; collect
//! into an [`AnchorSet`](crate::AnchorSet) to keep only the last one.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{CalibError, CalibResult, CalibrationAnchor};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AnchorRecord {
    node_id: String,
    lat:     f64,
    lng:     f64,
    x:       f64,
    y:       f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load anchors from a CSV file.
pub fn load_anchors_csv(path: &Path) -> CalibResult<Vec<CalibrationAnchor>> {
    let file = std::fs::File::open(path)?;
    load_anchors_reader(file)
}

/// Like [`load_anchors_csv`] but accepts any `Read` source.
pub fn load_anchors_reader<R: Read>(reader: R) -> CalibResult<Vec<CalibrationAnchor>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<AnchorRecord>()
        .map(|row| {
            let r = row.map_err(|e| CalibError::Parse(e.to_string()))?;
            if ![r.lat, r.lng, r.x, r.y].iter().all(|v| v.is_finite()) {
                return Err(CalibError::Parse(format!(
                    "anchor {:?} has a non-finite coordinate",
                    r.node_id
                )));
            }
            Ok(CalibrationAnchor::new(r.node_id, r.lat, r.lng, r.x, r.y))
        })
        .collect()
}
