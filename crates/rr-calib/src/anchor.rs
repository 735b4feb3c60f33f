//! Calibration anchors.

use rr_core::GeoPoint;

use crate::{AffineFit, CalibConfig, CalibResult, PixelPoint, Transform, MIN_ANCHORS};

/// One known correspondence between a node's lat/lng and an image pixel.
///
/// `node_id` records where the anchor came from; the solver ignores it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CalibrationAnchor {
    pub node_id: String,
    pub lat: f64,
    pub lng: f64,
    pub x: f64,
    pub y: f64,
}

impl CalibrationAnchor {
    pub fn new(node_id: impl Into<String>, lat: f64, lng: f64, x: f64, y: f64) -> Self {
        Self { node_id: node_id.into(), lat, lng, x, y }
    }

    #[inline]
    pub fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    #[inline]
    pub fn pixel(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }
}

/// Anchors collected during one calibration session, at most one per node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<CalibrationAnchor>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `anchor`, replacing any existing anchor for the same node.
    /// Returns the replaced anchor.
    pub fn place(&mut self, anchor: CalibrationAnchor) -> Option<CalibrationAnchor> {
        let old = self.remove(&anchor.node_id);
        self.anchors.push(anchor);
        old
    }

    pub fn remove(&mut self, node_id: &str) -> Option<CalibrationAnchor> {
        let i = self.anchors.iter().position(|a| a.node_id == node_id)?;
        Some(self.anchors.remove(i))
    }

    pub fn get(&self, node_id: &str) -> Option<&CalibrationAnchor> {
        self.anchors.iter().find(|a| a.node_id == node_id)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// `true` once enough anchors are placed to solve.
    pub fn is_ready(&self) -> bool {
        self.anchors.len() >= MIN_ANCHORS
    }

    pub fn anchors(&self) -> &[CalibrationAnchor] {
        &self.anchors
    }

    pub fn into_vec(self) -> Vec<CalibrationAnchor> {
        self.anchors
    }

    pub fn solve(&self) -> CalibResult<Transform> {
        crate::solve(&self.anchors)
    }

    pub fn fit(&self, config: &CalibConfig) -> CalibResult<AffineFit> {
        crate::fit(&self.anchors, config)
    }
}

impl FromIterator<CalibrationAnchor> for AnchorSet {
    fn from_iter<I: IntoIterator<Item = CalibrationAnchor>>(iter: I) -> Self {
        let mut set = AnchorSet::new();
        for anchor in iter {
            set.place(anchor);
        }
        set
    }
}
