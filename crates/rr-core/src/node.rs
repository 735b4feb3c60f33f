//! Map node record.

use crate::GeoPoint;

/// A routable location on one map.
///
/// Only `id` and the coordinates matter to routing and calibration; the rest
/// is carried through for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MapNode {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "mapID", default))]
    pub map_id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subcategory: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instance_name: Option<String>,
}

impl MapNode {
    /// A node with coordinates and no metadata.
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            map_id: None,
            lat,
            lng,
            category: None,
            subcategory: None,
            instance_name: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_instance_name(mut self, name: impl Into<String>) -> Self {
        self.instance_name = Some(name.into());
        self
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Best human-readable label: instance name, then subcategory, then
    /// category.
    pub fn display_text(&self) -> &str {
        self.instance_name
            .as_deref()
            .or(self.subcategory.as_deref())
            .or(self.category.as_deref())
            .unwrap_or("Unknown")
    }
}
