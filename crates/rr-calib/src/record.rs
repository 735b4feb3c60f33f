//! The per-map calibration record.

use crate::{AnchorSet, CalibResult, CalibrationAnchor, Transform};

/// A solved calibration for one map image, ready for the caller to persist.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Calibration {
    #[cfg_attr(feature = "serde", serde(rename = "mapID"))]
    pub map_id: String,
    pub image_filename: String,
    pub transform: Transform,
    pub anchors: Vec<CalibrationAnchor>,
    /// When the calibration was made, in Unix seconds.  The engine has no
    /// clock; the caller stamps it with [`Calibration::created_at`].
    #[cfg_attr(
        feature = "serde",
        serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")
    )]
    pub created_at_unix_secs: Option<u64>,
}

impl Calibration {
    /// Solve `anchors` and record the result against `map_id`, with the
    /// image file defaulting to `"{map_id}.png"`.
    pub fn solve(map_id: impl Into<String>, anchors: AnchorSet) -> CalibResult<Self> {
        let transform = anchors.solve()?;
        let map_id = map_id.into();
        Ok(Self {
            image_filename: format!("{map_id}.png"),
            map_id,
            transform,
            anchors: anchors.into_vec(),
            created_at_unix_secs: None,
        })
    }

    pub fn created_at(mut self, unix_secs: u64) -> Self {
        self.created_at_unix_secs = Some(unix_secs);
        self
    }

    pub fn with_image_filename(mut self, filename: impl Into<String>) -> Self {
        self.image_filename = filename.into();
        self
    }
}
