//! Learned per-map cost adjustments.
//!
//! A `CostProfile` biases routing toward or away from specific nodes and
//! edges based on player feedback.  It is produced and persisted elsewhere;
//! routing only reads it.  Missing entries mean zero adjustment.
//!
//! Edge penalties are keyed by the directed pair `from → to` and persist as
//! `"from|to"` strings.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::SpatialError;

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// A directed pair of string node ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub from: String,
    pub to:   String,
}

impl EdgeKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into() }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.from, self.to)
    }
}

impl FromStr for EdgeKey {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('|') {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok(EdgeKey::new(from, to)),
            _ => Err(SpatialError::InvalidEdgeKey(s.to_owned())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EdgeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EdgeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── CostProfile ───────────────────────────────────────────────────────────────

/// Sparse node and edge cost adjustments for one map.
///
/// Arriving at a node costs `penalty - bonus` extra; traversing exactly the
/// directed edge `from → to` costs its edge penalty extra.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostProfile {
    #[cfg_attr(feature = "serde", serde(rename = "mapID", default))]
    pub map_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub node_bonuses: HashMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub node_penalties: HashMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edge_penalties: HashMap<EdgeKey, f64>,
}

impl CostProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_map(map_id: impl Into<String>) -> Self {
        Self { map_id: Some(map_id.into()), ..Self::default() }
    }

    pub fn with_node_bonus(mut self, node: impl Into<String>, value: f64) -> Self {
        self.node_bonuses.insert(node.into(), value);
        self
    }

    pub fn with_node_penalty(mut self, node: impl Into<String>, value: f64) -> Self {
        self.node_penalties.insert(node.into(), value);
        self
    }

    pub fn with_edge_penalty(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        value: f64,
    ) -> Self {
        self.edge_penalties.insert(EdgeKey::new(from, to), value);
        self
    }

    pub fn node_bonus(&self, node: &str) -> f64 {
        self.node_bonuses.get(node).copied().unwrap_or(0.0)
    }

    pub fn node_penalty(&self, node: &str) -> f64 {
        self.node_penalties.get(node).copied().unwrap_or(0.0)
    }

    pub fn edge_penalty(&self, from: &str, to: &str) -> f64 {
        self.edge_penalties
            .get(&EdgeKey::new(from, to))
            .copied()
            .unwrap_or(0.0)
    }

    /// `true` if the profile adjusts nothing.
    pub fn is_empty(&self) -> bool {
        self.node_bonuses.is_empty()
            && self.node_penalties.is_empty()
            && self.edge_penalties.is_empty()
    }
}
