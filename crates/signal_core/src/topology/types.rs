use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque intersection identifier (e.g. `"I01"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntersectionId(pub String);

impl IntersectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IntersectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IntersectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for IntersectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque road identifier. Roads added without an explicit id get `"{from}->{to}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadId(pub String);

impl RoadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoadId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RoadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Default road id for a directed edge.
pub fn road_id_for(from: &str, to: &str) -> RoadId {
    RoadId(format!("{from}->{to}"))
}

/// Planar position of an intersection. `lat` doubles as the Z coordinate and
/// `lng` as the X coordinate in grid layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    #[serde(rename = "intersection_id")]
    pub id: IntersectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Intersection {
    pub fn new(id: impl Into<IntersectionId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            position: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, lat: f64, lng: f64) -> Self {
        self.position = Some(Position { lat, lng });
        self
    }
}

/// A directed road from one intersection to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    #[serde(rename = "road_id")]
    pub id: RoadId,
    pub from: IntersectionId,
    pub to: IntersectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Road {
    /// A road with the conventional `"{from}->{to}"` id.
    pub fn between(from: impl Into<IntersectionId>, to: impl Into<IntersectionId>) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            id: road_id_for(from.as_str(), to.as_str()),
            from,
            to,
            length_m: None,
            name: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<RoadId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_length(mut self, length_m: f64) -> Self {
        self.length_m = Some(length_m);
        self
    }
}
