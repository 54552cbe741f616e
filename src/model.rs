//! Radar records as they arrive from the persistence layer.
//!
//! Field names are camelCase on the wire so the frontend's JSON
//! (`quadrantId`, `offsetX`, `isNew`) deserializes without mapping.

use serde::{Deserialize, Serialize};

/// One of the four fixed 90° sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quadrant {
    pub id: String,
    pub name: String,
    /// 0..=3, selects the angular sector.
    pub position: u8,
    /// `#RRGGBB`
    pub color: String,
}

/// A concentric band. Position 0 is innermost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub id: String,
    pub name: String,
    pub position: u32,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blip {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_is_new")]
    pub is_new: bool,
    pub quadrant_id: String,
    pub ring_id: String,
    /// Angular position inside the sector, 0 = sector start, 1 = sector end.
    pub offset_x: f64,
    /// Radial position inside the band, 0 = inner edge, 1 = outer edge.
    pub offset_y: f64,
}

fn default_is_new() -> bool {
    true
}

/// Everything the layout needs for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarSnapshot {
    #[serde(default)]
    pub quadrants: Vec<Quadrant>,
    #[serde(default)]
    pub rings: Vec<Ring>,
    #[serde(default)]
    pub blips: Vec<Blip>,
}

impl RadarSnapshot {
    pub fn quadrant(&self, id: &str) -> Option<&Quadrant> {
        self.quadrants.iter().find(|q| q.id == id)
    }

    pub fn ring(&self, id: &str) -> Option<&Ring> {
        self.rings.iter().find(|r| r.id == id)
    }
}

/// (name, position, color)
pub const DEFAULT_QUADRANTS: &[(&str, u8, &str)] = &[
    ("Techniques", 0, "#3b82f6"),
    ("Platforms", 1, "#10b981"),
    ("Tools", 2, "#f59e0b"),
    ("Languages & Frameworks", 3, "#ef4444"),
];

/// (name, position, opacity)
pub const DEFAULT_RINGS: &[(&str, u32, f64)] = &[
    ("Adopt", 0, 1.0),
    ("Trial", 1, 0.75),
    ("Assess", 2, 0.5),
    ("Hold", 3, 0.25),
];

/// Quadrants seeded into a freshly created radar. Ids are `{prefix}-q{position}`.
pub fn default_quadrants(id_prefix: &str) -> Vec<Quadrant> {
    DEFAULT_QUADRANTS
        .iter()
        .map(|&(name, position, color)| Quadrant {
            id: format!("{}-q{}", id_prefix, position),
            name: name.to_string(),
            position,
            color: color.to_string(),
        })
        .collect()
}

/// Rings seeded into a freshly created radar. Ids are `{prefix}-r{position}`.
pub fn default_rings(id_prefix: &str) -> Vec<Ring> {
    DEFAULT_RINGS
        .iter()
        .map(|&(name, position, opacity)| Ring {
            id: format!("{}-r{}", id_prefix, position),
            name: name.to_string(),
            position,
            opacity,
        })
        .collect()
}
