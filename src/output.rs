//! Output types for frontend consumption.
//!
//! These structs are serialized to JSON and handed to the presentation
//! layer, which draws them as SVG without further math.

use crate::layout::PointF;
use crate::layout::segment_path::SegmentPath;
use serde::Serialize;

/// Background wedge for one (quadrant, ring) pair
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentOutput {
    pub quadrant_id: String,
    pub ring_id: String,
    /// SVG path data
    pub path: SegmentPath,
    pub color: String,
    pub opacity: f64,
}

/// A blip with its final, collision-resolved position
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlipOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_new: bool,
    pub position: PointF,
    pub color: String,
    pub quadrant_name: String,
    pub ring_name: String,
    /// 1-based, drawn on the marker
    pub index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelOutput {
    pub text: String,
    pub position: PointF,
}

/// Error information for the frontend
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    /// Offending field, when the error is about one input value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), field: None }
    }
}

/// The combined render model sent to the frontend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarOutput {
    pub size: f64,
    pub center: PointF,
    pub radius: f64,
    pub segments: Vec<SegmentOutput>,
    pub positioned_blips: Vec<BlipOutput>,
    pub quadrant_labels: Vec<LabelOutput>,
    pub ring_labels: Vec<LabelOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl RadarOutput {
    /// Empty model carrying only an error, for inputs that could not be read.
    pub fn from_error(error: ErrorInfo) -> Self {
        Self {
            size: 0.0,
            center: PointF { x: 0.0, y: 0.0 },
            radius: 0.0,
            segments: vec![],
            positioned_blips: vec![],
            quadrant_labels: vec![],
            ring_labels: vec![],
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_output_shape() {
        let out = RadarOutput::from_error(ErrorInfo::new("bad input"));
        let json: serde_json::Value = serde_json::to_value(&out).unwrap();
        assert_eq!(json["error"]["message"], "bad input");
        assert!(json["error"].get("field").is_none());
        assert_eq!(json["positionedBlips"].as_array().unwrap().len(), 0);
    }
}
