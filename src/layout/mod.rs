// Radar layout: RadarSnapshot -> RadarOutput.
//
// Goals:
// - Pure function of (quadrants, rings, blips, config); rebuilt from
//   scratch on every call, nothing cached between renders
// - One segment per (quadrant, ring) pair
// - Blips placed by their stored offsets, then one global collision pass
// - Stale quadrant/ring references fall back to defaults instead of failing
//
// Submodules:
// - geometry: polar math, sectors, bands, blip and label positions
// - segment_path: wedge outlines as SVG path data
// - collision: pairwise repulsion between markers
//
// Randomness only enters through the collision pass (coincident markers),
// via the rng handed in by the caller.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::RadarSnapshot;
use crate::output::{BlipOutput, LabelOutput, RadarOutput, SegmentOutput};

pub mod collision;
pub mod geometry;
pub mod segment_path;

use collision::resolve_collisions;
use geometry::{
    Padding, blip_position, quadrant_angles, quadrant_label_position, ring_band,
    ring_label_position,
};
use segment_path::arc_segment_path;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn distance(&self, other: &PointF) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Presentation tuning. Every field has a default, so a partial JSON object
/// from the frontend overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Width and height of the square canvas, in pixels.
    pub canvas_size: f64,
    /// Outer ring radius as a fraction of half the canvas. Leaves room for labels.
    pub radius_ratio: f64,
    /// Degrees kept clear on each side of a quadrant.
    pub angle_padding_deg: f64,
    /// Fraction of a ring's span kept clear on each side.
    pub radial_padding_ratio: f64,
    /// Quadrant label distance as a multiple of the outer radius.
    pub quadrant_label_ratio: f64,
    /// Direction along which ring labels are stacked.
    pub ring_label_angle_deg: f64,
    /// Markers closer than this are pushed apart.
    pub min_distance: f64,
    pub max_iterations: usize,
    /// Used when a blip points at a quadrant that no longer exists.
    pub fallback_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: 800.0,
            radius_ratio: 0.8,
            angle_padding_deg: 5.0,
            radial_padding_ratio: 0.1,
            quadrant_label_ratio: 1.3,
            ring_label_angle_deg: 45.0,
            min_distance: 20.0,
            max_iterations: 50,
            fallback_color: "#888".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn with_canvas_size(canvas_size: f64) -> Self {
        Self { canvas_size, ..Self::default() }
    }

    pub fn center(&self) -> PointF {
        PointF { x: self.canvas_size / 2.0, y: self.canvas_size / 2.0 }
    }

    pub fn radius(&self) -> f64 {
        self.canvas_size / 2.0 * self.radius_ratio
    }

    pub fn padding(&self) -> Padding {
        Padding {
            angle_deg: self.angle_padding_deg,
            radial_ratio: self.radial_padding_ratio,
        }
    }
}

pub fn layout_radar<R: Rng + ?Sized>(
    snapshot: &RadarSnapshot,
    cfg: &LayoutConfig,
    rng: &mut R,
) -> RadarOutput {
    let center = cfg.center();
    let radius = cfg.radius();
    let ring_count = snapshot.rings.len();
    let padding = cfg.padding();

    // Segments: quadrant-major, in input order.
    let mut segments = Vec::with_capacity(snapshot.quadrants.len() * ring_count);
    for quadrant in &snapshot.quadrants {
        let angles = quadrant_angles(quadrant.position);
        for ring in &snapshot.rings {
            let band = ring_band(ring.position, radius, ring_count);
            segments.push(SegmentOutput {
                quadrant_id: quadrant.id.clone(),
                ring_id: ring.id.clone(),
                path: arc_segment_path(center, band.inner, band.outer, angles.start, angles.end),
                color: quadrant.color.clone(),
                opacity: ring.opacity,
            });
        }
    }

    // Blips at their stored offsets.
    let mut blips: Vec<BlipOutput> = snapshot
        .blips
        .iter()
        .enumerate()
        .map(|(idx, blip)| {
            let quadrant = snapshot.quadrant(&blip.quadrant_id);
            let ring = snapshot.ring(&blip.ring_id);
            if quadrant.is_none() || ring.is_none() {
                debug!(blip = %blip.id, "blip references a missing quadrant or ring");
            }

            let position = blip_position(
                center,
                radius,
                quadrant.map_or(0, |q| q.position),
                ring.map_or(0, |r| r.position),
                ring_count,
                blip.offset_x,
                blip.offset_y,
                &padding,
            );

            BlipOutput {
                id: blip.id.clone(),
                name: blip.name.clone(),
                description: blip.description.clone(),
                is_new: blip.is_new,
                position,
                color: quadrant.map_or_else(|| cfg.fallback_color.clone(), |q| q.color.clone()),
                quadrant_name: quadrant.map(|q| q.name.clone()).unwrap_or_default(),
                ring_name: ring.map(|r| r.name.clone()).unwrap_or_default(),
                index: idx + 1,
            }
        })
        .collect();

    // One global collision pass across all quadrants.
    let mut positions: Vec<PointF> = blips.iter().map(|b| b.position).collect();
    let stats = resolve_collisions(&mut positions, cfg.min_distance, cfg.max_iterations, rng);
    for (blip, position) in blips.iter_mut().zip(positions) {
        blip.position = position;
    }

    let quadrant_labels = snapshot
        .quadrants
        .iter()
        .map(|q| LabelOutput {
            text: q.name.clone(),
            position: quadrant_label_position(center, radius, q.position, cfg.quadrant_label_ratio),
        })
        .collect();

    let ring_labels = snapshot
        .rings
        .iter()
        .map(|r| LabelOutput {
            text: r.name.clone(),
            position: ring_label_position(center, radius, r.position, ring_count, cfg.ring_label_angle_deg),
        })
        .collect();

    debug!(
        segments = segments.len(),
        blips = blips.len(),
        collision_passes = stats.iterations,
        converged = stats.converged,
        "radar layout built"
    );

    RadarOutput {
        size: cfg.canvas_size,
        center,
        radius,
        segments,
        positioned_blips: blips,
        quadrant_labels,
        ring_labels,
        error: None,
    }
}
