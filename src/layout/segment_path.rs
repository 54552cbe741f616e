// Closed path outlining one (quadrant, ring) wedge.
//
// - Inner radius 0: pie slice. Center -> outer start -> arc -> close.
// - Otherwise: annular wedge. Outer arc one way, inner arc back the other
//   way, joined by the two radial edges.
//
// Commands render to SVG path data via `Display`.

use std::fmt;

use serde::{Serialize, Serializer};

use super::PointF;
use super::geometry::polar_to_cartesian;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(PointF),
    LineTo(PointF),
    /// Circular arc of the given radius ending at `to`.
    /// `sweep = false` runs counter-clockwise on screen.
    Arc { radius: f64, large_arc: bool, sweep: bool, to: PointF },
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPath {
    pub commands: Vec<PathCommand>,
}

impl SegmentPath {
    pub fn is_pie_slice(&self) -> bool {
        matches!(self.commands.first(), Some(PathCommand::MoveTo(_)))
            && self.commands.iter().filter(|c| matches!(c, PathCommand::Arc { .. })).count() == 1
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::Arc { radius, large_arc, sweep, to } => write!(
                f,
                "A {} {} 0 {} {} {} {}",
                radius,
                radius,
                u8::from(*large_arc),
                u8::from(*sweep),
                to.x,
                to.y
            ),
            PathCommand::Close => write!(f, "Z"),
        }
    }
}

impl fmt::Display for SegmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", cmd)?;
        }
        Ok(())
    }
}

/// Serialized as SVG path data so the frontend can drop it into `<path d>`.
impl Serialize for SegmentPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn arc_segment_path(
    center: PointF,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> SegmentPath {
    let large_arc = end_angle - start_angle > 180.0;
    let outer_start = polar_to_cartesian(center, outer_radius, start_angle);
    let outer_end = polar_to_cartesian(center, outer_radius, end_angle);

    let commands = if inner_radius == 0.0 {
        vec![
            PathCommand::MoveTo(center),
            PathCommand::LineTo(outer_start),
            PathCommand::Arc { radius: outer_radius, large_arc, sweep: false, to: outer_end },
            PathCommand::Close,
        ]
    } else {
        let inner_start = polar_to_cartesian(center, inner_radius, start_angle);
        let inner_end = polar_to_cartesian(center, inner_radius, end_angle);
        vec![
            PathCommand::MoveTo(outer_start),
            PathCommand::Arc { radius: outer_radius, large_arc, sweep: false, to: outer_end },
            PathCommand::LineTo(inner_end),
            PathCommand::Arc { radius: inner_radius, large_arc, sweep: true, to: inner_start },
            PathCommand::Close,
        ]
    };

    SegmentPath { commands }
}
