// Polar geometry for the radar chart.
//
// Angles are degrees, counter-clockwise from 3 o'clock. Screen Y grows
// downward, so the sine term is subtracted.
//
//   position 1 | position 0
//   -----------+-----------
//   position 2 | position 3
//
// Rings split the total radius into equal bands, ring 0 innermost.

use super::PointF;

/// Angular extent of one quadrant, in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AngleRange {
    pub start: f64,
    pub end: f64,
}

impl AngleRange {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Linear map of `t` in [0, 1] onto the range.
    pub fn lerp(&self, t: f64) -> f64 {
        self.start + t * self.span()
    }
}

/// Radial extent of one ring, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RadiusBand {
    pub inner: f64,
    pub outer: f64,
}

impl RadiusBand {
    pub fn span(&self) -> f64 {
        self.outer - self.inner
    }

    pub fn mid(&self) -> f64 {
        (self.inner + self.outer) / 2.0
    }

    pub fn lerp(&self, t: f64) -> f64 {
        self.inner + t * self.span()
    }
}

/// Inset applied inside a segment so markers stay off its edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Padding {
    /// Degrees removed from each side of the angle range.
    pub angle_deg: f64,
    /// Fraction of the band span removed from each side of the band.
    pub radial_ratio: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self { angle_deg: 5.0, radial_ratio: 0.1 }
    }
}

impl Padding {
    pub fn apply_angle(&self, range: AngleRange) -> AngleRange {
        AngleRange {
            start: range.start + self.angle_deg,
            end: range.end - self.angle_deg,
        }
    }

    pub fn apply_band(&self, band: RadiusBand) -> RadiusBand {
        let inset = band.span() * self.radial_ratio;
        RadiusBand {
            inner: band.inner + inset,
            outer: band.outer - inset,
        }
    }
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn polar_to_cartesian(center: PointF, radius: f64, angle_deg: f64) -> PointF {
    if radius == 0.0 {
        return center;
    }
    let rad = deg_to_rad(angle_deg);
    PointF {
        x: center.x + radius * rad.cos(),
        y: center.y - radius * rad.sin(),
    }
}

/// Sector for a quadrant position. Positions 0..=3 partition the circle.
pub fn quadrant_angles(position: u8) -> AngleRange {
    let start = f64::from(position) * 90.0;
    AngleRange { start, end: start + 90.0 }
}

/// Band for a ring position. A ring count of 0 is treated as 1.
pub fn ring_band(position: u32, total_radius: f64, ring_count: usize) -> RadiusBand {
    let step = total_radius / ring_count.max(1) as f64;
    let p = f64::from(position);
    RadiusBand {
        inner: p * step,
        outer: (p + 1.0) * step,
    }
}

/// Pixel position of a blip inside its (quadrant, ring) segment.
///
/// Offsets are clamped to [0, 1] and mapped onto the padded sector and band,
/// so even the extreme offsets stay clear of the segment boundary.
#[allow(clippy::too_many_arguments)]
pub fn blip_position(
    center: PointF,
    total_radius: f64,
    quadrant_position: u8,
    ring_position: u32,
    ring_count: usize,
    offset_x: f64,
    offset_y: f64,
    padding: &Padding,
) -> PointF {
    let angles = padding.apply_angle(quadrant_angles(quadrant_position));
    let band = padding.apply_band(ring_band(ring_position, total_radius, ring_count));

    let angle = angles.lerp(offset_x.clamp(0.0, 1.0));
    let radius = band.lerp(offset_y.clamp(0.0, 1.0));
    polar_to_cartesian(center, radius, angle)
}

/// Quadrant labels sit outside the outermost ring at the sector's mid angle.
pub fn quadrant_label_position(
    center: PointF,
    total_radius: f64,
    quadrant_position: u8,
    radius_ratio: f64,
) -> PointF {
    let angle = quadrant_angles(quadrant_position).mid();
    polar_to_cartesian(center, total_radius * radius_ratio, angle)
}

/// Ring labels sit at the band's mid radius along a fixed diagonal.
pub fn ring_label_position(
    center: PointF,
    total_radius: f64,
    ring_position: u32,
    ring_count: usize,
    angle_deg: f64,
) -> PointF {
    let band = ring_band(ring_position, total_radius, ring_count);
    polar_to_cartesian(center, band.mid(), angle_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn center() -> PointF {
        PointF { x: 400.0, y: 400.0 }
    }

    #[test]
    fn test_deg_to_rad() {
        assert!(approx(deg_to_rad(0.0), 0.0));
        assert!(approx(deg_to_rad(90.0), PI / 2.0));
        assert!(approx(deg_to_rad(360.0), 2.0 * PI));
        assert!(approx(deg_to_rad(-180.0), -PI));
        assert!(approx(deg_to_rad(720.0), 4.0 * PI));
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let c = PointF { x: 0.0, y: 0.0 };
        let east = polar_to_cartesian(c, 100.0, 0.0);
        assert!(approx(east.x, 100.0) && approx(east.y, 0.0));

        // 90° points up on screen, which is negative y
        let north = polar_to_cartesian(c, 100.0, 90.0);
        assert!(north.x.abs() < 1e-6);
        assert!(approx(north.y, -100.0));
    }

    #[test]
    fn test_zero_radius_is_center() {
        for angle in [-450.0, -90.0, 0.0, 33.3, 180.0, 359.9, 1000.0] {
            assert_eq!(polar_to_cartesian(center(), 0.0, angle), center());
        }
    }

    #[test]
    fn test_quadrant_angles_partition_circle() {
        let mut expected_start = 0.0;
        for p in 0..4u8 {
            let range = quadrant_angles(p);
            assert_eq!(range.start, expected_start);
            assert_eq!(range.span(), 90.0);
            expected_start = range.end;
        }
        assert_eq!(expected_start, 360.0);
    }

    #[test]
    fn test_ring_band_partitions_radius() {
        for n in 1..=6usize {
            let mut prev_outer = 0.0;
            for p in 0..n as u32 {
                let band = ring_band(p, 320.0, n);
                assert!(approx(band.inner, prev_outer));
                assert!(band.outer > band.inner);
                prev_outer = band.outer;
            }
            assert!(approx(ring_band(0, 320.0, n).inner, 0.0));
            assert!(approx(prev_outer, 320.0));
        }
    }

    #[test]
    fn test_ring_band_zero_count_does_not_divide_by_zero() {
        let band = ring_band(0, 320.0, 0);
        assert_eq!(band, RadiusBand { inner: 0.0, outer: 320.0 });
    }

    #[test]
    fn test_blip_midpoint_inside_padded_segment() {
        let padding = Padding::default();
        for q in 0..4u8 {
            for r in 0..4u32 {
                let p = blip_position(center(), 320.0, q, r, 4, 0.5, 0.5, &padding);
                let dx = p.x - 400.0;
                let dy = 400.0 - p.y;
                let radius = (dx * dx + dy * dy).sqrt();
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);

                let angles = padding.apply_angle(quadrant_angles(q));
                let band = padding.apply_band(ring_band(r, 320.0, 4));
                assert!(angle > angles.start && angle < angles.end, "q{} r{} angle {}", q, r, angle);
                assert!(radius > band.inner && radius < band.outer, "q{} r{} radius {}", q, r, radius);
            }
        }
    }

    #[test]
    fn test_blip_extreme_offsets_stay_off_boundary() {
        let padding = Padding::default();
        let lo = blip_position(center(), 320.0, 0, 1, 4, 0.0, 0.0, &padding);
        let hi = blip_position(center(), 320.0, 0, 1, 4, 1.0, 1.0, &padding);

        let radius = |p: PointF| ((p.x - 400.0).powi(2) + (p.y - 400.0).powi(2)).sqrt();
        // band for ring 1 of 4 is [80, 160], padded [88, 152]
        assert!((radius(lo) - 88.0).abs() < 1e-6);
        assert!((radius(hi) - 152.0).abs() < 1e-6);
        assert!(radius(lo) > 80.0 && radius(hi) < 160.0);

        // angle 5° and 85°: never on the 0°/90° sector edges
        assert!(lo.y < 400.0);
        assert!(hi.x > 400.0);
    }

    #[test]
    fn test_blip_offsets_out_of_range_are_clamped() {
        let padding = Padding::default();
        let clamped = blip_position(center(), 320.0, 2, 3, 4, 1.0, 0.0, &padding);
        let wild = blip_position(center(), 320.0, 2, 3, 4, 7.5, -2.0, &padding);
        assert_eq!(clamped, wild);
    }

    #[test]
    fn test_blip_position_differs_per_segment() {
        let padding = Padding::default();
        let mut seen: Vec<PointF> = Vec::new();
        for q in 0..4u8 {
            for r in 0..4u32 {
                let p = blip_position(center(), 320.0, q, r, 4, 0.5, 0.5, &padding);
                for other in &seen {
                    assert!(p.distance(other) > 0.0);
                }
                seen.push(p);
            }
        }
    }

    #[test]
    fn test_innermost_blip_matches_reference_point() {
        let p = blip_position(center(), 320.0, 0, 0, 4, 0.5, 0.5, &Padding::default());
        let expected = polar_to_cartesian(center(), 40.0, 45.0);
        assert!(p.distance(&expected) < 1e-9);
    }

    #[test]
    fn test_quadrant_labels_outside_rings() {
        for q in 0..4u8 {
            let p = quadrant_label_position(center(), 320.0, q, 1.3);
            assert!((p.distance(&center()) - 416.0).abs() < 1e-9);
        }
        let top_right = quadrant_label_position(center(), 320.0, 0, 1.3);
        assert!(top_right.x > 400.0 && top_right.y < 400.0);
        let bottom_left = quadrant_label_position(center(), 320.0, 2, 1.3);
        assert!(bottom_left.x < 400.0 && bottom_left.y > 400.0);
    }

    #[test]
    fn test_ring_labels_stack_along_diagonal() {
        let inner = ring_label_position(center(), 320.0, 0, 4, 45.0);
        let outer = ring_label_position(center(), 320.0, 3, 4, 45.0);
        assert!((inner.distance(&center()) - 40.0).abs() < 1e-9);
        assert!((outer.distance(&center()) - 280.0).abs() < 1e-9);
        // on the 45° diagonal, x offset equals negated y offset
        assert!(((outer.x - 400.0) + (outer.y - 400.0)).abs() < 1e-9);
    }
}
