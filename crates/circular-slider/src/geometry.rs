//! Arc geometry around the slider circle.
//!
//! Angles are radians with 0 pointing up and growing clockwise on screen
//! (y grows downward), so a point at angle `θ` sits at `(r·sin θ, −r·cos θ)`.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::num::NonZeroUsize;

/// Forward overstep applied to the drawn end of every segment so adjacent
/// segment strokes overlap and no anti-aliasing seam shows between them.
pub const SEAM_OVERLAP: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Wraps any real angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

pub fn point_on_circle(radius: f64, angle: f64) -> Point {
    Point::new(radius * angle.sin(), -radius * angle.cos())
}

/// Angle of `pointer` as seen from `center`, in the slider's convention.
///
/// `atan2` measures from the +x axis; adding `π/2` moves the zero reference
/// up to 12 o'clock.
pub fn pointer_angle(center: Point, pointer: Point) -> f64 {
    let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
    normalize_angle(dy.atan2(dx) + FRAC_PI_2)
}

/// One of the equal angular subdivisions of the drawn arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub index: usize,
    pub from_angle: f64,
    pub to_angle: f64,
    pub from: Point,
    /// Drawn end point, overstepped by [`SEAM_OVERLAP`].
    pub to: Point,
    /// Exact end point of the segment.
    pub real_to: Point,
}

impl ArcSegment {
    /// Angle swept by the drawn path, overlap included.
    pub fn drawn_sweep(&self) -> f64 {
        self.to_angle + SEAM_OVERLAP - self.from_angle
    }
}

pub fn compute_arc_segment(
    index: usize,
    segments: NonZeroUsize,
    radius: f64,
    start_angle: f64,
    angle_length: f64,
) -> ArcSegment {
    let start_angle = normalize_angle(start_angle);
    let angle_length = normalize_angle(angle_length);
    let step = angle_length / segments.get() as f64;

    let from_angle = step * index as f64 + start_angle;
    let to_angle = step * (index + 1) as f64 + start_angle;

    ArcSegment {
        index,
        from_angle,
        to_angle,
        from: point_on_circle(radius, from_angle),
        to: point_on_circle(radius, to_angle + SEAM_OVERLAP),
        real_to: point_on_circle(radius, to_angle),
    }
}

pub fn arc_segments(
    segments: NonZeroUsize,
    radius: f64,
    start_angle: f64,
    angle_length: f64,
) -> impl Iterator<Item = ArcSegment> {
    (0..segments.get())
        .map(move |i| compute_arc_segment(i, segments, radius, start_angle, angle_length))
}

/// Binds a segment's path to its gradient definition.
pub fn gradient_id(index: usize) -> String {
    format!("gradient{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn segments(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{a} != {b}");
    }

    #[test]
    fn test_normalize_angle_range() {
        let cases = [
            -100.0,
            -TAU,
            -PI,
            -1e-18,
            0.0,
            PI,
            TAU,
            TAU + 0.25,
            7.5 * PI,
            1234.5678,
        ];

        for angle in cases {
            let n = normalize_angle(angle);
            assert!((0.0..TAU).contains(&n), "{angle} -> {n}");
        }

        assert_close(normalize_angle(-PI / 2.0), 3.0 * PI / 2.0);
        assert_close(normalize_angle(TAU + 1.0), 1.0);
        assert_eq!(normalize_angle(TAU), 0.0);
    }

    #[test]
    fn test_point_convention() {
        let up = point_on_circle(10.0, 0.0);
        assert_close(up.x, 0.0);
        assert_close(up.y, -10.0);

        let right = point_on_circle(10.0, PI / 2.0);
        assert_close(right.x, 10.0);
        assert_close(right.y, 0.0);

        let down = point_on_circle(10.0, PI);
        assert_close(down.x, 0.0);
        assert_close(down.y, 10.0);
    }

    #[test]
    fn test_pointer_angle() {
        let center = Point::new(100.0, 100.0);
        let cases = [
            (Point::new(100.0, 50.0), 0.0),
            (Point::new(150.0, 100.0), PI / 2.0),
            (Point::new(100.0, 150.0), PI),
            (Point::new(50.0, 100.0), 3.0 * PI / 2.0),
        ];

        for (pointer, expected) in cases {
            assert_close(pointer_angle(center, pointer), expected);
        }
    }

    #[test]
    fn test_segments_partition_arc() {
        let (start, length) = (1.2, 4.0);

        for n in 1..=12 {
            let segs: Vec<_> = arc_segments(segments(n), 145.0, start, length).collect();
            assert_eq!(segs.len(), n);
            assert_close(segs[0].from_angle, start);
            assert_close(segs[n - 1].to_angle, start + length);

            for pair in segs.windows(2) {
                assert_close(pair[0].to_angle, pair[1].from_angle);
                assert_close(pair[0].real_to.x, pair[1].from.x);
                assert_close(pair[0].real_to.y, pair[1].from.y);
            }
        }
    }

    #[test]
    fn test_segment_inputs_are_normalized() {
        let a = compute_arc_segment(2, segments(5), 100.0, 1.0 + TAU, 2.0 - TAU);
        let b = compute_arc_segment(2, segments(5), 100.0, 1.0, 2.0);
        assert_close(a.from_angle, b.from_angle);
        assert_close(a.to_angle, b.to_angle);
    }

    #[test]
    fn test_drawn_end_oversteps() {
        let seg = compute_arc_segment(0, segments(1), 100.0, 0.0, PI / 2.0);
        let overstep = point_on_circle(100.0, PI / 2.0 + SEAM_OVERLAP);

        assert_close(seg.real_to.x, 100.0);
        assert_close(seg.real_to.y, 0.0);
        assert_close(seg.to.x, overstep.x);
        assert_close(seg.to.y, overstep.y);
        assert!(seg.to.y > seg.real_to.y);
        assert_close(seg.drawn_sweep(), PI / 2.0 + SEAM_OVERLAP);
    }

    #[test]
    fn test_gradient_ids_are_distinct() {
        let ids: HashSet<_> = (0..64).map(gradient_id).collect();
        assert_eq!(ids.len(), 64);
        assert_eq!(gradient_id(3), "gradient3");
    }
}
