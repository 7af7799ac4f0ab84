//! Circle geometry for score rings.
//!
//! Angles are measured in degrees from 12 o'clock and grow clockwise, so a
//! value sweeps from the top of the ring towards the right.

use std::fmt;
use std::iter::FusedIterator;

/// Horizontal gap left between the two ends of a full ring.
pub const FULL_CIRCLE_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Point at `degrees` on the circle around `center`.
pub fn polar_point(center: Point, radius: f64, degrees: f64) -> Point {
    let a = (90.0 - degrees).to_radians();
    Point::new(center.x + radius * a.cos(), center.y - radius * a.sin())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcKind {
    Partial,
    FullCircle,
}

/// A single clockwise arc starting at the top of its circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathDescription {
    pub center: Point,
    pub radius: f64,
    pub start: Point,
    pub end: Point,
    pub sweep_degrees: f64,
    pub large_arc: bool,
    pub clockwise: bool,
    pub kind: ArcKind,
}

impl PathDescription {
    pub fn is_full_circle(&self) -> bool {
        self.kind == ArcKind::FullCircle
    }

    /// True when the arc sweeps nothing and would draw as a zero-length path.
    pub fn is_degenerate(&self) -> bool {
        self.kind == ArcKind::Partial && self.sweep_degrees <= 0.0
    }
}

/// SVG path data: `M sx sy A r r 0 large sweep ex ey`.
impl fmt::Display for PathDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {} {} 0 {} {} {} {}",
            Num(self.start.x),
            Num(self.start.y),
            Num(self.radius),
            Num(self.radius),
            u8::from(self.large_arc),
            u8::from(self.clockwise),
            Num(self.end.x),
            Num(self.end.y),
        )
    }
}

/// Arc for `value` out of `total` on a circle of `radius`.
///
/// `value == total` cannot be written as one arc command (start and end
/// would coincide), so the full ring stops [`FULL_CIRCLE_EPSILON`] short of
/// its start point with the large-arc flag set.
///
/// A `total` that is not positive yields an empty arc at the start point.
pub fn arc_path(center: Point, value: f64, total: f64, radius: f64) -> PathDescription {
    let start = Point::new(center.x, center.y - radius);

    if !(total > 0.0) {
        return PathDescription {
            center,
            radius,
            start,
            end: start,
            sweep_degrees: 0.0,
            large_arc: false,
            clockwise: true,
            kind: ArcKind::Partial,
        };
    }

    if value == total {
        return PathDescription {
            center,
            radius,
            start,
            end: Point::new(center.x - FULL_CIRCLE_EPSILON, start.y),
            sweep_degrees: 360.0,
            large_arc: true,
            clockwise: true,
            kind: ArcKind::FullCircle,
        };
    }

    let alpha = 360.0 * value / total;
    PathDescription {
        center,
        radius,
        start,
        end: polar_point(center, radius, alpha),
        sweep_degrees: alpha,
        large_arc: alpha > 180.0,
        clockwise: true,
        kind: ArcKind::Partial,
    }
}

/// `density` evenly spaced marks on a circle of `radius + compensation`.
///
/// `compensation` nudges the perceived radius of the marks without touching
/// the stroke geometry of the ring they decorate.
pub fn tick_positions(center: Point, radius: f64, density: usize, compensation: f64) -> TickRing {
    TickRing {
        center,
        radius: radius + compensation,
        density,
    }
}

/// A ring of tick marks. Iterating it is lazy and can be repeated; marks
/// come out in angular order starting at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRing {
    center: Point,
    radius: f64,
    density: usize,
}

impl TickRing {
    pub fn center(&self) -> Point {
        self.center
    }

    /// Effective radius, compensation included.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.density
    }

    pub fn is_empty(&self) -> bool {
        self.density == 0
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        (index < self.density).then(|| {
            let alpha = 360.0 * index as f64 / self.density as f64;
            polar_point(self.center, self.radius, alpha)
        })
    }

    pub fn iter(&self) -> Ticks {
        Ticks {
            ring: *self,
            front: 0,
            back: self.density,
        }
    }
}

impl IntoIterator for TickRing {
    type Item = Point;
    type IntoIter = Ticks;

    fn into_iter(self) -> Ticks {
        self.iter()
    }
}

impl IntoIterator for &TickRing {
    type Item = Point;
    type IntoIter = Ticks;

    fn into_iter(self) -> Ticks {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Ticks {
    ring: TickRing,
    front: usize,
    back: usize,
}

impl Iterator for Ticks {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.front >= self.back {
            return None;
        }
        let point = self.ring.get(self.front);
        self.front += 1;
        point
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Ticks {
    fn next_back(&mut self) -> Option<Point> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.ring.get(self.back)
    }
}

impl ExactSizeIterator for Ticks {}

impl FusedIterator for Ticks {}

/// Compact number formatting for markup: at most four decimals, no
/// trailing zeros, no negative zero.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 10_000.0).round() / 10_000.0;
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        let text = format!("{rounded:.4}");
        f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;
    const CENTER: Point = Point::new(150.0, 150.0);

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn test_polar_point_quadrants() {
        let cases = vec![
            (0.0, Point::new(150.0, 50.0)),
            (90.0, Point::new(250.0, 150.0)),
            (180.0, Point::new(150.0, 250.0)),
            (270.0, Point::new(50.0, 150.0)),
        ];

        for (degrees, expected) in cases {
            assert_close(polar_point(CENTER, 100.0, degrees), expected);
        }
    }

    #[test]
    fn test_quarter_arc() {
        let path = arc_path(CENTER, 25.0, 100.0, 100.0);
        assert_eq!(path.kind, ArcKind::Partial);
        assert_close(path.start, Point::new(150.0, 50.0));
        assert_close(path.end, Point::new(250.0, 150.0));
        assert!(!path.large_arc);
        assert!(path.clockwise);
        assert_eq!(path.to_string(), "M 150 50 A 100 100 0 0 1 250 150");
    }

    #[test]
    fn test_large_arc_flag_switches_past_half() {
        assert!(!arc_path(CENTER, 50.0, 100.0, 80.0).large_arc);
        assert!(arc_path(CENTER, 50.5, 100.0, 80.0).large_arc);
        assert!(arc_path(CENTER, 75.0, 100.0, 80.0).large_arc);
    }

    #[test]
    fn test_full_circle_is_not_zero_length() {
        let path = arc_path(CENTER, 100.0, 100.0, 128.0);
        assert!(path.is_full_circle());
        assert!(path.large_arc);
        assert!(path.clockwise);
        assert!(path.start.distance(path.end) > 0.0);
        assert!((path.start.x - path.end.x - FULL_CIRCLE_EPSILON).abs() < EPS);
        assert_eq!(path.start.y, path.end.y);
        assert_eq!(path.to_string(), "M 150 22 A 128 128 0 1 1 149.99 22");
    }

    #[test]
    fn test_zero_value_is_degenerate() {
        let path = arc_path(CENTER, 0.0, 100.0, 50.0);
        assert!(path.is_degenerate());
        assert!(!arc_path(CENTER, 1.0, 100.0, 50.0).is_degenerate());
    }

    #[test]
    fn test_non_positive_total_is_an_empty_arc() {
        for total in [0.0, -100.0, f64::NAN] {
            let path = arc_path(CENTER, 25.0, total, 50.0);
            assert!(path.is_degenerate());
            assert_eq!(path.start, path.end);
            assert!(path.end.x.is_finite() && path.end.y.is_finite());
            assert_eq!(path.to_string(), "M 150 100 A 50 50 0 0 1 150 100");
        }
    }

    #[test]
    fn test_tick_ring_is_restartable() {
        let ring = tick_positions(CENTER, 100.0, 4, 2.0);
        let first: Vec<_> = ring.iter().collect();
        let second: Vec<_> = ring.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_close(first[0], Point::new(150.0, 48.0));
        assert_close(first[1], Point::new(252.0, 150.0));
    }

    #[test]
    fn test_tick_ring_iterates_backwards_too() {
        let ring = tick_positions(CENTER, 10.0, 3, 0.0);
        let mut forward: Vec<_> = ring.iter().collect();
        let backward: Vec<_> = ring.iter().rev().collect();
        forward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(ring.iter().len(), 3);
    }

    #[test]
    fn test_empty_tick_ring() {
        let ring = tick_positions(CENTER, 10.0, 0, 3.0);
        assert!(ring.is_empty());
        assert_eq!(ring.iter().next(), None);
        assert_eq!(ring.get(0), None);
    }

    #[test]
    fn test_num_formatting() {
        let cases = vec![
            (150.0, "150"),
            (149.99, "149.99"),
            (-0.00001, "0"),
            (1.0 / 3.0, "0.3333"),
            (-2.5, "-2.5"),
        ];

        for (value, expected) in cases {
            assert_eq!(Num(value).to_string(), expected);
        }
    }

    proptest! {
        #[test]
        fn large_arc_iff_more_than_half(total in 1.0f64..1000.0, frac in 0.001f64..0.999) {
            let value = total * frac;
            let path = arc_path(CENTER, value, total, 90.0);
            prop_assert_eq!(path.large_arc, 360.0 * value / total > 180.0);
            prop_assert_eq!(path.kind, ArcKind::Partial);
        }

        #[test]
        fn arc_end_stays_on_circle(value in 0.0f64..100.0, radius in 1.0f64..500.0) {
            let path = arc_path(CENTER, value, 100.0, radius);
            prop_assert!((path.end.distance(CENTER) - radius).abs() < 1e-6);
            prop_assert!((path.start.distance(CENTER) - radius).abs() < 1e-6);
        }

        #[test]
        fn ticks_sit_on_compensated_radius(
            radius in 1.0f64..400.0,
            density in 1usize..400,
            compensation in -5.0f64..5.0,
        ) {
            let ring = tick_positions(CENTER, radius, density, compensation);
            let points: Vec<_> = ring.iter().collect();
            prop_assert_eq!(points.len(), density);
            for p in &points {
                prop_assert!((p.distance(CENTER) - (radius + compensation).abs()).abs() < 1e-6);
            }
            let top = Point::new(CENTER.x, CENTER.y - (radius + compensation));
            prop_assert!(points[0].distance(top) < 1e-6);
        }
    }
}
